//! Marker dictionary capability and concrete dictionaries.

use calib_targets_aruco::{builtins, Dictionary};
use cardmat_core::GrayImage;

use crate::ExtractError;

/// Name of the embedded dictionary used for the scanning mat.
pub const ARUCO_MIP_36H12: &str = "DICT_ARUCO_MIP_36h12";

/// OpenCV draws a one-cell black border around the code bits.
const DEFAULT_BORDER_WIDTH: usize = 1;

/// Largest interior that still packs into a `u64` code.
const MAX_INTERIOR_SIZE: usize = 8;

/// Read-only table from marker id to its canonical bit image.
///
/// `bits_for(id)` returns a square image of `side_cells()` pixels per side, one
/// pixel per cell: `0` (black) for foreground, `255` (white) for background.
/// The outer `border_width()` ring is the marker border.
pub trait MarkerDictionary {
    fn name(&self) -> &str;

    /// Number of code cells per side (6 for 36-bit families).
    fn interior_size(&self) -> usize;

    /// Border width in cells.
    fn border_width(&self) -> usize;

    /// Number of assignable ids; valid ids are `0..len()`.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Canonical image for `id`, or `None` if `id` is out of range.
    fn bits_for(&self, id: u32) -> Option<GrayImage>;

    /// Total cells per side including the border.
    #[inline]
    fn side_cells(&self) -> usize {
        self.interior_size() + 2 * self.border_width()
    }
}

/// Render a row-major code (`idx = row * n + col`, black = 1) as a canonical
/// one-pixel-per-cell marker image with a black border of `border` cells.
pub fn canonical_image_from_code(code: u64, n: usize, border: usize) -> GrayImage {
    let side = n + 2 * border;
    let mut img = GrayImage::new(side, side, 0);
    for row in 0..n {
        for col in 0..n {
            let black = (code >> (row * n + col)) & 1 == 1;
            img.set(border + col, border + row, if black { 0 } else { 255 });
        }
    }
    img
}

/// One of the dictionaries embedded in `calib-targets-aruco`.
#[derive(Clone, Copy, Debug)]
pub struct BuiltinDictionary {
    dict: Dictionary,
}

impl BuiltinDictionary {
    /// Look up an embedded dictionary by its OpenCV name (e.g. `DICT_4X4_50`).
    pub fn by_name(name: &str) -> Result<Self, ExtractError> {
        let dict = builtins::builtin_dictionary(name)
            .ok_or_else(|| ExtractError::UnknownDictionary(name.to_string()))?;
        if dict.marker_size == 0 || dict.marker_size > MAX_INTERIOR_SIZE {
            return Err(ExtractError::UnsupportedInteriorSize(dict.marker_size));
        }
        Ok(Self { dict })
    }

    /// The 250-marker, 6x6 ARUCO_MIP_36h12 dictionary.
    pub fn aruco_mip_36h12() -> Result<Self, ExtractError> {
        Self::by_name(ARUCO_MIP_36H12)
    }

    /// Underlying embedded dictionary (for matching with `calib_targets_aruco::Matcher`).
    #[inline]
    pub fn inner(&self) -> Dictionary {
        self.dict
    }

    /// Packed code of `id`.
    #[inline]
    pub fn code(&self, id: u32) -> Option<u64> {
        self.dict.codes.get(id as usize).copied()
    }
}

impl MarkerDictionary for BuiltinDictionary {
    fn name(&self) -> &str {
        self.dict.name
    }

    fn interior_size(&self) -> usize {
        self.dict.marker_size
    }

    fn border_width(&self) -> usize {
        DEFAULT_BORDER_WIDTH
    }

    fn len(&self) -> usize {
        self.dict.codes.len()
    }

    fn bits_for(&self, id: u32) -> Option<GrayImage> {
        let code = self.code(id)?;
        Some(canonical_image_from_code(
            code,
            self.dict.marker_size,
            DEFAULT_BORDER_WIDTH,
        ))
    }
}

/// Dictionary with owned codes, for custom families and tests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeDictionary {
    name: String,
    interior_size: usize,
    border_width: usize,
    codes: Vec<u64>,
}

impl CodeDictionary {
    pub fn new(
        name: impl Into<String>,
        interior_size: usize,
        border_width: usize,
        codes: Vec<u64>,
    ) -> Result<Self, ExtractError> {
        if interior_size == 0 || interior_size > MAX_INTERIOR_SIZE {
            return Err(ExtractError::UnsupportedInteriorSize(interior_size));
        }
        let bits = interior_size * interior_size;
        if bits < u64::BITS as usize {
            if let Some((index, &code)) = codes.iter().enumerate().find(|(_, c)| **c >> bits != 0) {
                return Err(ExtractError::CodeOutOfRange { index, code, bits });
            }
        }
        Ok(Self {
            name: name.into(),
            interior_size,
            border_width,
            codes,
        })
    }
}

impl MarkerDictionary for CodeDictionary {
    fn name(&self) -> &str {
        &self.name
    }

    fn interior_size(&self) -> usize {
        self.interior_size
    }

    fn border_width(&self) -> usize {
        self.border_width
    }

    fn len(&self) -> usize {
        self.codes.len()
    }

    fn bits_for(&self, id: u32) -> Option<GrayImage> {
        let code = *self.codes.get(id as usize)?;
        Some(canonical_image_from_code(
            code,
            self.interior_size,
            self.border_width,
        ))
    }
}
