//! Validated description of one physical marker.

use cardmat_core::units::mm_to_px;
use cardmat_core::GrayImage;
use serde::Serialize;

use crate::extract::check_id;
use crate::{render_marker, ExtractError, MarkerDictionary};

/// A dictionary id paired with the printed side length of the marker
/// (border included).
///
/// Only constructible through [`MarkerSpec::new`], so the id is always valid
/// for the dictionary it was checked against and the size is positive.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MarkerSpec {
    id: u32,
    size_mm: f64,
}

impl MarkerSpec {
    pub fn new<D: MarkerDictionary + ?Sized>(
        dict: &D,
        id: u32,
        size_mm: f64,
    ) -> Result<Self, ExtractError> {
        check_id(dict, id)?;
        if !size_mm.is_finite() || size_mm <= 0.0 {
            return Err(ExtractError::InvalidMarkerSize(size_mm));
        }
        Ok(Self { id, size_mm })
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn size_mm(&self) -> f64 {
        self.size_mm
    }

    /// Side of one cell in millimeters.
    #[inline]
    pub fn cell_mm<D: MarkerDictionary + ?Sized>(&self, dict: &D) -> f64 {
        self.size_mm / dict.side_cells().max(1) as f64
    }

    /// Whole pixels per cell at `dpi`, at least one.
    pub fn px_per_cell<D: MarkerDictionary + ?Sized>(
        &self,
        dict: &D,
        dpi: f64,
    ) -> Result<usize, ExtractError> {
        if !dpi.is_finite() || dpi <= 0.0 {
            return Err(ExtractError::InvalidDpi(dpi));
        }
        // saturating float->int cast; oversize is caught when rendering
        Ok((mm_to_px(self.cell_mm(dict), dpi).round() as usize).max(1))
    }

    /// Render at `dpi`, rounding the cell size to whole pixels.
    pub fn render<D: MarkerDictionary + ?Sized>(
        &self,
        dict: &D,
        dpi: f64,
    ) -> Result<GrayImage, ExtractError> {
        render_marker(dict, self.id, self.px_per_cell(dict, dpi)?)
    }
}
