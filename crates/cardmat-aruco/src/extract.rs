//! Border stripping and polarity normalization.

use cardmat_core::GrayImage;

use crate::{BitMatrix, ExtractError, MarkerDictionary};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Intensities strictly below this value are foreground (`1`).
pub const FOREGROUND_THRESHOLD: u8 = 128;

pub(crate) fn check_id<D: MarkerDictionary + ?Sized>(dict: &D, id: u32) -> Result<(), ExtractError> {
    let count = dict.len();
    if (id as usize) >= count {
        return Err(ExtractError::InvalidMarkerId { id, count });
    }
    Ok(())
}

fn canonical_image<D: MarkerDictionary + ?Sized>(
    dict: &D,
    id: u32,
) -> Result<GrayImage, ExtractError> {
    check_id(dict, id)?;
    let img = dict.bits_for(id).ok_or(ExtractError::InvalidMarkerId {
        id,
        count: dict.len(),
    })?;
    let expected = dict.side_cells();
    if img.width != expected || img.height != expected {
        return Err(ExtractError::MalformedImage {
            expected,
            width: img.width,
            height: img.height,
        });
    }
    Ok(img)
}

/// Interior bit matrix of marker `id`, border stripped, `1` = dark (raised).
#[cfg_attr(feature = "tracing", instrument(level = "debug", skip(dict), fields(dictionary = dict.name())))]
pub fn extract<D: MarkerDictionary + ?Sized>(dict: &D, id: u32) -> Result<BitMatrix, ExtractError> {
    let img = canonical_image(dict, id)?;
    let n = dict.interior_size();
    let border = dict.border_width();

    let mut bits = Vec::with_capacity(n * n);
    for row in 0..n {
        let start = (border + row) * img.width + border;
        bits.extend(
            img.data[start..start + n]
                .iter()
                .map(|&v| u8::from(v < FOREGROUND_THRESHOLD)),
        );
    }

    let matrix = BitMatrix::from_bits(n, bits).ok_or(ExtractError::MalformedImage {
        expected: dict.side_cells(),
        width: img.width,
        height: img.height,
    })?;
    log::debug!(
        "extracted marker {id} from {}: {}x{} interior, {} raised cells",
        dict.name(),
        n,
        n,
        matrix.count_ones()
    );
    Ok(matrix)
}

/// Marker raster with each cell scaled to `px_per_cell x px_per_cell` pixels.
///
/// The result includes the border and is ready to be placed on a page.
pub fn render_marker<D: MarkerDictionary + ?Sized>(
    dict: &D,
    id: u32,
    px_per_cell: usize,
) -> Result<GrayImage, ExtractError> {
    if px_per_cell == 0 {
        return Err(ExtractError::InvalidCellSize);
    }
    let img = canonical_image(dict, id)?;
    img.upscale_nearest(px_per_cell)
        .ok_or(ExtractError::ImageTooLarge {
            cells: img.width,
            px_per_cell,
        })
}

/// Smallest `px_per_cell` whose rendered marker is at least `min_side_px` wide.
pub fn px_per_cell_for<D: MarkerDictionary + ?Sized>(dict: &D, min_side_px: usize) -> usize {
    let cells = dict.side_cells().max(1);
    min_side_px.div_ceil(cells).max(1)
}
