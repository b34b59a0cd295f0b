use cardmat_aruco::ExtractError;
use cardmat_layout::LayoutError;

/// Errors returned while composing or writing a mat.
#[derive(thiserror::Error, Debug)]
pub enum PrintError {
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error("page size must be positive, got {width_mm} x {height_mm} mm")]
    InvalidPage { width_mm: f64, height_mm: f64 },
    #[error(
        "mat needs {extent_w:.1} x {extent_h:.1} mm but the page is {page_w:.1} x {page_h:.1} mm"
    )]
    PageOverflow {
        extent_w: f64,
        extent_h: f64,
        page_w: f64,
        page_h: f64,
    },
    #[error("dpi must be positive, got {0}")]
    InvalidDpi(f64),
    #[error("page raster of {width}x{height} px at {dpi} dpi exceeds the pixel limit")]
    RasterTooLarge {
        width: usize,
        height: usize,
        dpi: f64,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Png(#[from] png::EncodingError),
}
