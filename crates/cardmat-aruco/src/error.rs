/// Errors returned by dictionary lookup, bit extraction and marker rendering.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ExtractError {
    #[error("marker id {id} is out of range (dictionary has {count} markers)")]
    InvalidMarkerId { id: u32, count: usize },
    #[error("unknown marker dictionary `{0}`")]
    UnknownDictionary(String),
    #[error("marker image is {width}x{height}, expected {expected}x{expected}")]
    MalformedImage {
        expected: usize,
        width: usize,
        height: usize,
    },
    #[error("pixels per cell must be > 0")]
    InvalidCellSize,
    #[error("interior size {0} is unsupported (must be in 1..=8)")]
    UnsupportedInteriorSize(usize),
    #[error("code {index} ({code:#x}) has bits set beyond the {bits} marker bits")]
    CodeOutOfRange { index: usize, code: u64, bits: usize },
    #[error("marker size must be a positive finite length, got {0} mm")]
    InvalidMarkerSize(f64),
    #[error("dpi must be positive and finite, got {0}")]
    InvalidDpi(f64),
    #[error("marker raster of {cells} cells at {px_per_cell} px per cell exceeds the pixel limit")]
    ImageTooLarge { cells: usize, px_per_cell: usize },
}
