//! Marker dictionaries and bit-matrix extraction for printed/fabricated markers.
//!
//! This crate focuses on:
//! - a small capability trait over marker dictionaries ([`MarkerDictionary`]),
//! - an adapter for the dictionaries embedded in `calib-targets-aruco`
//!   (ARUCO_MIP_36h12 is the one the scanning mat uses),
//! - stripping the marker border and normalizing the interior into a
//!   [`BitMatrix`] where `1` means "mark present" (raised) and `0` means
//!   background (recessed),
//! - [`MarkerSpec`], a validated id plus physical size,
//! - rendering in-memory marker rasters for page composition.
//!
//! It does **not** detect or decode markers in camera images.

mod bits;
mod dictionary;
mod error;
mod extract;
mod marker;

pub use bits::BitMatrix;
pub use dictionary::{
    canonical_image_from_code, BuiltinDictionary, CodeDictionary, MarkerDictionary,
    ARUCO_MIP_36H12,
};
pub use error::ExtractError;
pub use extract::{extract, px_per_cell_for, render_marker, FOREGROUND_THRESHOLD};
pub use marker::MarkerSpec;
