//! Core types shared by the `cardmat-*` crates.
//!
//! This crate is intentionally small. It holds the in-memory grayscale raster
//! used to hand marker images between components, millimeter/point/pixel
//! conversion, and logger setup. It knows nothing about dictionaries or
//! layouts.

mod image;
mod logger;
pub mod units;

pub use image::{pixel_count, GrayImage, MAX_PIXELS};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_with_level, parse_level};
