//! Printable scanning mats and fabrication tables.
//!
//! A mat is composed once ([`compose_page`]) from a [`LayoutSpec`] and a
//! marker dictionary, then rendered to any of:
//! - SVG page in PostScript points ([`render_svg`]),
//! - grayscale PNG at a chosen DPI ([`render_raster`], [`encode_png`]),
//! - a JSON document with positions and bit matrices ([`MatDocument`]).
//!
//! [`scad::generate`] emits the marker bit matrices as an OpenSCAD lookup
//! function for 3D-printed or milled markers.
//!
//! Marker rasters are passed between stages in memory; nothing is written to
//! disk except the requested outputs.

mod config;
mod document;
mod error;
mod page;
mod raster;
pub mod scad;
mod svg;

pub use cardmat_layout::LayoutSpec;
pub use config::MatConfig;
pub use document::{DocumentMarker, MatDocument};
pub use error::PrintError;
pub use page::{compose_page, MatPage, PageMarker, PageOptions, PageSpec, LABEL_FONT_PT};
pub use raster::{encode_png, render_raster, write_png};
pub use svg::render_svg;

use std::fs;
use std::path::{Path, PathBuf};

/// Paths written by [`write_bundle`].
#[derive(Clone, Debug)]
pub struct BundlePaths {
    pub svg: PathBuf,
    pub png: PathBuf,
    pub json: PathBuf,
}

impl BundlePaths {
    /// `<stem>.svg`, `<stem>.png`, `<stem>.json`.
    pub fn from_stem(stem: impl AsRef<Path>) -> Self {
        let stem = stem.as_ref();
        Self {
            svg: stem.with_extension("svg"),
            png: stem.with_extension("png"),
            json: stem.with_extension("json"),
        }
    }
}

/// Write SVG, PNG and JSON renderings of `page` next to each other.
pub fn write_bundle(
    page: &MatPage,
    stem: impl AsRef<Path>,
    dpi: f64,
) -> Result<BundlePaths, PrintError> {
    let paths = BundlePaths::from_stem(stem);
    let raster = render_raster(page, dpi)?;
    if let Some(dir) = paths.svg.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }

    fs::write(&paths.svg, render_svg(page))?;
    write_png(&paths.png, &raster, Some(dpi))?;
    MatDocument::from_page(page).write_json(&paths.json)?;

    log::info!(
        "wrote {}, {}, {}",
        paths.svg.display(),
        paths.png.display(),
        paths.json.display()
    );
    Ok(paths)
}
