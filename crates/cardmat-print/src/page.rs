//! Page composition: layout plan plus in-memory marker images.

use cardmat_aruco::{extract, BitMatrix, ExtractError, MarkerDictionary, MarkerSpec};
use cardmat_core::units::pt_to_mm;
use cardmat_core::GrayImage;
use cardmat_layout::{plan, LayoutSpec, MatPlan, PlacedMarker, Rect};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::PrintError;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Font size of the card label and the marker id labels.
pub const LABEL_FONT_PT: f64 = 10.0;

/// Physical page size in millimeters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageSpec {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl PageSpec {
    /// US Letter, 8.5 x 11 in.
    pub const LETTER: PageSpec = PageSpec {
        width_mm: 215.9,
        height_mm: 279.4,
    };

    pub const A4: PageSpec = PageSpec {
        width_mm: 210.0,
        height_mm: 297.0,
    };

    pub fn validate(&self) -> Result<(), PrintError> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if !ok(self.width_mm) || !ok(self.height_mm) {
            return Err(PrintError::InvalidPage {
                width_mm: self.width_mm,
                height_mm: self.height_mm,
            });
        }
        Ok(())
    }

    /// Map a mat point (origin at page center, y up) to page coordinates
    /// (origin at top-left, y down).
    #[inline]
    pub fn to_page(&self, p: Point2<f64>) -> Point2<f64> {
        Point2::new(self.width_mm / 2.0 + p.x, self.height_mm / 2.0 - p.y)
    }
}

impl Default for PageSpec {
    fn default() -> Self {
        Self::LETTER
    }
}

/// Page-level options that do not affect marker geometry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageOptions {
    pub page: PageSpec,
    /// Text centered inside the card outline; `None` draws no label.
    pub label: Option<String>,
    /// Draw `ID: n` under each marker.
    pub marker_labels: bool,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            page: PageSpec::LETTER,
            label: Some("Place Card Here".to_string()),
            marker_labels: true,
        }
    }
}

/// One placed marker together with its bits and canonical image.
#[derive(Clone, Debug)]
pub struct PageMarker {
    pub placed: PlacedMarker,
    pub spec: MarkerSpec,
    /// Interior bits, `1` = black.
    pub bits: BitMatrix,
    /// One pixel per cell, including the border.
    pub image: GrayImage,
}

/// Everything needed to render one mat page.
#[derive(Clone, Debug)]
pub struct MatPage {
    pub options: PageOptions,
    pub dictionary: String,
    pub plan: MatPlan,
    pub markers: Vec<PageMarker>,
}

impl MatPage {
    #[inline]
    pub fn page(&self) -> PageSpec {
        self.options.page
    }

    /// Page-space rectangle (top-left origin, y down) of a marker, as
    /// `(left, top, side)` in millimeters.
    pub fn marker_page_rect(&self, marker: &PageMarker) -> (f64, f64, f64) {
        let side = marker.spec.size_mm();
        let c = self.page().to_page(marker.placed.center);
        (c.x - side / 2.0, c.y - side / 2.0, side)
    }
}

/// Label text below a marker needs room under the bottom row.
fn label_allowance_mm(marker_labels: bool) -> f64 {
    if marker_labels {
        pt_to_mm(2.0 * LABEL_FONT_PT)
    } else {
        0.0
    }
}

fn check_fits(plan: &MatPlan, options: &PageOptions) -> Result<(), PrintError> {
    let page = options.page;
    let mut extent = plan.extent();
    extent.min.y -= label_allowance_mm(options.marker_labels);
    let page_rect = Rect::from_center(Point2::origin(), page.width_mm, page.height_mm);
    if !page_rect.contains(&extent) {
        return Err(PrintError::PageOverflow {
            extent_w: extent.width(),
            extent_h: extent.height(),
            page_w: page.width_mm,
            page_h: page.height_mm,
        });
    }
    Ok(())
}

/// Plan the layout, check it fits the page, and attach marker bits/images.
#[cfg_attr(feature = "tracing", instrument(level = "info", skip(dict, options), fields(dictionary = dict.name())))]
pub fn compose_page<D: MarkerDictionary + ?Sized>(
    dict: &D,
    layout: &LayoutSpec,
    options: &PageOptions,
) -> Result<MatPage, PrintError> {
    options.page.validate()?;
    let plan = plan(layout)?;
    check_fits(&plan, options)?;

    let mut markers = Vec::with_capacity(plan.markers.len());
    for placed in plan.markers {
        let spec = MarkerSpec::new(dict, placed.id, layout.marker_size_mm)?;
        let bits = extract(dict, spec.id())?;
        let image = dict
            .bits_for(spec.id())
            .ok_or(ExtractError::InvalidMarkerId {
                id: spec.id(),
                count: dict.len(),
            })?;
        log::debug!(
            "marker {} at {} ({:.3}, {:.3}) mm",
            placed.id,
            placed.corner.abbrev(),
            placed.center.x,
            placed.center.y
        );
        markers.push(PageMarker {
            placed,
            spec,
            bits,
            image,
        });
    }

    Ok(MatPage {
        options: options.clone(),
        dictionary: dict.name().to_string(),
        plan,
        markers,
    })
}
