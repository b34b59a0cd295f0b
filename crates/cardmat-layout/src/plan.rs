//! Card outline and corner marker placement.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::{LayoutError, LayoutSpec, Rect};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Marker corner, in clockwise order starting at the top-left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

/// Marker id for each corner, indexed in [`Corner::ALL`] order (TL, TR, BR, BL).
pub const CORNER_IDS: [u32; 4] = [0, 1, 2, 3];

impl Corner {
    /// All corners, clockwise from top-left.
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];

    /// Signs `(sx, sy)` applied to the marker offsets (y up).
    #[inline]
    pub fn sign(self) -> (f64, f64) {
        match self {
            Corner::TopLeft => (-1.0, 1.0),
            Corner::TopRight => (1.0, 1.0),
            Corner::BottomRight => (1.0, -1.0),
            Corner::BottomLeft => (-1.0, -1.0),
        }
    }

    #[inline]
    pub fn marker_id(self) -> u32 {
        CORNER_IDS[self as usize]
    }

    /// Short label used in logs and generated files.
    pub fn abbrev(self) -> &'static str {
        match self {
            Corner::TopLeft => "TL",
            Corner::TopRight => "TR",
            Corner::BottomRight => "BR",
            Corner::BottomLeft => "BL",
        }
    }
}

/// The card placement rectangle, always centered on the origin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardOutline {
    pub center: Point2<f64>,
    pub width_mm: f64,
    pub height_mm: f64,
}

impl CardOutline {
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.center, self.width_mm, self.height_mm)
    }
}

/// One marker placed at a card corner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacedMarker {
    pub id: u32,
    pub corner: Corner,
    /// Marker center relative to the page center, millimeters, y up.
    pub center: Point2<f64>,
}

impl PlacedMarker {
    #[inline]
    pub fn bounds(&self, marker_size_mm: f64) -> Rect {
        Rect::from_center(self.center, marker_size_mm, marker_size_mm)
    }
}

/// Result of [`plan`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatPlan {
    pub spec: LayoutSpec,
    pub outline: CardOutline,
    /// In [`Corner::ALL`] order, so `markers[i].id == CORNER_IDS[i]`.
    pub markers: [PlacedMarker; 4],
}

impl MatPlan {
    /// Marker placed with the given id.
    pub fn marker(&self, id: u32) -> Option<&PlacedMarker> {
        self.markers.iter().find(|m| m.id == id)
    }

    pub fn marker_bounds(&self) -> [Rect; 4] {
        self.markers.map(|m| m.bounds(self.spec.marker_size_mm))
    }

    /// Bounding box of the outline and all markers.
    pub fn extent(&self) -> Rect {
        self.marker_bounds()
            .iter()
            .fold(self.outline.bounds(), |acc, r| acc.union(r))
    }
}

/// Place the card outline and the four corner markers.
///
/// Each marker center sits at `card/2 + gap + marker/2` from the origin along
/// both axes, so its inner edges are exactly `gap_mm` away from the outline.
#[cfg_attr(feature = "tracing", instrument(level = "debug"))]
pub fn plan(spec: &LayoutSpec) -> Result<MatPlan, LayoutError> {
    spec.validate()?;

    let outline = CardOutline {
        center: Point2::origin(),
        width_mm: spec.card_width_mm,
        height_mm: spec.card_height_mm,
    };

    let dx = spec.marker_offset_x();
    let dy = spec.marker_offset_y();
    let markers = Corner::ALL.map(|corner| {
        let (sx, sy) = corner.sign();
        PlacedMarker {
            id: corner.marker_id(),
            corner,
            center: Point2::new(sx * dx, sy * dy),
        }
    });

    log::debug!(
        "planned {}x{} mm card, marker offsets ({dx}, {dy}) mm",
        spec.card_width_mm,
        spec.card_height_mm
    );

    Ok(MatPlan {
        spec: *spec,
        outline,
        markers,
    })
}
