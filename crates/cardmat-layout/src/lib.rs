//! Scanning-mat geometry.
//!
//! Given a card size, a marker size and a gap, [`plan`] centers the card
//! outline on the origin and places four markers outside its corners so that
//! each marker's near edges clear the outline by exactly the gap.
//!
//! Coordinates are millimeters relative to the page center with the y axis
//! pointing **up** (top-left is `(-x, +y)`). Renderers flip y for raster and
//! SVG output.
//!
//! Marker ids are fixed: `0, 1, 2, 3` go to top-left, top-right,
//! bottom-right, bottom-left. A reader of a scan relies on this order to
//! recover the card orientation.

mod geometry;
mod plan;
mod spec;

pub use geometry::Rect;
pub use plan::{plan, CardOutline, Corner, MatPlan, PlacedMarker, CORNER_IDS};
pub use spec::{LayoutError, LayoutSpec};
