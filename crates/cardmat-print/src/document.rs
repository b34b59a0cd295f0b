//! JSON description of a composed mat.

use std::fs;
use std::path::Path;

use cardmat_aruco::BitMatrix;
use cardmat_layout::{CardOutline, Corner, LayoutSpec};
use serde::{Deserialize, Serialize};

use crate::page::{MatPage, PageSpec};
use crate::PrintError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMarker {
    pub id: u32,
    pub corner: Corner,
    /// Center relative to the page center, y up.
    pub center_mm: [f64; 2],
    /// Top-left corner on the page, y down.
    pub page_top_left_mm: [f64; 2],
    pub size_mm: f64,
    /// Interior bits, `1` = raised/black.
    pub bits: BitMatrix,
}

/// Everything a downstream consumer needs to reproduce or read the mat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatDocument {
    pub dictionary: String,
    pub page: PageSpec,
    pub layout: LayoutSpec,
    pub outline: CardOutline,
    pub markers: Vec<DocumentMarker>,
}

impl MatDocument {
    pub fn from_page(page: &MatPage) -> Self {
        let markers = page
            .markers
            .iter()
            .map(|m| {
                let (left, top, side) = page.marker_page_rect(m);
                DocumentMarker {
                    id: m.placed.id,
                    corner: m.placed.corner,
                    center_mm: [m.placed.center.x, m.placed.center.y],
                    page_top_left_mm: [left, top],
                    size_mm: side,
                    bits: m.bits.clone(),
                }
            })
            .collect();
        Self {
            dictionary: page.dictionary.clone(),
            page: page.page(),
            layout: page.plan.spec,
            outline: page.plan.outline,
            markers,
        }
    }

    /// Load a document from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, PrintError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this document to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), PrintError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{compose_page, PageOptions};
    use cardmat_aruco::CodeDictionary;

    #[test]
    fn document_survives_disk() {
        let dict = CodeDictionary::new("test", 6, 1, vec![5, 6, 7, 8]).expect("dict");
        let page =
            compose_page(&dict, &LayoutSpec::default(), &PageOptions::default()).expect("page");
        let doc = MatDocument::from_page(&page);
        assert_eq!(doc.markers.len(), 4);
        assert_eq!(doc.markers[1].corner, Corner::TopRight);

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("mat.json");
        doc.write_json(&path).expect("write");
        let back = MatDocument::load_json(&path).expect("load");
        assert_eq!(back.dictionary, "test");
        assert_eq!(back.layout, doc.layout);
        for (a, b) in back.markers.iter().zip(&doc.markers) {
            assert_eq!((a.id, a.corner, &a.bits), (b.id, b.corner, &b.bits));
            approx::assert_relative_eq!(a.center_mm[0], b.center_mm[0], epsilon = 1e-9);
            approx::assert_relative_eq!(a.page_top_left_mm[1], b.page_top_left_mm[1], epsilon = 1e-9);
        }

        let raw = std::fs::read_to_string(&path).expect("read");
        assert!(raw.contains(r#""corner": "top_right""#));
    }
}
