//! SVG page rendering (user units are PostScript points).

use std::fmt::Write;

use cardmat_core::units::mm_to_pt;

use crate::page::{MatPage, LABEL_FONT_PT};

const OUTLINE_DASH_PT: f64 = 3.0;
const OUTLINE_WIDTH_PT: f64 = 1.0;
/// Distance from a marker's bottom edge to its id label baseline.
const MARKER_LABEL_OFFSET_PT: f64 = 10.0;

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render the mat as a standalone SVG document sized to the physical page.
pub fn render_svg(page: &MatPage) -> String {
    let spec = page.page();
    let w_pt = mm_to_pt(spec.width_mm);
    let h_pt = mm_to_pt(spec.height_mm);

    // Writing into a String cannot fail.
    let mut s = String::new();
    let _ = writeln!(s, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    let _ = writeln!(
        s,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}mm" height="{}mm" viewBox="0 0 {:.3} {:.3}">"#,
        spec.width_mm, spec.height_mm, w_pt, h_pt
    );
    let _ = writeln!(
        s,
        r#"  <rect x="0" y="0" width="{w_pt:.3}" height="{h_pt:.3}" fill="white"/>"#
    );

    let outline = page.plan.outline;
    let card_w = mm_to_pt(outline.width_mm);
    let card_h = mm_to_pt(outline.height_mm);
    let c = spec.to_page(outline.center);
    let (cx, cy) = (mm_to_pt(c.x), mm_to_pt(c.y));
    let _ = writeln!(
        s,
        r#"  <rect id="card-outline" x="{:.3}" y="{:.3}" width="{card_w:.3}" height="{card_h:.3}" fill="none" stroke="black" stroke-width="{OUTLINE_WIDTH_PT}" stroke-dasharray="{OUTLINE_DASH_PT} {OUTLINE_DASH_PT}"/>"#,
        cx - card_w / 2.0,
        cy - card_h / 2.0,
    );
    if let Some(label) = page.options.label.as_deref() {
        let _ = writeln!(
            s,
            r#"  <text x="{cx:.3}" y="{cy:.3}" font-family="Helvetica, Arial, sans-serif" font-size="{LABEL_FONT_PT}" text-anchor="middle">{}</text>"#,
            xml_escape(label)
        );
    }

    for marker in &page.markers {
        let (left, top, side) = page.marker_page_rect(marker);
        let (x0, y0, side_pt) = (mm_to_pt(left), mm_to_pt(top), mm_to_pt(side));
        let img = &marker.image;
        let cell = side_pt / img.width as f64;

        let _ = writeln!(
            s,
            r#"  <g id="marker-{}" data-corner="{}">"#,
            marker.placed.id,
            marker.placed.corner.abbrev()
        );
        let _ = writeln!(
            s,
            r#"    <rect x="{x0:.3}" y="{y0:.3}" width="{side_pt:.3}" height="{side_pt:.3}" fill="white"/>"#
        );
        for row in 0..img.height {
            for col in 0..img.width {
                if img.get(col, row).is_some_and(|v| v < cardmat_aruco::FOREGROUND_THRESHOLD) {
                    let _ = writeln!(
                        s,
                        r#"    <rect x="{:.3}" y="{:.3}" width="{cell:.3}" height="{cell:.3}" fill="black"/>"#,
                        x0 + col as f64 * cell,
                        y0 + row as f64 * cell,
                    );
                }
            }
        }
        let _ = writeln!(s, "  </g>");

        if page.options.marker_labels {
            let _ = writeln!(
                s,
                r#"  <text x="{x0:.3}" y="{:.3}" font-family="Helvetica, Arial, sans-serif" font-size="{LABEL_FONT_PT}">ID: {}</text>"#,
                y0 + side_pt + MARKER_LABEL_OFFSET_PT,
                marker.placed.id
            );
        }
    }

    let _ = writeln!(s, "</svg>");
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{compose_page, PageOptions};
    use cardmat_aruco::CodeDictionary;
    use cardmat_layout::LayoutSpec;

    fn page(options: PageOptions) -> MatPage {
        let dict = CodeDictionary::new("test", 6, 1, vec![0, 1, u64::MAX >> 28, 7]).expect("dict");
        compose_page(&dict, &LayoutSpec::default(), &options).expect("page")
    }

    #[test]
    fn svg_has_outline_and_four_markers() {
        let svg = render_svg(&page(PageOptions::default()));
        assert!(svg.contains(r#"width="215.9mm""#));
        assert!(svg.contains(r#"viewBox="0 0 612.000 792.000""#));
        assert_eq!(svg.matches(r#"id="card-outline""#).count(), 1);
        assert!(svg.contains(r#"stroke-dasharray="3 3""#));
        for id in 0..4 {
            assert!(svg.contains(&format!(r#"<g id="marker-{id}""#)));
            assert!(svg.contains(&format!("ID: {id}")));
        }
        assert!(svg.contains("Place Card Here"));
    }

    #[test]
    fn black_cells_follow_bits() {
        let svg = render_svg(&page(PageOptions {
            marker_labels: false,
            label: None,
            ..PageOptions::default()
        }));
        // 28 border cells per marker, plus 0 + 1 + 36 + 3 interior cells
        let black = svg.matches(r#"fill="black""#).count();
        assert_eq!(black, 4 * 28 + 40);
        assert!(!svg.contains("<text"));
    }

    #[test]
    fn label_is_escaped() {
        let svg = render_svg(&page(PageOptions {
            label: Some("Cards <& Co>".into()),
            ..PageOptions::default()
        }));
        assert!(svg.contains("Cards &lt;&amp; Co&gt;"));
    }
}
