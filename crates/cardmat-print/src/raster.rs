//! Raster page rendering and PNG encoding.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use cardmat_aruco::FOREGROUND_THRESHOLD;
use cardmat_core::units::{mm_to_px, pt_to_mm, MM_PER_INCH};
use cardmat_core::{pixel_count, GrayImage};

use crate::page::MatPage;
use crate::PrintError;

#[cfg(feature = "tracing")]
use tracing::instrument;

const OUTLINE_DASH_PT: f64 = 3.0;
const OUTLINE_WIDTH_PT: f64 = 1.0;

#[inline]
fn px(mm: f64, dpi: f64) -> i64 {
    mm_to_px(mm, dpi).round() as i64
}

fn dashed_hline(img: &mut GrayImage, x0: i64, x1: i64, y: i64, thick: usize, dash: i64) {
    let mut x = x0;
    while x < x1 {
        let len = dash.min(x1 - x);
        img.fill_rect(x, y, len as usize, thick, 0);
        x += 2 * dash;
    }
}

fn dashed_vline(img: &mut GrayImage, x: i64, y0: i64, y1: i64, thick: usize, dash: i64) {
    let mut y = y0;
    while y < y1 {
        let len = dash.min(y1 - y);
        img.fill_rect(x, y, thick, len as usize, 0);
        y += 2 * dash;
    }
}

/// Rasterize the mat at `dpi`: white page, dashed card outline, black marker cells.
///
/// Text labels are not rasterized.
#[cfg_attr(feature = "tracing", instrument(level = "info", skip(page)))]
pub fn render_raster(page: &MatPage, dpi: f64) -> Result<GrayImage, PrintError> {
    if !dpi.is_finite() || dpi <= 0.0 {
        return Err(PrintError::InvalidDpi(dpi));
    }
    let spec = page.page();
    let width = px(spec.width_mm, dpi).max(1) as usize;
    let height = px(spec.height_mm, dpi).max(1) as usize;
    if pixel_count(width, height).is_none() {
        return Err(PrintError::RasterTooLarge { width, height, dpi });
    }
    let mut img = GrayImage::new(width, height, 255);

    let thick = px(pt_to_mm(OUTLINE_WIDTH_PT), dpi).max(1);
    let dash = px(pt_to_mm(OUTLINE_DASH_PT), dpi).max(1);
    let outline = page.plan.outline;
    let c = spec.to_page(outline.center);
    let left = px(c.x - outline.width_mm / 2.0, dpi);
    let right = px(c.x + outline.width_mm / 2.0, dpi);
    let top = px(c.y - outline.height_mm / 2.0, dpi);
    let bottom = px(c.y + outline.height_mm / 2.0, dpi);
    // Stroke centered on the outline edge.
    let half = thick / 2;
    let thick = thick as usize;
    dashed_hline(&mut img, left, right, top - half, thick, dash);
    dashed_hline(&mut img, left, right, bottom - half, thick, dash);
    dashed_vline(&mut img, left - half, top, bottom, thick, dash);
    dashed_vline(&mut img, right - half, top, bottom, thick, dash);

    for marker in &page.markers {
        let (mx, my, side) = page.marker_page_rect(marker);
        let cells = marker.image.width;
        let cell_mm = side / cells as f64;
        // Cell edges are rounded independently so neighbours share edges without gaps.
        let edge_x = |k: usize| px(mx + k as f64 * cell_mm, dpi);
        let edge_y = |k: usize| px(my + k as f64 * cell_mm, dpi);
        img.fill_rect(
            edge_x(0),
            edge_y(0),
            (edge_x(cells) - edge_x(0)) as usize,
            (edge_y(cells) - edge_y(0)) as usize,
            255,
        );
        for row in 0..marker.image.height {
            for col in 0..cells {
                if marker
                    .image
                    .get(col, row)
                    .is_some_and(|v| v < FOREGROUND_THRESHOLD)
                {
                    let x0 = edge_x(col);
                    let y0 = edge_y(row);
                    img.fill_rect(
                        x0,
                        y0,
                        (edge_x(col + 1) - x0) as usize,
                        (edge_y(row + 1) - y0) as usize,
                        0,
                    );
                }
            }
        }
    }

    log::debug!("rasterized {width}x{height} px page at {dpi} dpi, {thick} px outline");
    Ok(img)
}

/// Encode an 8-bit grayscale PNG. With `dpi`, the physical pixel density is
/// stored so printers reproduce millimeter sizes exactly.
pub fn encode_png(img: &GrayImage, dpi: Option<f64>) -> Result<Vec<u8>, PrintError> {
    let mut out = Vec::new();
    write_png_to(&mut out, img, dpi)?;
    Ok(out)
}

/// Write `img` as PNG to `path`.
pub fn write_png(path: impl AsRef<Path>, img: &GrayImage, dpi: Option<f64>) -> Result<(), PrintError> {
    let file = File::create(path.as_ref())?;
    let mut w = BufWriter::new(file);
    write_png_to(&mut w, img, dpi)?;
    w.flush()?;
    Ok(())
}

fn write_png_to<W: Write>(w: W, img: &GrayImage, dpi: Option<f64>) -> Result<(), PrintError> {
    let mut encoder = png::Encoder::new(w, img.width as u32, img.height as u32);
    encoder.set_color(png::ColorType::Grayscale);
    encoder.set_depth(png::BitDepth::Eight);
    if let Some(dpi) = dpi {
        if !dpi.is_finite() || dpi <= 0.0 {
            return Err(PrintError::InvalidDpi(dpi));
        }
        let ppm = (dpi / MM_PER_INCH * 1000.0).round() as u32;
        encoder.set_pixel_dims(Some(png::PixelDimensions {
            xppu: ppm,
            yppu: ppm,
            unit: png::Unit::Meter,
        }));
    }
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&img.data)?;
    writer.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{compose_page, PageOptions};
    use cardmat_aruco::CodeDictionary;
    use cardmat_layout::LayoutSpec;
    use std::io::Cursor;

    fn page() -> MatPage {
        let dict =
            CodeDictionary::new("test", 6, 1, vec![0, 0, u64::MAX >> 28, 0]).expect("dict");
        compose_page(&dict, &LayoutSpec::default(), &PageOptions::default()).expect("page")
    }

    #[test]
    fn letter_at_100_dpi() {
        let img = render_raster(&page(), 100.0).expect("raster");
        assert_eq!((img.width, img.height), (850, 1100));
    }

    #[test]
    fn marker_cells_are_drawn() {
        let dpi = 100.0;
        let page = page();
        let img = render_raster(&page, dpi).expect("raster");
        // id 0 has an empty interior: the center is white, the border black
        let (l, t, side) = page.marker_page_rect(&page.markers[0]);
        let center = (px(l + side / 2.0, dpi) as usize, px(t + side / 2.0, dpi) as usize);
        assert_eq!(img.get(center.0, center.1), Some(255));
        let border = (px(l + side / 16.0, dpi) as usize, center.1);
        assert_eq!(img.get(border.0, border.1), Some(0));
        // id 2 is solid
        let (l, t, side) = page.marker_page_rect(&page.markers[2]);
        let center = (px(l + side / 2.0, dpi) as usize, px(t + side / 2.0, dpi) as usize);
        assert_eq!(img.get(center.0, center.1), Some(0));
    }

    #[test]
    fn outline_is_dashed() {
        let dpi = 144.0;
        let page = page();
        let img = render_raster(&page, dpi).expect("raster");
        let c = page.page().to_page(page.plan.outline.center);
        let top = px(c.y - page.plan.outline.height_mm / 2.0, dpi) as usize;
        let left = px(c.x - page.plan.outline.width_mm / 2.0, dpi) as usize;
        let right = px(c.x + page.plan.outline.width_mm / 2.0, dpi) as usize;
        let row: Vec<u8> = (left..right).map(|x| img.get(x, top).unwrap_or(255)).collect();
        let dark = row.iter().filter(|&&v| v == 0).count();
        assert!(dark > row.len() / 3 && dark < 2 * row.len() / 3, "{dark}/{}", row.len());
    }

    #[test]
    fn rejects_bad_dpi() {
        assert!(matches!(
            render_raster(&page(), 0.0),
            Err(PrintError::InvalidDpi(_))
        ));
    }

    #[test]
    fn refuses_to_allocate_huge_pages() {
        for dpi in [10_000.0, 1e9, 1e300] {
            assert!(
                matches!(
                    render_raster(&page(), dpi),
                    Err(PrintError::RasterTooLarge { .. })
                ),
                "{dpi}"
            );
        }
        // 1200 dpi letter is ~135 Mpx, still within budget
        assert!(cardmat_core::pixel_count(10_200, 13_200).is_some());
    }

    #[test]
    fn png_roundtrip_header() {
        let img = GrayImage::new(13, 7, 128);
        let bytes = encode_png(&img, Some(300.0)).expect("encode");
        let decoder = png::Decoder::new(Cursor::new(bytes));
        let reader = decoder.read_info().expect("decode");
        let info = reader.info();
        assert_eq!((info.width, info.height), (13, 7));
        assert_eq!(info.color_type, png::ColorType::Grayscale);
        let dims = info.pixel_dims.expect("pixel dims");
        assert_eq!(dims.xppu, 11811);
    }
}
