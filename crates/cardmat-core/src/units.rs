//! Physical unit conversion.
//!
//! Layout math is done in millimeters. Renderers convert to PostScript points
//! (SVG page) or to pixels at a given DPI (PNG page) at the last moment.

/// Millimeters per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// PostScript points per inch.
pub const POINTS_PER_INCH: f64 = 72.0;

/// Points per millimeter (≈ 2.83465).
pub const POINTS_PER_MM: f64 = POINTS_PER_INCH / MM_PER_INCH;

#[inline]
pub fn mm_to_pt(mm: f64) -> f64 {
    mm * POINTS_PER_MM
}

#[inline]
pub fn pt_to_mm(pt: f64) -> f64 {
    pt / POINTS_PER_MM
}

/// Millimeters to (fractional) pixels at `dpi` dots per inch.
#[inline]
pub fn mm_to_px(mm: f64, dpi: f64) -> f64 {
    mm * dpi / MM_PER_INCH
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn one_inch_is_72_points() {
        assert_relative_eq!(mm_to_pt(25.4), 72.0, epsilon = 1e-12);
        assert_relative_eq!(pt_to_mm(72.0), 25.4, epsilon = 1e-12);
    }

    #[test]
    fn letter_width_at_300_dpi() {
        assert_relative_eq!(mm_to_px(215.9, 300.0), 2550.0, epsilon = 1e-9);
    }
}
