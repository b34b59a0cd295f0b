//! Layout input configuration.

use serde::{Deserialize, Serialize};

/// Physical layout parameters, all in millimeters.
///
/// Defaults describe a standard 63.5 x 88.9 mm trading card with 20 mm
/// markers placed 10 mm away from the card edges.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutSpec {
    pub card_width_mm: f64,
    pub card_height_mm: f64,
    pub marker_size_mm: f64,
    pub gap_mm: f64,
}

impl Default for LayoutSpec {
    fn default() -> Self {
        Self {
            card_width_mm: 63.5,
            card_height_mm: 88.9,
            marker_size_mm: 20.0,
            gap_mm: 10.0,
        }
    }
}

/// Layout validation errors.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("invalid layout: {field} = {value} ({reason})")]
    InvalidLayoutSpec {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
}

impl LayoutSpec {
    /// Check that every field is strictly positive and finite, and that the
    /// gap still separates markers from the card once rounded to `f64`.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let fields = [
            ("card_width_mm", self.card_width_mm),
            ("card_height_mm", self.card_height_mm),
            ("marker_size_mm", self.marker_size_mm),
            ("gap_mm", self.gap_mm),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutError::InvalidLayoutSpec {
                    field,
                    value,
                    reason: "must be a positive finite length",
                });
            }
        }
        // Same arithmetic as the marker and outline bounds, so a gap below the
        // float step of card/2 is caught here instead of producing overlap.
        let near_x = self.marker_offset_x() - self.marker_size_mm / 2.0;
        let near_y = self.marker_offset_y() - self.marker_size_mm / 2.0;
        if near_x <= self.card_width_mm / 2.0 || near_y <= self.card_height_mm / 2.0 {
            return Err(LayoutError::InvalidLayoutSpec {
                field: "gap_mm",
                value: self.gap_mm,
                reason: "too small to separate markers from the card",
            });
        }
        Ok(())
    }

    /// Distance from the origin to a marker center along x.
    #[inline]
    pub fn marker_offset_x(&self) -> f64 {
        self.card_width_mm / 2.0 + self.gap_mm + self.marker_size_mm / 2.0
    }

    /// Distance from the origin to a marker center along y.
    #[inline]
    pub fn marker_offset_y(&self) -> f64 {
        self.card_height_mm / 2.0 + self.gap_mm + self.marker_size_mm / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(LayoutSpec::default().validate().is_ok());
    }

    #[test]
    fn first_bad_field_is_reported() {
        let spec = LayoutSpec {
            marker_size_mm: 0.0,
            gap_mm: -1.0,
            ..LayoutSpec::default()
        };
        assert_eq!(
            spec.validate(),
            Err(LayoutError::InvalidLayoutSpec {
                field: "marker_size_mm",
                value: 0.0,
                reason: "must be a positive finite length",
            })
        );
    }

    #[test]
    fn gap_lost_to_rounding_is_rejected() {
        let spec = LayoutSpec {
            card_width_mm: 166.8848353769301,
            card_height_mm: 49.27354265920207,
            marker_size_mm: 90.18286659504037,
            gap_mm: 3.492811024694186e-15,
        };
        let err = spec.validate().unwrap_err();
        assert!(matches!(
            err,
            LayoutError::InvalidLayoutSpec { field: "gap_mm", .. }
        ));
        assert!(err.to_string().contains("gap_mm"));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let spec = LayoutSpec {
                card_width_mm: bad,
                ..LayoutSpec::default()
            };
            assert!(spec.validate().is_err(), "{bad}");
        }
    }

    #[test]
    fn deserializes_from_json() {
        let spec: LayoutSpec = serde_json::from_str(
            r#"{"card_width_mm":59,"card_height_mm":86,"marker_size_mm":15,"gap_mm":5}"#,
        )
        .expect("json");
        assert_eq!(spec.card_width_mm, 59.0);
        assert_eq!(spec.gap_mm, 5.0);
    }
}
