use geo::Geometry;
use serde::{Deserialize, Serialize};

/// One country boundary from the shape collection, plus the two property
/// fields this program consumes.
///
/// Immutable once loaded: the render pipeline only ever reads these.
#[derive(Debug, Clone)]
pub struct CountryShape {
    /// Display name (`BRK_NAME` in the Natural Earth properties).
    pub name: String,
    /// ISO-style id (`ADM0_A3_IS`). Not used by the default join, but kept
    /// for the id-based join policy.
    pub iso_id: String,
    pub geometry: Geometry<f64>,
}

impl CountryShape {
    /// Display-name accessor; key for the default (exact) join.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// ISO id accessor; key for [`crate::join::JoinPolicy::Id`].
    pub fn id(&self) -> &str {
        &self.iso_id
    }
}

/// One row of the metric table: a country name and the raw holiday count.
///
/// The value is kept as text and parsed on access, mirroring how the source
/// table is consumed. Unparsable text becomes NaN, which the extent and the
/// fill resolution both treat as "no data".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricRecord {
    pub country: String,
    pub holidays: String,
}

impl MetricRecord {
    /// Parse the raw metric field. NaN on unparsable input.
    pub fn value(&self) -> f64 {
        self.holidays.trim().parse::<f64>().unwrap_or(f64::NAN)
    }
}

/// Canvas margins in pixels, identical on all sides in the source design.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    pub const fn uniform(px: f64) -> Self {
        Self {
            top: px,
            right: px,
            bottom: px,
            left: px,
        }
    }
}

/// Canvas geometry, derived once per render and immutable afterwards.
///
/// Width comes from the viewport; height is an *output* of fitting the
/// projection to the bounded width, so the sphere never gets distorted or
/// leaves unused canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl Dimensions {
    /// Canvas width minus horizontal margins: the width the sphere is
    /// fitted to.
    pub fn bounded_width(&self) -> f64 {
        self.width - self.margin.left - self.margin.right
    }

    /// Canvas height minus vertical margins.
    pub fn bounded_height(&self) -> f64 {
        self.height - self.margin.top - self.margin.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_value_parses_plain_integers() {
        let rec = MetricRecord {
            country: "Nepal".into(),
            holidays: "35".into(),
        };
        assert_eq!(rec.value(), 35.0);
    }

    #[test]
    fn metric_value_tolerates_whitespace() {
        let rec = MetricRecord {
            country: "India".into(),
            holidays: " 21 ".into(),
        };
        assert_eq!(rec.value(), 21.0);
    }

    #[test]
    fn metric_value_is_nan_on_garbage() {
        let rec = MetricRecord {
            country: "Atlantis".into(),
            holidays: "many".into(),
        };
        assert!(rec.value().is_nan());
    }

    #[test]
    fn bounded_dimensions_subtract_margins() {
        let dims = Dimensions {
            width: 1000.0,
            height: 520.0,
            margin: Margin::uniform(10.0),
        };
        assert_eq!(dims.bounded_width(), 980.0);
        assert_eq!(dims.bounded_height(), 500.0);
    }
}
