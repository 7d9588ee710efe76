//! The choropleth color scale: a three-stop piecewise-linear ramp from the
//! observed minimum (indigo) through white at half the maximum to the
//! observed maximum (darkgreen).
//!
//! The midpoint is `max / 2`, not the average of the extent; that is the
//! source design's policy and it is preserved exactly. Out-of-domain values
//! are clamped to the endpoints.

use anyhow::{Result, bail};

/// sRGB color with hex formatting for SVG attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

/// CSS `indigo`.
pub const INDIGO: Rgb = Rgb::new(0x4b, 0x00, 0x82);
/// CSS `white`.
pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
/// CSS `darkgreen`.
pub const DARKGREEN: Rgb = Rgb::new(0x00, 0x64, 0x00);
/// Fill for shapes with no joined metric row.
pub const NO_DATA: Rgb = Rgb::new(0xe2, 0xe2, 0xe2);

/// Piecewise-linear color scale over the domain `(min, max/2, max)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    min: f64,
    mid: f64,
    max: f64,
}

impl ColorScale {
    /// Build the scale from the observed metric column. Non-finite values
    /// (unparsable rows) are ignored; a column with nothing finite left is a
    /// hard error rather than a degenerate scale.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Result<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut seen = 0usize;
        for v in values {
            if !v.is_finite() {
                continue;
            }
            min = min.min(v);
            max = max.max(v);
            seen += 1;
        }
        if seen == 0 {
            bail!("metric column has no finite values; cannot build a color scale");
        }
        Ok(Self {
            min,
            mid: max / 2.0,
            max,
        })
    }

    /// The observed extent `[min, max]`.
    pub fn extent(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// The midpoint control value, always `max / 2`.
    pub fn midpoint(&self) -> f64 {
        self.mid
    }

    /// The three control-point colors in domain order.
    pub fn range(&self) -> [Rgb; 3] {
        [INDIGO, WHITE, DARKGREEN]
    }

    /// Color for a metric value. Values outside the domain clamp to the
    /// endpoint colors; non-finite input gets no color and the caller falls
    /// back to the no-data fill.
    pub fn color_for(&self, value: f64) -> Option<Rgb> {
        if !value.is_finite() {
            return None;
        }
        let v = value.clamp(self.min, self.max);
        // The midpoint may fall below min when min > max/2 (and always does
        // for a single-point extent); such segments have zero effective
        // width and collapse to their end color.
        if v <= self.mid {
            Some(INDIGO.lerp(WHITE, fraction(self.min, self.mid, v)))
        } else {
            Some(WHITE.lerp(DARKGREEN, fraction(self.mid, self.max, v)))
        }
    }
}

fn fraction(a: f64, b: f64, v: f64) -> f64 {
    if (b - a).abs() < f64::EPSILON {
        1.0
    } else {
        (v - a) / (b - a)
    }
}
