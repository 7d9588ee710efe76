//! Hover tooltips.
//!
//! The interaction model is two states per country, idle and hovered: enter
//! shows the tooltip with the country's name and metric value (or the
//! `No data` sentinel) anchored at the projected centroid plus the canvas
//! margins; leave hides it again. Content and position are baked per country
//! at render time and the state transitions are expressed as CSS rules in
//! the embedded stylesheet, so repeated hovers are trivially idempotent and
//! leaving always returns opacity to 0.

use super::svg::{SvgDoc, px};
use crate::models::{CountryShape, Margin};
use crate::project::Projector;

/// Sentinel shown when a shape has no joined metric row.
pub const NO_DATA_LABEL: &str = "No data";

const FONT_PX: f64 = 12.0;
const PAD_X: f64 = 8.0;
const LINE_H: f64 = 16.0;
const BOX_H: f64 = 2.0 * LINE_H + 8.0;
/// Gap between the anchor point and the tooltip's lower edge.
const LIFT: f64 = 6.0;

/// Resolved content and anchor for one country's tooltip.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipSpec {
    /// Anchor x: projected centroid plus left margin.
    pub x: f64,
    /// Anchor y: projected centroid plus top margin.
    pub y: f64,
    pub name: String,
    pub value_label: String,
}

impl TooltipSpec {
    /// Compute the tooltip for one shape. `None` when the geometry has no
    /// centroid to anchor at.
    pub fn for_shape(
        shape: &CountryShape,
        value: Option<f64>,
        projector: &Projector,
        margin: &Margin,
    ) -> Option<Self> {
        let (cx, cy) = projector.centroid(&shape.geometry)?;
        Some(Self {
            x: cx + margin.left,
            y: cy + margin.top,
            name: shape.name().to_string(),
            value_label: match value {
                Some(v) if v.is_finite() => format_metric(v),
                _ => NO_DATA_LABEL.to_string(),
            },
        })
    }

    fn box_width(&self) -> f64 {
        let widest = estimate_text_width_px(&self.name, FONT_PX)
            .max(estimate_text_width_px(&self.value_label, FONT_PX));
        widest + 2.0 * PAD_X
    }

    /// Emit the tooltip group: a rounded box centered above the anchor with
    /// the name and value lines.
    pub fn emit(&self, doc: &mut SvgDoc, index: usize) {
        let w = self.box_width();
        doc.open(
            "g",
            &[
                ("id", format!("tooltip-{index}")),
                ("class", "tooltip".into()),
                ("transform", format!("translate({},{})", px(self.x), px(self.y))),
            ],
        );
        doc.leaf(
            "rect",
            &[
                ("x", px(-w / 2.0)),
                ("y", px(-(BOX_H + LIFT))),
                ("width", px(w)),
                ("height", px(BOX_H)),
                ("rx", "4".into()),
            ],
        );
        doc.text_element(
            "text",
            &[
                ("class", "tooltip-country".into()),
                ("x", "0".into()),
                ("y", px(-(BOX_H + LIFT) + LINE_H)),
            ],
            &self.name,
        );
        doc.text_element(
            "text",
            &[
                ("class", "tooltip-value".into()),
                ("x", "0".into()),
                ("y", px(-(BOX_H + LIFT) + 2.0 * LINE_H)),
            ],
            &self.value_label,
        );
        doc.close("g");
    }
}

/// Hover rule pairing a country path with its tooltip across layers, so
/// tooltips can be drawn last and still follow the hovered shape.
pub fn hover_rule(index: usize) -> String {
    format!("svg:has(#country-{index}:hover) #tooltip-{index} {{ opacity: 1; }}")
}

/// Format a metric value for display: integers without a decimal tail.
pub fn format_metric(v: f64) -> String {
    if v == v.trunc() {
        format!("{v:.0}")
    } else {
        format!("{v}")
    }
}

/// Width heuristic for sans-serif text; there is no text measuring in a
/// string-assembled SVG.
fn estimate_text_width_px(text: &str, font_px: f64) -> f64 {
    text.chars().count() as f64 * font_px * 0.60
}
