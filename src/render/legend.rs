//! Gradient legend: a fixed-size horizontal swatch spanning the scale's
//! three control colors, with the observed extent labelled at either end and
//! a title/byline pair above.

use super::svg::{SvgDoc, px};
use super::tooltip::format_metric;
use crate::models::Dimensions;
use crate::scale::ColorScale;

pub const LEGEND_WIDTH: f64 = 120.0;
pub const LEGEND_HEIGHT: f64 = 16.0;
/// Horizontal position of the legend group's origin.
const LEGEND_X: f64 = 120.0;
/// Canvas width below which the legend drops to the lower placement.
const NARROW_CANVAS_PX: f64 = 800.0;

const GRADIENT_ID: &str = "legend-gradient";

/// Where the legend group sits: near the bottom on narrow canvases, at half
/// height (over the Pacific) on wide ones.
pub fn legend_translate(dims: &Dimensions) -> (f64, f64) {
    let y = if dims.width < NARROW_CANVAS_PX {
        dims.bounded_height() - 30.0
    } else {
        dims.bounded_height() * 0.5
    };
    (LEGEND_X, y)
}

/// The `<defs>` gradient backing the swatch: the scale's range colors at
/// 0%, 50% and 100%.
pub fn emit_gradient_defs(doc: &mut SvgDoc, scale: &ColorScale) {
    doc.open("defs", &[]);
    doc.open(
        "linearGradient",
        &[("id", GRADIENT_ID.into())],
    );
    for (i, color) in scale.range().into_iter().enumerate() {
        doc.leaf(
            "stop",
            &[
                ("stop-color", color.to_hex()),
                ("offset", format!("{}%", i * 100 / 2)),
            ],
        );
    }
    doc.close("linearGradient");
    doc.close("defs");
}

/// The legend group itself: title, byline, swatch, and min/max labels.
pub fn emit_legend(doc: &mut SvgDoc, scale: &ColorScale, dims: &Dimensions) {
    let (tx, ty) = legend_translate(dims);
    let (min, max) = scale.extent();

    doc.open(
        "g",
        &[
            ("class", "legend".into()),
            ("transform", format!("translate({},{})", px(tx), px(ty))),
        ],
    );
    doc.text_element(
        "text",
        &[("class", "legend-title".into()), ("y", "-23".into())],
        "Holidays per Country",
    );
    doc.text_element(
        "text",
        &[("class", "legend-byline".into()), ("y", "-9".into())],
        "2024",
    );
    doc.leaf(
        "rect",
        &[
            ("x", px(-LEGEND_WIDTH / 2.0)),
            ("width", px(LEGEND_WIDTH)),
            ("height", px(LEGEND_HEIGHT)),
            ("fill", format!("url(#{GRADIENT_ID})")),
        ],
    );
    doc.text_element(
        "text",
        &[
            ("class", "legend-value".into()),
            ("x", px(LEGEND_WIDTH / 2.0 + 10.0)),
            ("y", px(LEGEND_HEIGHT / 2.0)),
        ],
        &format_metric(max),
    );
    doc.text_element(
        "text",
        &[
            ("class", "legend-value legend-value-min".into()),
            ("x", px(-LEGEND_WIDTH / 2.0 - 10.0)),
            ("y", px(LEGEND_HEIGHT / 2.0)),
        ],
        &format_metric(min),
    );
    doc.close("g");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Margin;

    fn dims(width: f64, height: f64) -> Dimensions {
        Dimensions {
            width,
            height,
            margin: Margin::uniform(10.0),
        }
    }

    #[test]
    fn narrow_canvas_places_legend_near_the_bottom() {
        let d = dims(700.0, 360.0);
        let (x, y) = legend_translate(&d);
        assert_eq!(x, 120.0);
        assert_eq!(y, d.bounded_height() - 30.0);
    }

    #[test]
    fn wide_canvas_places_legend_at_half_height() {
        let d = dims(1000.0, 500.0);
        let (_, y) = legend_translate(&d);
        assert_eq!(y, d.bounded_height() * 0.5);
    }

    #[test]
    fn gradient_stops_sit_at_0_50_100_percent() {
        let scale = ColorScale::from_values([5.0, 40.0]).unwrap();
        let mut doc = SvgDoc::new();
        emit_gradient_defs(&mut doc, &scale);
        let out = doc.finish();
        assert!(out.contains("offset=\"0%\""));
        assert!(out.contains("offset=\"50%\""));
        assert!(out.contains("offset=\"100%\""));
        assert!(out.contains("#4b0082"));
        assert!(out.contains("#ffffff"));
        assert!(out.contains("#006400"));
    }

    #[test]
    fn legend_labels_show_the_extent() {
        let scale = ColorScale::from_values([5.0, 40.0]).unwrap();
        let mut doc = SvgDoc::new();
        emit_legend(&mut doc, &scale, &dims(1000.0, 500.0));
        let out = doc.finish();
        assert!(out.contains(">5</text>"));
        assert!(out.contains(">40</text>"));
        assert!(out.contains("Holidays per Country"));
        assert!(out.contains(">2024</text>"));
    }
}
