//! The render pipeline: join the datasets, fit the projection, and assemble
//! the final SVG document.
//!
//! Layer order is part of the contract (later elements paint on top): the
//! sphere backdrop, then the graticule, then countries in collection order,
//! then the legend, then the tooltip layer.

pub mod legend;
pub mod svg;
pub mod tooltip;

use crate::data;
use crate::join::{JoinPolicy, JoinReport, MetricIndex};
use crate::models::{CountryShape, Dimensions, Margin, MetricRecord};
use crate::project::Projector;
use crate::scale::{ColorScale, NO_DATA};
use anyhow::{Context, Result, bail};
use log::{debug, info};
use self::svg::{SvgDoc, px};
use self::tooltip::TooltipSpec;

/// Canvas width as a fraction of the viewport width, from the source design.
pub const VIEWPORT_FACTOR: f64 = 0.7;
/// Margin on all four sides, in pixels.
pub const MARGIN_PX: f64 = 10.0;
/// Stroke color of country outlines.
pub const COUNTRY_STROKE: &str = "#ccc";

/// Inputs read once at startup.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Window width at startup; the canvas takes 0.7 of it. Not responsive:
    /// later resizes are out of scope.
    pub viewport_width: f64,
    pub join_policy: JoinPolicy,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            viewport_width: 1400.0,
            join_policy: JoinPolicy::default(),
        }
    }
}

/// A finished render: the document plus what the join found out.
#[derive(Debug)]
pub struct RenderedMap {
    pub svg: String,
    pub report: JoinReport,
    pub dimensions: Dimensions,
}

/// Immutable per-render state threaded through the sub-renderers; nothing
/// here is shared ambiently.
struct RenderContext<'a> {
    dimensions: Dimensions,
    projector: Projector,
    scale: ColorScale,
    index: &'a MetricIndex,
}

/// Load both datasets and render. Convenience wrapper for the CLI; any load
/// failure aborts the whole pipeline with no partial output.
pub fn render_from_locations(
    shapes_location: &str,
    metrics_location: &str,
    options: &RenderOptions,
) -> Result<RenderedMap> {
    let shapes = data::load_shapes(shapes_location)?;
    let metrics = data::load_metrics(metrics_location)?;
    render_map(&shapes, &metrics, options)
}

/// Render the choropleth from in-memory datasets.
pub fn render_map(
    shapes: &[CountryShape],
    metrics: &[MetricRecord],
    options: &RenderOptions,
) -> Result<RenderedMap> {
    if shapes.is_empty() {
        bail!("no shapes to render");
    }

    let margin = Margin::uniform(MARGIN_PX);
    let width = options.viewport_width * VIEWPORT_FACTOR;
    let bounded_width = width - margin.left - margin.right;
    let projector = Projector::fit_width(bounded_width);
    // Height is derived from the fitted sphere's bound box, never configured.
    let [[_, _], [_, bounded_height]] = projector.sphere_bounds();
    let dimensions = Dimensions {
        width,
        height: bounded_height + margin.top + margin.bottom,
        margin,
    };
    debug!(
        "canvas {}x{} (bounded {}x{})",
        dimensions.width, dimensions.height, bounded_width, bounded_height
    );

    let scale = ColorScale::from_values(metrics.iter().map(|m| m.value()))
        .context("building color scale")?;
    let index = MetricIndex::build(metrics, options.join_policy)?;
    let report = index.report(shapes);
    info!(
        "joined {} of {} shapes ({} unmatched)",
        report.matched,
        shapes.len(),
        report.unmatched.len()
    );

    let ctx = RenderContext {
        dimensions,
        projector,
        scale,
        index: &index,
    };
    let svg = draw_document(&ctx, shapes);

    Ok(RenderedMap {
        svg,
        report,
        dimensions,
    })
}

fn draw_document(ctx: &RenderContext, shapes: &[CountryShape]) -> String {
    let mut doc = SvgDoc::new();
    let dims = &ctx.dimensions;

    doc.open(
        "svg",
        &[
            ("xmlns", "http://www.w3.org/2000/svg".into()),
            ("width", px(dims.width)),
            ("height", px(dims.height)),
            (
                "viewBox",
                format!("0 0 {} {}", px(dims.width), px(dims.height)),
            ),
        ],
    );

    doc.open("style", &[]);
    doc.raw(BASE_STYLE);
    for i in 0..shapes.len() {
        doc.raw(&tooltip::hover_rule(i));
    }
    doc.close("style");

    legend::emit_gradient_defs(&mut doc, &ctx.scale);

    // Bounded drawing area, offset by the margins.
    doc.open(
        "g",
        &[
            ("class", "bounds".into()),
            (
                "transform",
                format!("translate({},{})", px(dims.margin.left), px(dims.margin.top)),
            ),
        ],
    );
    doc.leaf(
        "path",
        &[
            ("class", "earth".into()),
            ("d", ctx.projector.sphere_path()),
        ],
    );
    doc.leaf(
        "path",
        &[
            ("class", "graticule".into()),
            ("d", ctx.projector.graticule_path()),
        ],
    );

    doc.open("g", &[("class", "countries".into())]);
    for (i, shape) in shapes.iter().enumerate() {
        let fill = ctx
            .index
            .lookup(shape)
            .and_then(|rec| ctx.scale.color_for(rec.value()))
            .unwrap_or(NO_DATA);
        doc.leaf(
            "path",
            &[
                ("id", format!("country-{i}")),
                ("class", "country".into()),
                ("d", ctx.projector.path_for(&shape.geometry)),
                ("fill", fill.to_hex()),
                ("fill-rule", "evenodd".into()),
                ("stroke", COUNTRY_STROKE.into()),
            ],
        );
    }
    doc.close("g");
    doc.close("g");

    legend::emit_legend(&mut doc, &ctx.scale, dims);

    // Tooltips last so they paint over every other layer; anchors already
    // carry the margin offset.
    doc.open("g", &[("class", "tooltips".into())]);
    for (i, shape) in shapes.iter().enumerate() {
        let value = ctx.index.lookup(shape).map(|rec| rec.value());
        if let Some(spec) = TooltipSpec::for_shape(shape, value, &ctx.projector, &dims.margin) {
            spec.emit(&mut doc, i);
        }
    }
    doc.close("g");

    doc.close("svg");
    doc.finish()
}

const BASE_STYLE: &str = "\
.earth { fill: #e3f1ff; }
.graticule { fill: none; stroke: #dadde3; stroke-width: 0.5; }
.country { stroke-width: 0.5; }
.country:hover { stroke: #999; }
.legend-title { font: bold 16px sans-serif; }
.legend-byline { font: 12px sans-serif; fill: #666; }
.legend-value { font: 12px sans-serif; dominant-baseline: middle; }
.legend-value-min { text-anchor: end; }
.tooltip { opacity: 0; pointer-events: none; font: 12px sans-serif; text-anchor: middle; }
.tooltip rect { fill: #fff; stroke: #ccc; }
.tooltip-country { font-weight: bold; }";
