//! holimap
//!
//! A lightweight Rust library for rendering a static world choropleth map of
//! public holidays per country. Pairs with the `holimap` CLI.
//!
//! ### Features
//! - Load a GeoJSON shape collection and a CSV metric table (path or URL)
//! - Join shapes to metric rows by an explicit, pluggable policy
//! - Equal Earth projection fitted to a target width (height is derived)
//! - Three-stop indigo → white → darkgreen color scale over the extent
//! - Self-contained SVG output: sphere, graticule, countries, gradient
//!   legend, and CSS-driven hover tooltips
//!
//! ### Example
//! ```no_run
//! use holimap::render::{RenderOptions, render_from_locations};
//!
//! let map = render_from_locations(
//!     "world-geojson.json",
//!     "countries-with-the-most-holidays-2024.csv",
//!     &RenderOptions::default(),
//! )?;
//! std::fs::write("map.svg", &map.svg)?;
//! println!("{} shapes without data", map.report.unmatched.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod data;
pub mod join;
pub mod models;
pub mod project;
pub mod render;
pub mod scale;

pub use join::{JoinPolicy, JoinReport, MetricIndex};
pub use models::{CountryShape, Dimensions, Margin, MetricRecord};
pub use project::Projector;
pub use render::{RenderOptions, RenderedMap, render_map};
pub use scale::ColorScale;
