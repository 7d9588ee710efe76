//! Dataset loading: a GeoJSON shape collection and a CSV metric table.
//!
//! A location may be a filesystem path or an `http(s)://` URL; either way the
//! whole resource is read up front and the pipeline runs synchronously on the
//! result. Any fetch or parse failure is fatal: there is no partial render.

use crate::models::{CountryShape, MetricRecord};
use anyhow::{Context, Result, anyhow, bail};
use geojson::GeoJson;
use log::warn;
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use std::fs;
use std::time::Duration;

/// Property key holding the display name in the shape collection.
pub const NAME_PROPERTY: &str = "BRK_NAME";
/// Property key holding the ISO-style id in the shape collection.
pub const ID_PROPERTY: &str = "ADM0_A3_IS";
/// CSV column holding the country name.
pub const COUNTRY_COLUMN: &str = "country";
/// CSV column holding the metric, as text.
pub const METRIC_COLUMN: &str = "Holidays";

fn http_client() -> Result<HttpClient> {
    HttpClient::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(5))
        .user_agent(concat!("holimap/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("building HTTP client")
}

/// Read a resource location (path or URL) fully into memory.
fn read_resource(location: &str) -> Result<String> {
    if location.starts_with("http://") || location.starts_with("https://") {
        let resp = http_client()?
            .get(location)
            .send()
            .with_context(|| format!("fetching {location}"))?;
        if !resp.status().is_success() {
            bail!("HTTP {} fetching {location}", resp.status());
        }
        resp.text().with_context(|| format!("reading body of {location}"))
    } else {
        fs::read_to_string(location).with_context(|| format!("reading {location}"))
    }
}

/// Load the shape collection: an ordered sequence of [`CountryShape`].
///
/// The input must be a GeoJSON `FeatureCollection`. Features without an areal
/// geometry are skipped with a warning; missing name/id properties default to
/// empty strings, matching the loosely-typed source data.
pub fn load_shapes(location: &str) -> Result<Vec<CountryShape>> {
    let raw = read_resource(location)?;
    let geojson: GeoJson = raw
        .parse()
        .with_context(|| format!("parsing GeoJSON from {location}"))?;

    let collection = match geojson {
        GeoJson::FeatureCollection(fc) => fc,
        _ => bail!("{location}: expected a GeoJSON FeatureCollection"),
    };

    let mut shapes = Vec::with_capacity(collection.features.len());
    for feature in collection.features {
        let name = string_property(&feature, NAME_PROPERTY);
        let iso_id = string_property(&feature, ID_PROPERTY);

        let Some(geometry) = feature.geometry else {
            warn!("shape '{name}' has no geometry, skipping");
            continue;
        };
        let geometry: geo::Geometry<f64> = geometry
            .value
            .try_into()
            .map_err(|e| anyhow!("shape '{name}': unsupported geometry: {e:?}"))?;
        match &geometry {
            geo::Geometry::Polygon(_) | geo::Geometry::MultiPolygon(_) => {}
            _ => {
                warn!("shape '{name}' is not areal, skipping");
                continue;
            }
        }

        shapes.push(CountryShape {
            name,
            iso_id,
            geometry,
        });
    }

    if shapes.is_empty() {
        bail!("{location}: no country shapes found");
    }
    Ok(shapes)
}

fn string_property(feature: &geojson::Feature, key: &str) -> String {
    match feature.properties.as_ref().and_then(|p| p.get(key)) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Load the metric table: an ordered sequence of [`MetricRecord`].
///
/// Requires `country` and `Holidays` columns, located by header name. The
/// metric stays as raw text; see [`MetricRecord::value`].
pub fn load_metrics(location: &str) -> Result<Vec<MetricRecord>> {
    let raw = read_resource(location)?;
    let mut rdr = csv::ReaderBuilder::new().from_reader(raw.as_bytes());
    let headers = rdr.headers().context("reading CSV headers")?.clone();

    let country_idx = headers
        .iter()
        .position(|h| h == COUNTRY_COLUMN)
        .ok_or_else(|| anyhow!("{location}: column '{COUNTRY_COLUMN}' not found"))?;
    let metric_idx = headers
        .iter()
        .position(|h| h == METRIC_COLUMN)
        .ok_or_else(|| anyhow!("{location}: column '{METRIC_COLUMN}' not found"))?;

    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row.with_context(|| format!("reading CSV row from {location}"))?;
        let country = row.get(country_idx).unwrap_or("").to_string();
        if country.is_empty() {
            continue;
        }
        records.push(MetricRecord {
            country,
            holidays: row.get(metric_idx).unwrap_or("").to_string(),
        });
    }

    if records.is_empty() {
        bail!("{location}: no metric rows found");
    }
    Ok(records)
}
