//! Joining shapes to metric rows.
//!
//! The source design matched shapes and rows by exact string equality on the
//! display name, hidden inside a per-shape linear search. Here the linkage is
//! an explicit policy over a prebuilt index, and unmatched shapes are
//! reported instead of silently falling through to the no-data fill.

use crate::models::{CountryShape, MetricRecord};
use ahash::AHashMap;
use log::warn;

/// How a shape is matched to a metric row. First row wins on duplicate keys,
/// preserving the original first-match semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinPolicy {
    /// Exact string equality between shape name and the country column.
    #[default]
    Exact,
    /// Case-insensitive, whitespace-trimmed name equality.
    Normalized,
    /// Shape ISO id against the country column (for ISO-keyed tables).
    Id,
}

#[derive(Debug, thiserror::Error)]
pub enum JoinError {
    #[error("metric table is empty")]
    EmptyTable,
}

/// Metric rows indexed by the join key, built once per render.
#[derive(Debug)]
pub struct MetricIndex {
    policy: JoinPolicy,
    by_key: AHashMap<String, MetricRecord>,
}

impl MetricIndex {
    pub fn build(metrics: &[MetricRecord], policy: JoinPolicy) -> Result<Self, JoinError> {
        if metrics.is_empty() {
            return Err(JoinError::EmptyTable);
        }
        let mut by_key = AHashMap::with_capacity(metrics.len());
        for rec in metrics {
            let key = match policy {
                JoinPolicy::Exact | JoinPolicy::Id => rec.country.clone(),
                JoinPolicy::Normalized => normalize(&rec.country),
            };
            by_key.entry(key).or_insert_with(|| rec.clone());
        }
        Ok(Self { policy, by_key })
    }

    pub fn policy(&self) -> JoinPolicy {
        self.policy
    }

    /// The metric row for a shape, or `None` when the shape has no data.
    pub fn lookup(&self, shape: &CountryShape) -> Option<&MetricRecord> {
        match self.policy {
            JoinPolicy::Exact => self.by_key.get(shape.name()),
            JoinPolicy::Normalized => self.by_key.get(&normalize(shape.name())),
            JoinPolicy::Id => self.by_key.get(shape.id()),
        }
    }

    /// Join every shape once, warning about the misses. This is the only
    /// place unmatched shapes are reported; rendering itself treats a miss
    /// as the neutral fill.
    pub fn report(&self, shapes: &[CountryShape]) -> JoinReport {
        let mut matched = 0usize;
        let mut unmatched = Vec::new();
        for shape in shapes {
            if self.lookup(shape).is_some() {
                matched += 1;
            } else {
                warn!("no metric row for shape '{}'", shape.name());
                unmatched.push(shape.name().to_string());
            }
        }
        JoinReport { matched, unmatched }
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Outcome of joining the whole shape collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinReport {
    pub matched: usize,
    pub unmatched: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Geometry, polygon};

    fn shape(name: &str, id: &str) -> CountryShape {
        CountryShape {
            name: name.into(),
            iso_id: id.into(),
            geometry: Geometry::Polygon(polygon![
                (x: 0.0, y: 0.0),
                (x: 1.0, y: 0.0),
                (x: 1.0, y: 1.0),
                (x: 0.0, y: 0.0),
            ]),
        }
    }

    fn metric(country: &str, holidays: &str) -> MetricRecord {
        MetricRecord {
            country: country.into(),
            holidays: holidays.into(),
        }
    }

    #[test]
    fn exact_join_is_case_sensitive() {
        let idx = MetricIndex::build(&[metric("Nepal", "35")], JoinPolicy::Exact).unwrap();
        assert!(idx.lookup(&shape("Nepal", "NPL")).is_some());
        assert!(idx.lookup(&shape("nepal", "NPL")).is_none());
    }

    #[test]
    fn normalized_join_ignores_case_and_padding() {
        let idx = MetricIndex::build(&[metric(" Nepal ", "35")], JoinPolicy::Normalized).unwrap();
        assert!(idx.lookup(&shape("NEPAL", "NPL")).is_some());
    }

    #[test]
    fn id_join_matches_iso_codes() {
        let idx = MetricIndex::build(&[metric("NPL", "35")], JoinPolicy::Id).unwrap();
        assert!(idx.lookup(&shape("Nepal", "NPL")).is_some());
        assert!(idx.lookup(&shape("Nepal", "IND")).is_none());
    }

    #[test]
    fn first_row_wins_on_duplicates() {
        let idx = MetricIndex::build(
            &[metric("Nepal", "35"), metric("Nepal", "99")],
            JoinPolicy::Exact,
        )
        .unwrap();
        let rec = idx.lookup(&shape("Nepal", "NPL")).unwrap();
        assert_eq!(rec.holidays, "35");
    }

    #[test]
    fn empty_table_refuses_to_index() {
        assert!(matches!(
            MetricIndex::build(&[], JoinPolicy::Exact),
            Err(JoinError::EmptyTable)
        ));
    }

    #[test]
    fn report_counts_and_names_misses() {
        let idx = MetricIndex::build(&[metric("Nepal", "35")], JoinPolicy::Exact).unwrap();
        let shapes = vec![shape("Nepal", "NPL"), shape("Nowhereland", "NWL")];
        let report = idx.report(&shapes);
        assert_eq!(report.matched, 1);
        assert_eq!(report.unmatched, vec!["Nowhereland".to_string()]);
    }
}
