//! Metric families — the `ts_metrics` and `model_metrics` sections.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Vocabulary;
use super::validator::validate_metric;
use crate::document::{MODEL_METRICS_KEY, RawFamily, SYSTEM_METRICS_KEY};
use crate::error::ValidationError;
use crate::types::{MetricDefinition, MetricKind};

/// Which top-level section a group of definitions belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricFamily {
    /// Process-wide metrics, under `ts_metrics`.
    System,
    /// Per-model metrics, under `model_metrics`.
    Model,
}

impl MetricFamily {
    /// Top-level document key of this section.
    pub fn section_key(self) -> &'static str {
        match self {
            Self::System => SYSTEM_METRICS_KEY,
            Self::Model => MODEL_METRICS_KEY,
        }
    }

    /// Short label for logs and metric labels.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Model => "model",
        }
    }
}

impl fmt::Display for MetricFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate every definition in a section.
///
/// Definitions come out grouped by kind (counters, then gauges, then
/// histograms), each group in document order. A missing section or
/// subsection contributes nothing.
pub(crate) fn parse_family(
    section: Option<&RawFamily>,
    vocabulary: &Vocabulary,
) -> Result<Vec<MetricDefinition>, ValidationError> {
    let Some(section) = section else {
        return Ok(Vec::new());
    };

    let mut definitions = Vec::new();
    for kind in MetricKind::ALL {
        for raw in section.definitions(kind).unwrap_or_default() {
            definitions.push(validate_metric(raw, kind, vocabulary)?);
        }
    }
    Ok(definitions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{RawMetric, Scalar};

    fn raw(name: &str, dimensions: &[&str]) -> RawMetric {
        RawMetric {
            name: Some(Scalar(name.to_string())),
            unit: Some(Scalar("count".to_string())),
            dimensions: Some(dimensions.iter().map(|d| Scalar(d.to_string())).collect()),
        }
    }

    fn names(definitions: &[MetricDefinition]) -> Vec<&str> {
        definitions.iter().map(|d| d.name.as_str()).collect()
    }

    #[test]
    fn absent_section_is_empty() {
        let definitions = parse_family(None, &Vocabulary::default()).unwrap();
        assert!(definitions.is_empty());
    }

    #[test]
    fn kinds_are_concatenated_in_fixed_order() {
        let section = RawFamily {
            histogram: Some(vec![raw("H", &[])]),
            gauge: Some(vec![raw("G1", &[]), raw("G2", &[])]),
            counter: Some(vec![raw("C", &[])]),
        };
        let definitions = parse_family(Some(&section), &Vocabulary::default()).unwrap();
        assert_eq!(names(&definitions), ["C", "G1", "G2", "H"]);
        let kinds: Vec<_> = definitions.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            [
                MetricKind::Counter,
                MetricKind::Gauge,
                MetricKind::Gauge,
                MetricKind::Histogram
            ]
        );
    }

    #[test]
    fn first_invalid_definition_fails_the_section() {
        let vocabulary = Vocabulary::from_declared(["level"]).unwrap();
        let section = RawFamily {
            counter: Some(vec![raw("Ok", &["level"]), raw("Bad", &["host_name"])]),
            gauge: Some(vec![raw("", &[])]),
            ..Default::default()
        };
        assert_eq!(
            parse_family(Some(&section), &vocabulary),
            Err(ValidationError::UndeclaredDimension {
                metric: "Bad".to_string(),
                dimension: "host_name".to_string(),
            })
        );
    }

    #[test]
    fn section_keys() {
        assert_eq!(MetricFamily::System.section_key(), "ts_metrics");
        assert_eq!(MetricFamily::Model.section_key(), "model_metrics");
    }
}
