//! Metric definition validation.

use std::collections::HashSet;

use super::Vocabulary;
use crate::document::{RawMetric, Scalar};
use crate::error::ValidationError;
use crate::types::{MetricDefinition, MetricKind};

/// Turn one raw definition into a [`MetricDefinition`] of the given kind.
///
/// Checks run in a fixed order and the first failure is returned:
/// 1. `name`, `unit` and `dimensions` are present (an empty list is fine)
/// 2. `name` is non-empty
/// 3. each dimension, in order, is declared and not repeated
pub(crate) fn validate_metric(
    raw: &RawMetric,
    kind: MetricKind,
    vocabulary: &Vocabulary,
) -> Result<MetricDefinition, ValidationError> {
    let name = required(raw.name.as_ref(), "name")?;
    let unit = required(raw.unit.as_ref(), "unit")?;
    let dimensions = raw
        .dimensions
        .as_deref()
        .ok_or(ValidationError::MissingField("dimensions"))?;

    if name.is_empty() {
        return Err(ValidationError::EmptyMetricName);
    }

    let mut seen = HashSet::with_capacity(dimensions.len());
    for dimension in dimensions.iter().map(Scalar::as_str) {
        if !vocabulary.contains(dimension) {
            return Err(ValidationError::UndeclaredDimension {
                metric: name.to_string(),
                dimension: dimension.to_string(),
            });
        }
        if !seen.insert(dimension) {
            return Err(ValidationError::DuplicateMetricDimension {
                metric: name.to_string(),
                dimension: dimension.to_string(),
            });
        }
    }

    Ok(MetricDefinition::new(
        kind,
        name,
        unit,
        dimensions.iter().map(Scalar::as_str),
    ))
}

fn required<'a>(
    field: Option<&'a Scalar>,
    field_name: &'static str,
) -> Result<&'a str, ValidationError> {
    field
        .map(Scalar::as_str)
        .ok_or(ValidationError::MissingField(field_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocabulary() -> Vocabulary {
        Vocabulary::from_declared(["model_name", "host_name", "level"]).unwrap()
    }

    fn scalar(s: &str) -> Scalar {
        Scalar(s.to_string())
    }

    fn raw(name: &str, unit: &str, dimensions: &[&str]) -> RawMetric {
        RawMetric {
            name: Some(scalar(name)),
            unit: Some(scalar(unit)),
            dimensions: Some(dimensions.iter().map(|d| scalar(d)).collect()),
        }
    }

    #[test]
    fn valid_definition_keeps_dimension_order() {
        let metric = raw("Latency", "ms", &["level", "model_name"]);
        let definition = validate_metric(&metric, MetricKind::Histogram, &vocabulary()).unwrap();
        assert_eq!(
            definition,
            MetricDefinition::new(
                MetricKind::Histogram,
                "Latency",
                "ms",
                ["level", "model_name"]
            )
        );
    }

    #[test]
    fn kind_comes_from_caller() {
        let metric = raw("Requests", "count", &[]);
        for kind in MetricKind::ALL {
            let definition = validate_metric(&metric, kind, &vocabulary()).unwrap();
            assert_eq!(definition.kind, kind);
        }
    }

    #[test]
    fn empty_dimension_list_is_allowed() {
        let metric = raw("Requests", "count", &[]);
        let definition =
            validate_metric(&metric, MetricKind::Counter, &Vocabulary::default()).unwrap();
        assert!(definition.dimensions.is_empty());
    }

    #[test]
    fn missing_name() {
        let metric = RawMetric {
            name: None,
            ..raw("x", "ms", &[])
        };
        assert_eq!(
            validate_metric(&metric, MetricKind::Counter, &vocabulary()),
            Err(ValidationError::MissingField("name"))
        );
    }

    #[test]
    fn missing_unit() {
        let metric = RawMetric {
            unit: None,
            ..raw("x", "ms", &[])
        };
        assert_eq!(
            validate_metric(&metric, MetricKind::Counter, &vocabulary()),
            Err(ValidationError::MissingField("unit"))
        );
    }

    #[test]
    fn missing_dimensions() {
        let metric = RawMetric {
            dimensions: None,
            ..raw("x", "ms", &[])
        };
        assert_eq!(
            validate_metric(&metric, MetricKind::Counter, &vocabulary()),
            Err(ValidationError::MissingField("dimensions"))
        );
    }

    #[test]
    fn missing_fields_are_reported_in_order() {
        let metric = RawMetric::default();
        assert_eq!(
            validate_metric(&metric, MetricKind::Gauge, &vocabulary()),
            Err(ValidationError::MissingField("name"))
        );
    }

    #[test]
    fn empty_name() {
        let metric = raw("", "ms", &["level"]);
        assert_eq!(
            validate_metric(&metric, MetricKind::Gauge, &vocabulary()),
            Err(ValidationError::EmptyMetricName)
        );
    }

    #[test]
    fn missing_unit_wins_over_empty_name() {
        let metric = RawMetric {
            unit: None,
            ..raw("", "ms", &[])
        };
        assert_eq!(
            validate_metric(&metric, MetricKind::Gauge, &vocabulary()),
            Err(ValidationError::MissingField("unit"))
        );
    }

    #[test]
    fn undeclared_dimension() {
        let metric = raw("Latency", "ms", &["model_name", "region"]);
        assert_eq!(
            validate_metric(&metric, MetricKind::Histogram, &vocabulary()),
            Err(ValidationError::UndeclaredDimension {
                metric: "Latency".to_string(),
                dimension: "region".to_string(),
            })
        );
    }

    #[test]
    fn duplicate_dimension() {
        let metric = raw("Latency", "ms", &["level", "model_name", "level"]);
        assert_eq!(
            validate_metric(&metric, MetricKind::Histogram, &vocabulary()),
            Err(ValidationError::DuplicateMetricDimension {
                metric: "Latency".to_string(),
                dimension: "level".to_string(),
            })
        );
    }

    #[test]
    fn undeclared_is_checked_before_duplicate() {
        let metric = raw("Latency", "ms", &["region", "region"]);
        assert!(matches!(
            validate_metric(&metric, MetricKind::Histogram, &vocabulary()),
            Err(ValidationError::UndeclaredDimension { .. })
        ));
    }

    #[test]
    fn empty_dimension_reference_is_undeclared() {
        let metric = raw("Latency", "ms", &[""]);
        assert_eq!(
            validate_metric(&metric, MetricKind::Histogram, &vocabulary()),
            Err(ValidationError::UndeclaredDimension {
                metric: "Latency".to_string(),
                dimension: String::new(),
            })
        );
    }
}
