//! Validated metric definitions.

use serde::{Deserialize, Serialize};

use super::MetricKind;

/// One validated metric from the configuration.
///
/// Every entry in `dimensions` is declared in the configuration's dimension
/// vocabulary and appears at most once. Order is kept as written, since
/// emitters key recorded values by dimension position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MetricDefinition {
    /// Counter, gauge or histogram.
    pub kind: MetricKind,
    /// Metric name (non-empty).
    pub name: String,
    /// Free-form unit label (e.g. "ms", "count").
    pub unit: String,
    /// Dimension names, in document order.
    pub dimensions: Vec<String>,
}

impl MetricDefinition {
    /// Create a definition from its parts.
    pub fn new(
        kind: MetricKind,
        name: impl Into<String>,
        unit: impl Into<String>,
        dimensions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            unit: unit.into(),
            dimensions: dimensions.into_iter().map(Into::into).collect(),
        }
    }
}
