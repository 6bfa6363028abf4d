//! Metric kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Aggregation semantics of a configured metric.
///
/// The kind of a definition is decided by the subsection it appears under
/// (`counter`, `gauge` or `histogram`), never by a field in the definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    /// Monotonically increasing value.
    Counter,
    /// Point-in-time value.
    Gauge,
    /// Distribution of observed values.
    Histogram,
}

impl MetricKind {
    /// All kinds, in the order their subsections are read.
    pub const ALL: [MetricKind; 3] = [Self::Counter, Self::Gauge, Self::Histogram];

    /// Subsection key holding definitions of this kind.
    pub fn section_key(self) -> &'static str {
        match self {
            Self::Counter => "counter",
            Self::Gauge => "gauge",
            Self::Histogram => "histogram",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.section_key())
    }
}
