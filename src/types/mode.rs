//! Emission mode and consumer context.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// How the emission layer publishes the configured metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricsMode {
    /// Write metrics as structured log lines.
    ///
    /// This is the default when the document has no `mode` key.
    #[default]
    Log,
    /// Expose metrics for Prometheus scraping.
    Prometheus,
}

impl MetricsMode {
    /// Lowercase name as written in the `mode` key.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Log => "log",
            Self::Prometheus => "prometheus",
        }
    }
}

impl fmt::Display for MetricsMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricsMode {
    type Err = ValidationError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "log" => Ok(Self::Log),
            "prometheus" => Ok(Self::Prometheus),
            _ => Err(ValidationError::InvalidMode(s.to_string())),
        }
    }
}

/// Which side of the serving process consumes a configuration.
///
/// The frontend emits process-wide (system) metrics; each backend worker
/// emits metrics for the model it serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricsContext {
    Backend,
    Frontend,
}
