//! serve-metrics-config - Declarative metrics configuration for model serving
//!
//! This crate loads a YAML document that declares a vocabulary of dimension
//! names and two families of metric definitions (system metrics under
//! `ts_metrics`, per-model metrics under `model_metrics`), validates every
//! reference and uniqueness rule, and hands back an immutable, typed
//! [`MetricsConfiguration`].
//!
//! Loading is fail-closed: a document with any error yields no
//! configuration at all, never a partial one.
//!
//! # Example
//!
//! ```rust
//! use serve_metrics_config::{
//!     MetricDefinition, MetricKind, MetricsConfigurationHandler,
//!     YamlMetricsConfigurationHandler,
//! };
//!
//! let mut handler = YamlMetricsConfigurationHandler::new();
//! handler.load_str(r#"
//! dimensions: [model_name, host_name]
//! ts_metrics:
//!   counter:
//!     - name: Requests
//!       unit: count
//!       dimensions: [host_name]
//! model_metrics:
//!   histogram:
//!     - name: PredictionTime
//!       unit: ms
//!       dimensions: [model_name, host_name]
//! "#)?;
//!
//! assert_eq!(handler.dimension_names().len(), 2);
//! assert_eq!(
//!     handler.model_metrics(),
//!     [MetricDefinition::new(
//!         MetricKind::Histogram,
//!         "PredictionTime",
//!         "ms",
//!         ["model_name", "host_name"],
//!     )]
//! );
//! # Ok::<(), serve_metrics_config::MetricsConfigError>(())
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod telemetry;
pub mod types;

// Re-export main types at crate root
pub use config::{
    MetricFamily, MetricsConfiguration, MetricsConfigurationHandler, Vocabulary,
    YamlMetricsConfigurationHandler,
};
pub use document::MetricsSource;
pub use error::{DocumentError, MetricsConfigError, Result, ValidationError};
pub use types::{MetricDefinition, MetricKind, MetricsContext, MetricsMode};
