//! Stateful configuration handler with fail-closed loading.

use std::collections::BTreeSet;
use std::path::Path;
use std::time::Instant;

use tracing::{error, info, instrument};

use super::{MetricFamily, MetricsConfiguration};
use crate::Result;
use crate::document::MetricsSource;
use crate::telemetry;
use crate::types::{MetricDefinition, MetricsMode};

/// Holds the metrics configuration consumed by the emission layer.
///
/// Implementations start empty. After `load` returns, the accessors reflect
/// either the complete new configuration (on `Ok`) or the empty
/// configuration (on `Err`), never a mix of old and new or a partial result.
pub trait MetricsConfigurationHandler {
    /// Replace the current configuration with the one behind `source`.
    fn load(&mut self, source: &MetricsSource) -> Result<()>;

    /// How the emission layer should publish metrics.
    fn mode(&self) -> MetricsMode;

    /// Declared dimension names.
    fn dimension_names(&self) -> &BTreeSet<String>;

    /// System (process-wide) metric definitions.
    fn system_metrics(&self) -> &[MetricDefinition];

    /// Per-model metric definitions.
    fn model_metrics(&self) -> &[MetricDefinition];
}

/// [`MetricsConfigurationHandler`] for YAML documents.
///
/// ```rust
/// # use serve_metrics_config::{MetricsConfigurationHandler, YamlMetricsConfigurationHandler};
/// let mut handler = YamlMetricsConfigurationHandler::new();
///
/// // Undeclared dimension: the whole load fails and nothing is kept.
/// let result = handler.load_str(r#"
/// model_metrics:
///   counter:
///     - name: Requests
///       unit: count
///       dimensions: [host_name]
/// "#);
/// assert!(result.is_err());
/// assert!(handler.model_metrics().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct YamlMetricsConfigurationHandler {
    configuration: MetricsConfiguration,
}

impl YamlMetricsConfigurationHandler {
    /// Create a handler holding the empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a YAML file.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.load(&MetricsSource::file(path.as_ref()))
    }

    /// Load YAML text held in memory.
    pub fn load_str(&mut self, yaml: &str) -> Result<()> {
        self.load(&MetricsSource::text(yaml))
    }

    /// The configuration currently held.
    pub fn configuration(&self) -> &MetricsConfiguration {
        &self.configuration
    }

    // ========================================================================
    // Metrics recording
    // ========================================================================

    /// Record load outcome metrics (counter + histogram + family gauges).
    fn record_load(&self, start: Instant, outcome: &Result<()>) {
        let elapsed = start.elapsed().as_secs_f64();
        match outcome {
            Ok(()) => {
                metrics::counter!(telemetry::LOADS_TOTAL, "status" => "ok").increment(1);
            }
            Err(e) => {
                metrics::counter!(telemetry::LOADS_TOTAL,
                    "status" => "error",
                    "reason" => e.reason(),
                )
                .increment(1);
            }
        }
        metrics::histogram!(telemetry::LOAD_DURATION_SECONDS).record(elapsed);

        for family in [MetricFamily::System, MetricFamily::Model] {
            metrics::gauge!(telemetry::DEFINITIONS, "family" => family.as_str())
                .set(self.configuration.family(family).len() as f64);
        }
    }
}

impl MetricsConfigurationHandler for YamlMetricsConfigurationHandler {
    #[instrument(skip_all, fields(source = %source.name()))]
    fn load(&mut self, source: &MetricsSource) -> Result<()> {
        let start = Instant::now();

        let outcome = match MetricsConfiguration::from_source(source) {
            Ok(configuration) => {
                info!(
                    mode = %configuration.mode(),
                    dimensions = configuration.dimension_names().len(),
                    system_metrics = configuration.system_metrics().len(),
                    model_metrics = configuration.model_metrics().len(),
                    "loaded metrics configuration"
                );
                self.configuration = configuration;
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "failed to load metrics configuration, metrics are disabled");
                self.configuration = MetricsConfiguration::default();
                Err(e)
            }
        };

        self.record_load(start, &outcome);
        outcome
    }

    fn mode(&self) -> MetricsMode {
        self.configuration.mode()
    }

    fn dimension_names(&self) -> &BTreeSet<String> {
        self.configuration.dimension_names()
    }

    fn system_metrics(&self) -> &[MetricDefinition] {
        self.configuration.system_metrics()
    }

    fn model_metrics(&self) -> &[MetricDefinition] {
        self.configuration.model_metrics()
    }
}

impl From<MetricsConfiguration> for YamlMetricsConfigurationHandler {
    fn from(configuration: MetricsConfiguration) -> Self {
        Self { configuration }
    }
}
