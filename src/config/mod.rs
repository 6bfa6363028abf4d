//! Validated metrics configuration.
//!
//! A [`MetricsConfiguration`] is built in one pass over a parsed document:
//!
//! 1. **Mode** — the optional top-level `mode` key
//! 2. **Vocabulary** — the top-level `dimensions` list ([`Vocabulary`])
//! 3. **System metrics** — the `ts_metrics` section ([`MetricFamily::System`])
//! 4. **Model metrics** — the `model_metrics` section ([`MetricFamily::Model`])
//!
//! The first failure aborts the build; there is no partially-built
//! configuration. [`YamlMetricsConfigurationHandler`] wraps the build with
//! the fail-closed state handling consumers rely on.

mod family;
mod handler;
mod validator;
mod vocabulary;

pub use family::MetricFamily;
pub use handler::{MetricsConfigurationHandler, YamlMetricsConfigurationHandler};
pub use vocabulary::Vocabulary;

use std::collections::BTreeSet;

use tracing::debug;

use crate::Result;
use crate::document::{self, MetricsSource, RawDocument};
use crate::types::{MetricDefinition, MetricsContext, MetricsMode};

/// The validated contents of one metrics configuration document.
///
/// `Default` is the empty configuration: no dimensions, no metrics,
/// [`MetricsMode::Log`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsConfiguration {
    mode: MetricsMode,
    dimension_names: BTreeSet<String>,
    system_metrics: Vec<MetricDefinition>,
    model_metrics: Vec<MetricDefinition>,
}

impl MetricsConfiguration {
    /// Load and validate the document behind `source`.
    pub fn from_source(source: &MetricsSource) -> Result<Self> {
        let raw = document::load_document(source)?;
        Self::from_raw(raw)
    }

    /// Parse and validate YAML text.
    ///
    /// ```rust
    /// # use serve_metrics_config::{MetricsConfiguration, MetricKind};
    /// let config = MetricsConfiguration::from_yaml_str(r#"
    /// dimensions: [model_name]
    /// model_metrics:
    ///   histogram:
    ///     - name: PredictionTime
    ///       unit: ms
    ///       dimensions: [model_name]
    /// "#).unwrap();
    /// assert_eq!(config.model_metrics()[0].kind, MetricKind::Histogram);
    /// ```
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Self::from_source(&MetricsSource::text(yaml))
    }

    fn from_raw(raw: RawDocument) -> Result<Self> {
        let mode = match &raw.mode {
            Some(mode) => mode.as_str().parse::<MetricsMode>()?,
            None => MetricsMode::default(),
        };

        let vocabulary = vocabulary::parse_dimension_names(raw.dimensions.as_deref())?;
        debug!(dimensions = vocabulary.len(), "parsed dimension vocabulary");

        let system_metrics = family::parse_family(raw.ts_metrics.as_ref(), &vocabulary)?;
        debug!(
            family = %MetricFamily::System,
            definitions = system_metrics.len(),
            "parsed metric family"
        );

        let model_metrics = family::parse_family(raw.model_metrics.as_ref(), &vocabulary)?;
        debug!(
            family = %MetricFamily::Model,
            definitions = model_metrics.len(),
            "parsed metric family"
        );

        Ok(Self {
            mode,
            dimension_names: vocabulary.into_names(),
            system_metrics,
            model_metrics,
        })
    }

    /// How the emission layer should publish metrics.
    pub fn mode(&self) -> MetricsMode {
        self.mode
    }

    /// All declared dimension names.
    pub fn dimension_names(&self) -> &BTreeSet<String> {
        &self.dimension_names
    }

    /// Definitions from `ts_metrics`: counters, then gauges, then histograms.
    pub fn system_metrics(&self) -> &[MetricDefinition] {
        &self.system_metrics
    }

    /// Definitions from `model_metrics`: counters, then gauges, then histograms.
    pub fn model_metrics(&self) -> &[MetricDefinition] {
        &self.model_metrics
    }

    /// Definitions of one family.
    pub fn family(&self, family: MetricFamily) -> &[MetricDefinition] {
        match family {
            MetricFamily::System => &self.system_metrics,
            MetricFamily::Model => &self.model_metrics,
        }
    }

    /// Definitions emitted from the given side of the serving process.
    ///
    /// Backend workers emit model metrics; the frontend emits system metrics.
    pub fn metrics_for(&self, context: MetricsContext) -> &[MetricDefinition] {
        match context {
            MetricsContext::Backend => self.family(MetricFamily::Model),
            MetricsContext::Frontend => self.family(MetricFamily::System),
        }
    }

    /// Whether nothing at all is configured.
    pub fn is_empty(&self) -> bool {
        self.dimension_names.is_empty()
            && self.system_metrics.is_empty()
            && self.model_metrics.is_empty()
    }
}
