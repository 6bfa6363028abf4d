//! Metrics configuration error types

/// Top-level error returned by a failed configuration load.
///
/// A load reports exactly one error: the first one encountered in pass
/// order (document, vocabulary, system metrics, model metrics).
#[derive(Debug, thiserror::Error)]
pub enum MetricsConfigError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl MetricsConfigError {
    /// Whether the document could not be read or interpreted at all.
    pub fn is_document_error(&self) -> bool {
        matches!(self, Self::Document(_))
    }

    /// Whether the document parsed but violated a metrics invariant.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Short label for the failure stage, used as a metric label.
    pub(crate) fn reason(&self) -> &'static str {
        match self {
            Self::Document(_) => "document",
            Self::Validation(_) => "validation",
        }
    }
}

/// The configuration source could not be turned into a typed document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("failed to read metrics configuration {source_name}: {source}")]
    Read {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse metrics configuration {source_name}: {source}")]
    Syntax {
        source_name: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// Valid YAML, but a node has the wrong shape (e.g. a mapping where a
    /// list of dimension names was expected).
    #[error("failed to interpret metrics configuration {source_name}: {source}")]
    Shape {
        source_name: String,
        #[source]
        source: serde_yaml::Error,
    },
}

impl DocumentError {
    /// Name of the source that failed (a file path or an in-memory label).
    pub fn source_name(&self) -> &str {
        match self {
            Self::Read { source_name, .. }
            | Self::Syntax { source_name, .. }
            | Self::Shape { source_name, .. } => source_name,
        }
    }
}

/// A metrics invariant was violated by an otherwise well-formed document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    // Vocabulary errors
    #[error("dimension names defined under \"dimensions\" cannot be empty")]
    EmptyDimensionName,

    #[error("dimension name \"{0}\" is declared more than once under \"dimensions\"")]
    DuplicateDimensionName(String),

    // Metric definition errors
    #[error("metric definition is missing required field \"{0}\"")]
    MissingField(&'static str),

    #[error("metric definition must have a non-empty \"name\"")]
    EmptyMetricName,

    #[error("dimension \"{dimension}\" of metric {metric} is not declared under \"dimensions\"")]
    UndeclaredDimension { metric: String, dimension: String },

    #[error("dimension \"{dimension}\" is listed more than once for metric {metric}")]
    DuplicateMetricDimension { metric: String, dimension: String },

    // Document-level settings
    #[error("unknown metrics mode \"{0}\" (expected \"log\" or \"prometheus\")")]
    InvalidMode(String),
}

/// Result type alias for metrics configuration operations
pub type Result<T> = std::result::Result<T, MetricsConfigError>;
