//! Document loading — source text to typed raw nodes.
//!
//! Loading happens in two steps:
//! 1. **Parse** — the source text becomes a generic YAML node tree
//!    ([`serde_yaml::Value`]). Failures here are [`DocumentError::Syntax`].
//! 2. **Decode** — once the tree has the expected shape, the source text is
//!    decoded into [`RawDocument`], whose leaves are still unvalidated.
//!    Failures here are [`DocumentError::Shape`].
//!
//! Decoding works on the text rather than the tree so that scalar leaves
//! keep their written form: `1.50` stays `"1.50"`, not the float `1.5`.
//!
//! Nothing in this module knows about metric invariants; that is the job of
//! [`crate::config`].

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::{self, Deserializer, Visitor};
use serde_yaml::Value;

use crate::error::DocumentError;
use crate::types::MetricKind;

/// Label used for in-memory sources created with [`MetricsSource::text()`].
pub const INLINE_SOURCE_NAME: &str = "<inline>";

/// Top-level key of the system (process-wide) metrics section.
pub const SYSTEM_METRICS_KEY: &str = "ts_metrics";

/// Top-level key of the per-model metrics section.
pub const MODEL_METRICS_KEY: &str = "model_metrics";

/// Where a metrics configuration document comes from.
///
/// ```rust
/// # use serve_metrics_config::MetricsSource;
/// let file = MetricsSource::file("/etc/serve/metrics.yaml");
/// assert_eq!(file.name(), "/etc/serve/metrics.yaml");
///
/// let inline = MetricsSource::text("dimensions: [host_name]");
/// assert_eq!(inline.name(), "<inline>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricsSource {
    /// A YAML file on the local filesystem.
    File(PathBuf),
    /// YAML text already in memory, with a label for diagnostics.
    Text { name: String, content: String },
}

impl MetricsSource {
    /// A file source.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// An in-memory source labelled `<inline>`.
    pub fn text(content: impl Into<String>) -> Self {
        Self::named_text(INLINE_SOURCE_NAME, content)
    }

    /// An in-memory source with a caller-chosen label.
    pub fn named_text(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Text {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Human-readable name used in logs and errors.
    pub fn name(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Text { name, .. } => name.clone(),
        }
    }
}

impl From<&Path> for MetricsSource {
    fn from(path: &Path) -> Self {
        Self::file(path)
    }
}

impl From<PathBuf> for MetricsSource {
    fn from(path: PathBuf) -> Self {
        Self::File(path)
    }
}

// ============================================================================
// Raw document nodes
// ============================================================================

/// Top level of a metrics document. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawDocument {
    #[serde(default)]
    pub mode: Option<Scalar>,
    #[serde(default)]
    pub dimensions: Option<Vec<Scalar>>,
    #[serde(default)]
    pub ts_metrics: Option<RawFamily>,
    #[serde(default)]
    pub model_metrics: Option<RawFamily>,
}

/// One metrics section (`ts_metrics` or `model_metrics`).
///
/// Only the `counter`, `gauge` and `histogram` subsections are read; other
/// keys are left for future schema versions.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawFamily {
    #[serde(default)]
    pub counter: Option<Vec<RawMetric>>,
    #[serde(default)]
    pub gauge: Option<Vec<RawMetric>>,
    #[serde(default)]
    pub histogram: Option<Vec<RawMetric>>,
}

impl RawFamily {
    /// Raw definitions listed under the subsection for `kind`, if present.
    pub fn definitions(&self, kind: MetricKind) -> Option<&[RawMetric]> {
        match kind {
            MetricKind::Counter => self.counter.as_deref(),
            MetricKind::Gauge => self.gauge.as_deref(),
            MetricKind::Histogram => self.histogram.as_deref(),
        }
    }
}

/// An unvalidated metric definition. Every field may be missing.
#[derive(Debug, Default, Clone, Deserialize)]
pub(crate) struct RawMetric {
    #[serde(default)]
    pub name: Option<Scalar>,
    #[serde(default)]
    pub unit: Option<Scalar>,
    #[serde(default)]
    pub dimensions: Option<Vec<Scalar>>,
}

/// A YAML scalar leaf in its written form.
///
/// Strings, numbers and booleans are all accepted as text, exactly as they
/// appear in the source, so `unit: 0x1F` reads as `"0x1F"`. Mappings and
/// sequences in a scalar position are shape errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Scalar(pub String);

impl Scalar {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ScalarVisitor;

        impl Visitor<'_> for ScalarVisitor {
            type Value = Scalar;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string, number or boolean")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Scalar, E> {
                Ok(Scalar(v.to_owned()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Scalar, E> {
                Ok(Scalar(v))
            }
        }

        // Plain scalars arrive as their source text, whatever they resolve to.
        deserializer.deserialize_str(ScalarVisitor)
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Read and decode the document behind `source`.
///
/// A file is read in full and closed before parsing starts.
pub(crate) fn load_document(source: &MetricsSource) -> Result<RawDocument, DocumentError> {
    let source_name = source.name();
    let text: Cow<'_, str> = match source {
        MetricsSource::File(path) => {
            let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
                source_name: source_name.clone(),
                source,
            })?;
            Cow::Owned(content)
        }
        MetricsSource::Text { content, .. } => Cow::Borrowed(content),
    };
    parse_document(&source_name, &text)
}

/// Parse YAML text into a node tree, check its shape, then decode the text.
pub(crate) fn parse_document(source_name: &str, text: &str) -> Result<RawDocument, DocumentError> {
    if text.trim().is_empty() {
        return Ok(RawDocument::default());
    }

    let node: Value = serde_yaml::from_str(text).map_err(|source| DocumentError::Syntax {
        source_name: source_name.to_string(),
        source,
    })?;

    // An empty document carries no configuration at all.
    if node.is_null() {
        return Ok(RawDocument::default());
    }

    let shape_error = |source: serde_yaml::Error| DocumentError::Shape {
        source_name: source_name.to_string(),
        source,
    };
    check_shape(&node).map_err(shape_error)?;
    serde_yaml::from_str(text).map_err(shape_error)
}

/// Check the parts of the tree that decoding from text cannot.
///
/// Derived struct decoding also accepts sequences positionally, which would
/// let `- [a, b, []]` pass for a metric definition. A null inside a
/// dimension list would otherwise decode as the text `~`.
fn check_shape(root: &Value) -> Result<(), serde_yaml::Error> {
    expect_mapping(root, "document root")?;
    expect_non_null_entries(root, "dimensions")?;
    for section in [SYSTEM_METRICS_KEY, MODEL_METRICS_KEY] {
        let Some(node) = root.get(section).filter(|node| !node.is_null()) else {
            continue;
        };
        expect_mapping(node, section)?;
        for kind in MetricKind::ALL {
            if let Some(Value::Sequence(entries)) = node.get(kind.section_key()) {
                for entry in entries {
                    let what = format!("{section}.{kind} entry");
                    expect_mapping(entry, &what)?;
                    expect_non_null_entries(entry, &format!("{what} dimensions"))?;
                }
            }
        }
    }
    Ok(())
}

/// Reject null items in the `dimensions` list of `node`, if it has one.
fn expect_non_null_entries(node: &Value, what: &str) -> Result<(), serde_yaml::Error> {
    match node.get("dimensions") {
        Some(Value::Sequence(items)) if items.iter().any(Value::is_null) => {
            Err(de::Error::custom(format!("{what} must not contain null")))
        }
        _ => Ok(()),
    }
}

fn expect_mapping(node: &Value, what: &str) -> Result<(), serde_yaml::Error> {
    if node.is_mapping() {
        Ok(())
    } else {
        Err(de::Error::custom(format!("{what} must be a mapping")))
    }
}
