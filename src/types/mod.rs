//! Public types for the metrics configuration API.

mod definition;
mod kind;
mod mode;

pub use definition::MetricDefinition;
pub use kind::MetricKind;
pub use mode::{MetricsContext, MetricsMode};
