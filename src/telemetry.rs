//! Telemetry metric name constants.
//!
//! Metrics describing the configuration loader itself. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! These are not the metrics a configuration *defines*: emitting those is
//! the job of whatever consumes the loaded [`MetricsConfiguration`](crate::MetricsConfiguration).
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `serve_metrics_config_`. Counters end in
//! `_total`, histograms use meaningful units (e.g. `_seconds`).

/// Total configuration loads.
///
/// Labels: `status` ("ok" | "error"); failed loads also carry `reason`
/// ("document" | "validation").
pub const LOADS_TOTAL: &str = "serve_metrics_config_loads_total";

/// Load duration in seconds, including reading the source.
pub const LOAD_DURATION_SECONDS: &str = "serve_metrics_config_load_duration_seconds";

/// Number of metric definitions currently held by a handler.
///
/// Labels: `family` ("system" | "model"). Drops to 0 after a failed load.
pub const DEFINITIONS: &str = "serve_metrics_config_definitions";
