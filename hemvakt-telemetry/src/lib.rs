//! # Hemvakt Telemetry
//!
//! Structured logging and Prometheus metrics for container operations.

pub mod logging;
pub mod metrics;

pub use logging::{EventLogger, Outcome};
pub use metrics::MetricsRecorder;
