//! ## hemvakt-telemetry::logging
//! **Structured logging with tracing**
//!
//! `RUST_LOG` takes precedence over the configured filter.

use std::fmt;

use tracing::{info, info_span};
use tracing_subscriber::{fmt as subscriber_fmt, EnvFilter};

/// How a container operation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The operation changed or returned something.
    Ok,
    /// The target was not present; the container is unchanged.
    Miss,
    /// The operation was refused (duplicate id, full queue, cycle).
    Rejected,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Ok => "ok",
            Outcome::Miss => "miss",
            Outcome::Rejected => "rejected",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone)]
pub struct EventLogger;

impl EventLogger {
    /// Installs the global subscriber. Panics if one is already set.
    pub fn init(filter: &str) {
        Self::builder(filter).init()
    }

    /// Like [`EventLogger::init`], but reports an already-installed
    /// subscriber as an error.
    pub fn try_init(filter: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Self::builder(filter).try_init()
    }

    fn builder(
        filter: &str,
    ) -> tracing_subscriber::fmt::SubscriberBuilder<
        tracing_subscriber::fmt::format::DefaultFields,
        tracing_subscriber::fmt::format::Format,
        EnvFilter,
    > {
        subscriber_fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
            )
            .with_target(false)
    }

    #[inline]
    pub fn log_operation(container: &str, operation: &str, outcome: Outcome) {
        let span = info_span!("container_operation", container, operation);
        let _entered = span.enter();
        info!(outcome = outcome.as_str(), "Container operation finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[traced_test]
    #[test]
    fn operation_is_logged_with_outcome() {
        EventLogger::log_operation("command_queue", "push_rear", Outcome::Rejected);
        assert!(logs_contain("Container operation finished"));
        assert!(logs_contain("outcome=\"rejected\""));
        assert!(logs_contain("command_queue"));
    }

    #[test]
    fn outcome_labels() {
        assert_eq!(Outcome::Ok.to_string(), "ok");
        assert_eq!(Outcome::Miss.as_str(), "miss");
    }
}
