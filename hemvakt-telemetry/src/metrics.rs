//! ## hemvakt-telemetry::metrics
//! **Prometheus counters and sort latency histogram**

use std::time::Instant;

use prometheus::{Encoder, Histogram, HistogramOpts, IntCounterVec, Opts, Registry, TextEncoder};

use crate::logging::Outcome;

#[derive(Debug, Clone)]
pub struct MetricsRecorder {
    pub registry: Registry,
    pub operations: IntCounterVec,
    pub sort_duration: Histogram,
}

impl MetricsRecorder {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let operations = IntCounterVec::new(
            Opts::new(
                "hemvakt_operations_total",
                "Container operations by outcome",
            ),
            &["container", "operation", "outcome"],
        )?;

        let sort_duration = Histogram::with_opts(
            HistogramOpts::new(
                "hemvakt_sort_duration_seconds",
                "Time spent sorting alerts by priority",
            )
            .buckets(vec![1e-6, 1e-5, 1e-4, 1e-3, 1e-2, 1e-1]),
        )?;

        registry.register(Box::new(operations.clone()))?;
        registry.register(Box::new(sort_duration.clone()))?;

        Ok(Self {
            registry,
            operations,
            sort_duration,
        })
    }

    pub fn record_operation(&self, container: &str, operation: &str, outcome: Outcome) {
        self.operations
            .with_label_values(&[container, operation, outcome.as_str()])
            .inc();
    }

    /// Runs `sort` and records how long it took.
    pub fn time_sort<R>(&self, sort: impl FnOnce() -> R) -> R {
        let started = Instant::now();
        let result = sort();
        self.sort_duration
            .observe(started.elapsed().as_secs_f64());
        result
    }

    pub fn gather_metrics(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::<u8>::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
