//! Metrics collection for observability
//!
//! This module provides Prometheus metrics for monitoring the calculator.
//!
//! # Metrics
//!
//! - `calc_calculations_total` - Total number of successful calculations
//! - `calc_operations_total` - Successful calculations by operation
//! - `calc_validation_failures_total` - Rejected calls by failure kind
//! - `calc_apply_duration_seconds` - Histogram of call latencies

use crate::types::Operation;
use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry};
use std::fmt;
use std::sync::Arc;

/// Metrics collector
#[derive(Clone)]
pub struct Metrics {
    /// Total successful calculations
    pub calculations_total: IntCounter,

    /// Successful calculations by operation
    pub operations_total: IntCounterVec,

    /// Rejected calls by validation failure kind
    pub validation_failures_total: IntCounterVec,

    /// Call latency histogram
    pub apply_duration: Histogram,

    /// Prometheus registry
    pub registry: Arc<Registry>,
}

impl Metrics {
    /// Create new metrics collector
    pub fn new() -> prometheus::Result<Self> {
        let registry = Arc::new(Registry::new());

        let calculations_total = IntCounter::new(
            "calc_calculations_total",
            "Total number of successful calculations",
        )?;
        registry.register(Box::new(calculations_total.clone()))?;

        let operations_total = IntCounterVec::new(
            Opts::new(
                "calc_operations_total",
                "Successful calculations by operation",
            ),
            &["operation"],
        )?;
        registry.register(Box::new(operations_total.clone()))?;

        let validation_failures_total = IntCounterVec::new(
            Opts::new(
                "calc_validation_failures_total",
                "Rejected calls by validation failure kind",
            ),
            &["kind"],
        )?;
        registry.register(Box::new(validation_failures_total.clone()))?;

        let apply_duration = Histogram::with_opts(
            HistogramOpts::new(
                "calc_apply_duration_seconds",
                "Histogram of call latencies",
            )
            .buckets(vec![0.00001, 0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.010, 0.050]),
        )?;
        registry.register(Box::new(apply_duration.clone()))?;

        Ok(Self {
            calculations_total,
            operations_total,
            validation_failures_total,
            apply_duration,
            registry,
        })
    }

    /// Record a successful calculation
    pub fn record_calculation(&self, operation: Operation) {
        self.calculations_total.inc();
        self.operations_total
            .with_label_values(&[operation.name()])
            .inc();
    }

    /// Record a rejected call
    pub fn record_validation_failure(&self, kind: &str) {
        self.validation_failures_total
            .with_label_values(&[kind])
            .inc();
    }

    /// Record call duration
    pub fn record_apply_duration(&self, duration_seconds: f64) {
        self.apply_duration.observe(duration_seconds);
    }

    /// Get metrics registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

impl fmt::Debug for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Metrics")
            .field("calculations_total", &self.calculations_total.get())
            .finish_non_exhaustive()
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new().expect("Failed to create metrics")
    }
}
