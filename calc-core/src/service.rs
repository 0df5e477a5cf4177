//! High-level calculator service facade
//!
//! This module ties together the actor, configuration, and metrics into the
//! API other components call.
//!
//! # Example
//!
//! ```no_run
//! use calc_core::{CalculatorService, Config};
//!
//! #[tokio::main]
//! async fn main() -> calc_core::Result<()> {
//!     let service = CalculatorService::open(Config::default());
//!
//!     let calculation = service.add(40, 91).await?;
//!     assert_eq!(calculation.result, 131);
//!     assert_eq!(service.total_calculation_count().await?, 1);
//!
//!     service.shutdown().await
//! }
//! ```

use crate::actor::{spawn_calculator_actor, CalculatorHandle};
use crate::config::Config;
use crate::error::Result;
use crate::metrics::Metrics;
use crate::types::{Calculation, Counters, Notification, Operation};
use parking_lot::Mutex;
use std::fmt;
use std::time::Instant;
use tokio::sync::mpsc;

/// Main calculator service interface
pub struct CalculatorService {
    /// Actor handle for serialized operations
    handle: CalculatorHandle,

    /// Notification stream, held until a dispatcher claims it
    notifications: Mutex<Option<mpsc::Receiver<Notification>>>,

    /// Prometheus metrics
    metrics: Metrics,

    /// Configuration
    config: Config,
}

impl CalculatorService {
    /// Open the service with configuration
    pub fn open(config: Config) -> Self {
        let (handle, notifications) =
            spawn_calculator_actor(config.mailbox_capacity, config.notification_buffer);

        Self {
            handle,
            notifications: Mutex::new(Some(notifications)),
            metrics: Metrics::default(),
            config,
        }
    }

    /// Add two numbers
    pub async fn add(&self, a: u64, b: u64) -> Result<Calculation> {
        self.apply(Operation::Add, a, b).await
    }

    /// Subtract `b` from `a`
    pub async fn subtract(&self, a: u64, b: u64) -> Result<Calculation> {
        self.apply(Operation::Subtract, a, b).await
    }

    /// Multiply two numbers
    pub async fn multiply(&self, a: u64, b: u64) -> Result<Calculation> {
        self.apply(Operation::Multiply, a, b).await
    }

    /// Integer division, truncated toward zero
    pub async fn divide(&self, a: u64, b: u64) -> Result<Calculation> {
        self.apply(Operation::Divide, a, b).await
    }

    /// Remainder of `a / b`
    pub async fn modulo(&self, a: u64, b: u64) -> Result<Calculation> {
        self.apply(Operation::Modulo, a, b).await
    }

    /// Raise `a` to the power `b` (true exponentiation)
    pub async fn raise_to_the_power(&self, a: u64, b: u64) -> Result<Calculation> {
        self.apply(Operation::Power, a, b).await
    }

    /// Perform one operation with logging and metrics
    pub async fn apply(&self, operation: Operation, a: u64, b: u64) -> Result<Calculation> {
        let start = Instant::now();
        let result = self.handle.apply(operation, a, b).await;
        self.metrics
            .record_apply_duration(start.elapsed().as_secs_f64());

        match &result {
            Ok(calculation) => {
                self.metrics.record_calculation(operation);
                tracing::debug!(
                    operation = operation.name(),
                    a,
                    b,
                    result = calculation.result,
                    "calculation succeeded"
                );
            }
            Err(err) => {
                if let Some(kind) = err.validation_kind() {
                    self.metrics.record_validation_failure(kind);
                }
                tracing::debug!(operation = operation.name(), a, b, %err, "call rejected");
            }
        }

        result
    }

    /// Total number of successful calculations
    pub async fn total_calculation_count(&self) -> Result<u64> {
        self.handle.total_count().await
    }

    /// Consistent snapshot of all counters
    pub async fn snapshot(&self) -> Result<Counters> {
        self.handle.snapshot().await
    }

    /// Take the notification stream for dispatching
    ///
    /// The stream can be claimed once; later calls return `None`.
    pub fn notifications(&self) -> Option<mpsc::Receiver<Notification>> {
        self.notifications.lock().take()
    }

    /// Metrics collector, for exposition
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Service configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Shutdown the service
    pub async fn shutdown(self) -> Result<()> {
        self.handle.shutdown().await
    }
}

impl fmt::Debug for CalculatorService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalculatorService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn test_config() -> Config {
        Config {
            mailbox_capacity: 16,
            notification_buffer: 256,
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_open_and_shutdown() {
        let service = CalculatorService::open(test_config());
        let rendered = format!("{:?}", service);
        assert!(rendered.contains("CalculatorService"));
        assert!(rendered.contains("calc-core"));
        service.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_operations_through_facade() {
        let service = CalculatorService::open(test_config());

        assert_eq!(service.add(40, 91).await.unwrap().result, 131);
        assert_eq!(service.subtract(20156, 621).await.unwrap().result, 19535);
        assert_eq!(service.multiply(396, 908).await.unwrap().result, 359568);
        assert_eq!(service.divide(52921, 101).await.unwrap().result, 523);
        assert_eq!(service.modulo(52921, 101).await.unwrap().result, 98);
        assert_eq!(
            service.raise_to_the_power(121, 4).await.unwrap().result,
            214358881
        );

        assert_eq!(service.total_calculation_count().await.unwrap(), 6);
        let snapshot = service.snapshot().await.unwrap();
        assert!(snapshot.is_conserved());

        service.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_rejected_call_counts_failure_metric() {
        let service = CalculatorService::open(test_config());

        let err = service.divide(5, 0).await.unwrap_err();
        assert!(matches!(err, Error::DivisionByZero));

        assert_eq!(
            service
                .metrics()
                .validation_failures_total
                .with_label_values(&["division_by_zero"])
                .get(),
            1
        );
        assert_eq!(service.metrics().calculations_total.get(), 0);
        assert_eq!(service.total_calculation_count().await.unwrap(), 0);

        service.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_notifications_claimed_once() {
        let service = CalculatorService::open(test_config());

        let mut stream = service.notifications().unwrap();
        assert!(service.notifications().is_none());

        service.add(1, 2).await.unwrap();
        let first = stream.recv().await.unwrap();
        assert_eq!(first.event_name(), "AdditionTxnCount");

        service.shutdown().await.unwrap();
    }
}
