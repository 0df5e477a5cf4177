//! Actor-based concurrency for the calculator
//!
//! This module implements the single-writer pattern using Tokio actors:
//! - One logical writer task serializes every mutating call, so the
//!   validate-compute-increment-emit sequence is indivisible to observers
//! - Async message passing with backpressure (bounded mailbox)
//! - Notifications fan out through an outbound channel an external
//!   dispatcher drains
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                   Callers                             │
//! │           CalculatorHandle (Clone)                    │
//! └─────────────────────┬────────────────────────────────┘
//!                       │ mpsc::channel (bounded)
//!                       ▼
//! ┌──────────────────────────────────────────────────────┐
//! │            CalculatorActor (Single Task)              │
//! │   Calculator (counters) ── apply() per message        │
//! └─────────────────────┬────────────────────────────────┘
//!                       │ mpsc::channel (notifications)
//!                       ▼
//!              external dispatcher / observers
//! ```

use crate::calculator::Calculator;
use crate::error::{Error, Result};
use crate::types::{Calculation, Counters, Notification, Operation};
use std::fmt;
use tokio::sync::{mpsc, oneshot};

/// Message sent to the calculator actor
pub enum CalculatorMessage {
    /// Perform one operation
    Apply {
        /// Operation kind
        operation: Operation,
        /// Left operand
        a: u64,
        /// Right operand
        b: u64,
        /// Response channel
        response: oneshot::Sender<Result<Calculation>>,
    },

    /// Read the global counter
    TotalCount {
        /// Response channel
        response: oneshot::Sender<u64>,
    },

    /// Read a consistent snapshot of all counters
    Snapshot {
        /// Response channel
        response: oneshot::Sender<Counters>,
    },

    /// Shutdown actor
    Shutdown,
}

impl fmt::Debug for CalculatorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalculatorMessage::Apply {
                operation, a, b, ..
            } => f
                .debug_struct("Apply")
                .field("operation", operation)
                .field("a", a)
                .field("b", b)
                .finish_non_exhaustive(),
            CalculatorMessage::TotalCount { .. } => {
                f.debug_struct("TotalCount").finish_non_exhaustive()
            }
            CalculatorMessage::Snapshot { .. } => {
                f.debug_struct("Snapshot").finish_non_exhaustive()
            }
            CalculatorMessage::Shutdown => f.write_str("Shutdown"),
        }
    }
}

/// Actor that processes calculator messages
pub struct CalculatorActor {
    /// The owned state machine
    calculator: Calculator,

    /// Mailbox for incoming messages
    mailbox: mpsc::Receiver<CalculatorMessage>,

    /// Outbound notification channel
    notifications: mpsc::Sender<Notification>,
}

impl CalculatorActor {
    /// Create new actor
    pub fn new(
        mailbox: mpsc::Receiver<CalculatorMessage>,
        notifications: mpsc::Sender<Notification>,
    ) -> Self {
        Self {
            calculator: Calculator::new(),
            mailbox,
            notifications,
        }
    }

    /// Run the actor event loop
    pub async fn run(mut self) {
        while let Some(msg) = self.mailbox.recv().await {
            match msg {
                CalculatorMessage::Shutdown => break,
                _ => self.handle_message(msg).await,
            }
        }
    }

    /// Handle a single message
    async fn handle_message(&mut self, msg: CalculatorMessage) {
        match msg {
            CalculatorMessage::Apply {
                operation,
                a,
                b,
                response,
            } => {
                let result = self.calculator.apply(operation, a, b);

                if let Ok(ref calculation) = result {
                    // Emission order matters: per-operation counter, total
                    // counter, result. A lagging dispatcher is the
                    // dispatcher's problem, not a reason to lose state.
                    for notification in calculation.notifications {
                        if self.notifications.send(notification).await.is_err() {
                            tracing::warn!(
                                event = notification.event_name(),
                                "notification channel closed, dropping"
                            );
                            break;
                        }
                    }
                }

                let _ = response.send(result);
            }

            CalculatorMessage::TotalCount { response } => {
                let _ = response.send(self.calculator.total_calculation_count());
            }

            CalculatorMessage::Snapshot { response } => {
                let _ = response.send(*self.calculator.counters());
            }

            CalculatorMessage::Shutdown => {
                // Handled in main loop
            }
        }
    }
}

impl fmt::Debug for CalculatorActor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalculatorActor")
            .field("calculator", &self.calculator)
            .finish_non_exhaustive()
    }
}

/// Handle for sending messages to the actor
#[derive(Clone)]
pub struct CalculatorHandle {
    sender: mpsc::Sender<CalculatorMessage>,
}

impl fmt::Debug for CalculatorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalculatorHandle").finish_non_exhaustive()
    }
}

impl CalculatorHandle {
    /// Create new handle
    pub fn new(sender: mpsc::Sender<CalculatorMessage>) -> Self {
        Self { sender }
    }

    /// Perform one operation
    pub async fn apply(&self, operation: Operation, a: u64, b: u64) -> Result<Calculation> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(CalculatorMessage::Apply {
                operation,
                a,
                b,
                response: tx,
            })
            .await
            .map_err(|_| Error::Concurrency("Actor mailbox closed".to_string()))?;

        rx.await
            .map_err(|_| Error::Concurrency("Response channel closed".to_string()))?
    }

    /// Read the global counter
    pub async fn total_count(&self) -> Result<u64> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(CalculatorMessage::TotalCount { response: tx })
            .await
            .map_err(|_| Error::Concurrency("Actor mailbox closed".to_string()))?;

        rx.await
            .map_err(|_| Error::Concurrency("Response channel closed".to_string()))
    }

    /// Read a consistent snapshot of all counters
    pub async fn snapshot(&self) -> Result<Counters> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(CalculatorMessage::Snapshot { response: tx })
            .await
            .map_err(|_| Error::Concurrency("Actor mailbox closed".to_string()))?;

        rx.await
            .map_err(|_| Error::Concurrency("Response channel closed".to_string()))
    }

    /// Shutdown actor
    pub async fn shutdown(&self) -> Result<()> {
        self.sender
            .send(CalculatorMessage::Shutdown)
            .await
            .map_err(|_| Error::Concurrency("Actor mailbox closed".to_string()))?;
        Ok(())
    }
}

/// Spawn the calculator actor
///
/// Returns the cloneable handle plus the notification stream the external
/// dispatcher drains.
pub fn spawn_calculator_actor(
    mailbox_capacity: usize,
    notification_buffer: usize,
) -> (CalculatorHandle, mpsc::Receiver<Notification>) {
    let (tx, rx) = mpsc::channel(mailbox_capacity);
    let (notify_tx, notify_rx) = mpsc::channel(notification_buffer);
    let actor = CalculatorActor::new(rx, notify_tx);

    tokio::spawn(async move {
        actor.run().await;
    });

    (CalculatorHandle::new(tx), notify_rx)
}
