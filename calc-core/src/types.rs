//! Core types for the calculator service
//!
//! All types are designed for:
//! - Deterministic serialization (serde)
//! - Memory safety (no unsafe code)
//! - Exact arithmetic (checked u64, no floating point)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Arithmetic operation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Operation {
    /// Addition
    Add = 1,
    /// Subtraction
    Subtract = 2,
    /// Multiplication
    Multiply = 3,
    /// Integer division (truncated toward zero)
    Divide = 4,
    /// Remainder
    Modulo = 5,
    /// Exponentiation by repeated multiplication
    Power = 6,
}

impl Operation {
    /// All operation kinds, in counter-field order
    pub const ALL: [Operation; 6] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
        Operation::Modulo,
        Operation::Power,
    ];

    /// Stable lowercase label for logs and metrics
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
            Operation::Modulo => "modulo",
            Operation::Power => "power",
        }
    }

    /// Notification event name for the per-operation transaction counter
    pub fn txn_count_event(&self) -> &'static str {
        match self {
            Operation::Add => "AdditionTxnCount",
            Operation::Subtract => "SubtractionTxnCount",
            Operation::Multiply => "MultiplicationTxnCount",
            Operation::Divide => "DivisionTxnCount",
            Operation::Modulo => "ModuloTxnCount",
            Operation::Power => "PowerTxnCount",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Transaction counters for the calculator
///
/// One counter per operation kind plus a global total. Counters only move on
/// successful, validated operations, by exactly 1 per call. Conservation
/// invariant: `total` equals the sum of the six per-operation counters at
/// every point between calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    /// Successful calls of any kind
    pub total: u64,

    /// Successful `add` calls
    pub addition: u64,

    /// Successful `subtract` calls
    pub subtraction: u64,

    /// Successful `multiply` calls
    pub multiplication: u64,

    /// Successful `divide` calls
    pub division: u64,

    /// Successful `modulo` calls
    pub modulo: u64,

    /// Successful `raise_to_the_power` calls
    pub power: u64,
}

impl Counters {
    /// Fresh counter vector, all zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter value for one operation kind
    pub fn count_for(&self, operation: Operation) -> u64 {
        match operation {
            Operation::Add => self.addition,
            Operation::Subtract => self.subtraction,
            Operation::Multiply => self.multiplication,
            Operation::Divide => self.division,
            Operation::Modulo => self.modulo,
            Operation::Power => self.power,
        }
    }

    /// Global counter value
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Check the conservation invariant
    pub fn is_conserved(&self) -> bool {
        self.total
            == self.addition
                + self.subtraction
                + self.multiplication
                + self.division
                + self.modulo
                + self.power
    }

    pub(crate) fn record(&mut self, operation: Operation) {
        match operation {
            Operation::Add => self.addition += 1,
            Operation::Subtract => self.subtraction += 1,
            Operation::Multiply => self.multiplication += 1,
            Operation::Divide => self.division += 1,
            Operation::Modulo => self.modulo += 1,
            Operation::Power => self.power += 1,
        }
        self.total += 1;
    }
}

/// Notification emitted for a successful calculation
///
/// Every successful call produces exactly three, in this relative order:
/// the per-operation counter, the global counter, then the result. Observers
/// rely on the ordering to correlate a result with its counters. Failed
/// calls produce none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum Notification {
    /// Per-operation transaction counter, post-increment
    OperationTxnCount {
        /// Which operation's counter this is
        operation: Operation,
        /// Counter value after the increment
        count: u64,
    },

    /// Global transaction counter, post-increment
    TotalTxnCount {
        /// Counter value after the increment
        count: u64,
    },

    /// The computed result
    CalculationResult {
        /// Result of the operation
        value: u64,
    },
}

impl Notification {
    /// Event name on the wire, matching the original contract vocabulary
    pub fn event_name(&self) -> &'static str {
        match self {
            Notification::OperationTxnCount { operation, .. } => operation.txn_count_event(),
            Notification::TotalTxnCount { .. } => "TotalTxnCount",
            Notification::CalculationResult { .. } => "CalculationResult",
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::OperationTxnCount { operation, count } => {
                write!(f, "{}={}", operation.txn_count_event(), count)
            }
            Notification::TotalTxnCount { count } => write!(f, "TotalTxnCount={}", count),
            Notification::CalculationResult { value } => write!(f, "CalculationResult={}", value),
        }
    }
}

/// Output of one successful calculation
///
/// Carries the result plus the three notifications the call produced, so a
/// dispatcher can drain them without the core doing I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calculation {
    /// Operation that was performed
    pub operation: Operation,

    /// Computed result
    pub result: u64,

    /// Notifications, in emission order
    pub notifications: [Notification; 3],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_names() {
        assert_eq!(Operation::Add.name(), "add");
        assert_eq!(Operation::Power.name(), "power");
        assert_eq!(Operation::Add.txn_count_event(), "AdditionTxnCount");
        assert_eq!(Operation::Power.txn_count_event(), "PowerTxnCount");
    }

    #[test]
    fn test_fresh_counters_conserved() {
        let counters = Counters::new();
        assert_eq!(counters.total(), 0);
        assert!(counters.is_conserved());
        for op in Operation::ALL {
            assert_eq!(counters.count_for(op), 0);
        }
    }

    #[test]
    fn test_record_moves_exactly_one_pair() {
        let mut counters = Counters::new();
        counters.record(Operation::Divide);

        assert_eq!(counters.division, 1);
        assert_eq!(counters.total, 1);
        assert!(counters.is_conserved());

        for op in Operation::ALL {
            if op != Operation::Divide {
                assert_eq!(counters.count_for(op), 0);
            }
        }
    }

    #[test]
    fn test_notification_event_names() {
        let n = Notification::OperationTxnCount {
            operation: Operation::Subtract,
            count: 3,
        };
        assert_eq!(n.event_name(), "SubtractionTxnCount");
        assert_eq!(Notification::TotalTxnCount { count: 7 }.event_name(), "TotalTxnCount");
        assert_eq!(
            Notification::CalculationResult { value: 9 }.event_name(),
            "CalculationResult"
        );
    }

    #[test]
    fn test_notification_serde_tagging() {
        let n = Notification::TotalTxnCount { count: 5 };
        let json = serde_json::to_string(&n).unwrap();
        assert!(json.contains("\"event\":\"TotalTxnCount\""));

        let back: Notification = serde_json::from_str(&json).unwrap();
        assert_eq!(back, n);
    }
}
