//! Error types for the calculator

use crate::types::Operation;
use thiserror::Error;

/// Result type for calculator operations
pub type Result<T> = std::result::Result<T, Error>;

/// Calculator errors
#[derive(Error, Debug)]
pub enum Error {
    /// Divisor was zero (divide or modulo)
    #[error("cannot divide by zero")]
    DivisionByZero,

    /// Unsigned subtraction would go negative
    #[error("cannot subtract {subtrahend} from {minuend}: unsigned subtraction cannot produce a negative result")]
    NegativeResult {
        /// Left operand
        minuend: u64,
        /// Right operand
        subtrahend: u64,
    },

    /// Result does not fit in 64 bits; the call is rejected, never wrapped
    #[error("{operation}({lhs}, {rhs}) overflows 64-bit unsigned arithmetic")]
    Overflow {
        /// Operation that overflowed
        operation: Operation,
        /// Left operand
        lhs: u64,
        /// Right operand
        rhs: u64,
    },

    /// Concurrency error (actor mailbox closed, etc.)
    #[error("Concurrency error: {0}")]
    Concurrency(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Stable label for metrics, for validation failures only
    pub fn validation_kind(&self) -> Option<&'static str> {
        match self {
            Error::DivisionByZero => Some("division_by_zero"),
            Error::NegativeResult { .. } => Some("negative_result"),
            Error::Overflow { .. } => Some("overflow"),
            _ => None,
        }
    }
}
