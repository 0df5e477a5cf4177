//! The calculator state machine
//!
//! A [`Calculator`] owns the transaction counters and performs all validated
//! arithmetic. Every call follows the same contract:
//!
//! 1. Validate and compute with checked 64-bit arithmetic; any failure
//!    returns before state is touched.
//! 2. Increment the per-operation counter, then the global counter.
//! 3. Produce the three notifications in fixed order: per-operation counter,
//!    global counter, result.
//!
//! Mutation only happens through `&mut self`, so a failed call leaves the
//! counter vector identical and interleaving observers cannot see a
//! half-updated state.

use crate::error::{Error, Result};
use crate::types::{Calculation, Counters, Notification, Operation};

/// Stateful arithmetic engine with audited transaction counters
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    counters: Counters,
}

impl Calculator {
    /// Create a fresh calculator with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Add two numbers
    pub fn add(&mut self, a: u64, b: u64) -> Result<Calculation> {
        self.apply(Operation::Add, a, b)
    }

    /// Subtract `b` from `a`; fails when the result would go negative
    pub fn subtract(&mut self, a: u64, b: u64) -> Result<Calculation> {
        self.apply(Operation::Subtract, a, b)
    }

    /// Multiply two numbers
    pub fn multiply(&mut self, a: u64, b: u64) -> Result<Calculation> {
        self.apply(Operation::Multiply, a, b)
    }

    /// Integer division, truncated toward zero; fails when `b` is zero
    pub fn divide(&mut self, a: u64, b: u64) -> Result<Calculation> {
        self.apply(Operation::Divide, a, b)
    }

    /// Remainder of `a / b`; fails when `b` is zero
    pub fn modulo(&mut self, a: u64, b: u64) -> Result<Calculation> {
        self.apply(Operation::Modulo, a, b)
    }

    /// Raise `a` to the power `b` by repeated multiplication
    ///
    /// True exponentiation: `raise_to_the_power(121, 4)` is 214358881.
    /// `a^0` is 1 for every `a`, including `0^0`.
    pub fn raise_to_the_power(&mut self, a: u64, b: u64) -> Result<Calculation> {
        self.apply(Operation::Power, a, b)
    }

    /// Total number of successful calculations, without side effects
    pub fn total_calculation_count(&self) -> u64 {
        self.counters.total()
    }

    /// Current counter vector, without side effects
    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    /// Run one operation through the call contract
    pub fn apply(&mut self, operation: Operation, a: u64, b: u64) -> Result<Calculation> {
        // Validate + compute before any mutation. Checked arithmetic doubles
        // as the overflow policy: reject, never wrap.
        let result = Self::compute(operation, a, b)?;

        self.counters.record(operation);
        debug_assert!(self.counters.is_conserved());

        let notifications = [
            Notification::OperationTxnCount {
                operation,
                count: self.counters.count_for(operation),
            },
            Notification::TotalTxnCount {
                count: self.counters.total(),
            },
            Notification::CalculationResult { value: result },
        ];

        Ok(Calculation {
            operation,
            result,
            notifications,
        })
    }

    fn compute(operation: Operation, a: u64, b: u64) -> Result<u64> {
        match operation {
            Operation::Add => a.checked_add(b).ok_or(Error::Overflow {
                operation,
                lhs: a,
                rhs: b,
            }),
            Operation::Subtract => a.checked_sub(b).ok_or(Error::NegativeResult {
                minuend: a,
                subtrahend: b,
            }),
            Operation::Multiply => a.checked_mul(b).ok_or(Error::Overflow {
                operation,
                lhs: a,
                rhs: b,
            }),
            Operation::Divide => a.checked_div(b).ok_or(Error::DivisionByZero),
            Operation::Modulo => a.checked_rem(b).ok_or(Error::DivisionByZero),
            Operation::Power => Self::pow(a, b).ok_or(Error::Overflow {
                operation,
                lhs: a,
                rhs: b,
            }),
        }
    }

    /// Exponentiation by repeated multiplication, None on overflow
    ///
    /// Bases 0 and 1 never overflow, so they are answered directly rather
    /// than looping over an arbitrary exponent. For any base >= 2 an
    /// exponent above 63 cannot fit in 64 bits, which bounds the loop.
    fn pow(base: u64, exponent: u64) -> Option<u64> {
        match base {
            0 => Some(u64::from(exponent == 0)),
            1 => Some(1),
            _ => {
                if exponent > 63 {
                    return None;
                }
                let mut result: u64 = 1;
                for _ in 0..exponent {
                    result = result.checked_mul(base)?;
                }
                Some(result)
            }
        }
    }
}
