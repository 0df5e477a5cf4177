//! CalcRail Calculator Core
//!
//! Stateful arithmetic service with audited transaction counters.
//!
//! # Architecture
//!
//! - **Validated arithmetic**: six unsigned operations, invalid calls
//!   rejected before any state change
//! - **Single Writer**: one actor task serializes all mutating calls
//! - **Audited counters**: one counter per operation plus a global total,
//!   advanced only by successful calls
//! - **Notifications**: each success emits per-operation counter, total
//!   counter, then result, in that order
//!
//! # Invariants
//!
//! - Counter conservation: total == Σ(per-operation counters) between calls
//! - Atomicity: a failed call changes no counter and emits nothing
//! - Monotonicity: counters only ever advance, by exactly 1 per success
//! - Overflow policy: u64 checked arithmetic, reject on overflow, never wrap
//!
//! # Arithmetic width
//!
//! Operands and results are `u64`. The original platform used 256-bit-safe
//! unsigned arithmetic with implicit semantics; here the policy is explicit:
//! every computation is checked and an overflowing call fails like any other
//! validation error, leaving state untouched.

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod actor;
pub mod calculator;
pub mod config;
pub mod error;
pub mod metrics;
pub mod service;
pub mod types;

// Re-exports
pub use calculator::Calculator;
pub use config::Config;
pub use error::{Error, Result};
pub use service::CalculatorService;
pub use types::{Calculation, Counters, Notification, Operation};
