//! Core business logic module
//!
//! This module contains the bank components:
//! - `bank` - Account registry and factory
//! - `account` - Balance storage and the single-flight operation guard
//! - `card` - Card identity and activation gating
//! - `operation` - Handles and outcomes of admitted guarded operations
//! - `registry` - Process-scoped id and card-number issuer
//! - `latency` - Injectable simulated processing delay
//! - `persistence` - State change collaborator
//! - `services` - The collaborators bundled for a bank

pub mod account;
pub mod bank;
pub mod card;
pub mod latency;
pub mod operation;
pub mod persistence;
pub mod registry;
pub mod services;

pub use account::Account;
pub use bank::Bank;
pub use card::Card;
pub use latency::{GatedLatency, Latency, SleepLatency};
pub use operation::{Operation, OperationOutcome, PendingOperation};
pub use persistence::{MemorySink, NoopSink, PersistenceSink};
pub use registry::Registry;
pub use services::BankServices;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock a mutex, recovering the data if a previous holder panicked
///
/// Guarded values are plain data that is never left half-written.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
