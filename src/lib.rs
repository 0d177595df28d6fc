//! Card Bank Library
//! # Overview
//!
//! Bank accounts and payment cards with a single-outstanding-operation guard:
//! at most one balance operation may be in flight per account, and competing
//! operations are rejected rather than queued.
//!
//! # Architecture
//!
//! - [`types`] - Value types (identifiers, amounts, card state machine, records, errors)
//! - [`core`] - Business logic components:
//!   - [`core::bank`] - Account registry and factory
//!   - [`core::account`] - Balance storage and the single-flight guard
//!   - [`core::card`] - Card identity and activation gating
//!   - [`core::registry`] - Process-scoped card ids and card numbers
//! - [`io`] - CSV output of persisted state
//! - [`cli`] - CLI arguments parsing
//! - [`config`] / [`logging`] - Runtime configuration and tracing setup
//! - [`demo`] - Scripted walkthrough used by the binary
//!
//! # Guarded Operations
//!
//! Three account operations compete for the same per-account slot:
//!
//! - **add_balance**: reached through `Card::deposit`
//! - **sub_balance**: reached through `Card::withdraw`
//! - **display_balance**: reached through `Card::check_balance`
//!
//! An admitted operation runs as a tokio task: it waits for the configured
//! processing delay, applies its effect, then frees the slot. The caller gets
//! a `PendingOperation` back immediately, or an `OperationInProgress` error.
//!
//! # Card States
//!
//! Cards are `Active` or `Disabled`. Only active cards may reach the account;
//! activating an active card or disabling a disabled one is rejected.

// Module declarations
pub mod cli;
pub mod config;
pub mod core;
pub mod demo;
pub mod io;
pub mod logging;
pub mod types;

pub use core::{Account, Bank, BankServices, Card, PendingOperation, Registry};
pub use types::{Amount, BankError, BankWarning, CardState, GuardedOp};
