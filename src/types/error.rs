//! Error types for the card bank
//!
//! Every error here is recoverable: the operation that produced it had no
//! effect, the condition was logged where it was detected, and the caller
//! receives it as the `Err` side of the operation's result.
//!
//! # Error Categories
//!
//! - **Card errors**: state transitions rejected, operations on disabled cards
//! - **Account errors**: invalid card counts, insufficient funds, busy slot
//! - **Input errors**: non-positive amounts
//! - **Runtime errors**: missing tokio runtime, failed background task, I/O

use super::ids::CardId;
use super::operation::GuardedOp;
use super::{MAX_CARDS_PER_REGISTRATION, MIN_CARDS_PER_REGISTRATION};
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the card bank
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BankError {
    /// Card registration asked for a count outside the allowed range
    ///
    /// Nothing is created when this is returned.
    #[error(
        "Cannot register {requested} cards for {account}: only {}-{} cards at a time",
        MIN_CARDS_PER_REGISTRATION,
        MAX_CARDS_PER_REGISTRATION
    )]
    InvalidCardCount {
        /// Account label (e-mail)
        account: String,
        /// Requested number of cards
        requested: usize,
    },

    /// `activate` on a card that is already active
    #[error("{card} is already active")]
    AlreadyActive { card: CardId },

    /// `disable` on a card that is already disabled
    #[error("{card} is already disabled")]
    AlreadyDisabled { card: CardId },

    /// Money operation attempted through a disabled card
    #[error("Cannot perform action because {card} is not activated")]
    NotActivated { card: CardId },

    /// Withdrawal larger than the current balance
    #[error("Insufficient funds for {account}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        account: String,
        balance: Decimal,
        requested: Decimal,
    },

    /// The account's single-flight slot is occupied
    #[error("Processing <{attempted}> has failed, there's already <{running}> process ongoing")]
    OperationInProgress {
        /// Operation that was refused
        attempted: GuardedOp,
        /// Operation currently holding the slot
        running: GuardedOp,
    },

    /// Balance or withdrawn total would overflow
    ///
    /// Reported by the background task; the ledger is left unchanged.
    #[error("Arithmetic overflow in {operation} for {account}")]
    ArithmeticOverflow {
        operation: GuardedOp,
        account: String,
    },

    /// Zero or negative deposit/withdrawal amount
    #[error("Invalid amount {amount}: amounts must be positive")]
    InvalidAmount { amount: Decimal },

    /// The card's owning account no longer exists
    #[error("Account behind {card} is no longer available")]
    AccountUnavailable { card: CardId },

    /// A guarded operation was invoked outside a tokio runtime
    #[error("Cannot start <{operation}>: no async runtime is running")]
    RuntimeUnavailable { operation: GuardedOp },

    /// The background task for an admitted operation did not complete
    #[error("Background task for <{operation}> failed: {message}")]
    TaskFailed {
        operation: GuardedOp,
        message: String,
    },

    /// I/O error while writing snapshots
    #[error("I/O error: {message}")]
    Io { message: String },
}

impl From<std::io::Error> for BankError {
    fn from(error: std::io::Error) -> Self {
        BankError::Io {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for BankError {
    fn from(error: csv::Error) -> Self {
        BankError::Io {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl BankError {
    pub fn invalid_card_count(account: &str, requested: usize) -> Self {
        BankError::InvalidCardCount {
            account: account.to_string(),
            requested,
        }
    }

    pub fn already_active(card: CardId) -> Self {
        BankError::AlreadyActive { card }
    }

    pub fn already_disabled(card: CardId) -> Self {
        BankError::AlreadyDisabled { card }
    }

    pub fn not_activated(card: CardId) -> Self {
        BankError::NotActivated { card }
    }

    pub fn insufficient_funds(account: &str, balance: Decimal, requested: Decimal) -> Self {
        BankError::InsufficientFunds {
            account: account.to_string(),
            balance,
            requested,
        }
    }

    pub fn operation_in_progress(attempted: GuardedOp, running: GuardedOp) -> Self {
        BankError::OperationInProgress { attempted, running }
    }

    pub fn arithmetic_overflow(operation: GuardedOp, account: &str) -> Self {
        BankError::ArithmeticOverflow {
            operation,
            account: account.to_string(),
        }
    }

    pub fn invalid_amount(amount: Decimal) -> Self {
        BankError::InvalidAmount { amount }
    }

    pub fn account_unavailable(card: CardId) -> Self {
        BankError::AccountUnavailable { card }
    }

    pub fn task_failed(operation: GuardedOp, message: impl Into<String>) -> Self {
        BankError::TaskFailed {
            operation,
            message: message.into(),
        }
    }
}

/// Non-fatal conditions reported alongside a successful operation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BankWarning {
    /// Cumulative withdrawals went past the account's notify limit
    ///
    /// The withdrawal itself still happened.
    #[error("{account} has surpassed the withdrawal limit: withdrawn {withdrawn}, limit {limit}")]
    WithdrawLimitExceeded {
        account: String,
        withdrawn: Decimal,
        limit: Decimal,
    },
}
