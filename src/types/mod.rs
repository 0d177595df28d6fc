//! Types module
//!
//! Contains the value types shared by the core components:
//! - `ids`: account/card identifiers and card numbers
//! - `amount`: validated positive amounts
//! - `card_state`: the card activation state machine
//! - `operation`: names of the guarded account operations
//! - `records`: persistence records
//! - `error`: error and warning types

pub mod amount;
pub mod card_state;
pub mod error;
pub mod ids;
pub mod operation;
pub mod records;

/// Fewest cards a single registration may create
pub const MIN_CARDS_PER_REGISTRATION: usize = 1;
/// Most cards a single registration may create
pub const MAX_CARDS_PER_REGISTRATION: usize = 5;

pub use amount::Amount;
pub use card_state::{CardState, CardStateMachine, CardTransition};
pub use error::{BankError, BankWarning};
pub use ids::{AccountId, CardId, CardNumber, CARD_NUMBER_LEN};
pub use operation::GuardedOp;
pub use records::{AccountRecord, BankRecord, CardRecord, StateChange};
