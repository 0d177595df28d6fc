//! Persistence records
//!
//! Flat snapshots of entity state pushed to the persistence collaborator after
//! every creation and mutation. Field names follow the stored tables, with
//! `bank` and `account` acting as foreign keys.

use super::card_state::CardState;
use super::ids::{AccountId, CardId, CardNumber};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BankRecord {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountRecord {
    pub id: AccountId,
    pub bank: String,
    pub name: String,
    pub email: String,
    pub balance: Decimal,
    pub withdrawn: Decimal,
    pub withdraw_notify_limit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardRecord {
    pub id: CardId,
    pub number: CardNumber,
    pub state: CardState,
    pub account: AccountId,
}

/// A single state change notification
#[derive(Debug, Clone, PartialEq)]
pub enum StateChange {
    Bank(BankRecord),
    Account(AccountRecord),
    Card(CardRecord),
}
