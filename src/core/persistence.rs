//! Persistence collaborator
//!
//! The core never reads from persistence while operating; it only pushes the
//! current field values of an entity after the entity was created or changed.
//! Implementations decide what "durable" means.

use crate::types::{AccountId, AccountRecord, BankRecord, CardId, CardRecord, StateChange};
use dashmap::DashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Receiver of state change notifications
pub trait PersistenceSink: Send + Sync + fmt::Debug {
    fn record(&self, change: StateChange);
}

/// Discards every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl PersistenceSink for NoopSink {
    fn record(&self, _change: StateChange) {}
}

/// Keeps the latest record of every entity in memory
///
/// Lookups are by identity: bank name, account id, card id.
#[derive(Debug, Default)]
pub struct MemorySink {
    banks: DashMap<String, BankRecord>,
    accounts: DashMap<AccountId, AccountRecord>,
    cards: DashMap<CardId, CardRecord>,
    events: AtomicUsize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bank(&self, name: &str) -> Option<BankRecord> {
        self.banks.get(name).map(|entry| entry.value().clone())
    }

    pub fn account(&self, id: AccountId) -> Option<AccountRecord> {
        self.accounts.get(&id).map(|entry| entry.value().clone())
    }

    pub fn card(&self, id: CardId) -> Option<CardRecord> {
        self.cards.get(&id).map(|entry| entry.value().clone())
    }

    /// All account records sorted by id
    pub fn accounts(&self) -> Vec<AccountRecord> {
        let mut accounts: Vec<AccountRecord> = self
            .accounts
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        accounts.sort_by_key(|account| account.id);
        accounts
    }

    /// All card records sorted by id
    pub fn cards(&self) -> Vec<CardRecord> {
        let mut cards: Vec<CardRecord> = self
            .cards
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        cards.sort_by_key(|card| card.id);
        cards
    }

    /// Number of notifications received so far
    pub fn event_count(&self) -> usize {
        self.events.load(Ordering::Relaxed)
    }
}

impl PersistenceSink for MemorySink {
    fn record(&self, change: StateChange) {
        self.events.fetch_add(1, Ordering::Relaxed);
        match change {
            StateChange::Bank(bank) => {
                self.banks.insert(bank.name.clone(), bank);
            }
            StateChange::Account(account) => {
                self.accounts.insert(account.id, account);
            }
            StateChange::Card(card) => {
                self.cards.insert(card.id, card);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CardNumber, CardState};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn account_record(id: u64, balance: Decimal) -> AccountRecord {
        AccountRecord {
            id: AccountId(id),
            bank: "Bering Bank".to_string(),
            name: "Peter".to_string(),
            email: "pmark@azet.sk".to_string(),
            balance,
            withdrawn: Decimal::ZERO,
            withdraw_notify_limit: dec!(50),
        }
    }

    #[test]
    fn test_memory_sink_keeps_latest_record() {
        let sink = MemorySink::new();

        sink.record(StateChange::Account(account_record(1, dec!(0))));
        sink.record(StateChange::Account(account_record(1, dec!(200))));

        assert_eq!(sink.account(AccountId(1)).unwrap().balance, dec!(200));
        assert_eq!(sink.accounts().len(), 1);
        assert_eq!(sink.event_count(), 2);
    }

    #[test]
    fn test_memory_sink_lookup_by_identity() {
        let sink = MemorySink::new();
        let card = CardRecord {
            id: CardId(3),
            number: CardNumber::parse("1234567890123456").unwrap(),
            state: CardState::Disabled,
            account: AccountId(1),
        };

        sink.record(StateChange::Bank(BankRecord {
            name: "Bering Bank".to_string(),
        }));
        sink.record(StateChange::Card(card.clone()));
        sink.record(StateChange::Account(account_record(2, dec!(5))));
        sink.record(StateChange::Account(account_record(1, dec!(7))));

        assert!(sink.bank("Bering Bank").is_some());
        assert!(sink.bank("Other Bank").is_none());
        assert_eq!(sink.card(CardId(3)), Some(card));
        assert_eq!(sink.card(CardId(4)), None);
        let ids: Vec<AccountId> = sink.accounts().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![AccountId(1), AccountId(2)]);
    }
}
