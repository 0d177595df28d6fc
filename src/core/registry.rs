//! Process-scoped identity registry
//!
//! Owns the counters and the issued card-number set that must be unique
//! across every bank in the process. Create one `Registry`, wrap it in an
//! `Arc` and hand it to each bank through `BankServices`; banks sharing a
//! registry share its uniqueness guarantees.

use crate::types::{AccountId, CardId, CardNumber, CARD_NUMBER_LEN};
use dashmap::DashSet;
use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe issuer of account ids, card ids and card numbers
#[derive(Debug)]
pub struct Registry {
    next_card_id: AtomicU64,
    next_account_id: AtomicU64,
    /// Every card number handed out so far
    issued_numbers: DashSet<CardNumber>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            next_card_id: AtomicU64::new(1),
            next_account_id: AtomicU64::new(1),
            issued_numbers: DashSet::new(),
        }
    }

    /// Next card id; ids start at 1 and strictly increase
    pub fn next_card_id(&self) -> CardId {
        CardId(self.next_card_id.fetch_add(1, Ordering::Relaxed))
    }

    pub fn next_account_id(&self) -> AccountId {
        AccountId(self.next_account_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Draw random 16-digit numbers until one has not been issued before
    ///
    /// The set insert is the uniqueness check, so two threads can never
    /// both claim the same number.
    pub fn issue_card_number(&self) -> CardNumber {
        let mut rng = rand::thread_rng();
        loop {
            let digits: String = (0..CARD_NUMBER_LEN)
                .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
                .collect();
            let Some(number) = CardNumber::parse(&digits) else {
                continue;
            };
            if self.issued_numbers.insert(number.clone()) {
                return number;
            }
        }
    }

    pub fn is_issued(&self, number: &CardNumber) -> bool {
        self.issued_numbers.contains(number)
    }

    pub fn issued_count(&self) -> usize {
        self.issued_numbers.len()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_card_ids_start_at_one_and_increase() {
        let registry = Registry::new();

        let ids: Vec<CardId> = (0..5).map(|_| registry.next_card_id()).collect();

        assert_eq!(ids, vec![CardId(1), CardId(2), CardId(3), CardId(4), CardId(5)]);
    }

    #[test]
    fn test_account_ids_are_independent_of_card_ids() {
        let registry = Registry::new();
        registry.next_card_id();
        registry.next_card_id();

        assert_eq!(registry.next_account_id(), AccountId(1));
        assert_eq!(registry.next_card_id(), CardId(3));
    }

    #[test]
    fn test_card_numbers_are_16_digits_and_recorded() {
        let registry = Registry::new();

        let number = registry.issue_card_number();

        assert_eq!(number.as_str().len(), 16);
        assert!(number.as_str().bytes().all(|b| b.is_ascii_digit()));
        assert!(registry.is_issued(&number));
        assert_eq!(registry.issued_count(), 1);
    }

    #[test]
    fn test_concurrent_issuing_is_unique() {
        let registry = Arc::new(Registry::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    (0..250)
                        .map(|_| (registry.next_card_id(), registry.issue_card_number()))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids = HashSet::new();
        let mut numbers = HashSet::new();
        for handle in handles {
            for (id, number) in handle.join().unwrap() {
                assert!(ids.insert(id), "duplicate id {id}");
                assert!(numbers.insert(number.clone()), "duplicate number {number}");
            }
        }
        assert_eq!(ids.len(), 2000);
        assert_eq!(registry.issued_count(), 2000);
    }
}
