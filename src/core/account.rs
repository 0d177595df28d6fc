//! Account state and the single-flight operation guard
//!
//! An account owns its balance, its cumulative withdrawn total and its cards.
//! `add_balance`, `sub_balance` and `display_balance` are the guarded
//! operations: each one must win the account's single-flight slot before it
//! may run.
//!
//! # Admission
//!
//! Admission is one check-and-set under the slot mutex. If the slot is free
//! it is claimed and a background task is spawned; if it is taken the call is
//! refused with `OperationInProgress`. Callers never block and are never
//! queued.
//!
//! # Background task
//!
//! ```text
//! admitted ──> pause (Latency) ──> apply effect ──> log completion ──> free slot
//! ```
//!
//! The slot is freed by a drop guard owned by the task, so it is released
//! even if the task panics.

use crate::core::card::Card;
use crate::core::lock;
use crate::core::operation::{Operation, OperationOutcome, PendingOperation};
use crate::core::services::BankServices;
use crate::types::{
    AccountId, AccountRecord, Amount, BankError, BankWarning, CardId, GuardedOp, StateChange,
    MAX_CARDS_PER_REGISTRATION, MIN_CARDS_PER_REGISTRATION,
};
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::sync::{Arc, Mutex};
use tokio::runtime::Handle;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, Default)]
struct Ledger {
    balance: Decimal,
    withdrawn: Decimal,
}

/// A bank account
///
/// Always handled through `Arc<Account>`: background tasks and cards keep
/// their own references to it.
#[derive(Debug)]
pub struct Account {
    id: AccountId,
    bank: String,
    name: String,
    email: String,
    /// Cumulative withdrawals above this emit a warning
    withdraw_notify_limit: Decimal,
    ledger: Mutex<Ledger>,
    /// Operation currently holding the single-flight slot
    slot: Mutex<Option<GuardedOp>>,
    cards: DashMap<CardId, Arc<Card>>,
    services: BankServices,
}

/// Frees the slot when the background task ends, however it ends
struct SlotLease {
    account: Arc<Account>,
}

impl Drop for SlotLease {
    fn drop(&mut self) {
        *lock(&self.account.slot) = None;
    }
}

impl Account {
    pub(crate) fn new(
        id: AccountId,
        bank: &str,
        name: &str,
        email: &str,
        withdraw_notify_limit: Decimal,
        services: BankServices,
    ) -> Arc<Self> {
        let account = Arc::new(Self {
            id,
            bank: bank.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            withdraw_notify_limit,
            ledger: Mutex::new(Ledger::default()),
            slot: Mutex::new(None),
            cards: DashMap::new(),
            services,
        });
        account.persist();
        account
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    /// Name of the owning bank
    pub fn bank(&self) -> &str {
        &self.bank
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn withdraw_notify_limit(&self) -> Decimal {
        self.withdraw_notify_limit
    }

    pub fn balance(&self) -> Decimal {
        lock(&self.ledger).balance
    }

    /// Sum of all completed withdrawals
    pub fn withdrawn(&self) -> Decimal {
        lock(&self.ledger).withdrawn
    }

    /// The operation holding the slot, if any
    pub fn running_operation(&self) -> Option<GuardedOp> {
        *lock(&self.slot)
    }

    pub fn is_busy(&self) -> bool {
        self.running_operation().is_some()
    }

    /// Cards in registration order
    pub fn cards(&self) -> Vec<Arc<Card>> {
        let mut cards: Vec<Arc<Card>> = self
            .cards
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        cards.sort_by_key(|card| card.id());
        cards
    }

    pub fn card(&self, id: CardId) -> Option<Arc<Card>> {
        self.cards.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    pub fn record(&self) -> AccountRecord {
        let ledger = *lock(&self.ledger);
        AccountRecord {
            id: self.id,
            bank: self.bank.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            balance: ledger.balance,
            withdrawn: ledger.withdrawn,
            withdraw_notify_limit: self.withdraw_notify_limit,
        }
    }

    /// Issue `count` new active cards for this account
    ///
    /// # Errors
    ///
    /// `InvalidCardCount` unless `1 <= count <= 5`; no card is created then.
    pub fn register_cards(self: &Arc<Self>, count: usize) -> Result<Vec<Arc<Card>>, BankError> {
        if !(MIN_CARDS_PER_REGISTRATION..=MAX_CARDS_PER_REGISTRATION).contains(&count) {
            let err = BankError::invalid_card_count(&self.email, count);
            error!(entity = %self.email, "{err}");
            return Err(err);
        }

        let cards = (0..count)
            .map(|_| {
                let card = Arc::new(Card::new(self, &self.services));
                self.cards.insert(card.id(), Arc::clone(&card));
                card
            })
            .collect();
        Ok(cards)
    }

    /// Guarded: increase the balance by `amount`
    pub fn add_balance(self: &Arc<Self>, amount: Amount) -> Result<PendingOperation, BankError> {
        self.start(Operation::Add(amount))
    }

    /// Guarded: decrease the balance by `amount` and count it as withdrawn
    ///
    /// Funds are checked again when the effect runs, so the balance never
    /// goes negative.
    pub fn sub_balance(self: &Arc<Self>, amount: Amount) -> Result<PendingOperation, BankError> {
        self.start(Operation::Sub(amount))
    }

    /// Guarded: read and log the balance
    pub fn display_balance(self: &Arc<Self>) -> Result<PendingOperation, BankError> {
        self.start(Operation::Display)
    }

    fn start(self: &Arc<Self>, operation: Operation) -> Result<PendingOperation, BankError> {
        let op = operation.kind();
        let runtime = Handle::try_current().map_err(|_| {
            let err = BankError::RuntimeUnavailable { operation: op };
            error!(entity = %self.email, "{err}");
            err
        })?;

        self.admit(op)?;

        let lease = SlotLease {
            account: Arc::clone(self),
        };
        let handle = runtime.spawn(async move {
            let account = &lease.account;
            debug!(entity = %account.email, "Going to sleep before <{op}>");
            account.services.latency().pause(op).await;
            debug!(entity = %account.email, "Waking up for <{op}>");

            let outcome = account.apply(operation);
            info!(entity = %account.email, "Process <{op}> is done");
            drop(lease);
            outcome
        });

        Ok(PendingOperation::new(op, handle))
    }

    /// Claim the slot for `op` or refuse
    fn admit(&self, op: GuardedOp) -> Result<(), BankError> {
        let mut slot = lock(&self.slot);
        if let Some(running) = *slot {
            let err = BankError::operation_in_progress(op, running);
            error!(entity = %self.email, "{err}");
            return Err(err);
        }
        *slot = Some(op);
        info!(entity = %self.email, "Processing <{op}>");
        Ok(())
    }

    fn apply(&self, operation: Operation) -> Result<OperationOutcome, BankError> {
        let op = operation.kind();
        let (balance, warning) = {
            let mut ledger = lock(&self.ledger);
            match operation {
                Operation::Add(amount) => {
                    ledger.balance = ledger
                        .balance
                        .checked_add(amount.value())
                        .ok_or_else(|| self.overflow(op))?;
                    (ledger.balance, None)
                }
                Operation::Sub(amount) => {
                    if amount.value() > ledger.balance {
                        let err =
                            BankError::insufficient_funds(&self.email, ledger.balance, amount.value());
                        error!(entity = %self.email, "{err}");
                        return Err(err);
                    }
                    let withdrawn = ledger
                        .withdrawn
                        .checked_add(amount.value())
                        .ok_or_else(|| self.overflow(op))?;
                    ledger.balance -= amount.value();
                    ledger.withdrawn = withdrawn;

                    let warning = (withdrawn > self.withdraw_notify_limit).then(|| {
                        BankWarning::WithdrawLimitExceeded {
                            account: self.email.clone(),
                            withdrawn,
                            limit: self.withdraw_notify_limit,
                        }
                    });
                    (ledger.balance, warning)
                }
                Operation::Display => {
                    info!(entity = %self.email, "{}$", ledger.balance);
                    (ledger.balance, None)
                }
            }
        };

        if let Some(warning) = &warning {
            warn!(entity = %self.email, "{warning}");
        }
        if !matches!(operation, Operation::Display) {
            self.persist();
        }

        Ok(OperationOutcome {
            op,
            balance,
            warning,
        })
    }

    fn overflow(&self, op: GuardedOp) -> BankError {
        let err = BankError::arithmetic_overflow(op, &self.email);
        error!(entity = %self.email, "{err}");
        err
    }

    fn persist(&self) {
        self.services
            .sink()
            .record(StateChange::Account(self.record()));
    }
}
