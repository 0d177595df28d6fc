//! Payment cards
//!
//! A card is a gated front end to its account. `activate` and `disable`
//! drive the card's state machine; `deposit`, `withdraw` and `check_balance`
//! only reach the account while the card is active.

use crate::core::account::Account;
use crate::core::lock;
use crate::core::operation::PendingOperation;
use crate::core::persistence::PersistenceSink;
use crate::core::services::BankServices;
use crate::types::{
    AccountId, Amount, BankError, CardId, CardNumber, CardRecord, CardState, CardStateMachine,
    CardTransition, StateChange,
};
use rust_decimal::Decimal;
use std::sync::{Arc, Mutex, Weak};
use tracing::{error, info};

/// A payment card bound to one account
#[derive(Debug)]
pub struct Card {
    id: CardId,
    number: CardNumber,
    account_id: AccountId,
    /// Back reference; the account owns the card, not the other way round
    account: Weak<Account>,
    machine: Mutex<CardStateMachine>,
    sink: Arc<dyn PersistenceSink>,
}

impl Card {
    /// Create an active card for `account`, drawing its id and number from
    /// the registry
    pub(crate) fn new(account: &Arc<Account>, services: &BankServices) -> Self {
        let registry = services.registry();
        let id = registry.next_card_id();
        let number = registry.issue_card_number();
        info!(entity = %id, "{id} has been created. ({number})");

        let card = Self {
            id,
            number,
            account_id: account.id(),
            account: Arc::downgrade(account),
            machine: Mutex::new(CardStateMachine::new(id)),
            sink: Arc::clone(services.sink()),
        };
        card.persist();
        card
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    /// Human-readable tag used in logs, e.g. `card3`
    pub fn label(&self) -> String {
        self.id.to_string()
    }

    pub fn number(&self) -> &CardNumber {
        &self.number
    }

    pub fn state(&self) -> CardState {
        lock(&self.machine).state()
    }

    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    /// The owning account, if it is still alive
    pub fn account(&self) -> Option<Arc<Account>> {
        self.account.upgrade()
    }

    pub fn record(&self) -> CardRecord {
        self.record_with(self.state())
    }

    fn record_with(&self, state: CardState) -> CardRecord {
        CardRecord {
            id: self.id,
            number: self.number.clone(),
            state,
            account: self.account_id,
        }
    }

    pub fn activate(&self) -> Result<CardState, BankError> {
        self.transition(CardTransition::Activate)
    }

    pub fn disable(&self) -> Result<CardState, BankError> {
        self.transition(CardTransition::Disable)
    }

    /// Put `amount` on the account
    ///
    /// # Errors
    ///
    /// `NotActivated`, `InvalidAmount`, or the account's admission error.
    pub fn deposit(&self, amount: Decimal) -> Result<PendingOperation, BankError> {
        let account = self.require_activation("deposit")?;
        let amount = self.validate(amount)?;
        account.add_balance(amount)
    }

    /// Take `amount` off the account
    ///
    /// Funds are checked here, before the guarded operation is attempted.
    ///
    /// # Errors
    ///
    /// `NotActivated`, `InvalidAmount`, `InsufficientFunds`, or the account's
    /// admission error.
    pub fn withdraw(&self, amount: Decimal) -> Result<PendingOperation, BankError> {
        let account = self.require_activation("withdraw")?;
        let amount = self.validate(amount)?;

        let balance = account.balance();
        if amount.value() > balance {
            let err = BankError::insufficient_funds(account.email(), balance, amount.value());
            error!(entity = %self.id, "{err}");
            return Err(err);
        }
        account.sub_balance(amount)
    }

    /// Show the account balance (goes through the same guard as mutations)
    pub fn check_balance(&self) -> Result<PendingOperation, BankError> {
        let account = self.require_activation("check_balance")?;
        account.display_balance()
    }

    // The record is pushed while the machine is still locked, so the sink
    // sees transitions in the order they happened.
    fn transition(&self, transition: CardTransition) -> Result<CardState, BankError> {
        let mut machine = lock(&self.machine);
        let state = machine.fire(transition)?;
        self.sink.record(StateChange::Card(self.record_with(state)));
        Ok(state)
    }

    fn require_activation(&self, action: &str) -> Result<Arc<Account>, BankError> {
        if !self.state().is_active() {
            let err = BankError::not_activated(self.id);
            error!(entity = %self.id, "{err}");
            return Err(err);
        }

        let account = self.account.upgrade().ok_or_else(|| {
            let err = BankError::account_unavailable(self.id);
            error!(entity = %self.id, "{err}");
            err
        })?;
        info!(entity = %self.id, "{} is going to perform {action}", self.id);
        Ok(account)
    }

    fn validate(&self, amount: Decimal) -> Result<Amount, BankError> {
        Amount::new(amount).inspect_err(|err| error!(entity = %self.id, "{err}"))
    }

    fn persist(&self) {
        self.sink.record(StateChange::Card(self.record()));
    }
}
