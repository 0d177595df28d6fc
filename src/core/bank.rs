//! Bank: registry and factory of accounts

use crate::core::account::Account;
use crate::core::services::BankServices;
use crate::types::{AccountId, BankRecord, StateChange};
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;

/// A named bank owning its accounts
///
/// Account ids come from the shared registry in `BankServices`, so accounts
/// of different banks never share an id.
#[derive(Debug)]
pub struct Bank {
    name: String,
    accounts: DashMap<AccountId, Arc<Account>>,
    services: BankServices,
}

impl Bank {
    pub fn new(name: &str, services: BankServices) -> Self {
        info!(entity = %name, "{name} bank has been created.");
        services.sink().record(StateChange::Bank(BankRecord {
            name: name.to_string(),
        }));
        Self {
            name: name.to_string(),
            accounts: DashMap::new(),
            services,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn services(&self) -> &BankServices {
        &self.services
    }

    /// Open a new account with a zero balance
    ///
    /// No validation of e-mail format or duplicates is done.
    pub fn create_account(
        &self,
        name: &str,
        email: &str,
        withdraw_notify_limit: Decimal,
    ) -> Arc<Account> {
        let id = self.services.registry().next_account_id();
        let account = Account::new(
            id,
            &self.name,
            name,
            email,
            withdraw_notify_limit,
            self.services.clone(),
        );
        self.accounts.insert(id, Arc::clone(&account));
        info!(entity = %self.name, "Account with {email} email has been created.");
        account
    }

    /// Accounts in creation order
    pub fn accounts(&self) -> Vec<Arc<Account>> {
        let mut accounts: Vec<Arc<Account>> = self
            .accounts
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        accounts.sort_by_key(|account| account.id());
        accounts
    }

    pub fn account(&self, id: AccountId) -> Option<Arc<Account>> {
        self.accounts.get(&id).map(|entry| Arc::clone(entry.value()))
    }
}
