//! Scripted walkthrough of the card bank
//!
//! Replays a fixed sequence of card operations against one account and
//! records what happened at each step. The sequence exercises every rejection
//! path: a busy slot, redundant state transitions, a disabled card, and
//! insufficient funds, plus a withdrawal crossing the notify limit.
//!
//! ```text
//! card1 deposit 200          admitted
//! card2 deposit 300          rejected (add_balance running)
//! card2 check_balance        rejected (add_balance running)
//! card1 activate             rejected (already active)
//! card1 disable / card2 disable / card1 activate / card1 disable
//! card1 disable              rejected (already disabled)
//! card1 activate
//! ... deposit completes, balance 200
//! card2 withdraw 500         rejected (not activated)
//! card2 activate
//! card2 withdraw 500         rejected (insufficient funds)
//! card2 withdraw 75          admitted, completes with limit warning
//! card1 check_balance        admitted, balance 125
//! ```

use crate::core::{Bank, BankServices, PendingOperation};
use crate::types::{AccountRecord, BankError, CardState};
use rust_decimal::Decimal;
use std::fmt;

/// Parameters of the walkthrough
#[derive(Clone, Debug, PartialEq)]
pub struct DemoConfig {
    pub bank_name: String,
    pub account_name: String,
    pub email: String,
    pub withdraw_notify_limit: Decimal,
    /// Cards registered on the account; the script needs at least two
    pub cards: usize,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            bank_name: "Bering Bank".to_string(),
            account_name: "Peter".to_string(),
            email: "pmark@azet.sk".to_string(),
            withdraw_notify_limit: Decimal::from(50),
            cards: 3,
        }
    }
}

/// One line of the walkthrough
#[derive(Debug, Clone, PartialEq)]
pub struct DemoStep {
    pub action: String,
    pub outcome: Result<String, BankError>,
}

/// Everything the walkthrough did, plus the final account state
#[derive(Debug, Clone, PartialEq)]
pub struct DemoReport {
    pub steps: Vec<DemoStep>,
    pub account: AccountRecord,
    pub cards: Vec<(String, CardState)>,
}

impl DemoReport {
    pub fn rejections(&self) -> usize {
        self.steps.iter().filter(|step| step.outcome.is_err()).count()
    }
}

impl fmt::Display for DemoReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            match &step.outcome {
                Ok(detail) => writeln!(f, "{:<28} ok: {}", step.action, detail)?,
                Err(err) => writeln!(f, "{:<28} rejected: {}", step.action, err)?,
            }
        }
        writeln!(
            f,
            "final balance {}$ (withdrawn {}, limit {})",
            self.account.balance, self.account.withdrawn, self.account.withdraw_notify_limit
        )?;
        for (card, state) in &self.cards {
            writeln!(f, "{card}: {state}")?;
        }
        Ok(())
    }
}

#[derive(Default)]
struct Recorder {
    steps: Vec<DemoStep>,
}

impl Recorder {
    fn push(&mut self, action: String, outcome: Result<String, BankError>) {
        self.steps.push(DemoStep { action, outcome });
    }

    fn admit(
        &mut self,
        action: String,
        result: Result<PendingOperation, BankError>,
    ) -> Option<PendingOperation> {
        match result {
            Ok(pending) => {
                self.push(action, Ok(format!("admitted <{}>", pending.op())));
                Some(pending)
            }
            Err(err) => {
                self.push(action, Err(err));
                None
            }
        }
    }

    fn transition(&mut self, action: String, result: Result<CardState, BankError>) {
        self.push(action, result.map(|state| format!("now {state}")));
    }

    async fn settle(&mut self, pending: Option<PendingOperation>) {
        let Some(pending) = pending else {
            return;
        };
        let action = format!("<{}> completes", pending.op());
        let outcome = pending.wait().await.map(|outcome| match outcome.warning {
            Some(warning) => format!("balance {} (warning: {warning})", outcome.balance),
            None => format!("balance {}", outcome.balance),
        });
        self.push(action, outcome);
    }
}

/// Run the walkthrough
///
/// Must be called inside a tokio runtime. Step rejections are part of the
/// report; only setup failures (invalid card count) are returned as `Err`.
pub async fn run_demo(config: &DemoConfig, services: BankServices) -> Result<DemoReport, BankError> {
    let bank = Bank::new(&config.bank_name, services);
    let account = bank.create_account(
        &config.account_name,
        &config.email,
        config.withdraw_notify_limit,
    );
    let cards = account.register_cards(config.cards)?;
    let [card1, card2, ..] = cards.as_slice() else {
        return Err(BankError::invalid_card_count(&config.email, cards.len()));
    };
    let (c1, c2) = (card1.label(), card2.label());
    let mut rec = Recorder::default();

    let deposit = rec.admit(format!("{c1} deposit 200"), card1.deposit(Decimal::from(200)));
    rec.admit(format!("{c2} deposit 300"), card2.deposit(Decimal::from(300)));
    rec.admit(format!("{c2} check_balance"), card2.check_balance());

    rec.transition(format!("{c1} activate"), card1.activate());
    rec.transition(format!("{c1} disable"), card1.disable());
    rec.transition(format!("{c2} disable"), card2.disable());
    rec.transition(format!("{c1} activate"), card1.activate());
    rec.transition(format!("{c1} disable"), card1.disable());
    rec.transition(format!("{c1} disable"), card1.disable());
    rec.transition(format!("{c1} activate"), card1.activate());

    rec.settle(deposit).await;

    rec.admit(format!("{c2} withdraw 500"), card2.withdraw(Decimal::from(500)));
    rec.transition(format!("{c2} activate"), card2.activate());
    rec.admit(format!("{c2} withdraw 500"), card2.withdraw(Decimal::from(500)));
    let withdrawal = rec.admit(format!("{c2} withdraw 75"), card2.withdraw(Decimal::from(75)));
    rec.settle(withdrawal).await;

    let check = rec.admit(format!("{c1} check_balance"), card1.check_balance());
    rec.settle(check).await;

    Ok(DemoReport {
        steps: rec.steps,
        account: account.record(),
        cards: account
            .cards()
            .iter()
            .map(|card| (card.label(), card.state()))
            .collect(),
    })
}

/// Build a multi-threaded runtime and run the walkthrough on it
pub fn run_demo_blocking(
    config: &DemoConfig,
    services: BankServices,
) -> Result<DemoReport, BankError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_time()
        .build()?;
    runtime.block_on(run_demo(config, services))
}
