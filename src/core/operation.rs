//! Admitted guarded operations and their results

use crate::types::{Amount, BankError, BankWarning, GuardedOp};
use rust_decimal::Decimal;
use tokio::task::JoinHandle;

/// A guarded operation together with its argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add(Amount),
    Sub(Amount),
    Display,
}

impl Operation {
    pub fn kind(&self) -> GuardedOp {
        match self {
            Operation::Add(_) => GuardedOp::AddBalance,
            Operation::Sub(_) => GuardedOp::SubBalance,
            Operation::Display => GuardedOp::DisplayBalance,
        }
    }
}

/// Result of a completed guarded operation
#[derive(Debug, Clone, PartialEq)]
pub struct OperationOutcome {
    pub op: GuardedOp,
    /// Balance right after the effect was applied (or read)
    pub balance: Decimal,
    pub warning: Option<BankWarning>,
}

/// Handle to an admitted operation running in the background
///
/// Dropping the handle detaches it; the operation still runs to completion.
#[derive(Debug)]
pub struct PendingOperation {
    op: GuardedOp,
    handle: JoinHandle<Result<OperationOutcome, BankError>>,
}

impl PendingOperation {
    pub(crate) fn new(op: GuardedOp, handle: JoinHandle<Result<OperationOutcome, BankError>>) -> Self {
        Self { op, handle }
    }

    pub fn op(&self) -> GuardedOp {
        self.op
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the background task to finish
    ///
    /// # Errors
    ///
    /// The operation's own error (a withdrawal that found insufficient funds
    /// when its effect ran), or `TaskFailed` if the task panicked.
    pub async fn wait(self) -> Result<OperationOutcome, BankError> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) => Err(BankError::task_failed(self.op, e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_operation_kind() {
        let amount = Amount::new(dec!(10)).unwrap();
        assert_eq!(Operation::Add(amount).kind(), GuardedOp::AddBalance);
        assert_eq!(Operation::Sub(amount).kind(), GuardedOp::SubBalance);
        assert_eq!(Operation::Display.kind(), GuardedOp::DisplayBalance);
    }

    #[tokio::test]
    async fn test_wait_reports_panicked_task() {
        let handle: JoinHandle<Result<OperationOutcome, BankError>> =
            tokio::spawn(async { panic!("boom") });
        let pending = PendingOperation::new(GuardedOp::AddBalance, handle);

        let result = pending.wait().await;

        assert!(matches!(
            result,
            Err(BankError::TaskFailed { operation: GuardedOp::AddBalance, .. })
        ));
    }
}
