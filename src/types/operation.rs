//! Guarded operation names

use std::fmt;

/// The operations that compete for an account's single-flight slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuardedOp {
    AddBalance,
    SubBalance,
    DisplayBalance,
}

impl GuardedOp {
    pub fn name(self) -> &'static str {
        match self {
            GuardedOp::AddBalance => "add_balance",
            GuardedOp::SubBalance => "sub_balance",
            GuardedOp::DisplayBalance => "display_balance",
        }
    }
}

impl fmt::Display for GuardedOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
