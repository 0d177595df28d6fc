//! Identifiers for accounts and cards
//!
//! Card identifiers double as the human-readable tag used in log lines
//! (`card3`), so their `Display` output is the tag rather than the bare number.

use serde::Serialize;
use std::fmt;

/// Number of digits in a card number
pub const CARD_NUMBER_LEN: usize = 16;

/// Account identifier, unique within its bank and assigned in creation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct AccountId(pub u64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "account{}", self.0)
    }
}

/// Card identifier (process-wide unique, strictly increasing from 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CardId(pub u64);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "card{}", self.0)
    }
}

/// A 16-digit card number
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CardNumber(String);

impl CardNumber {
    /// Wrap a digit string, returning `None` unless it is exactly 16 ASCII digits
    pub fn parse(digits: &str) -> Option<Self> {
        if digits.len() == CARD_NUMBER_LEN && digits.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(digits.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::valid("0123456789012345", true)]
    #[case::too_short("012345678901234", false)]
    #[case::too_long("01234567890123456", false)]
    #[case::letters("01234567890123ab", false)]
    #[case::empty("", false)]
    fn test_card_number_parse(#[case] digits: &str, #[case] valid: bool) {
        assert_eq!(CardNumber::parse(digits).is_some(), valid);
    }

    #[test]
    fn test_labels() {
        assert_eq!(CardId(3).to_string(), "card3");
        assert_eq!(AccountId(1).to_string(), "account1");
    }
}
