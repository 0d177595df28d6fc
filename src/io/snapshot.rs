//! Snapshot files
//!
//! Dumps the latest persisted records of a `MemorySink` as `accounts.csv`
//! and `cards.csv` inside a directory.

use crate::core::MemorySink;
use crate::io::csv_format::{write_accounts_csv, write_cards_csv};
use crate::types::BankError;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

pub const ACCOUNTS_FILE: &str = "accounts.csv";
pub const CARDS_FILE: &str = "cards.csv";

/// Write both tables into `dir`, creating it if needed
///
/// # Returns
///
/// Paths of the written account and card files.
pub fn write_snapshot(dir: &Path, sink: &MemorySink) -> Result<(PathBuf, PathBuf), BankError> {
    fs::create_dir_all(dir)?;

    let accounts_path = dir.join(ACCOUNTS_FILE);
    let mut accounts_file = BufWriter::new(File::create(&accounts_path)?);
    write_accounts_csv(&sink.accounts(), &mut accounts_file)?;

    let cards_path = dir.join(CARDS_FILE);
    let mut cards_file = BufWriter::new(File::create(&cards_path)?);
    write_cards_csv(&sink.cards(), &mut cards_file)?;

    Ok((accounts_path, cards_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AccountId, AccountRecord, StateChange};
    use crate::core::PersistenceSink;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    #[test]
    fn test_write_snapshot_creates_both_files() {
        let sink = MemorySink::new();
        sink.record(StateChange::Account(AccountRecord {
            id: AccountId(1),
            bank: "Bering Bank".to_string(),
            name: "Peter".to_string(),
            email: "pmark@azet.sk".to_string(),
            balance: dec!(125),
            withdrawn: dec!(75),
            withdraw_notify_limit: dec!(50),
        }));
        let dir = tempdir().unwrap();
        let target = dir.path().join("nested");

        let (accounts_path, cards_path) = write_snapshot(&target, &sink).unwrap();

        let accounts = fs::read_to_string(accounts_path).unwrap();
        assert!(accounts.ends_with("1,Bering Bank,Peter,pmark@azet.sk,125,75,50\n"));
        let cards = fs::read_to_string(cards_path).unwrap();
        assert_eq!(cards, "id,number,state,account\n");
    }
}
