//! CSV rendering of persisted records
//!
//! One table per entity kind, one row per record, header matching the
//! record's field names. Rows are sorted by id for deterministic output.
//!
//! All functions write to a caller-supplied writer (no file handling here).

use crate::types::{AccountRecord, BankError, CardRecord};
use csv::WriterBuilder;
use std::io::Write;

/// Write account records with columns:
/// id, bank, name, email, balance, withdrawn, withdraw_notify_limit
pub fn write_accounts_csv(accounts: &[AccountRecord], output: &mut dyn Write) -> Result<(), BankError> {
    let mut sorted_accounts = accounts.to_vec();
    sorted_accounts.sort_by_key(|account| account.id);
    write_records(&sorted_accounts, ACCOUNT_HEADER, output)
}

/// Write card records with columns: id, number, state, account
pub fn write_cards_csv(cards: &[CardRecord], output: &mut dyn Write) -> Result<(), BankError> {
    let mut sorted_cards = cards.to_vec();
    sorted_cards.sort_by_key(|card| card.id);
    write_records(&sorted_cards, CARD_HEADER, output)
}

const ACCOUNT_HEADER: &[&str] = &[
    "id",
    "bank",
    "name",
    "email",
    "balance",
    "withdrawn",
    "withdraw_notify_limit",
];
const CARD_HEADER: &[&str] = &["id", "number", "state", "account"];

// The header is written explicitly so that empty tables still get one.
fn write_records<T: serde::Serialize>(
    records: &[T],
    header: &[&str],
    output: &mut dyn Write,
) -> Result<(), BankError> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(output);
    writer.write_record(header)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
