//! I/O module
//!
//! Handles CSV output of persisted state.
//!
//! # Components
//!
//! - `csv_format` - CSV serialization of account and card records
//! - `snapshot` - Writing a `MemorySink` to snapshot files

pub mod csv_format;
pub mod snapshot;

pub use csv_format::{write_accounts_csv, write_cards_csv};
pub use snapshot::write_snapshot;
