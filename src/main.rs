//! Card bank demo CLI
//!
//! Runs the scripted walkthrough of accounts, cards and guarded balance
//! operations, logging every decision and printing a summary.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --delay-ms 200 --cards 2
//! cargo run -- --json-logs --log-file bank.log --snapshot-dir out/
//! ```
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (invalid setup, snapshot could not be written, etc.)

use rust_card_bank::cli;
use rust_card_bank::core::{BankServices, MemorySink};
use rust_card_bank::demo::run_demo_blocking;
use rust_card_bank::io::write_snapshot;
use rust_card_bank::logging::init_logging;
use std::process;
use std::sync::Arc;

fn main() {
    let args = cli::parse_args();
    let _log_guard = init_logging(&args.to_log_config());

    let sink = Arc::new(MemorySink::new());
    let services = BankServices::from_config(&args.to_bank_config()).with_sink(sink.clone());

    let report = match run_demo_blocking(&args.to_demo_config(), services) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    print!("{report}");

    if let Some(dir) = &args.snapshot_dir {
        match write_snapshot(dir, &sink) {
            Ok((accounts, cards)) => {
                println!("snapshot written to {} and {}", accounts.display(), cards.display())
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
    }
}
