//! Benchmark suite for the synchronous paths of the card bank
//!
//! Everything measured here runs on the caller's thread: issuing cards and
//! refusing operations against a busy account. Admitted operations are held
//! open with `GatedLatency`, so no benchmark waits on the processing delay.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! ```

use rust_card_bank::core::{Bank, BankServices, GatedLatency};
use rust_decimal::Decimal;
use std::sync::Arc;

fn main() {
    divan::main();
}

/// Register a full batch of cards on a fresh account
#[divan::bench(args = [1, 3, 5])]
fn register_cards(bencher: divan::Bencher, count: usize) {
    let bank = Bank::new("Bench Bank", BankServices::default());
    bencher.bench_local(|| {
        let account = bank.create_account("Peter", "pmark@azet.sk", Decimal::from(50));
        account
            .register_cards(divan::black_box(count))
            .expect("Registration failed")
    });
}

/// Refuse a deposit while another operation holds the account's slot
#[divan::bench]
fn rejected_admission(bencher: divan::Bencher) {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .build()
        .expect("Failed to build runtime");
    let _guard = runtime.enter();

    let latency = Arc::new(GatedLatency::new());
    let bank = Bank::new(
        "Bench Bank",
        BankServices::default().with_latency(latency.clone()),
    );
    let account = bank.create_account("Peter", "pmark@azet.sk", Decimal::from(50));
    let cards = account.register_cards(2).expect("Registration failed");
    let _running = cards[0].deposit(Decimal::from(200)).expect("Admission failed");

    bencher.bench_local(|| {
        cards[1]
            .deposit(divan::black_box(Decimal::from(300)))
            .expect_err("Slot should be busy")
    });

    latency.release(1);
}
