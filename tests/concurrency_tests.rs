//! Multi-threaded admission tests
//!
//! Many tasks on a multi-threaded runtime race for one account's slot at the
//! same instant. Background tasks are held open with `GatedLatency` so every
//! racer sees the same in-flight window.

#[cfg(test)]
mod tests {
    use futures::future::join_all;
    use rust_card_bank::core::{Bank, BankServices, GatedLatency, PendingOperation};
    use rust_card_bank::types::BankError;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::Arc;
    use tokio::sync::Barrier;

    fn gated_bank(latency: &Arc<GatedLatency>) -> Bank {
        Bank::new(
            "Race Bank",
            BankServices::default().with_latency(latency.clone()),
        )
    }

    fn split_results(
        results: Vec<Result<Result<PendingOperation, BankError>, tokio::task::JoinError>>,
    ) -> (Vec<PendingOperation>, usize) {
        let mut admitted = Vec::new();
        let mut rejected = 0;
        for result in results {
            match result.unwrap() {
                Ok(pending) => admitted.push(pending),
                Err(BankError::OperationInProgress { .. }) => rejected += 1,
                Err(e) => panic!("Unexpected error: {}", e),
            }
        }
        (admitted, rejected)
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_deposits_admit_exactly_one() {
        let latency = Arc::new(GatedLatency::new());
        let bank = gated_bank(&latency);
        let account = bank.create_account("Peter", "pmark@azet.sk", dec!(50));
        let cards = account.register_cards(5).unwrap();
        let barrier = Arc::new(Barrier::new(cards.len()));

        let attempts = cards.into_iter().map(|card| {
            let barrier = Arc::clone(&barrier);
            tokio::spawn(async move {
                barrier.wait().await;
                card.deposit(Decimal::from(10))
            })
        });
        let (mut admitted, rejected) = split_results(join_all(attempts).await);

        assert_eq!(admitted.len(), 1);
        assert_eq!(rejected, 4);
        assert!(account.is_busy());

        latency.release(1);
        admitted.remove(0).wait().await.unwrap();
        assert_eq!(account.balance(), dec!(10));
        assert!(!account.is_busy());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_repeated_rounds_apply_one_effect_each() {
        let latency = Arc::new(GatedLatency::new());
        let bank = gated_bank(&latency);
        let account = bank.create_account("Peter", "pmark@azet.sk", dec!(50));
        let cards = account.register_cards(4).unwrap();

        for round in 1..=10u32 {
            let barrier = Arc::new(Barrier::new(cards.len()));
            let attempts = cards.iter().cloned().map(|card| {
                let barrier = Arc::clone(&barrier);
                tokio::spawn(async move {
                    barrier.wait().await;
                    card.deposit(Decimal::from(1))
                })
            });
            let (mut admitted, rejected) = split_results(join_all(attempts).await);

            assert_eq!(admitted.len(), 1, "round {round}");
            assert_eq!(rejected, 3, "round {round}");
            latency.release(1);
            admitted.remove(0).wait().await.unwrap();
            assert_eq!(account.balance(), Decimal::from(round));
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_different_accounts_run_in_parallel() {
        let latency = Arc::new(GatedLatency::new());
        let bank = gated_bank(&latency);
        let accounts: Vec<_> = (0..4)
            .map(|i| bank.create_account("Peter", &format!("p{i}@azet.sk"), dec!(50)))
            .collect();

        let pending: Vec<PendingOperation> = accounts
            .iter()
            .map(|account| {
                let card = account.register_cards(1).unwrap().remove(0);
                card.deposit(dec!(5)).unwrap()
            })
            .collect();
        assert!(accounts.iter().all(|account| account.is_busy()));

        latency.release(pending.len());
        for outcome in join_all(pending.into_iter().map(PendingOperation::wait)).await {
            assert_eq!(outcome.unwrap().balance, dec!(5));
        }
    }
}
