//! Property-based tests for the balance invariant.
//!
//! These tests drive the engine and the full service (over `MemoryStore`)
//! with random sequences of movements and deletions and check that the
//! balance never drops below zero and always matches the committed history.

use std::sync::Arc;

use proptest::prelude::*;
use rust_decimal::Decimal;
use tally_shared::types::ClientId;

use super::amount::MovementTotals;
use super::balance::BalanceEngine;
use super::detail::{DetailInput, DetailKind};
use super::error::LedgerError;
use super::memory::MemoryStore;
use super::service::LedgerService;
use super::types::Account;

/// Strategy for generating positive Decimal amounts with cents.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for generating non-negative starting balances.
fn arb_balance() -> impl Strategy<Value = Decimal> {
    (0i64..100_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for generating a single detail line.
fn arb_detail() -> impl Strategy<Value = DetailInput> {
    (arb_amount(), any::<bool>()).prop_map(|(amount, entry)| {
        let kind = if entry { DetailKind::Entry } else { DetailKind::Egress };
        DetailInput::new(amount, kind.as_str())
    })
}

/// One step of a random ledger history.
#[derive(Debug, Clone)]
enum Op {
    Create(Vec<DetailInput>),
    /// Deletes the n-th live movement, modulo the number of live movements.
    Delete(usize),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => prop::collection::vec(arb_detail(), 0..4).prop_map(Op::Create),
        1 => any::<usize>().prop_map(Op::Delete),
    ]
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn totals_of(details: &[DetailInput]) -> MovementTotals {
    let mut totals = MovementTotals::default();
    for d in details {
        match DetailKind::parse(&d.kind).unwrap() {
            DetailKind::Entry => totals.entry += d.amount,
            DetailKind::Egress => totals.egress += d.amount,
        }
    }
    totals
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // =========================================================================
    // Engine: apply either succeeds with balance = old + net, or fails untouched
    // =========================================================================

    #[test]
    fn prop_apply_is_gated(
        balance in arb_balance(),
        entry in arb_amount(),
        egress in arb_amount(),
    ) {
        let mut account = Account::new(ClientId::new(), balance);
        let totals = MovementTotals { entry, egress };

        match BalanceEngine::apply(&mut account, totals) {
            Ok(()) => {
                prop_assert!(account.balance >= Decimal::ZERO);
                prop_assert_eq!(account.balance, balance + totals.net().unwrap());
            }
            Err(LedgerError::NegativeBalance) => {
                prop_assert!(balance + totals.net().unwrap() < Decimal::ZERO);
                prop_assert_eq!(account.balance, balance);
            }
            Err(other) => prop_assert!(false, "unexpected error: {other}"),
        }
    }

    /// Apply followed by reverse is the identity whenever both succeed.
    #[test]
    fn prop_reverse_undoes_apply(
        balance in arb_balance(),
        entry in arb_amount(),
        egress in arb_amount(),
    ) {
        let mut account = Account::new(ClientId::new(), balance);
        let totals = MovementTotals { entry, egress };

        if BalanceEngine::apply(&mut account, totals).is_ok() {
            BalanceEngine::reverse(&mut account, totals).unwrap();
            prop_assert_eq!(account.balance, balance);
        }
    }

    // =========================================================================
    // Service: random histories keep balance >= 0 and equal to the model
    // =========================================================================

    #[test]
    fn prop_history_keeps_balance_consistent(
        initial in arb_balance(),
        ops in prop::collection::vec(arb_op(), 1..20),
    ) {
        let rt = runtime();
        rt.block_on(async {
            let service = LedgerService::new(Arc::new(MemoryStore::new()));
            let client = service.create_client("Prop").await.unwrap();
            service.create_account(client.id, initial).await.unwrap();

            let mut expected = initial;
            let mut live = Vec::new();

            for op in ops {
                match op {
                    Op::Create(details) => {
                        let totals = totals_of(&details);
                        match service.create_movement(client.id, None, details).await {
                            Ok(movement) => {
                                expected += totals.net().unwrap();
                                live.push((movement.id, totals));
                            }
                            Err(LedgerError::NegativeBalance) => {
                                prop_assert!(expected + totals.net().unwrap() < Decimal::ZERO);
                            }
                            Err(other) => prop_assert!(false, "unexpected error: {other}"),
                        }
                    }
                    Op::Delete(n) if !live.is_empty() => {
                        let index = n % live.len();
                        let (id, totals) = live[index];
                        match service.delete_movement(id).await {
                            Ok(()) => {
                                expected -= totals.net().unwrap();
                                live.remove(index);
                            }
                            Err(LedgerError::NegativeBalance) => {
                                prop_assert!(expected - totals.net().unwrap() < Decimal::ZERO);
                            }
                            Err(other) => prop_assert!(false, "unexpected error: {other}"),
                        }
                    }
                    Op::Delete(_) => {}
                }

                let account = service.get_account(client.id).await.unwrap();
                prop_assert!(account.balance >= Decimal::ZERO);
                prop_assert_eq!(account.balance, expected);
            }

            prop_assert_eq!(service.store().movement_count().await, live.len());
            Ok(())
        })?;
    }
}
