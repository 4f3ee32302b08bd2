//! Property-based tests for LedgerService.
//!
//! - Property 1: Non-negative balance after any committed sequence
//! - Property 2: Ledger reconciles with the transaction log
//! - Property 3: History length and order match committed operations
//! - Property 4: PIN parsing matches the 4-ASCII-digit contract
//! - Property 5: Withdrawing the full balance leaves exactly zero

use std::sync::Arc;

use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::account::Pin;
use crate::service::LedgerService;
use crate::store::{AccountStore, TransactionLog};
use crate::transaction::{Transaction, TransactionKind};

const PIN: &str = "4321";
const WRONG_PIN: &str = "0000";

/// One step of a generated operation sequence.
#[derive(Debug, Clone)]
enum Op {
    Deposit(Decimal),
    Withdraw(Decimal),
    WithdrawWrongPin(Decimal),
}

/// Strategy to generate positive decimal amounts (0.01 to 1,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a single operation.
fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        positive_amount().prop_map(Op::Deposit),
        positive_amount().prop_map(Op::Withdraw),
        positive_amount().prop_map(Op::WithdrawWrongPin),
    ]
}

/// Strategy to generate an operation sequence.
fn op_sequence() -> impl Strategy<Value = Vec<Op>> {
    proptest::collection::vec(op_strategy(), 1..24)
}

/// Runs a future to completion on a fresh current-thread runtime.
fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("test runtime")
        .block_on(future)
}

/// Applies a sequence of operations to one fresh account and returns the
/// final balance, the committed history, and how many operations succeeded.
/// Business failures (insufficient funds, wrong PIN) are expected outcomes,
/// not test failures.
async fn run_ops(ops: &[Op]) -> (Decimal, Vec<Transaction>, usize) {
    let accounts = Arc::new(AccountStore::new());
    let transactions = Arc::new(TransactionLog::new());
    let service = LedgerService::new(Arc::clone(&accounts), Arc::clone(&transactions));

    let account = service.create_account("Property Holder", PIN).expect("valid pin");

    let mut committed = 0usize;
    for op in ops {
        let outcome = match op {
            Op::Deposit(amount) => service.deposit(account.id, *amount).await,
            Op::Withdraw(amount) => service.withdraw(account.id, *amount, PIN).await,
            Op::WithdrawWrongPin(amount) => {
                service.withdraw(account.id, *amount, WRONG_PIN).await
            }
        };
        if outcome.is_ok() {
            committed += 1;
        }
    }

    let balance = accounts.get(account.id).expect("account exists").balance;
    let history = transactions.list_by_account(account.id);
    (balance, history, committed)
}

fn sum_of(history: &[Transaction], kind: TransactionKind) -> Decimal {
    history
        .iter()
        .filter(|t| t.kind == kind)
        .map(|t| t.amount)
        .sum()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // =========================================================================
    // Property 1: Non-negative balance
    // =========================================================================

    /// *For any* sequence of deposits and withdrawals, the committed balance
    /// SHALL never be negative.
    #[test]
    fn prop_balance_never_negative(ops in op_sequence()) {
        let (balance, _, _) = block_on(run_ops(&ops));
        prop_assert!(
            balance >= Decimal::ZERO,
            "balance went negative: {}",
            balance
        );
    }

    // =========================================================================
    // Property 2: Ledger reconciliation
    // =========================================================================

    /// *For any* sequence, sum(deposits) - sum(withdrawals) over the log
    /// SHALL equal the account balance.
    #[test]
    fn prop_ledger_reconciles_with_log(ops in op_sequence()) {
        let (balance, history, _) = block_on(run_ops(&ops));
        let deposits = sum_of(&history, TransactionKind::Deposit);
        let withdrawals = sum_of(&history, TransactionKind::Withdraw);
        prop_assert_eq!(
            deposits - withdrawals,
            balance,
            "log does not reconcile with balance"
        );
    }

    // =========================================================================
    // Property 3: History matches committed operations
    // =========================================================================

    /// *For any* sequence, the log SHALL contain exactly one entry per
    /// successful operation, in commit order with non-decreasing timestamps.
    #[test]
    fn prop_history_matches_commits(ops in op_sequence()) {
        let (_, history, committed) = block_on(run_ops(&ops));
        prop_assert_eq!(history.len(), committed, "entry count != successful ops");
        prop_assert!(
            history.windows(2).all(|pair| pair[0].timestamp <= pair[1].timestamp),
            "timestamps out of order"
        );
    }

    // =========================================================================
    // Property 4: PIN format oracle
    // =========================================================================

    /// *For any* string, parsing SHALL succeed exactly when it is 4 ASCII
    /// digits.
    #[test]
    fn prop_pin_parse_matches_contract(candidate in any::<String>()) {
        let well_formed =
            candidate.len() == 4 && candidate.bytes().all(|b| b.is_ascii_digit());
        prop_assert_eq!(Pin::parse(&candidate).is_ok(), well_formed);
    }

    /// *For any* 4-digit string, parsing SHALL succeed and the PIN SHALL
    /// match itself.
    #[test]
    fn prop_four_digit_pins_accepted(pin in "[0-9]{4}") {
        let parsed = Pin::parse(&pin);
        prop_assert!(parsed.is_ok());
        prop_assert!(parsed.unwrap().matches(&pin));
    }

    // =========================================================================
    // Property 5: Full-balance withdrawal
    // =========================================================================

    /// *For any* positive amount, depositing then withdrawing it SHALL leave
    /// the balance at exactly zero.
    #[test]
    fn prop_full_withdrawal_zeroes_balance(amount in positive_amount()) {
        let ops = vec![Op::Deposit(amount), Op::Withdraw(amount)];
        let (balance, history, committed) = block_on(run_ops(&ops));
        prop_assert_eq!(balance, Decimal::ZERO);
        prop_assert_eq!(committed, 2);
        prop_assert_eq!(history.len(), 2);
    }
}

#[cfg(test)]
mod fixed_cases {
    use super::*;
    use rust_decimal_macros::dec;

    /// Sequential form of the double-withdrawal race: the second withdrawal
    /// sees the reduced balance and fails, leaving 40.00 and two entries.
    #[test]
    fn test_two_sixty_withdrawals_on_one_hundred() {
        let ops = vec![
            Op::Deposit(dec!(100.00)),
            Op::Withdraw(dec!(60.00)),
            Op::Withdraw(dec!(60.00)),
        ];
        let (balance, history, committed) = block_on(run_ops(&ops));

        assert_eq!(balance, dec!(40.00));
        assert_eq!(committed, 2);
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].kind, TransactionKind::Withdraw);
        assert_eq!(history[1].amount, dec!(60.00));
    }

    /// Wrong-PIN withdrawals never touch the balance or the log.
    #[test]
    fn test_wrong_pin_sequence_is_inert() {
        let ops = vec![
            Op::Deposit(dec!(25.00)),
            Op::WithdrawWrongPin(dec!(10.00)),
            Op::WithdrawWrongPin(dec!(25.00)),
        ];
        let (balance, history, committed) = block_on(run_ops(&ops));

        assert_eq!(balance, dec!(25.00));
        assert_eq!(committed, 1);
        assert_eq!(history.len(), 1);
    }
}
