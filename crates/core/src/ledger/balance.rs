//! Balance invariant engine.
//!
//! Every mutation of an account balance goes through here. The feasibility
//! check is a gate that runs before anything is applied: an account is never
//! mutated into a negative balance and then repaired.

use rust_decimal::Decimal;

use super::amount::MovementTotals;
use super::error::LedgerError;
use super::types::Account;

/// Stateless engine applying movement totals to accounts.
pub struct BalanceEngine;

impl BalanceEngine {
    /// Balance after `total_entry` comes in and `total_egress` goes out.
    fn projected(
        account: &Account,
        total_entry: Decimal,
        total_egress: Decimal,
    ) -> Result<Decimal, LedgerError> {
        total_entry
            .checked_sub(total_egress)
            .and_then(|net| account.balance.checked_add(net))
            .ok_or(LedgerError::AmountOverflow)
    }

    /// Checks that `balance + total_entry - total_egress` stays non-negative.
    ///
    /// A projected balance of exactly zero is accepted.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NegativeBalance` if the projection is below zero,
    /// or `LedgerError::AmountOverflow` if it does not fit in a decimal.
    pub fn check_feasible(
        account: &Account,
        total_entry: Decimal,
        total_egress: Decimal,
    ) -> Result<bool, LedgerError> {
        if Self::projected(account, total_entry, total_egress)? < Decimal::ZERO {
            return Err(LedgerError::NegativeBalance);
        }
        Ok(true)
    }

    /// Adds `amount` to the balance. No sign check.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AmountOverflow`; the account is untouched.
    pub fn apply_entry(account: &mut Account, amount: Decimal) -> Result<(), LedgerError> {
        account.balance = account
            .balance
            .checked_add(amount)
            .ok_or(LedgerError::AmountOverflow)?;
        Ok(())
    }

    /// Subtracts `amount` from the balance. No sign check.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AmountOverflow`; the account is untouched.
    pub fn apply_egress(account: &mut Account, amount: Decimal) -> Result<(), LedgerError> {
        account.balance = account
            .balance
            .checked_sub(amount)
            .ok_or(LedgerError::AmountOverflow)?;
        Ok(())
    }

    /// Applies a movement: check, then move the balance by the net amount.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NegativeBalance` or `LedgerError::AmountOverflow`;
    /// the account is untouched.
    pub fn apply(account: &mut Account, totals: MovementTotals) -> Result<(), LedgerError> {
        let projected = Self::projected(account, totals.entry, totals.egress)?;
        if projected < Decimal::ZERO {
            return Err(LedgerError::NegativeBalance);
        }
        account.balance = projected;
        Ok(())
    }

    /// Undoes a movement by applying its inverse.
    ///
    /// The egress total comes back in as an entry and the entry total goes out
    /// as an egress. The non-negative gate still applies: removing a movement
    /// whose entries have since been spent is rejected.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NegativeBalance` or `LedgerError::AmountOverflow`;
    /// the account is untouched.
    pub fn reverse(account: &mut Account, totals: MovementTotals) -> Result<(), LedgerError> {
        Self::apply(account, totals.inverse())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tally_shared::types::ClientId;

    fn account(balance: Decimal) -> Account {
        Account::new(ClientId::new(), balance)
    }

    fn totals(entry: Decimal, egress: Decimal) -> MovementTotals {
        MovementTotals { entry, egress }
    }

    #[test]
    fn test_check_feasible_accepts_zero_projection() {
        let acc = account(dec!(10));
        assert!(BalanceEngine::check_feasible(&acc, dec!(0), dec!(10)).unwrap());
    }

    #[test]
    fn test_check_feasible_rejects_negative_projection() {
        let acc = account(dec!(0));
        assert!(matches!(
            BalanceEngine::check_feasible(&acc, dec!(1), dec!(180)),
            Err(LedgerError::NegativeBalance)
        ));
    }

    #[test]
    fn test_apply_moves_balance_by_net() {
        let mut acc = account(dec!(12));
        BalanceEngine::apply(&mut acc, totals(dec!(12), dec!(2))).unwrap();
        assert_eq!(acc.balance, dec!(22));
    }

    #[test]
    fn test_failed_apply_leaves_balance() {
        let mut acc = account(dec!(0));
        let err = BalanceEngine::apply(&mut acc, totals(dec!(1), dec!(180))).unwrap_err();
        assert!(matches!(err, LedgerError::NegativeBalance));
        assert_eq!(acc.balance, dec!(0));
    }

    #[test]
    fn test_reverse_restores_balance() {
        let mut acc = account(dec!(12));
        let t = totals(dec!(12), dec!(2));
        BalanceEngine::apply(&mut acc, t).unwrap();
        BalanceEngine::reverse(&mut acc, t).unwrap();
        assert_eq!(acc.balance, dec!(12));
    }

    #[test]
    fn test_reverse_is_gated() {
        // Entry of 50 already spent: reversing it would go negative.
        let mut acc = account(dec!(10));
        let err = BalanceEngine::reverse(&mut acc, totals(dec!(50), dec!(0))).unwrap_err();
        assert!(matches!(err, LedgerError::NegativeBalance));
        assert_eq!(acc.balance, dec!(10));
    }

    #[test]
    fn test_raw_apply_has_no_gate() {
        let mut acc = account(dec!(1));
        BalanceEngine::apply_egress(&mut acc, dec!(5)).unwrap();
        assert_eq!(acc.balance, dec!(-4));
        BalanceEngine::apply_entry(&mut acc, dec!(4)).unwrap();
        assert_eq!(acc.balance, dec!(0));
    }

    #[test]
    fn test_entry_past_max_is_rejected() {
        let mut acc = account(Decimal::MAX);
        assert!(matches!(
            BalanceEngine::check_feasible(&acc, dec!(1), dec!(0)),
            Err(LedgerError::AmountOverflow)
        ));
        assert!(matches!(
            BalanceEngine::apply(&mut acc, totals(dec!(1), dec!(0))),
            Err(LedgerError::AmountOverflow)
        ));
        assert!(matches!(
            BalanceEngine::apply_entry(&mut acc, dec!(1)),
            Err(LedgerError::AmountOverflow)
        ));
        assert_eq!(acc.balance, Decimal::MAX);
    }

    #[test]
    fn test_net_within_range_at_max_balance() {
        // Entry and egress cancel out except for the egress surplus.
        let mut acc = account(Decimal::MAX);
        BalanceEngine::apply(&mut acc, totals(dec!(5), dec!(7))).unwrap();
        assert_eq!(acc.balance, Decimal::MAX - dec!(2));
    }

    #[test]
    fn test_raw_egress_past_min_is_rejected() {
        let mut acc = account(Decimal::MIN);
        assert!(matches!(
            BalanceEngine::apply_egress(&mut acc, dec!(1)),
            Err(LedgerError::AmountOverflow)
        ));
        assert_eq!(acc.balance, Decimal::MIN);
    }
}
