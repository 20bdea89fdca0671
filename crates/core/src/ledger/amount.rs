//! Amount arithmetic over detail lines.
//!
//! All sums are checked: a total that does not fit in a `Decimal` is an
//! `AmountOverflow` error, never a panic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::detail::{DetailKind, MovementDetail};
use super::error::LedgerError;

/// Sum of the amounts of a given kind.
fn total_of(details: &[MovementDetail], kind: DetailKind) -> Result<Decimal, LedgerError> {
    details
        .iter()
        .filter(|d| d.kind == kind)
        .try_fold(Decimal::ZERO, |acc, d| {
            acc.checked_add(d.amount).ok_or(LedgerError::AmountOverflow)
        })
}

/// Sum of all entry amounts. Zero for an empty slice.
///
/// # Errors
///
/// Returns `LedgerError::AmountOverflow` if the sum does not fit.
pub fn total_entry(details: &[MovementDetail]) -> Result<Decimal, LedgerError> {
    total_of(details, DetailKind::Entry)
}

/// Sum of all egress amounts. Zero for an empty slice.
///
/// # Errors
///
/// Returns `LedgerError::AmountOverflow` if the sum does not fit.
pub fn total_egress(details: &[MovementDetail]) -> Result<Decimal, LedgerError> {
    total_of(details, DetailKind::Egress)
}

/// Aggregated totals of a movement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementTotals {
    /// Sum of entry lines.
    pub entry: Decimal,
    /// Sum of egress lines.
    pub egress: Decimal,
}

impl MovementTotals {
    /// Computes both totals in one call.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AmountOverflow` if either side does not fit.
    pub fn from_details(details: &[MovementDetail]) -> Result<Self, LedgerError> {
        Ok(Self {
            entry: total_entry(details)?,
            egress: total_egress(details)?,
        })
    }

    /// Effect on the account balance: `entry - egress`.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AmountOverflow` if the difference does not fit.
    pub fn net(&self) -> Result<Decimal, LedgerError> {
        self.entry
            .checked_sub(self.egress)
            .ok_or(LedgerError::AmountOverflow)
    }

    /// Movement total as displayed: `entry + egress`.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AmountOverflow` if the sum does not fit.
    pub fn gross(&self) -> Result<Decimal, LedgerError> {
        self.entry
            .checked_add(self.egress)
            .ok_or(LedgerError::AmountOverflow)
    }

    /// Totals of the compensating movement.
    #[must_use]
    pub const fn inverse(self) -> Self {
        Self {
            entry: self.egress,
            egress: self.entry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn detail(amount: Decimal, kind: DetailKind) -> MovementDetail {
        MovementDetail::new(amount, kind).unwrap()
    }

    #[test]
    fn test_empty_totals_are_zero() {
        assert_eq!(total_entry(&[]).unwrap(), Decimal::ZERO);
        assert_eq!(total_egress(&[]).unwrap(), Decimal::ZERO);
        assert_eq!(
            MovementTotals::from_details(&[]).unwrap(),
            MovementTotals::default()
        );
    }

    #[rstest]
    #[case(dec!(12), dec!(2), dec!(10), dec!(14))]
    #[case(dec!(12.4), dec!(2.7), dec!(9.7), dec!(15.1))]
    #[case(dec!(1), dec!(180), dec!(-179), dec!(181))]
    fn test_totals(
        #[case] entry: Decimal,
        #[case] egress: Decimal,
        #[case] net: Decimal,
        #[case] gross: Decimal,
    ) {
        let details = vec![
            detail(entry, DetailKind::Entry),
            detail(egress, DetailKind::Egress),
        ];
        let totals = MovementTotals::from_details(&details).unwrap();
        assert_eq!(totals.entry, entry);
        assert_eq!(totals.egress, egress);
        assert_eq!(totals.net().unwrap(), net);
        assert_eq!(totals.gross().unwrap(), gross);
    }

    #[test]
    fn test_totals_accumulate_per_kind() {
        let details = vec![
            detail(dec!(1.10), DetailKind::Entry),
            detail(dec!(3), DetailKind::Egress),
            detail(dec!(2.20), DetailKind::Entry),
        ];
        assert_eq!(total_entry(&details).unwrap(), dec!(3.30));
        assert_eq!(total_egress(&details).unwrap(), dec!(3));
    }

    #[test]
    fn test_inverse_swaps_sides() {
        let totals = MovementTotals {
            entry: dec!(12),
            egress: dec!(2),
        };
        let inverse = totals.inverse();
        assert_eq!(inverse.net().unwrap(), -totals.net().unwrap());
        assert_eq!(inverse.gross().unwrap(), totals.gross().unwrap());
    }

    #[test]
    fn test_totals_overflow_is_an_error() {
        let details = vec![
            detail(Decimal::MAX, DetailKind::Entry),
            detail(dec!(1), DetailKind::Entry),
        ];
        assert!(matches!(total_entry(&details), Err(LedgerError::AmountOverflow)));
        assert!(matches!(
            MovementTotals::from_details(&details),
            Err(LedgerError::AmountOverflow)
        ));
    }

    #[test]
    fn test_gross_overflow_is_an_error() {
        let totals = MovementTotals {
            entry: Decimal::MAX,
            egress: dec!(1),
        };
        assert_eq!(totals.net().unwrap(), Decimal::MAX - dec!(1));
        assert!(matches!(totals.gross(), Err(LedgerError::AmountOverflow)));
    }
}
