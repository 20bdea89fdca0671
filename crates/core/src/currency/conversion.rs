//! Currency conversion logic.
//!
//! Rounding strategy:
//! - Round to the target currency's decimal places
//! - Use banker's rounding (round half to even)

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

/// Decimal places of a projected balance.
pub const PROJECTION_DECIMAL_PLACES: u32 = 2;

/// Converts an amount using the given exchange rate.
///
/// Uses banker's rounding (round half to even) to minimize cumulative errors.
/// Returns `None` if the product does not fit in a `Decimal`.
#[must_use]
pub fn convert_amount(amount: Decimal, rate: Decimal, decimal_places: u32) -> Option<Decimal> {
    amount
        .checked_mul(rate)
        .map(|converted| {
            converted.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven)
        })
}

/// Projects a ledger balance into another currency: `balance × rate`,
/// rounded to cents.
#[must_use]
pub fn project_balance(balance: Decimal, rate: Decimal) -> Option<Decimal> {
    convert_amount(balance, rate, PROJECTION_DECIMAL_PLACES)
}
