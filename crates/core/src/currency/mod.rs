//! Foreign-currency projection of balances.
//!
//! Balances are only ever stored in the ledger currency. A converted figure is
//! computed on read from an externally supplied quote and is never persisted.

pub mod conversion;
pub mod quote;

#[cfg(test)]
mod conversion_props;

pub use conversion::{convert_amount, project_balance};
pub use quote::{FixedQuoteProvider, Quote, QuoteError, QuoteProvider};
