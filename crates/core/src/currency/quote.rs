//! Exchange quote sources.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tally_shared::types::Currency;

/// Price of one ledger-currency unit in `currency`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Target currency.
    pub currency: Currency,
    /// Multiplier applied to ledger balances.
    pub rate: Decimal,
}

impl Quote {
    /// Builds a quote, rejecting non-positive rates.
    ///
    /// # Errors
    ///
    /// Returns `QuoteError::InvalidRate` if `rate <= 0`.
    pub fn new(currency: Currency, rate: Decimal) -> Result<Self, QuoteError> {
        if rate <= Decimal::ZERO {
            return Err(QuoteError::InvalidRate(rate));
        }
        Ok(Self { currency, rate })
    }
}

/// Reasons a quote could not be obtained.
#[derive(Debug, Clone, Error)]
pub enum QuoteError {
    /// Quotes are switched off.
    #[error("quotes are disabled")]
    Disabled,

    /// The quote source could not be reached.
    #[error("quote source unreachable: {0}")]
    Unreachable(String),

    /// The quote source answered with something unusable.
    #[error("malformed quote: {0}")]
    Malformed(String),

    /// The rate is zero or negative.
    #[error("invalid rate: {0}")]
    InvalidRate(Decimal),
}

/// Source of exchange quotes.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Returns the current quote.
    async fn quote(&self) -> Result<Quote, QuoteError>;
}

/// Provider that always answers with the same quote.
#[derive(Debug, Clone, Copy)]
pub struct FixedQuoteProvider {
    quote: Quote,
}

impl FixedQuoteProvider {
    /// Wraps a quote.
    #[must_use]
    pub const fn new(quote: Quote) -> Self {
        Self { quote }
    }
}

#[async_trait]
impl QuoteProvider for FixedQuoteProvider {
    async fn quote(&self) -> Result<Quote, QuoteError> {
        Ok(self.quote)
    }
}
