//! Domain records shared by the ledger components.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{ClientId, Money, MovementId};

use super::amount::MovementTotals;
use super::detail::MovementDetail;
use super::error::LedgerError;

/// A client's single running balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Owning client; also the account key.
    pub client_id: ClientId,
    /// Current balance. Never negative after a committed operation.
    pub balance: Decimal,
}

impl Account {
    /// Creates an account record.
    #[must_use]
    pub const fn new(client_id: ClientId, balance: Decimal) -> Self {
        Self { client_id, balance }
    }
}

/// A dated group of detail lines applied to one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    /// Movement ID.
    pub id: MovementId,
    /// Owning client.
    pub client_id: ClientId,
    /// Effective date.
    pub date: DateTime<Utc>,
    /// Detail lines in insertion order.
    pub details: Vec<MovementDetail>,
}

impl Movement {
    /// Creates a movement with a fresh ID.
    #[must_use]
    pub fn new(client_id: ClientId, date: DateTime<Utc>, details: Vec<MovementDetail>) -> Self {
        Self {
            id: MovementId::new(),
            client_id,
            date,
            details,
        }
    }

    /// Entry and egress totals of this movement.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AmountOverflow` if a side does not fit.
    pub fn totals(&self) -> Result<MovementTotals, LedgerError> {
        MovementTotals::from_details(&self.details)
    }

    /// Displayed total (`entry + egress`).
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AmountOverflow` if the total does not fit.
    pub fn total(&self) -> Result<Decimal, LedgerError> {
        self.totals()?.gross()
    }
}

/// Read model of an account with an optional foreign-currency projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountView {
    /// Owning client.
    pub client_id: ClientId,
    /// Balance in the ledger currency.
    pub balance: Decimal,
    /// Balance projected with the current quote, when one was available.
    pub converted: Option<Money>,
}
