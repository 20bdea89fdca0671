//! Ledger error types.
//!
//! Every failure in the ledger is terminal for the request that caused it and
//! leaves persisted state untouched. The presentation layer maps these errors
//! to responses using [`LedgerError::http_status_code`].

use thiserror::Error;
use tally_shared::types::{ClientId, MovementId};

use super::lifecycle::MovementState;
use super::store::StoreError;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Not Found ==========
    /// Client not found.
    #[error("client not found: {0}")]
    ClientNotFound(ClientId),

    /// The client has no account.
    #[error("the client has no account: {0}")]
    AccountNotFound(ClientId),

    /// Movement not found.
    #[error("movement not found: {0}")]
    MovementNotFound(MovementId),

    // ========== Validation Errors ==========
    /// Client names are restricted to ASCII letters.
    #[error("the name must contain only letters")]
    InvalidName,

    /// Detail category is neither `ingreso` nor `egreso`.
    #[error("incorrect operation type")]
    InvalidCategory(String),

    /// Detail amounts must be strictly positive.
    #[error("the detail amount must be positive")]
    InvalidAmount,

    // ========== Conflicts ==========
    /// The client already owns an account.
    #[error("the client already has an account: {0}")]
    AccountAlreadyExists(ClientId),

    // ========== Business Rules ==========
    /// The operation would leave the balance below zero.
    #[error("the amount cannot be negative")]
    NegativeBalance,

    /// A total or balance does not fit in a decimal.
    #[error("the amount is out of range")]
    AmountOverflow,

    // ========== Internal ==========
    /// A movement was driven through an illegal state transition.
    #[error("invalid movement transition from {from:?} to {to:?}")]
    InvalidTransition {
        /// State the movement was in.
        from: MovementState,
        /// State that was requested.
        to: MovementState,
    },

    /// The record store failed; nothing was persisted.
    #[error("persistence error: {0}")]
    Persistence(#[from] StoreError),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::ClientNotFound(_) => "client_not_found",
            Self::AccountNotFound(_) => "account_not_found",
            Self::MovementNotFound(_) => "movement_not_found",
            Self::InvalidName => "invalid_name",
            Self::InvalidCategory(_) => "invalid_category",
            Self::InvalidAmount => "invalid_amount",
            Self::AccountAlreadyExists(_) => "account_already_exists",
            Self::NegativeBalance => "negative_balance",
            Self::AmountOverflow => "amount_out_of_range",
            Self::InvalidTransition { .. } => "invalid_transition",
            Self::Persistence(_) => "persistence_error",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - input validation
            Self::InvalidName | Self::InvalidCategory(_) | Self::InvalidAmount => 400,

            // 404 Not Found
            Self::ClientNotFound(_) | Self::AccountNotFound(_) | Self::MovementNotFound(_) => 404,

            // 409 Conflict
            Self::AccountAlreadyExists(_) => 409,

            // 422 Unprocessable Entity - balance rule
            Self::NegativeBalance | Self::AmountOverflow => 422,

            // 500 Internal Server Error
            Self::InvalidTransition { .. } | Self::Persistence(_) => 500,
        }
    }

    /// Returns true if the caller can fix the request and try again.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.http_status_code() < 500
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(LedgerError::InvalidName.error_code(), "invalid_name");
        assert_eq!(
            LedgerError::InvalidCategory("ingres".into()).error_code(),
            "invalid_category"
        );
        assert_eq!(LedgerError::NegativeBalance.error_code(), "negative_balance");
        assert_eq!(LedgerError::AmountOverflow.error_code(), "amount_out_of_range");
        assert_eq!(
            LedgerError::Persistence(StoreError::Unavailable("down".into())).error_code(),
            "persistence_error"
        );
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(LedgerError::InvalidAmount.http_status_code(), 400);
        assert_eq!(
            LedgerError::AccountNotFound(ClientId::new()).http_status_code(),
            404
        );
        assert_eq!(
            LedgerError::MovementNotFound(MovementId::new()).http_status_code(),
            404
        );
        assert_eq!(
            LedgerError::AccountAlreadyExists(ClientId::new()).http_status_code(),
            409
        );
        assert_eq!(LedgerError::NegativeBalance.http_status_code(), 422);
        assert_eq!(LedgerError::AmountOverflow.http_status_code(), 422);
        assert_eq!(
            LedgerError::InvalidTransition {
                from: MovementState::Committed,
                to: MovementState::Validated,
            }
            .http_status_code(),
            500
        );
    }

    #[test]
    fn test_client_errors() {
        assert!(LedgerError::NegativeBalance.is_client_error());
        assert!(LedgerError::InvalidName.is_client_error());
        assert!(!LedgerError::Persistence(StoreError::Unavailable("x".into())).is_client_error());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            LedgerError::NegativeBalance.to_string(),
            "the amount cannot be negative"
        );
        assert_eq!(
            LedgerError::InvalidCategory("ingres".into()).to_string(),
            "incorrect operation type"
        );
        assert_eq!(
            LedgerError::InvalidName.to_string(),
            "the name must contain only letters"
        );
    }
}
