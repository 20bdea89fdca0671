//! Movement lifecycle.
//!
//! Creation: `Proposed -> Validated -> Committed`, or `Rejected` when
//! validation or persistence fails. Deletion: `Committed -> ReversalValidated
//! -> Deleted`, or `ReversalRejected`. Balance changes are applied to a
//! working copy of the account; the copy only reaches the store through an
//! atomic commit, and is dropped on any failure.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tally_shared::types::{ClientId, MovementId};

use super::amount::MovementTotals;
use super::balance::BalanceEngine;
use super::detail::{DetailInput, MovementDetail};
use super::error::LedgerError;
use super::locks::AccountLocks;
use super::store::LedgerStore;
use super::types::{Account, Movement};

/// State of a movement while it is being created or deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementState {
    /// Built from input, not yet validated.
    Proposed,
    /// Passed validation and the balance gate.
    Validated,
    /// Persisted together with the updated account.
    Committed,
    /// Failed validation or persistence; nothing was stored.
    Rejected,
    /// Reversal passed the balance gate.
    ReversalValidated,
    /// Removed and its effect reversed.
    Deleted,
    /// Reversal failed; the movement is still committed.
    ReversalRejected,
}

impl MovementState {
    /// Returns true if the transition `self -> to` is allowed.
    #[must_use]
    pub const fn can_transition_to(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Proposed, Self::Validated | Self::Rejected)
                | (Self::Validated, Self::Committed | Self::Rejected)
                | (Self::Committed, Self::ReversalValidated | Self::ReversalRejected)
                | (Self::ReversalValidated, Self::Deleted | Self::ReversalRejected)
        )
    }

    /// Performs a transition.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidTransition` if the transition is not allowed.
    pub fn transition(self, to: Self) -> Result<Self, LedgerError> {
        if self.can_transition_to(to) {
            Ok(to)
        } else {
            Err(LedgerError::InvalidTransition { from: self, to })
        }
    }

    /// Returns true if no further transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Deleted | Self::ReversalRejected)
    }
}

/// Creates and deletes movements against a record store.
pub struct MovementLifecycle<S> {
    store: Arc<S>,
    locks: AccountLocks,
}

impl<S> Clone for MovementLifecycle<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            locks: self.locks.clone(),
        }
    }
}

impl<S: LedgerStore> MovementLifecycle<S> {
    /// Creates a lifecycle manager over a store and a shared lock registry.
    #[must_use]
    pub const fn new(store: Arc<S>, locks: AccountLocks) -> Self {
        Self { store, locks }
    }

    /// Creates a movement and applies it to the client's account.
    ///
    /// # Arguments
    ///
    /// * `client_id` - Owner of the account to charge
    /// * `date` - Effective date; defaults to now
    /// * `details` - Raw detail lines, kept in the given order
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound`, `InvalidCategory`, `InvalidAmount`,
    /// `NegativeBalance`, `AmountOverflow` or `Persistence`. In every case the
    /// store is unchanged.
    pub async fn create_movement(
        &self,
        client_id: ClientId,
        date: Option<DateTime<Utc>>,
        details: Vec<DetailInput>,
    ) -> Result<Movement, LedgerError> {
        let _guard = self.locks.acquire(client_id).await;
        let state = MovementState::Proposed;

        let account = self
            .store
            .find_account(client_id)
            .await?
            .ok_or(LedgerError::AccountNotFound(client_id))?;

        let (movement, working) = match Self::validate(account, client_id, date, &details) {
            Ok(validated) => validated,
            Err(err) => {
                state.transition(MovementState::Rejected)?;
                return Err(err);
            }
        };
        let state = state.transition(MovementState::Validated)?;

        if let Err(err) = self.store.commit_movement(&movement, &working).await {
            state.transition(MovementState::Rejected)?;
            return Err(err.into());
        }
        state.transition(MovementState::Committed)?;

        Ok(movement)
    }

    /// Validates details and applies them to a working copy of the account.
    fn validate(
        mut working: Account,
        client_id: ClientId,
        date: Option<DateTime<Utc>>,
        inputs: &[DetailInput],
    ) -> Result<(Movement, Account), LedgerError> {
        let details = inputs
            .iter()
            .map(MovementDetail::from_input)
            .collect::<Result<Vec<_>, _>>()?;

        let totals = MovementTotals::from_details(&details)?;
        // The displayed total must be representable once stored.
        totals.gross()?;
        BalanceEngine::apply(&mut working, totals)?;

        let movement = Movement::new(client_id, date.unwrap_or_else(Utc::now), details);

        Ok((movement, working))
    }

    /// Deletes a movement and reverses its effect on the account.
    ///
    /// # Errors
    ///
    /// Returns `MovementNotFound`, `AccountNotFound`, `NegativeBalance` or
    /// `Persistence`. In every case the store is unchanged.
    pub async fn delete_movement(&self, movement_id: MovementId) -> Result<(), LedgerError> {
        let client_id = self.get_movement(movement_id).await?.client_id;
        let _guard = self.locks.acquire(client_id).await;

        // Re-read under the lock; a concurrent delete may have won.
        let movement = self.get_movement(movement_id).await?;
        let state = MovementState::Committed;

        let mut working = self
            .store
            .find_account(client_id)
            .await?
            .ok_or(LedgerError::AccountNotFound(client_id))?;

        let reversed = movement
            .totals()
            .and_then(|totals| BalanceEngine::reverse(&mut working, totals));
        if let Err(err) = reversed {
            state.transition(MovementState::ReversalRejected)?;
            return Err(err);
        }
        let state = state.transition(MovementState::ReversalValidated)?;

        if let Err(err) = self.store.commit_reversal(movement_id, &working).await {
            state.transition(MovementState::ReversalRejected)?;
            return Err(err.into());
        }
        state.transition(MovementState::Deleted)?;

        Ok(())
    }

    /// Fetches a movement with its details.
    ///
    /// # Errors
    ///
    /// Returns `MovementNotFound` or `Persistence`.
    pub async fn get_movement(&self, movement_id: MovementId) -> Result<Movement, LedgerError> {
        self.store
            .find_movement(movement_id)
            .await?
            .ok_or(LedgerError::MovementNotFound(movement_id))
    }
}
