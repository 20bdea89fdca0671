//! Ledger service.
//!
//! The entry point the presentation layer calls. It owns the record store,
//! the per-account lock registry and the movement lifecycle, and keeps every
//! client/account rule in one place.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tally_shared::types::{ClientId, Money, MovementId};

use super::client::{Client, ClientName};
use super::detail::DetailInput;
use super::error::LedgerError;
use super::lifecycle::MovementLifecycle;
use super::locks::AccountLocks;
use super::store::LedgerStore;
use super::types::{Account, AccountView, Movement};
use crate::currency::{QuoteProvider, project_balance};

/// Ledger operations over a record store.
pub struct LedgerService<S> {
    store: Arc<S>,
    locks: AccountLocks,
    movements: MovementLifecycle<S>,
}

impl<S> Clone for LedgerService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            locks: self.locks.clone(),
            movements: self.movements.clone(),
        }
    }
}

impl<S: LedgerStore> LedgerService<S> {
    /// Creates a service over the given store.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        let locks = AccountLocks::new();
        let movements = MovementLifecycle::new(Arc::clone(&store), locks.clone());
        Self {
            store,
            locks,
            movements,
        }
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    // ========================================================================
    // Clients
    // ========================================================================

    /// Creates a client.
    ///
    /// # Errors
    ///
    /// Returns `InvalidName` if the name is not made of letters only.
    pub async fn create_client(&self, name: &str) -> Result<Client, LedgerError> {
        let client = Client::new(ClientName::parse(name)?);
        self.store.insert_client(&client).await?;
        Ok(client)
    }

    /// Renames a client.
    ///
    /// # Errors
    ///
    /// Returns `InvalidName` or `ClientNotFound`.
    pub async fn rename_client(&self, client_id: ClientId, name: &str) -> Result<Client, LedgerError> {
        let client = Client {
            id: client_id,
            name: ClientName::parse(name)?,
        };
        if !self.store.update_client(&client).await? {
            return Err(LedgerError::ClientNotFound(client_id));
        }
        Ok(client)
    }

    /// Fetches a client.
    ///
    /// # Errors
    ///
    /// Returns `ClientNotFound`.
    pub async fn get_client(&self, client_id: ClientId) -> Result<Client, LedgerError> {
        self.store
            .find_client(client_id)
            .await?
            .ok_or(LedgerError::ClientNotFound(client_id))
    }

    /// Lists all clients.
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if the store fails.
    pub async fn list_clients(&self) -> Result<Vec<Client>, LedgerError> {
        Ok(self.store.list_clients().await?)
    }

    /// Deletes a client together with its account and movements.
    ///
    /// # Errors
    ///
    /// Returns `ClientNotFound`.
    pub async fn delete_client(&self, client_id: ClientId) -> Result<(), LedgerError> {
        let _guard = self.locks.acquire(client_id).await;
        if !self.store.delete_client(client_id).await? {
            return Err(LedgerError::ClientNotFound(client_id));
        }
        Ok(())
    }

    // ========================================================================
    // Accounts
    // ========================================================================

    /// Opens the account of a client.
    ///
    /// # Errors
    ///
    /// Returns `ClientNotFound`, `AccountAlreadyExists`, or `NegativeBalance`
    /// when `initial_balance` is below zero.
    pub async fn create_account(
        &self,
        client_id: ClientId,
        initial_balance: Decimal,
    ) -> Result<Account, LedgerError> {
        if initial_balance < Decimal::ZERO {
            return Err(LedgerError::NegativeBalance);
        }

        let _guard = self.locks.acquire(client_id).await;
        self.get_client(client_id).await?;
        if self.store.find_account(client_id).await?.is_some() {
            return Err(LedgerError::AccountAlreadyExists(client_id));
        }

        let account = Account::new(client_id, initial_balance);
        self.store.insert_account(&account).await?;
        Ok(account)
    }

    /// Fetches the account of a client.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound`.
    pub async fn get_account(&self, client_id: ClientId) -> Result<Account, LedgerError> {
        self.store
            .find_account(client_id)
            .await?
            .ok_or(LedgerError::AccountNotFound(client_id))
    }

    /// Fetches the account with a balance projected through `quotes`.
    ///
    /// A missing or failing quote, or a projection that does not fit in a
    /// decimal, only drops the projection.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound`.
    pub async fn account_view<Q>(
        &self,
        client_id: ClientId,
        quotes: Option<&Q>,
    ) -> Result<AccountView, LedgerError>
    where
        Q: QuoteProvider + ?Sized,
    {
        let account = self.get_account(client_id).await?;

        let converted = match quotes {
            Some(provider) => provider.quote().await.ok().and_then(|quote| {
                project_balance(account.balance, quote.rate)
                    .map(|amount| Money::new(amount, quote.currency))
            }),
            None => None,
        };

        Ok(AccountView {
            client_id: account.client_id,
            balance: account.balance,
            converted,
        })
    }

    // ========================================================================
    // Movements
    // ========================================================================

    /// Creates a movement. See [`MovementLifecycle::create_movement`].
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound`, `InvalidCategory`, `InvalidAmount`,
    /// `NegativeBalance`, `AmountOverflow` or `Persistence`.
    pub async fn create_movement(
        &self,
        client_id: ClientId,
        date: Option<DateTime<Utc>>,
        details: Vec<DetailInput>,
    ) -> Result<Movement, LedgerError> {
        self.movements.create_movement(client_id, date, details).await
    }

    /// Fetches a movement.
    ///
    /// # Errors
    ///
    /// Returns `MovementNotFound`.
    pub async fn get_movement(&self, movement_id: MovementId) -> Result<Movement, LedgerError> {
        self.movements.get_movement(movement_id).await
    }

    /// Deletes a movement. See [`MovementLifecycle::delete_movement`].
    ///
    /// # Errors
    ///
    /// Returns `MovementNotFound`, `AccountNotFound`, `NegativeBalance` or
    /// `Persistence`.
    pub async fn delete_movement(&self, movement_id: MovementId) -> Result<(), LedgerError> {
        self.movements.delete_movement(movement_id).await
    }
}
