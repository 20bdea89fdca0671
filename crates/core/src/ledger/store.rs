//! Record store contract.
//!
//! The ledger never talks to a database directly. Implementations must make
//! each `commit_*` call all-or-nothing: either every record in the call is
//! persisted or none is.

use async_trait::async_trait;
use thiserror::Error;
use tally_shared::types::{ClientId, MovementId};

use super::client::Client;
use super::types::{Account, Movement};

/// Errors raised by a record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store rejected or failed the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A record referenced by the operation does not exist.
    #[error("record missing: {0}")]
    Missing(String),

    /// A stored value could not be mapped back to a domain record.
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// Durable storage for clients, accounts and movements.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Inserts a new client.
    async fn insert_client(&self, client: &Client) -> Result<(), StoreError>;

    /// Replaces a client's name. Returns `false` if the client does not exist.
    async fn update_client(&self, client: &Client) -> Result<bool, StoreError>;

    /// Finds a client by ID.
    async fn find_client(&self, id: ClientId) -> Result<Option<Client>, StoreError>;

    /// Lists all clients.
    async fn list_clients(&self) -> Result<Vec<Client>, StoreError>;

    /// Deletes a client with its account, movements and details in one unit.
    /// Returns `false` if the client does not exist.
    async fn delete_client(&self, id: ClientId) -> Result<bool, StoreError>;

    /// Inserts a new account.
    async fn insert_account(&self, account: &Account) -> Result<(), StoreError>;

    /// Finds the account of a client.
    async fn find_account(&self, client_id: ClientId) -> Result<Option<Account>, StoreError>;

    /// Finds a movement with its details in insertion order.
    async fn find_movement(&self, id: MovementId) -> Result<Option<Movement>, StoreError>;

    /// Persists a new movement, its details and the updated account atomically.
    async fn commit_movement(&self, movement: &Movement, account: &Account)
    -> Result<(), StoreError>;

    /// Deletes a movement with its details and persists the updated account
    /// atomically.
    async fn commit_reversal(&self, movement_id: MovementId, account: &Account)
    -> Result<(), StoreError>;
}
