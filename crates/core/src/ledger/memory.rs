//! In-memory record store.
//!
//! Used by tests and by embedders that do not need durability. A single
//! write lock is held for each mutating call, so readers never observe half
//! of a commit.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tally_shared::types::{ClientId, MovementId};

use super::client::Client;
use super::store::{LedgerStore, StoreError};
use super::types::{Account, Movement};

#[derive(Debug, Default)]
struct State {
    clients: HashMap<ClientId, Client>,
    accounts: HashMap<ClientId, Account>,
    movements: HashMap<MovementId, Movement>,
}

/// Hash-map backed [`LedgerStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored movements.
    pub async fn movement_count(&self) -> usize {
        self.state.read().await.movements.len()
    }
}

#[async_trait]
impl LedgerStore for MemoryStore {
    async fn insert_client(&self, client: &Client) -> Result<(), StoreError> {
        self.state
            .write()
            .await
            .clients
            .insert(client.id, client.clone());
        Ok(())
    }

    async fn update_client(&self, client: &Client) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        match state.clients.get_mut(&client.id) {
            Some(existing) => {
                existing.name = client.name.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_client(&self, id: ClientId) -> Result<Option<Client>, StoreError> {
        Ok(self.state.read().await.clients.get(&id).cloned())
    }

    async fn list_clients(&self) -> Result<Vec<Client>, StoreError> {
        let mut clients: Vec<Client> = self.state.read().await.clients.values().cloned().collect();
        clients.sort_by_key(|c| c.id);
        Ok(clients)
    }

    async fn delete_client(&self, id: ClientId) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        if state.clients.remove(&id).is_none() {
            return Ok(false);
        }
        state.accounts.remove(&id);
        state.movements.retain(|_, m| m.client_id != id);
        Ok(true)
    }

    async fn insert_account(&self, account: &Account) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        if !state.clients.contains_key(&account.client_id) {
            return Err(StoreError::Missing(format!("client {}", account.client_id)));
        }
        state.accounts.insert(account.client_id, account.clone());
        Ok(())
    }

    async fn find_account(&self, client_id: ClientId) -> Result<Option<Account>, StoreError> {
        Ok(self.state.read().await.accounts.get(&client_id).cloned())
    }

    async fn find_movement(&self, id: MovementId) -> Result<Option<Movement>, StoreError> {
        Ok(self.state.read().await.movements.get(&id).cloned())
    }

    async fn commit_movement(
        &self,
        movement: &Movement,
        account: &Account,
    ) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        let Some(stored) = state.accounts.get_mut(&account.client_id) else {
            return Err(StoreError::Missing(format!("account {}", account.client_id)));
        };
        stored.balance = account.balance;
        state.movements.insert(movement.id, movement.clone());
        Ok(())
    }

    async fn commit_reversal(
        &self,
        movement_id: MovementId,
        account: &Account,
    ) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        if !state.accounts.contains_key(&account.client_id) {
            return Err(StoreError::Missing(format!("account {}", account.client_id)));
        }
        if state.movements.remove(&movement_id).is_none() {
            return Err(StoreError::Missing(format!("movement {movement_id}")));
        }
        if let Some(stored) = state.accounts.get_mut(&account.client_id) {
            stored.balance = account.balance;
        }
        Ok(())
    }
}
