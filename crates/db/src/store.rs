//! `LedgerStore` backed by `SeaORM`.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, DbErr};
use tally_core::ledger::{
    Account, Client, ClientName, DetailKind, LedgerStore, Movement, MovementDetail, StoreError,
};
use tally_shared::types::{ClientId, MovementDetailId, MovementId};
use tracing::debug;

use crate::entities::{accounts, clients, movement_details};
use crate::repositories::{
    AccountRepository, ClientRepository, MovementRepository, MovementWithDetails, NewDetail,
    NewMovement,
};

/// Record store over a relational database.
#[derive(Debug, Clone)]
pub struct SeaOrmStore {
    clients: ClientRepository,
    accounts: AccountRepository,
    movements: MovementRepository,
}

impl SeaOrmStore {
    /// Creates a store sharing one connection pool.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            clients: ClientRepository::new(db.clone()),
            accounts: AccountRepository::new(db.clone()),
            movements: MovementRepository::new(db),
        }
    }
}

fn store_err(err: DbErr) -> StoreError {
    match err {
        DbErr::RecordNotFound(what) => StoreError::Missing(what),
        DbErr::RecordNotUpdated => StoreError::Missing("record not updated".to_string()),
        other => StoreError::Unavailable(other.to_string()),
    }
}

fn to_client(model: clients::Model) -> Result<Client, StoreError> {
    let name = ClientName::parse(model.name)
        .map_err(|e| StoreError::Corrupt(format!("client {}: {e}", model.id)))?;
    Ok(Client {
        id: ClientId::from_uuid(model.id),
        name,
    })
}

fn parse_amount(text: &str, owner: &str) -> Result<Decimal, StoreError> {
    Decimal::from_str(text).map_err(|e| StoreError::Corrupt(format!("{owner}: {e}")))
}

fn to_account(model: accounts::Model) -> Result<Account, StoreError> {
    let balance = parse_amount(&model.balance, &format!("account {}", model.client_id))?;
    Ok(Account::new(ClientId::from_uuid(model.client_id), balance))
}

fn to_detail(model: movement_details::Model) -> Result<MovementDetail, StoreError> {
    let kind = DetailKind::parse(&model.kind)
        .map_err(|e| StoreError::Corrupt(format!("detail {}: {e}", model.id)))?;
    let amount = parse_amount(&model.amount, &format!("detail {}", model.id))?;
    Ok(MovementDetail {
        id: MovementDetailId::from_uuid(model.id),
        amount,
        kind,
    })
}

fn to_movement(row: MovementWithDetails) -> Result<Movement, StoreError> {
    let details = row
        .details
        .into_iter()
        .map(to_detail)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Movement {
        id: MovementId::from_uuid(row.movement.id),
        client_id: ClientId::from_uuid(row.movement.client_id),
        date: row.movement.date.with_timezone(&Utc),
        details,
    })
}

fn to_new_movement(movement: &Movement) -> NewMovement {
    NewMovement {
        id: movement.id.into_inner(),
        client_id: movement.client_id.into_inner(),
        date: movement.date,
        details: movement
            .details
            .iter()
            .map(|d| NewDetail {
                id: d.id.into_inner(),
                amount: d.amount,
                kind: d.kind.as_str().to_string(),
            })
            .collect(),
    }
}

#[async_trait]
impl LedgerStore for SeaOrmStore {
    async fn insert_client(&self, client: &Client) -> Result<(), StoreError> {
        self.clients
            .create(client.id.into_inner(), client.name.as_str())
            .await
            .map_err(store_err)?;
        Ok(())
    }

    async fn update_client(&self, client: &Client) -> Result<bool, StoreError> {
        let updated = self
            .clients
            .rename(client.id.into_inner(), client.name.as_str())
            .await
            .map_err(store_err)?;
        Ok(updated.is_some())
    }

    async fn find_client(&self, id: ClientId) -> Result<Option<Client>, StoreError> {
        self.clients
            .find_by_id(id.into_inner())
            .await
            .map_err(store_err)?
            .map(to_client)
            .transpose()
    }

    async fn list_clients(&self) -> Result<Vec<Client>, StoreError> {
        self.clients
            .list()
            .await
            .map_err(store_err)?
            .into_iter()
            .map(to_client)
            .collect()
    }

    async fn delete_client(&self, id: ClientId) -> Result<bool, StoreError> {
        let deleted = self
            .clients
            .delete_cascade(id.into_inner())
            .await
            .map_err(store_err)?;
        if deleted {
            debug!(client_id = %id, "client deleted with account and movements");
        }
        Ok(deleted)
    }

    async fn insert_account(&self, account: &Account) -> Result<(), StoreError> {
        self.accounts
            .create(account.client_id.into_inner(), account.balance)
            .await
            .map_err(store_err)?;
        Ok(())
    }

    async fn find_account(&self, client_id: ClientId) -> Result<Option<Account>, StoreError> {
        self.accounts
            .find_by_client(client_id.into_inner())
            .await
            .map_err(store_err)?
            .map(to_account)
            .transpose()
    }

    async fn find_movement(&self, id: MovementId) -> Result<Option<Movement>, StoreError> {
        self.movements
            .find_with_details(id.into_inner())
            .await
            .map_err(store_err)?
            .map(to_movement)
            .transpose()
    }

    async fn commit_movement(
        &self,
        movement: &Movement,
        account: &Account,
    ) -> Result<(), StoreError> {
        self.movements
            .insert_with_balance(&to_new_movement(movement), account.balance)
            .await
            .map_err(store_err)?;
        debug!(
            movement_id = %movement.id,
            client_id = %account.client_id,
            balance = %account.balance,
            "movement committed"
        );
        Ok(())
    }

    async fn commit_reversal(
        &self,
        movement_id: MovementId,
        account: &Account,
    ) -> Result<(), StoreError> {
        self.movements
            .delete_with_balance(
                movement_id.into_inner(),
                account.client_id.into_inner(),
                account.balance,
            )
            .await
            .map_err(store_err)?;
        debug!(
            movement_id = %movement_id,
            client_id = %account.client_id,
            balance = %account.balance,
            "movement reversed"
        );
        Ok(())
    }
}
