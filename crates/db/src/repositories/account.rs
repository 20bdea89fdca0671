//! Account repository for database operations.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Set};
use uuid::Uuid;

use crate::entities::accounts;

/// Account repository.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Opens the account of a client.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including when the client does
    /// not exist or already has an account.
    pub async fn create(&self, client_id: Uuid, balance: Decimal) -> Result<accounts::Model, DbErr> {
        accounts::ActiveModel {
            client_id: Set(client_id),
            balance: Set(balance.to_string()),
            updated_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await
    }

    /// Finds the account of a client.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_client(&self, client_id: Uuid) -> Result<Option<accounts::Model>, DbErr> {
        accounts::Entity::find_by_id(client_id).one(&self.db).await
    }
}
