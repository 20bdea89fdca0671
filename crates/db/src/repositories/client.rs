//! Client repository for database operations.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{accounts, clients, movement_details, movements};

/// Client repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ClientRepository {
    db: DatabaseConnection,
}

impl ClientRepository {
    /// Creates a new client repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a client.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, id: Uuid, name: &str) -> Result<clients::Model, DbErr> {
        clients::ActiveModel {
            id: Set(id),
            name: Set(name.to_string()),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await
    }

    /// Renames a client. Returns `None` if the client does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn rename(&self, id: Uuid, name: &str) -> Result<Option<clients::Model>, DbErr> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: clients::ActiveModel = existing.into();
        active.name = Set(name.to_string());
        active.update(&self.db).await.map(Some)
    }

    /// Finds a client by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<clients::Model>, DbErr> {
        clients::Entity::find_by_id(id).one(&self.db).await
    }

    /// Lists all clients in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<clients::Model>, DbErr> {
        clients::Entity::find()
            .order_by_asc(clients::Column::CreatedAt)
            .order_by_asc(clients::Column::Id)
            .all(&self.db)
            .await
    }

    /// Deletes a client with its account, movements and movement details.
    ///
    /// Everything happens in one transaction. Returns `false` if the client
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails; nothing is deleted then.
    pub async fn delete_cascade(&self, id: Uuid) -> Result<bool, DbErr> {
        let txn = self.db.begin().await?;

        let movement_ids: Vec<Uuid> = movements::Entity::find()
            .select_only()
            .column(movements::Column::Id)
            .filter(movements::Column::ClientId.eq(id))
            .into_tuple()
            .all(&txn)
            .await?;

        if !movement_ids.is_empty() {
            movement_details::Entity::delete_many()
                .filter(movement_details::Column::MovementId.is_in(movement_ids))
                .exec(&txn)
                .await?;
        }

        movements::Entity::delete_many()
            .filter(movements::Column::ClientId.eq(id))
            .exec(&txn)
            .await?;

        accounts::Entity::delete_by_id(id).exec(&txn).await?;

        let deleted = clients::Entity::delete_by_id(id).exec(&txn).await?;
        if deleted.rows_affected == 0 {
            // Dropping the transaction rolls it back.
            return Ok(false);
        }

        txn.commit().await?;
        Ok(true)
    }
}
