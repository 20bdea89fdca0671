//! Movement repository.
//!
//! A movement and the balance it produces are always written together: both
//! write paths run in a single database transaction that also updates the
//! owning account.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{accounts, movement_details, movements};

/// Detail row to insert, in movement order.
#[derive(Debug, Clone)]
pub struct NewDetail {
    /// Detail ID.
    pub id: Uuid,
    /// Amount.
    pub amount: Decimal,
    /// `ingreso` or `egreso`.
    pub kind: String,
}

/// Movement to insert.
#[derive(Debug, Clone)]
pub struct NewMovement {
    /// Movement ID.
    pub id: Uuid,
    /// Owning client.
    pub client_id: Uuid,
    /// Effective date.
    pub date: DateTime<Utc>,
    /// Detail rows.
    pub details: Vec<NewDetail>,
}

/// A movement with its details ordered by position.
#[derive(Debug, Clone)]
pub struct MovementWithDetails {
    /// Movement row.
    pub movement: movements::Model,
    /// Detail rows.
    pub details: Vec<movement_details::Model>,
}

/// Movement repository.
#[derive(Debug, Clone)]
pub struct MovementRepository {
    db: DatabaseConnection,
}

impl MovementRepository {
    /// Creates a new movement repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a movement and its details.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_with_details(&self, id: Uuid) -> Result<Option<MovementWithDetails>, DbErr> {
        let Some(movement) = movements::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let details = movement_details::Entity::find()
            .filter(movement_details::Column::MovementId.eq(id))
            .order_by_asc(movement_details::Column::Position)
            .all(&self.db)
            .await?;

        Ok(Some(MovementWithDetails { movement, details }))
    }

    /// Inserts a movement with its details and sets the account balance.
    ///
    /// # Errors
    ///
    /// Returns `DbErr::RecordNotUpdated` if the account does not exist, or any
    /// database error. The transaction is rolled back in both cases.
    pub async fn insert_with_balance(
        &self,
        movement: &NewMovement,
        balance: Decimal,
    ) -> Result<(), DbErr> {
        let txn = self.db.begin().await?;

        movements::ActiveModel {
            id: Set(movement.id),
            client_id: Set(movement.client_id),
            date: Set(movement.date.into()),
        }
        .insert(&txn)
        .await?;

        for (position, detail) in movement.details.iter().enumerate() {
            let position = i32::try_from(position)
                .map_err(|_| DbErr::Custom(format!("too many details: {position}")))?;
            movement_details::ActiveModel {
                id: Set(detail.id),
                movement_id: Set(movement.id),
                position: Set(position),
                amount: Set(detail.amount.to_string()),
                kind: Set(detail.kind.clone()),
            }
            .insert(&txn)
            .await?;
        }

        Self::set_balance(&txn, movement.client_id, balance).await?;

        txn.commit().await?;
        Ok(())
    }

    /// Deletes a movement with its details and sets the account balance.
    ///
    /// # Errors
    ///
    /// Returns `DbErr::RecordNotFound` if the movement does not exist,
    /// `DbErr::RecordNotUpdated` if the account does not exist, or any database
    /// error. The transaction is rolled back in all cases.
    pub async fn delete_with_balance(
        &self,
        id: Uuid,
        client_id: Uuid,
        balance: Decimal,
    ) -> Result<(), DbErr> {
        let txn = self.db.begin().await?;

        movement_details::Entity::delete_many()
            .filter(movement_details::Column::MovementId.eq(id))
            .exec(&txn)
            .await?;

        let deleted = movements::Entity::delete_by_id(id).exec(&txn).await?;
        if deleted.rows_affected == 0 {
            return Err(DbErr::RecordNotFound(format!("movement {id}")));
        }

        Self::set_balance(&txn, client_id, balance).await?;

        txn.commit().await?;
        Ok(())
    }

    async fn set_balance(
        txn: &DatabaseTransaction,
        client_id: Uuid,
        balance: Decimal,
    ) -> Result<(), DbErr> {
        accounts::ActiveModel {
            client_id: Set(client_id),
            balance: Set(balance.to_string()),
            updated_at: Set(Utc::now().into()),
        }
        .update(txn)
        .await?;
        Ok(())
    }
}
