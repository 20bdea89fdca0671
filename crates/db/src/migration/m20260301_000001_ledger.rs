//! Ledger schema: clients, accounts, movements and movement details.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Clients {
    Table,
    Id,
    Name,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Accounts {
    Table,
    ClientId,
    Balance,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Movements {
    Table,
    Id,
    ClientId,
    Date,
}

#[derive(DeriveIden)]
enum MovementDetails {
    Table,
    Id,
    MovementId,
    Position,
    Amount,
    Kind,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Clients::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Clients::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Clients::Name).string().not_null())
                    .col(
                        ColumnDef::new(Clients::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // One account per client: the client id is the primary key.
        // Amounts are stored as decimal text so SQLite keeps every digit.
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Accounts::ClientId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Accounts::Balance).text().not_null())
                    .col(
                        ColumnDef::new(Accounts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-accounts-client_id")
                            .from(Accounts::Table, Accounts::ClientId)
                            .to(Clients::Table, Clients::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Movements::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Movements::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Movements::ClientId).uuid().not_null())
                    .col(
                        ColumnDef::new(Movements::Date)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-movements-client_id")
                            .from(Movements::Table, Movements::ClientId)
                            .to(Clients::Table, Clients::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-movements-client_id")
                    .table(Movements::Table)
                    .col(Movements::ClientId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MovementDetails::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MovementDetails::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MovementDetails::MovementId).uuid().not_null())
                    .col(ColumnDef::new(MovementDetails::Position).integer().not_null())
                    .col(ColumnDef::new(MovementDetails::Amount).text().not_null())
                    .col(ColumnDef::new(MovementDetails::Kind).string_len(16).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-movement_details-movement_id")
                            .from(MovementDetails::Table, MovementDetails::MovementId)
                            .to(Movements::Table, Movements::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-movement_details-movement_id-position")
                    .table(MovementDetails::Table)
                    .col(MovementDetails::MovementId)
                    .col(MovementDetails::Position)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MovementDetails::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Movements::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Clients::Table).to_owned())
            .await?;
        Ok(())
    }
}
