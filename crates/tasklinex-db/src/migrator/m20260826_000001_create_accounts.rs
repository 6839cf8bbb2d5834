//! Initial schema: the accounts table
//!
//! The UNIQUE constraint on email is the authoritative uniqueness guard for
//! signup; inserts racing on the same address resolve here, not in
//! application code.

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Account::Table)
                    .if_not_exists()
                    .col(uuid(Account::Id).primary_key())
                    .col(string_len(Account::Email, 255).not_null().unique_key())
                    .col(string_len(Account::PasswordHash, 255).not_null())
                    .col(string_len(Account::FirstName, 255).not_null())
                    .col(string_len(Account::LastName, 255).not_null())
                    .col(string_len_null(Account::CompanyName, 255))
                    .col(
                        timestamp_with_time_zone(Account::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_accounts_email")
                    .table(Account::Table)
                    .col(Account::Email)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Account::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Account {
    #[sea_orm(iden = "accounts")]
    Table,
    Id,
    Email,
    PasswordHash,
    FirstName,
    LastName,
    CompanyName,
    CreatedAt,
}
