//! Durable account storage for the TaskLinex API

pub mod entities;
pub mod migrator;
pub mod store;

pub use store::{AccountStore, NewAccount, StoreError};

use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

/// Connect to the backing database.
///
/// Accepts any sea-orm connection URL (`sqlite:...`, `postgres:...`).
pub async fn connect(url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(url).await?;
    info!("Connected to database ({:?})", db.get_database_backend());
    Ok(db)
}

/// Apply all pending migrations.
///
/// Idempotent; run once at startup before the server accepts traffic.
pub async fn migrate(db: &DatabaseConnection) -> Result<(), DbErr> {
    migrator::Migrator::up(db, None).await?;
    info!("Database schema is up to date");
    Ok(())
}
