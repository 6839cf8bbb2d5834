//! Keyed account storage with an atomic check-and-insert

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set, SqlErr};
use thiserror::Error;
use uuid::Uuid;

use crate::entities::account;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// An account with this email already exists
    #[error("Email already registered")]
    Conflict,

    /// Backing store unreachable or query failed
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Fields of a new account record; the store itself never sees plaintext
/// passwords.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub company_name: Option<String>,
}

/// Durable account storage.
///
/// Email uniqueness is enforced by the UNIQUE constraint on the accounts
/// table; `insert` is a single atomic statement and surfaces a constraint
/// violation as `StoreError::Conflict`. Concurrent signups with the same
/// email therefore resolve to exactly one success without any
/// application-level pre-check. Lookups are byte-for-byte (case-sensitive)
/// on email.
#[derive(Clone)]
pub struct AccountStore {
    db: DatabaseConnection,
}

impl AccountStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Look up an account by email. No side effects.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<account::Model>, StoreError> {
        let found = account::Entity::find()
            .filter(account::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(found)
    }

    /// Insert a new account record.
    ///
    /// Fails with `StoreError::Conflict` if the email is already registered.
    pub async fn insert(&self, new: NewAccount) -> Result<account::Model, StoreError> {
        let record = account::ActiveModel {
            id: Set(new.id),
            email: Set(new.email),
            password_hash: Set(new.password_hash),
            first_name: Set(new.first_name),
            last_name: Set(new.last_name),
            company_name: Set(new.company_name),
            created_at: Set(Utc::now()),
        };

        match record.insert(&self.db).await {
            Ok(model) => Ok(model),
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(StoreError::Conflict),
                _ => Err(StoreError::Database(e)),
            },
        }
    }
}
