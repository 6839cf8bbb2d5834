//! Account entity: the sole persisted record of the authentication core

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    /// Account UUID (primary key), assigned at signup and immutable
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Account email. Unique across all records; compared byte-for-byte
    /// (case-sensitive), stored exactly as submitted.
    #[sea_orm(unique)]
    pub email: String,

    /// Argon2id password hash (PHC string); never the plaintext
    pub password_hash: String,

    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Company name (optional)
    pub company_name: Option<String>,

    /// When the account was created
    pub created_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
