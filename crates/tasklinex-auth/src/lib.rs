//! Password hashing and bearer-token issuance for the TaskLinex API

pub mod password;
pub mod token;

pub use password::{hash_password, verify_password, PasswordError};
pub use token::{AccessClaims, TokenError, TokenSigner};
