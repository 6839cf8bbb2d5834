//! Database entities

pub mod account;

pub use account::Entity as Account;

pub mod prelude {
    pub use super::account::Entity as Account;
}
