//! SQLite persistence for the category tree, attribute requirements and the
//! OAuth token.

pub mod category_repository;
pub mod credential_store;
pub mod manager;

pub use category_repository::*;
pub use credential_store::*;
pub use manager::*;
