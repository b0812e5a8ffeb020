//! OAuth token lifecycle

pub mod ports;
pub mod token_manager;

pub use ports::*;
pub use token_manager::TokenManager;
