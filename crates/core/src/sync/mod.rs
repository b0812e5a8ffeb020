//! Category tree synchronization

pub mod ordering;
pub mod service;

pub use ordering::creation_order;
pub use service::CategorySynchronizer;
