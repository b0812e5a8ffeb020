//! Read-only audit of pending SKUs against the ERP

pub mod service;

pub use service::AuditService;
