//! Product normalization pipeline

pub mod service;

pub use service::NormalizationEngine;
