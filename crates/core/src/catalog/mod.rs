//! Catalog ports: local category tree, attribute requirements and the ERP

pub mod ports;

pub use ports::*;
