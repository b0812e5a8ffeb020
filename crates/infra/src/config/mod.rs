//! Configuration loading
//!
//! Defaults, an optional file, then environment variables.

pub mod loader;

pub use loader::{load, load_from_env, load_from_file, probe_config_paths};
