//! Shared test helpers for `catalogsync-core` integration tests.
//!
//! In-memory, recording implementations of the core ports so that service
//! tests can assert on the exact remote calls issued.

#![allow(dead_code)]

pub mod advisor;
pub mod auth;
pub mod remote;
pub mod repositories;
