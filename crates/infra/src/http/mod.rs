pub mod client;

pub use client::{ensure_success, read_json, HttpClient, HttpClientBuilder};
pub(crate) use client::single_attempt_client;
