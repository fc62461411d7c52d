//! HTTP adapter for the remote posts API.

mod client;

pub use client::ApiClient;
