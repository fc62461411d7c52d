//! blogdesk: a content desk for a blog backed by a remote posts API.
//!
//! `application` holds the view state machines and the ports they talk
//! through, `infra` the reqwest client, telemetry and the axum web shell,
//! `presentation` the display rules and templates.

pub mod application;
pub mod config;
pub mod infra;
pub mod presentation;
