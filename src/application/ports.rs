//! Ports the views talk through: the posts API and the interactive
//! capabilities a UI runtime provides (confirm, alert, navigate).

use std::fmt;

use async_trait::async_trait;
use blogdesk_api_types::{ApiErrorBody, Post, PostFilter, PostId, PostInput};
use thiserror::Error;

use crate::application::routes::Route;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("request failed with status {status}")]
    Status { status: u16, body: String },
    #[error("failed to decode response body: {0}")]
    Decode(String),
    #[error("invalid request url: {0}")]
    Url(String),
}

impl RequestError {
    pub fn from_transport(err: impl fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    pub fn from_decode(err: impl fmt::Display) -> Self {
        Self::Decode(err.to_string())
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            RequestError::Status { body, .. } => Some(body.as_str()),
            _ => None,
        }
    }

    /// The `error` field of a JSON error body, when the server sent one.
    pub fn server_message(&self) -> Option<String> {
        self.body()
            .and_then(|body| serde_json::from_str::<ApiErrorBody>(body).ok())
            .map(|body| body.error)
    }
}

/// Typed access to the remote posts API.
#[async_trait]
pub trait PostsApi: Send + Sync {
    async fn list_posts(&self, filter: &PostFilter) -> Result<Vec<Post>, RequestError>;

    /// `Ok(None)` when the server answered successfully without a post.
    async fn get_post(&self, id: PostId) -> Result<Option<Post>, RequestError>;

    async fn create_post(&self, input: &PostInput) -> Result<Post, RequestError>;

    /// Replaces every editable field of the post.
    async fn update_post(&self, id: PostId, input: &PostInput) -> Result<Post, RequestError>;

    async fn delete_post(&self, id: PostId) -> Result<(), RequestError>;

    async fn search_posts(&self, query: &str) -> Result<Vec<Post>, RequestError>;
}

/// Blocking yes/no question put to the user before destructive actions.
pub trait Confirmation: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Blocking notice shown to the user.
pub trait Notification: Send + Sync {
    fn alert(&self, message: &str);
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);

    /// Go back one step in history.
    fn back(&self);
}
