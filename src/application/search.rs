//! Free-text search over posts.

use blogdesk_api_types::Post;
use tracing::error;

use crate::application::{error::ViewError, fetch::LoadState, ports::PostsApi};

pub const SEARCH_FAILED: &str = "Search is unavailable right now. Please try again later.";

#[derive(Debug)]
pub struct SearchView {
    query: String,
    state: LoadState<Vec<Post>>,
}

impl SearchView {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into().trim().to_string(),
            state: LoadState::Loading,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn state(&self) -> &LoadState<Vec<Post>> {
        &self.state
    }

    /// Run the search. A blank query yields no results without a request.
    pub async fn run(&mut self, api: &dyn PostsApi) {
        if self.query.is_empty() {
            self.state = LoadState::Ready(Vec::new());
            return;
        }

        self.state = LoadState::Loading;
        self.state = match api.search_posts(&self.query).await {
            Ok(posts) => LoadState::Ready(posts),
            Err(err) => {
                let err = ViewError::Fetch(err);
                error!(query = %self.query, kind = err.kind(), error = %err, "error searching posts");
                LoadState::Failed(SEARCH_FAILED.to_string())
            }
        };
    }
}
