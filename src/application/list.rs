//! Post list view: filtered listing with in-place delete.

use blogdesk_api_types::{Post, PostFilter, PostId};
use tracing::{debug, error, info};

use crate::application::{
    error::ViewError,
    fetch::{FetchGeneration, FetchTicket, LoadState},
    ports::{Confirmation, Notification, PostsApi, RequestError},
};

pub const LIST_FETCH_ERROR: &str =
    "Failed to fetch posts. Make sure the backend server is running.";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this post?";
pub const DELETE_FAILED: &str = "Failed to delete post";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Cancelled,
    Deleted,
    Failed,
}

#[derive(Debug)]
pub struct PostListView {
    filter: PostFilter,
    state: LoadState<Vec<Post>>,
    generation: FetchGeneration,
}

impl PostListView {
    pub fn new(filter: PostFilter) -> Self {
        Self {
            filter,
            state: LoadState::Loading,
            generation: FetchGeneration::default(),
        }
    }

    pub fn filter(&self) -> &PostFilter {
        &self.filter
    }

    pub fn state(&self) -> &LoadState<Vec<Post>> {
        &self.state
    }

    /// Posts currently shown; empty unless the view is ready.
    pub fn posts(&self) -> &[Post] {
        self.state.ready().map_or(&[], Vec::as_slice)
    }

    pub async fn refresh(&mut self, api: &dyn PostsApi) {
        let ticket = self.begin_fetch();
        let result = api.list_posts(&self.filter).await;
        self.commit(ticket, result);
    }

    /// Switch filters and refetch; a no-op when the filter is unchanged.
    pub async fn set_filter(&mut self, filter: PostFilter, api: &dyn PostsApi) {
        if let Some(ticket) = self.change_filter(filter) {
            let result = api.list_posts(&self.filter).await;
            self.commit(ticket, result);
        }
    }

    /// Record a new filter, returning a ticket when a fetch must follow.
    ///
    /// For runtimes that dispatch the request themselves and later call
    /// [`commit`](Self::commit).
    pub fn change_filter(&mut self, filter: PostFilter) -> Option<FetchTicket> {
        if filter == self.filter {
            return None;
        }
        self.filter = filter;
        Some(self.begin_fetch())
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.state = LoadState::Loading;
        self.generation.next()
    }

    /// Apply a listing result. Returns `false` when the result was superseded.
    pub fn commit(&mut self, ticket: FetchTicket, result: Result<Vec<Post>, RequestError>) -> bool {
        if !self.generation.is_current(ticket) {
            debug!(?ticket, "discarding superseded post listing");
            return false;
        }

        self.state = match result {
            Ok(posts) => LoadState::Ready(posts),
            Err(err) => {
                let err = ViewError::Fetch(err);
                error!(kind = err.kind(), error = %err, "error fetching posts");
                LoadState::Failed(LIST_FETCH_ERROR.to_string())
            }
        };
        true
    }

    /// Confirm, delete on the server, then drop the post locally.
    pub async fn delete(
        &mut self,
        id: PostId,
        api: &dyn PostsApi,
        confirmation: &dyn Confirmation,
        notification: &dyn Notification,
    ) -> DeleteOutcome {
        if !confirmation.confirm(DELETE_PROMPT) {
            return DeleteOutcome::Cancelled;
        }

        match api.delete_post(id).await {
            Ok(()) => {
                if let LoadState::Ready(posts) = &mut self.state {
                    posts.retain(|post| post.id != id);
                }
                info!(post_id = id, "post deleted");
                DeleteOutcome::Deleted
            }
            Err(err) => {
                let err = ViewError::Mutation(err);
                error!(post_id = id, kind = err.kind(), error = %err, "error deleting post");
                notification.alert(DELETE_FAILED);
                DeleteOutcome::Failed
            }
        }
    }
}
