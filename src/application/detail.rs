//! Single post view.

use blogdesk_api_types::{Post, PostId};
use tracing::{debug, error, info};

use crate::application::{
    error::ViewError,
    fetch::{FetchGeneration, FetchTicket},
    list::{DELETE_FAILED, DELETE_PROMPT, DeleteOutcome},
    ports::{Confirmation, Navigator, Notification, PostsApi, RequestError},
    routes::Route,
};

pub const DETAIL_FETCH_ERROR: &str = "Failed to fetch post";
pub const NOT_FOUND_MESSAGE: &str = "Post not found";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState {
    Loading,
    Ready(Post),
    Failed(String),
    /// The server answered without a post.
    Missing,
}

#[derive(Debug)]
pub struct PostDetailView {
    id: PostId,
    state: DetailState,
    generation: FetchGeneration,
}

impl PostDetailView {
    pub fn new(id: PostId) -> Self {
        Self {
            id,
            state: DetailState::Loading,
            generation: FetchGeneration::default(),
        }
    }

    pub fn id(&self) -> PostId {
        self.id
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn post(&self) -> Option<&Post> {
        match &self.state {
            DetailState::Ready(post) => Some(post),
            _ => None,
        }
    }

    /// Message for the error screen, if the view is in an error state.
    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            DetailState::Failed(message) => Some(message.as_str()),
            DetailState::Missing => Some(NOT_FOUND_MESSAGE),
            DetailState::Loading | DetailState::Ready(_) => None,
        }
    }

    pub async fn load(&mut self, api: &dyn PostsApi) {
        let ticket = self.begin_fetch();
        let result = api.get_post(self.id).await;
        self.commit(ticket, result);
    }

    /// Point the view at another post and refetch; a no-op for the same id.
    pub async fn set_id(&mut self, id: PostId, api: &dyn PostsApi) {
        if let Some(ticket) = self.change_id(id) {
            let result = api.get_post(self.id).await;
            self.commit(ticket, result);
        }
    }

    pub fn change_id(&mut self, id: PostId) -> Option<FetchTicket> {
        if id == self.id {
            return None;
        }
        self.id = id;
        Some(self.begin_fetch())
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.state = DetailState::Loading;
        self.generation.next()
    }

    /// Apply a fetch result. Returns `false` when the result was superseded.
    pub fn commit(
        &mut self,
        ticket: FetchTicket,
        result: Result<Option<Post>, RequestError>,
    ) -> bool {
        if !self.generation.is_current(ticket) {
            debug!(post_id = self.id, ?ticket, "discarding superseded post fetch");
            return false;
        }

        self.state = match result {
            Ok(Some(post)) => DetailState::Ready(post),
            Ok(None) => DetailState::Missing,
            Err(err) => {
                let err = ViewError::Fetch(err);
                error!(post_id = self.id, kind = err.kind(), error = %err, "error fetching post");
                DetailState::Failed(DETAIL_FETCH_ERROR.to_string())
            }
        };
        true
    }

    /// Confirm, delete on the server, then return to the list.
    pub async fn delete(
        &self,
        api: &dyn PostsApi,
        confirmation: &dyn Confirmation,
        notification: &dyn Notification,
        navigator: &dyn Navigator,
    ) -> DeleteOutcome {
        if !confirmation.confirm(DELETE_PROMPT) {
            return DeleteOutcome::Cancelled;
        }

        match api.delete_post(self.id).await {
            Ok(()) => {
                info!(post_id = self.id, "post deleted");
                navigator.navigate(Route::List);
                DeleteOutcome::Deleted
            }
            Err(err) => {
                let err = ViewError::Mutation(err);
                error!(post_id = self.id, kind = err.kind(), error = %err, "error deleting post");
                notification.alert(DELETE_FAILED);
                DeleteOutcome::Failed
            }
        }
    }
}
