//! Edit flow: fetch a post, then submit a whole-record update.

use blogdesk_api_types::PostId;
use tracing::{debug, error, info};

use crate::application::{
    detail::{DETAIL_FETCH_ERROR, NOT_FOUND_MESSAGE},
    error::ViewError,
    form::{PostDraft, PostForm, SubmitOutcome},
    ports::{Navigator, PostsApi},
    routes::Route,
};

pub const UPDATE_LABEL: &str = "Update Post";
pub const UPDATE_FAILED: &str = "Failed to update post. Please try again.";

#[derive(Debug)]
pub enum EditPhase {
    Fetching,
    /// Loading the post failed; the screen shows only this message.
    Unavailable(String),
    Editing(PostForm),
}

#[derive(Debug)]
pub struct EditFlow {
    id: PostId,
    phase: EditPhase,
    error: Option<String>,
}

impl EditFlow {
    pub fn new(id: PostId) -> Self {
        Self {
            id,
            phase: EditPhase::Fetching,
            error: None,
        }
    }

    /// Resume an already mounted form, e.g. from values a browser posted back.
    pub fn editing(id: PostId, draft: PostDraft) -> Self {
        Self {
            id,
            phase: EditPhase::Editing(PostForm::new(draft, UPDATE_LABEL)),
            error: None,
        }
    }

    pub fn id(&self) -> PostId {
        self.id
    }

    pub fn phase(&self) -> &EditPhase {
        &self.phase
    }

    pub fn form(&self) -> Option<&PostForm> {
        match &self.phase {
            EditPhase::Editing(form) => Some(form),
            _ => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut PostForm> {
        match &mut self.phase {
            EditPhase::Editing(form) => Some(form),
            _ => None,
        }
    }

    /// Inline error shown above a mounted form.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub async fn load(&mut self, api: &dyn PostsApi) {
        self.phase = EditPhase::Fetching;
        self.phase = match api.get_post(self.id).await {
            Ok(Some(post)) => EditPhase::Editing(PostForm::new(PostDraft::from(&post), UPDATE_LABEL)),
            Ok(None) => EditPhase::Unavailable(NOT_FOUND_MESSAGE.to_string()),
            Err(err) => {
                let err = ViewError::Fetch(err);
                error!(post_id = self.id, kind = err.kind(), error = %err, "error fetching post");
                EditPhase::Unavailable(DETAIL_FETCH_ERROR.to_string())
            }
        };
    }

    /// Send the full record; on success go to the post's detail view.
    pub async fn submit(&mut self, api: &dyn PostsApi, navigator: &dyn Navigator) -> SubmitOutcome {
        let id = self.id;
        let EditPhase::Editing(form) = &mut self.phase else {
            return SubmitOutcome::NotReady;
        };

        let input = match form.submit() {
            Ok(input) => input,
            Err(err) => {
                debug!(post_id = id, error = %ViewError::from(err), "edit form rejected locally");
                return SubmitOutcome::Invalid;
            }
        };

        form.set_loading(true);
        self.error = None;

        let outcome = match api.update_post(id, &input).await {
            Ok(post) => {
                info!(post_id = id, "post updated");
                navigator.navigate(Route::Detail(id));
                SubmitOutcome::Saved(post)
            }
            Err(err) => {
                let err = ViewError::Mutation(err);
                error!(post_id = id, kind = err.kind(), error = %err, "error updating post");
                self.error = Some(UPDATE_FAILED.to_string());
                SubmitOutcome::Failed
            }
        };

        form.set_loading(false);
        outcome
    }
}
