//! Create flow: the post form with "create" semantics.

use tracing::{debug, error, info};

use crate::application::{
    error::ViewError,
    form::{PostDraft, PostForm, SubmitOutcome},
    ports::{Navigator, PostsApi},
    routes::Route,
};

pub const CREATE_LABEL: &str = "Create Post";
pub const CREATE_FAILED: &str = "Failed to create post. Please try again.";

#[derive(Debug)]
pub struct CreateFlow {
    form: PostForm,
    error: Option<String>,
}

impl Default for CreateFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl CreateFlow {
    pub fn new() -> Self {
        Self::with_draft(PostDraft::create_defaults())
    }

    /// Resume with values the user already entered.
    pub fn with_draft(draft: PostDraft) -> Self {
        Self {
            form: PostForm::new(draft, CREATE_LABEL),
            error: None,
        }
    }

    pub fn form(&self) -> &PostForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut PostForm {
        &mut self.form
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Send the draft; on success go to the list, otherwise keep the input.
    pub async fn submit(&mut self, api: &dyn PostsApi, navigator: &dyn Navigator) -> SubmitOutcome {
        let input = match self.form.submit() {
            Ok(input) => input,
            Err(err) => {
                debug!(error = %ViewError::from(err), "create form rejected locally");
                return SubmitOutcome::Invalid;
            }
        };

        self.form.set_loading(true);
        self.error = None;

        let outcome = match api.create_post(&input).await {
            Ok(post) => {
                info!(post_id = post.id, "post created");
                navigator.navigate(Route::List);
                SubmitOutcome::Saved(post)
            }
            Err(err) => {
                let err = ViewError::Mutation(err);
                error!(kind = err.kind(), error = %err, "error creating post");
                self.error = Some(CREATE_FAILED.to_string());
                SubmitOutcome::Failed
            }
        };

        self.form.set_loading(false);
        outcome
    }
}
