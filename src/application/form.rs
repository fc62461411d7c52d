//! Controlled post form.
//!
//! Field values are held as the raw text the user typed; they are only
//! turned into a [`PostInput`] when the form is submitted, so transient
//! input such as an emptied author field never leaks an invalid number.

use blogdesk_api_types::{Post, PostInput, PostStatus, PostType};
use thiserror::Error;

use crate::application::ports::Navigator;

pub const SAVING_LABEL: &str = "Saving...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostField {
    Title,
    Content,
    Type,
    Status,
    AuthorId,
}

impl PostField {
    pub fn name(self) -> &'static str {
        match self {
            PostField::Title => "title",
            PostField::Content => "content",
            PostField::Type => "type",
            PostField::Status => "status",
            PostField::AuthorId => "author_id",
        }
    }
}

/// Result of submitting a form through a flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved(Post),
    /// Local validation failed; nothing was sent.
    Invalid,
    /// The server rejected the request or could not be reached.
    Failed,
    /// The flow has no form mounted yet.
    NotReady,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{} is required", .0.name())]
    Required(PostField),
    #[error("author_id must be a positive whole number, got `{0}`")]
    InvalidAuthorId(String),
    #[error("unknown post type `{0}`")]
    UnknownType(String),
    #[error("unknown post status `{0}`")]
    UnknownStatus(String),
}

/// Raw form values, one per editable field.
///
/// `stored_type` and `stored_status` hold a value the server sent that this
/// client does not recognise. Submitting it back unchanged is allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub post_type: String,
    pub status: String,
    pub author_id: String,
    pub stored_type: Option<String>,
    pub stored_status: Option<String>,
}

impl PostDraft {
    /// Starting values of the create form.
    pub fn create_defaults() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            post_type: PostType::Article.as_str().to_string(),
            status: PostStatus::Draft.as_str().to_string(),
            author_id: "1".to_string(),
            ..Self::default()
        }
    }

    pub fn get(&self, field: PostField) -> &str {
        match field {
            PostField::Title => &self.title,
            PostField::Content => &self.content,
            PostField::Type => &self.post_type,
            PostField::Status => &self.status,
            PostField::AuthorId => &self.author_id,
        }
    }

    fn slot(&mut self, field: PostField) -> &mut String {
        match field {
            PostField::Title => &mut self.title,
            PostField::Content => &mut self.content,
            PostField::Type => &mut self.post_type,
            PostField::Status => &mut self.status,
            PostField::AuthorId => &mut self.author_id,
        }
    }

    /// Assemble the payload, checking required fields and enum values.
    pub fn to_input(&self) -> Result<PostInput, ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::Required(PostField::Title));
        }
        if self.content.trim().is_empty() {
            return Err(ValidationError::Required(PostField::Content));
        }

        let post_type = PostType::from(self.post_type.trim());
        if post_type.as_str().is_empty() {
            return Err(ValidationError::Required(PostField::Type));
        }
        if !post_type.is_known() && !echoes(self.stored_type.as_deref(), &self.post_type) {
            return Err(ValidationError::UnknownType(self.post_type.clone()));
        }

        let status = PostStatus::from(self.status.trim());
        if status.as_str().is_empty() {
            return Err(ValidationError::Required(PostField::Status));
        }
        if !status.is_known() && !echoes(self.stored_status.as_deref(), &self.status) {
            return Err(ValidationError::UnknownStatus(self.status.clone()));
        }

        let raw_author = self.author_id.trim();
        if raw_author.is_empty() {
            return Err(ValidationError::Required(PostField::AuthorId));
        }
        let author_id = raw_author
            .parse::<i64>()
            .ok()
            .filter(|id| *id >= 1)
            .ok_or_else(|| ValidationError::InvalidAuthorId(self.author_id.clone()))?;

        Ok(PostInput {
            title: self.title.clone(),
            content: self.content.clone(),
            post_type,
            status,
            author_id,
        })
    }
}

fn echoes(stored: Option<&str>, raw: &str) -> bool {
    stored.is_some_and(|stored| stored == raw.trim())
}

impl From<&Post> for PostDraft {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            content: post.content.clone(),
            post_type: post.post_type.as_str().to_string(),
            status: post.status.as_str().to_string(),
            author_id: post.author_id.to_string(),
            stored_type: (!post.post_type.is_known())
                .then(|| post.post_type.as_str().to_string()),
            stored_status: (!post.status.is_known()).then(|| post.status.as_str().to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PostForm {
    draft: PostDraft,
    loading: bool,
    submit_label: String,
    validation: Option<ValidationError>,
}

impl PostForm {
    pub fn new(initial: PostDraft, submit_label: impl Into<String>) -> Self {
        Self {
            draft: initial,
            loading: false,
            submit_label: submit_label.into(),
            validation: None,
        }
    }

    pub fn draft(&self) -> &PostDraft {
        &self.draft
    }

    /// Update exactly one field of the draft.
    pub fn set_field(&mut self, field: PostField, value: impl Into<String>) {
        *self.draft.slot(field) = value.into();
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn buttons_disabled(&self) -> bool {
        self.loading
    }

    pub fn submit_button_label(&self) -> &str {
        if self.loading {
            SAVING_LABEL
        } else {
            &self.submit_label
        }
    }

    pub fn validation_error(&self) -> Option<&ValidationError> {
        self.validation.as_ref()
    }

    /// Validate and hand back the payload for the owning flow to send.
    ///
    /// A failed validation is remembered for rendering and the draft is left
    /// untouched.
    pub fn submit(&mut self) -> Result<PostInput, ValidationError> {
        match self.draft.to_input() {
            Ok(input) => {
                self.validation = None;
                Ok(input)
            }
            Err(err) => {
                self.validation = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Leave without saving. Ignored while a save is in flight.
    pub fn cancel(&self, navigator: &dyn Navigator) {
        if !self.loading {
            navigator.back();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{NavEvent, RecordingNavigator, sample_post};

    fn filled() -> PostForm {
        let mut form = PostForm::new(PostDraft::create_defaults(), "Create Post");
        form.set_field(PostField::Title, "Hello");
        form.set_field(PostField::Content, "World");
        form
    }

    #[test]
    fn set_field_touches_only_that_key() {
        let mut form = PostForm::new(PostDraft::create_defaults(), "Create Post");
        let before = form.draft().clone();
        form.set_field(PostField::Status, "published");

        let after = form.draft();
        assert_eq!(after.status, "published");
        assert_eq!(after.title, before.title);
        assert_eq!(after.content, before.content);
        assert_eq!(after.post_type, before.post_type);
        assert_eq!(after.author_id, before.author_id);
    }

    #[test]
    fn submit_assembles_typed_input() {
        let mut form = filled();
        form.set_field(PostField::Type, "review");
        form.set_field(PostField::AuthorId, " 42 ");

        let input = form.submit().expect("valid draft");
        assert_eq!(input.post_type, PostType::Review);
        assert_eq!(input.status, PostStatus::Draft);
        assert_eq!(input.author_id, 42);
        assert!(form.validation_error().is_none());
    }

    #[test]
    fn empty_author_is_a_validation_error_not_a_number() {
        let mut form = filled();
        form.set_field(PostField::AuthorId, "");
        assert_eq!(
            form.submit(),
            Err(ValidationError::Required(PostField::AuthorId))
        );

        form.set_field(PostField::AuthorId, "0");
        assert_eq!(
            form.submit(),
            Err(ValidationError::InvalidAuthorId("0".into()))
        );

        form.set_field(PostField::AuthorId, "4x");
        assert!(form.submit().is_err());
        assert_eq!(
            form.validation_error(),
            Some(&ValidationError::InvalidAuthorId("4x".into()))
        );
        assert_eq!(form.draft().author_id, "4x");
    }

    #[test]
    fn required_text_fields_are_checked() {
        let mut form = PostForm::new(PostDraft::create_defaults(), "Create Post");
        assert_eq!(form.submit(), Err(ValidationError::Required(PostField::Title)));

        form.set_field(PostField::Title, "T");
        form.set_field(PostField::Content, "   ");
        assert_eq!(
            form.submit(),
            Err(ValidationError::Required(PostField::Content))
        );
    }

    #[test]
    fn unknown_enum_values_are_rejected() {
        let mut form = filled();
        form.set_field(PostField::Type, "podcast");
        assert_eq!(
            form.submit(),
            Err(ValidationError::UnknownType("podcast".into()))
        );

        form.set_field(PostField::Type, "article");
        form.set_field(PostField::Status, "pending");
        assert_eq!(
            form.submit(),
            Err(ValidationError::UnknownStatus("pending".into()))
        );
    }

    #[test]
    fn stored_unknown_values_survive_an_unchanged_submit() {
        let post = sample_post(
            9,
            PostType::Other("podcast".into()),
            PostStatus::Other("pending".into()),
        );
        let mut form = PostForm::new(PostDraft::from(&post), "Update Post");

        let input = form.submit().expect("stored values echo back");
        assert_eq!(input.post_type, PostType::Other("podcast".into()));
        assert_eq!(input.status, PostStatus::Other("pending".into()));

        form.set_field(PostField::Type, "vlog");
        assert_eq!(form.submit(), Err(ValidationError::UnknownType("vlog".into())));

        form.set_field(PostField::Type, "tutorial");
        let input = form.submit().expect("known type");
        assert_eq!(input.post_type, PostType::Tutorial);
        assert_eq!(input.status, PostStatus::Other("pending".into()));
    }

    #[test]
    fn loading_relabels_and_disables() {
        let mut form = filled();
        assert_eq!(form.submit_button_label(), "Create Post");
        assert!(!form.buttons_disabled());

        form.set_loading(true);
        assert_eq!(form.submit_button_label(), SAVING_LABEL);
        assert!(form.buttons_disabled());
    }

    #[test]
    fn cancel_goes_back_unless_saving() {
        let navigator = RecordingNavigator::default();
        let mut form = filled();

        form.set_loading(true);
        form.cancel(&navigator);
        assert!(navigator.events().is_empty());

        form.set_loading(false);
        form.cancel(&navigator);
        assert_eq!(navigator.events(), vec![NavEvent::Back]);
    }
}
