use crate::application::{
    error::{ErrorReport, HttpError},
    form::PostForm,
};
use crate::presentation::display;
use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use blogdesk_api_types::{Post, PostId, PostStatus, PostType};
use thiserror::Error;
use url::form_urlencoded;

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;

        HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            public_message,
            &error,
        )
    }
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, HttpError> {
    template.render().map(Html).map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
        .into()
    })
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => err.into_response(),
    }
}

pub fn render_not_found_response() -> Response {
    let view = LayoutContext::new(LayoutChrome::desk(), "Page Not Found", ErrorPageView::not_found());
    let mut response = render_template_response(ErrorTemplate { view }, StatusCode::NOT_FOUND);
    ErrorReport::from_message(
        "presentation::views::render_not_found_response",
        StatusCode::NOT_FOUND,
        "Resource not found",
    )
    .attach(&mut response);
    response
}

#[derive(Clone)]
pub struct BrandView {
    pub title: String,
    pub href: String,
}

#[derive(Clone)]
pub struct NavigationLinkView {
    pub label: String,
    pub href: String,
}

#[derive(Clone)]
pub struct FooterView {
    pub copy: String,
}

#[derive(Clone)]
pub struct LayoutChrome {
    pub brand: BrandView,
    pub navigation: Vec<NavigationLinkView>,
    pub footer: FooterView,
}

impl LayoutChrome {
    /// Navbar and footer shared by every page of the desk.
    pub fn desk() -> Self {
        Self {
            brand: BrandView {
                title: "Blog Platform".to_string(),
                href: "/".to_string(),
            },
            navigation: vec![
                NavigationLinkView {
                    label: "Home".to_string(),
                    href: "/".to_string(),
                },
                NavigationLinkView {
                    label: "Create Post".to_string(),
                    href: "/create".to_string(),
                },
            ],
            footer: FooterView {
                copy: "© 2025 Blog Platform".to_string(),
            },
        }
    }
}

pub struct LayoutContext<T> {
    pub brand: BrandView,
    pub navigation: Vec<NavigationLinkView>,
    pub footer: FooterView,
    pub title: String,
    /// Blocking notices raised while handling the request.
    pub alerts: Vec<String>,
    pub content: T,
}

impl<T> LayoutContext<T> {
    pub fn new(chrome: LayoutChrome, title: impl Into<String>, content: T) -> Self {
        Self {
            brand: chrome.brand,
            navigation: chrome.navigation,
            footer: chrome.footer,
            title: title.into(),
            alerts: Vec::new(),
            content,
        }
    }

    pub fn with_alerts(mut self, alerts: Vec<String>) -> Self {
        self.alerts = alerts;
        self
    }
}

pub struct OptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl OptionView {
    fn new(value: &str, label: &str, current: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            selected: value == current,
        }
    }
}

fn type_options(current: &str) -> Vec<OptionView> {
    let options = PostType::KNOWN
        .iter()
        .map(|t| OptionView::new(t.as_str(), t.label(), current))
        .collect();
    with_current(current, options)
}

fn status_options(current: &str) -> Vec<OptionView> {
    let options = PostStatus::KNOWN
        .iter()
        .map(|s| OptionView::new(s.as_str(), s.label(), current))
        .collect();
    with_current(current, options)
}

/// Keep a value outside the known set selectable, so a select never falls
/// back to its first option behind the user's back.
fn with_current(current: &str, mut options: Vec<OptionView>) -> Vec<OptionView> {
    if !current.is_empty() && !options.iter().any(|option| option.selected) {
        options.push(OptionView::new(current, current, current));
    }
    options
}

fn with_blank(label: &str, current: &str, mut options: Vec<OptionView>) -> Vec<OptionView> {
    options.insert(0, OptionView::new("", label, current));
    options
}

pub struct PostCardView {
    pub id: PostId,
    pub title: String,
    pub post_type: String,
    pub type_color: &'static str,
    pub status_text: &'static str,
    pub status_color: &'static str,
    pub excerpt: String,
    pub created: String,
    pub author: String,
    pub detail_href: String,
    pub edit_href: String,
    pub delete_href: String,
}

impl From<&Post> for PostCardView {
    fn from(post: &Post) -> Self {
        let badge = display::status_badge(&post.status);
        Self {
            id: post.id,
            title: post.title.clone(),
            post_type: post.post_type.as_str().to_string(),
            type_color: display::type_color(&post.post_type),
            status_text: badge.text,
            status_color: badge.color,
            excerpt: display::excerpt(&post.content),
            created: display::format_date(post.created_at),
            author: display::author_label(post.author_id),
            detail_href: format!("/posts/{}", post.id),
            edit_href: format!("/edit/{}", post.id),
            delete_href: list_delete_href(post.id, "", ""),
        }
    }
}

fn filter_pairs<'a>(
    status: &'a str,
    post_type: &'a str,
) -> impl Iterator<Item = (&'static str, &'a str)> {
    [("status", status), ("type", post_type)]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
}

/// The list path with the given filter applied.
pub fn list_href(status: &str, post_type: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(filter_pairs(status, post_type))
        .finish();
    if query.is_empty() {
        "/".to_string()
    } else {
        format!("/?{query}")
    }
}

fn list_delete_href(id: PostId, status: &str, post_type: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("from", "list")
        .extend_pairs(filter_pairs(status, post_type))
        .finish();
    format!("/posts/{id}/delete?{query}")
}

pub struct ListPageView {
    pub status_options: Vec<OptionView>,
    pub type_options: Vec<OptionView>,
    pub posts: Vec<PostCardView>,
    pub error: Option<String>,
}

impl ListPageView {
    pub fn new(status: &str, post_type: &str, posts: &[Post], error: Option<&str>) -> Self {
        Self {
            status_options: with_blank("All Status", status, status_options(status)),
            type_options: with_blank("All Types", post_type, type_options(post_type)),
            posts: posts
                .iter()
                .map(|post| PostCardView {
                    delete_href: list_delete_href(post.id, status, post_type),
                    ..PostCardView::from(post)
                })
                .collect(),
            error: error.map(str::to_string),
        }
    }
}

#[derive(Template)]
#[template(path = "list.html")]
pub struct ListTemplate {
    pub view: LayoutContext<ListPageView>,
}

pub struct PostPageView {
    pub title: String,
    pub post_type: String,
    pub type_color: &'static str,
    pub status: String,
    pub status_color: &'static str,
    pub author: String,
    pub created: String,
    pub updated: String,
    pub paragraphs: Vec<String>,
    pub edit_href: String,
    pub delete_href: String,
}

impl From<&Post> for PostPageView {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            post_type: post.post_type.as_str().to_string(),
            type_color: display::type_color(&post.post_type),
            status: post.status.as_str().to_string(),
            status_color: display::status_badge(&post.status).color,
            author: display::author_label(post.author_id),
            created: display::format_date_time(post.created_at),
            updated: display::format_date_time(post.updated_at),
            paragraphs: display::paragraphs(&post.content),
            edit_href: format!("/edit/{}", post.id),
            delete_href: format!("/posts/{}/delete", post.id),
        }
    }
}

#[derive(Template)]
#[template(path = "detail.html")]
pub struct DetailTemplate {
    pub view: LayoutContext<PostPageView>,
}

pub struct FormPageView {
    pub heading: String,
    pub action: String,
    pub cancel_href: String,
    pub error: Option<String>,
    pub validation: Option<String>,
    pub title: String,
    pub content: String,
    pub author_id: String,
    pub type_options: Vec<OptionView>,
    pub status_options: Vec<OptionView>,
    pub stored_type: Option<String>,
    pub stored_status: Option<String>,
    pub submit_label: String,
    pub disabled: bool,
}

impl FormPageView {
    pub fn new(
        heading: &str,
        action: String,
        cancel_href: String,
        form: &PostForm,
        error: Option<&str>,
    ) -> Self {
        let draft = form.draft();
        Self {
            heading: heading.to_string(),
            action,
            cancel_href,
            error: error.map(str::to_string),
            validation: form.validation_error().map(ToString::to_string),
            title: draft.title.clone(),
            content: draft.content.clone(),
            author_id: draft.author_id.clone(),
            type_options: type_options(&draft.post_type),
            status_options: status_options(&draft.status),
            stored_type: draft.stored_type.clone(),
            stored_status: draft.stored_status.clone(),
            submit_label: form.submit_button_label().to_string(),
            disabled: form.buttons_disabled(),
        }
    }
}

#[derive(Template)]
#[template(path = "form.html")]
pub struct FormTemplate {
    pub view: LayoutContext<FormPageView>,
}

pub struct ConfirmPageView {
    pub prompt: String,
    pub action: String,
    pub return_to: String,
    pub cancel_href: String,
    /// List filter to restore after a delete started from the list.
    pub status: Option<String>,
    pub post_type: Option<String>,
}

#[derive(Template)]
#[template(path = "confirm.html")]
pub struct ConfirmTemplate {
    pub view: LayoutContext<ConfirmPageView>,
}

pub struct SearchPageView {
    pub query: String,
    pub posts: Vec<PostCardView>,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "search.html")]
pub struct SearchTemplate {
    pub view: LayoutContext<SearchPageView>,
}

pub struct ErrorPageView {
    pub message: String,
    pub primary_action: Option<ErrorAction>,
}

impl ErrorPageView {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            primary_action: Some(ErrorAction::posts()),
        }
    }

    /// Message only, no way out but the navbar.
    pub fn bare(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            primary_action: None,
        }
    }

    pub fn not_found() -> Self {
        Self::new("The page you requested does not exist.")
    }
}

pub struct ErrorAction {
    pub href: String,
    pub label: String,
}

impl ErrorAction {
    pub fn posts() -> Self {
        Self {
            href: "/".to_string(),
            label: "Back to Posts".to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub view: LayoutContext<ErrorPageView>,
}
