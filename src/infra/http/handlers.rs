use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use blogdesk_api_types::{PostFilter, PostId};
use serde::Deserialize;

use crate::{
    application::{
        create::CreateFlow,
        detail::{DetailState, NOT_FOUND_MESSAGE, PostDetailView},
        edit::{EditFlow, EditPhase},
        error::ErrorReport,
        fetch::LoadState,
        form::{PostDraft, PostForm, SubmitOutcome},
        list::{DELETE_PROMPT, DeleteOutcome, PostListView},
        routes::Route,
        search::SearchView,
    },
    presentation::views::{
        ConfirmPageView, ConfirmTemplate, DetailTemplate, ErrorPageView, ErrorTemplate,
        FormPageView, FormTemplate, LayoutChrome, LayoutContext, ListPageView, ListTemplate,
        PostCardView, PostPageView, SearchPageView, SearchTemplate, list_href,
        render_not_found_response, render_template_response,
    },
};

use super::{
    HttpState,
    capabilities::{FlashNotification, FormConfirmation, RedirectNavigator},
};

const CREATE_HEADING: &str = "Create New Post";
const EDIT_HEADING: &str = "Edit Post";
/// Shown if a view is rendered before its load finished.
const INCOMPLETE_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct ListQuery {
    status: Option<String>,
    #[serde(rename = "type")]
    post_type: Option<String>,
}

impl ListQuery {
    fn filter(&self) -> PostFilter {
        PostFilter::from_raw(self.status.as_deref(), self.post_type.as_deref())
    }

    fn status(&self) -> &str {
        self.status.as_deref().unwrap_or_default()
    }

    fn post_type(&self) -> &str {
        self.post_type.as_deref().unwrap_or_default()
    }

    fn href(&self) -> String {
        list_href(self.status(), self.post_type())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct SearchQuery {
    q: String,
}

/// Raw field values posted by the post form.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct PostFormFields {
    title: String,
    content: String,
    #[serde(rename = "type")]
    post_type: String,
    status: String,
    author_id: String,
    stored_type: Option<String>,
    stored_status: Option<String>,
}

impl From<PostFormFields> for PostDraft {
    fn from(fields: PostFormFields) -> Self {
        let present = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        Self {
            title: fields.title,
            content: fields.content,
            post_type: fields.post_type,
            status: fields.status,
            author_id: fields.author_id,
            stored_type: present(fields.stored_type),
            stored_status: present(fields.stored_status),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct DeleteQuery {
    from: Option<String>,
    #[serde(flatten)]
    list: ListQuery,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct DeleteForm {
    confirm: Option<String>,
    from: Option<String>,
    #[serde(flatten)]
    list: ListQuery,
}

/// Which screen a delete was started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeleteOrigin {
    List,
    Detail,
}

impl DeleteOrigin {
    fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("detail") => DeleteOrigin::Detail,
            _ => DeleteOrigin::List,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            DeleteOrigin::List => "list",
            DeleteOrigin::Detail => "detail",
        }
    }

    fn return_href(self, id: PostId, list: &ListQuery) -> String {
        match self {
            DeleteOrigin::List => list.href(),
            DeleteOrigin::Detail => Route::Detail(id).path(),
        }
    }
}

fn page<T>(title: impl Into<String>, content: T, alerts: Vec<String>) -> LayoutContext<T> {
    LayoutContext::new(LayoutChrome::desk(), title, content).with_alerts(alerts)
}

fn with_report(
    mut response: Response,
    source: &'static str,
    status: StatusCode,
    message: impl Into<String>,
) -> Response {
    if status.is_client_error() || status.is_server_error() {
        ErrorReport::from_message(source, status, message).attach(&mut response);
    }
    response
}

fn error_page(source: &'static str, status: StatusCode, content: ErrorPageView) -> Response {
    let message = content.message.clone();
    let view = page("Error", content, Vec::new());
    with_report(
        render_template_response(ErrorTemplate { view }, status),
        source,
        status,
        message,
    )
}

fn render_list(view: &PostListView, query: &ListQuery, alerts: Vec<String>) -> Response {
    const SOURCE: &str = "infra::http::handlers::render_list";

    let error = view.state().error_message();
    let status = if error.is_some() || !alerts.is_empty() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::OK
    };
    let content = ListPageView::new(query.status(), query.post_type(), view.posts(), error);
    let detail = error
        .map(str::to_string)
        .or_else(|| alerts.first().cloned())
        .unwrap_or_default();
    let response = render_template_response(
        ListTemplate {
            view: page("Blog Posts", content, alerts),
        },
        status,
    );
    with_report(response, SOURCE, status, detail)
}

fn render_detail(view: &PostDetailView, alerts: Vec<String>) -> Response {
    const SOURCE: &str = "infra::http::handlers::render_detail";

    match view.state() {
        DetailState::Ready(post) => {
            let status = if alerts.is_empty() {
                StatusCode::OK
            } else {
                StatusCode::BAD_GATEWAY
            };
            let detail = alerts.first().cloned().unwrap_or_default();
            let response = render_template_response(
                DetailTemplate {
                    view: page(post.title.clone(), PostPageView::from(post), alerts),
                },
                status,
            );
            with_report(response, SOURCE, status, detail)
        }
        DetailState::Missing => error_page(
            SOURCE,
            StatusCode::NOT_FOUND,
            ErrorPageView::new(NOT_FOUND_MESSAGE),
        ),
        DetailState::Failed(message) => error_page(
            SOURCE,
            StatusCode::BAD_GATEWAY,
            ErrorPageView::new(message.clone()),
        ),
        DetailState::Loading => error_page(
            SOURCE,
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorPageView::new(INCOMPLETE_MESSAGE),
        ),
    }
}

fn render_form(
    heading: &str,
    route: Route,
    cancel: Route,
    form: &PostForm,
    error: Option<&str>,
    status: StatusCode,
) -> Response {
    const SOURCE: &str = "infra::http::handlers::render_form";

    let content = FormPageView::new(heading, route.path(), cancel.path(), form, error);
    let detail = content
        .error
        .clone()
        .or_else(|| content.validation.clone())
        .unwrap_or_default();
    let response = render_template_response(
        FormTemplate {
            view: page(heading, content, Vec::new()),
        },
        status,
    );
    with_report(response, SOURCE, status, detail)
}

fn submit_status(outcome: &SubmitOutcome) -> StatusCode {
    match outcome {
        SubmitOutcome::Saved(_) => StatusCode::OK,
        SubmitOutcome::Invalid => StatusCode::UNPROCESSABLE_ENTITY,
        SubmitOutcome::Failed => StatusCode::BAD_GATEWAY,
        SubmitOutcome::NotReady => StatusCode::CONFLICT,
    }
}

pub(super) async fn list_posts(
    State(state): State<HttpState>,
    Query(query): Query<ListQuery>,
) -> Response {
    let mut view = PostListView::new(query.filter());
    view.refresh(state.api.as_ref()).await;
    render_list(&view, &query, Vec::new())
}

pub(super) async fn post_detail(
    State(state): State<HttpState>,
    Path(id): Path<PostId>,
) -> Response {
    if id < 1 {
        return render_not_found_response();
    }
    let mut view = PostDetailView::new(id);
    view.load(state.api.as_ref()).await;
    render_detail(&view, Vec::new())
}

pub(super) async fn create_form() -> Response {
    let flow = CreateFlow::new();
    render_form(
        CREATE_HEADING,
        Route::Create,
        Route::List,
        flow.form(),
        flow.error(),
        StatusCode::OK,
    )
}

pub(super) async fn create_submit(
    State(state): State<HttpState>,
    Form(fields): Form<PostFormFields>,
) -> Response {
    let mut flow = CreateFlow::with_draft(fields.into());
    let navigator = RedirectNavigator::default();
    let outcome = flow.submit(state.api.as_ref(), &navigator).await;

    if let (SubmitOutcome::Saved(_), Some(redirect)) = (&outcome, navigator.redirect()) {
        return redirect.into_response();
    }
    render_form(
        CREATE_HEADING,
        Route::Create,
        Route::List,
        flow.form(),
        flow.error(),
        submit_status(&outcome),
    )
}

pub(super) async fn edit_form(State(state): State<HttpState>, Path(id): Path<PostId>) -> Response {
    const SOURCE: &str = "infra::http::handlers::edit_form";

    if id < 1 {
        return render_not_found_response();
    }
    let mut flow = EditFlow::new(id);
    flow.load(state.api.as_ref()).await;

    match flow.phase() {
        EditPhase::Editing(form) => render_form(
            EDIT_HEADING,
            Route::Edit(id),
            Route::Detail(id),
            form,
            flow.error(),
            StatusCode::OK,
        ),
        EditPhase::Unavailable(message) => {
            let status = if message == NOT_FOUND_MESSAGE {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::BAD_GATEWAY
            };
            error_page(SOURCE, status, ErrorPageView::bare(message.clone()))
        }
        EditPhase::Fetching => error_page(
            SOURCE,
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorPageView::bare(INCOMPLETE_MESSAGE),
        ),
    }
}

pub(super) async fn edit_submit(
    State(state): State<HttpState>,
    Path(id): Path<PostId>,
    Form(fields): Form<PostFormFields>,
) -> Response {
    if id < 1 {
        return render_not_found_response();
    }
    let mut flow = EditFlow::editing(id, fields.into());
    let navigator = RedirectNavigator::default();
    let outcome = flow.submit(state.api.as_ref(), &navigator).await;

    if let (SubmitOutcome::Saved(_), Some(redirect)) = (&outcome, navigator.redirect()) {
        return redirect.into_response();
    }
    match flow.form() {
        Some(form) => render_form(
            EDIT_HEADING,
            Route::Edit(id),
            Route::Detail(id),
            form,
            flow.error(),
            submit_status(&outcome),
        ),
        None => render_not_found_response(),
    }
}

pub(super) async fn delete_confirm(
    Path(id): Path<PostId>,
    Query(query): Query<DeleteQuery>,
) -> Response {
    if id < 1 {
        return render_not_found_response();
    }
    let origin = DeleteOrigin::parse(query.from.as_deref());
    let list = query.list;
    let content = ConfirmPageView {
        prompt: DELETE_PROMPT.to_string(),
        action: format!("{}/delete", Route::Detail(id).path()),
        return_to: origin.as_str().to_string(),
        cancel_href: origin.return_href(id, &list),
        status: list.status.filter(|_| origin == DeleteOrigin::List),
        post_type: list.post_type.filter(|_| origin == DeleteOrigin::List),
    };
    render_template_response(
        ConfirmTemplate {
            view: page("Delete Post", content, Vec::new()),
        },
        StatusCode::OK,
    )
}

pub(super) async fn delete_submit(
    State(state): State<HttpState>,
    Path(id): Path<PostId>,
    Form(form): Form<DeleteForm>,
) -> Response {
    if id < 1 {
        return render_not_found_response();
    }
    let api = state.api.as_ref();
    let origin = DeleteOrigin::parse(form.from.as_deref());
    let confirmation = FormConfirmation::from_answer(form.confirm.as_deref());
    let notification = FlashNotification::default();

    match origin {
        DeleteOrigin::Detail => {
            let navigator = RedirectNavigator::default();
            let mut view = PostDetailView::new(id);
            let outcome = view
                .delete(api, &confirmation, &notification, &navigator)
                .await;
            match outcome {
                DeleteOutcome::Deleted => navigator
                    .redirect()
                    .unwrap_or_else(|| Redirect::to(&Route::List.path()))
                    .into_response(),
                DeleteOutcome::Cancelled => {
                    Redirect::to(&Route::Detail(id).path()).into_response()
                }
                DeleteOutcome::Failed => {
                    view.load(api).await;
                    render_detail(&view, notification.take())
                }
            }
        }
        DeleteOrigin::List => {
            let list = form.list;
            let mut view = PostListView::new(list.filter());
            view.refresh(api).await;
            // Without the list there is nothing to prune; show the fetch error.
            if !matches!(view.state(), LoadState::Ready(_)) {
                return render_list(&view, &list, Vec::new());
            }
            let outcome = view.delete(id, api, &confirmation, &notification).await;
            match outcome {
                DeleteOutcome::Cancelled => Redirect::to(&list.href()).into_response(),
                DeleteOutcome::Deleted | DeleteOutcome::Failed => {
                    render_list(&view, &list, notification.take())
                }
            }
        }
    }
}

pub(super) async fn search(
    State(state): State<HttpState>,
    Query(query): Query<SearchQuery>,
) -> Response {
    const SOURCE: &str = "infra::http::handlers::search";

    let mut view = SearchView::new(query.q);
    view.run(state.api.as_ref()).await;

    let (posts, error, status) = match view.state() {
        LoadState::Ready(posts) => (
            posts.iter().map(PostCardView::from).collect(),
            None,
            StatusCode::OK,
        ),
        LoadState::Failed(message) => (
            Vec::new(),
            Some(message.clone()),
            StatusCode::BAD_GATEWAY,
        ),
        LoadState::Loading => (Vec::new(), None, StatusCode::OK),
    };
    let detail = error.clone().unwrap_or_default();
    let content = SearchPageView {
        query: view.query().to_string(),
        posts,
        error,
    };
    let response = render_template_response(
        SearchTemplate {
            view: page("Search", content, Vec::new()),
        },
        status,
    );
    with_report(response, SOURCE, status, detail)
}

pub(super) async fn health() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

pub(super) async fn fallback() -> Response {
    render_not_found_response()
}
