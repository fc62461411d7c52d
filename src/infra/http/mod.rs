mod capabilities;
mod handlers;
mod middleware;

use std::sync::Arc;

use axum::{Router, middleware as axum_middleware, routing::get};

use crate::application::ports::PostsApi;

pub use capabilities::{FlashNotification, FormConfirmation, RedirectNavigator};
pub use middleware::{REQUEST_ID_HEADER, RequestContext};

#[derive(Clone)]
pub struct HttpState {
    pub api: Arc<dyn PostsApi>,
}

impl HttpState {
    pub fn new(api: Arc<dyn PostsApi>) -> Self {
        Self { api }
    }
}

/// Server-rendered desk: list, detail, create, edit, delete and search.
pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route("/", get(handlers::list_posts))
        .route("/posts/{id}", get(handlers::post_detail))
        .route(
            "/posts/{id}/delete",
            get(handlers::delete_confirm).post(handlers::delete_submit),
        )
        .route(
            "/create",
            get(handlers::create_form).post(handlers::create_submit),
        )
        .route(
            "/edit/{id}",
            get(handlers::edit_form).post(handlers::edit_submit),
        )
        .route("/search", get(handlers::search))
        .route("/_health", get(handlers::health))
        .fallback(handlers::fallback)
        .with_state(state)
        .layer(axum_middleware::from_fn(middleware::log_responses))
        .layer(axum_middleware::from_fn(middleware::set_request_context))
}
