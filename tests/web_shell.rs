use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{
        Method, Request, StatusCode,
        header::{CONTENT_TYPE, LOCATION},
    },
    response::Response,
};
use blogdesk::infra::{
    api::ApiClient,
    http::{HttpState, REQUEST_ID_HEADER, build_router},
};
use httpmock::MockServer;
use tower::ServiceExt;

const POST_ONE: &str = r#"{"id":1,"title":"Borrowing basics","content":"First line\nSecond line","type":"tutorial","status":"published","author_id":3,"created_at":"2025-01-01T09:05:00Z","updated_at":"2025-02-01T18:30:00Z"}"#;
const POST_TWO: &str = r#"{"id":2,"title":"Weird one","content":"x","type":"podcast","status":"pending","author_id":4,"created_at":"2025-01-02T00:00:00Z","updated_at":"2025-01-02T00:00:00Z"}"#;

fn router(server: &MockServer) -> Router {
    let client = ApiClient::new(&server.url("/api/v1")).expect("client");
    build_router(HttpState::new(Arc::new(client)))
}

async fn get(router: Router, uri: &str) -> Response {
    router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
        .await
        .expect("response")
}

async fn post_form(router: Router, uri: &str, body: &str) -> Response {
    router
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .expect("request"),
        )
        .await
        .expect("response")
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

#[tokio::test]
async fn list_passes_filters_and_renders_cards() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET")
            .path("/api/v1/posts")
            .query_param("status", "published")
            .query_param_missing("type");
        then.status(200)
            .header("content-type", "application/json")
            .body(format!("[{POST_ONE},{POST_TWO}]"));
    });

    let response = get(router(&server), "/?status=published&type=").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    let html = body_text(response).await;

    mock.assert();
    assert!(html.contains("Borrowing basics"));
    assert!(html.contains("#2ecc71"));
    assert!(html.contains("#95a5a6"), "unknown type falls back");
    assert!(html.contains("January 1, 2025"));
    assert!(html.contains(r#"<option value="published" selected>"#));
}

#[tokio::test]
async fn list_failure_shows_fixed_message() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/api/v1/posts");
        then.status(500).body("boom");
    });

    let response = get(router(&server), "/").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let html = body_text(response).await;
    assert!(html.contains("Failed to fetch posts. Make sure the backend server is running."));
    assert!(!html.contains("boom"));
}

#[tokio::test]
async fn empty_list_prompts_for_first_post() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/api/v1/posts");
        then.status(200)
            .header("content-type", "application/json")
            .body("null");
    });

    let response = get(router(&server), "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("No posts found. Create your first post!"));
}

#[tokio::test]
async fn detail_distinguishes_missing_from_failed() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/api/v1/posts/1");
        then.status(200)
            .header("content-type", "application/json")
            .body(POST_ONE);
    });
    server.mock(|when, then| {
        when.method("GET").path("/api/v1/posts/2");
        then.status(200)
            .header("content-type", "application/json")
            .body("null");
    });
    server.mock(|when, then| {
        when.method("GET").path("/api/v1/posts/3");
        then.status(404)
            .header("content-type", "application/json")
            .body(r#"{"error":"Post not found"}"#);
    });

    let response = get(router(&server), "/posts/1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("<p>First line</p>"));
    assert!(html.contains("January 1, 2025 at 09:05 AM"));
    assert!(html.contains("/edit/1"));

    let response = get(router(&server), "/posts/2").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Post not found"));

    let response = get(router(&server), "/posts/3").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert!(body_text(response).await.contains("Failed to fetch post"));
}

#[tokio::test]
async fn create_form_starts_with_defaults() {
    let server = MockServer::start();
    let response = get(router(&server), "/create").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Create New Post"));
    assert!(html.contains(r#"<option value="article" selected>"#));
    assert!(html.contains(r#"<option value="draft" selected>"#));
    assert!(html.contains(r#"value="1""#));
}

#[tokio::test]
async fn create_redirects_to_list_on_success() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("POST")
            .path("/api/v1/posts")
            .json_body(serde_json::json!({
                "title": "Hello",
                "content": "World",
                "type": "review",
                "status": "draft",
                "author_id": 2
            }));
        then.status(201)
            .header("content-type", "application/json")
            .body(POST_ONE);
    });

    let response = post_form(
        router(&server),
        "/create",
        "title=Hello&content=World&type=review&status=draft&author_id=2",
    )
    .await;
    mock.assert();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn create_failure_keeps_input() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("POST").path("/api/v1/posts");
        then.status(500);
    });

    let response = post_form(
        router(&server),
        "/create",
        "title=Keep+me&content=Body&type=article&status=draft&author_id=1",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let html = body_text(response).await;
    assert!(html.contains("Failed to create post. Please try again."));
    assert!(html.contains(r#"value="Keep me""#));
}

#[tokio::test]
async fn create_rejects_bad_author_without_calling_backend() {
    let server = MockServer::start();

    let response = post_form(
        router(&server),
        "/create",
        "title=T&content=C&type=article&status=draft&author_id=",
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_text(response).await;
    assert!(html.contains("author_id is required"));
    assert!(html.contains(r#"value="T""#));
}

#[tokio::test]
async fn edit_loads_then_updates_and_redirects_to_detail() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/api/v1/posts/1");
        then.status(200)
            .header("content-type", "application/json")
            .body(POST_ONE);
    });
    let put = server.mock(|when, then| {
        when.method("PUT")
            .path("/api/v1/posts/1")
            .json_body(serde_json::json!({
                "title": "Borrowing basics",
                "content": "First line\nSecond line",
                "type": "tutorial",
                "status": "published",
                "author_id": 3
            }));
        then.status(200)
            .header("content-type", "application/json")
            .body(POST_ONE);
    });

    let response = get(router(&server), "/edit/1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Edit Post"));
    assert!(html.contains("Update Post"));
    assert!(html.contains(r#"<option value="tutorial" selected>"#));

    let response = post_form(
        router(&server),
        "/edit/1",
        "title=Borrowing+basics&content=First+line%0ASecond+line&type=tutorial&status=published&author_id=3",
    )
    .await;
    put.assert();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/posts/1");
}

#[tokio::test]
async fn edit_fetch_failure_shows_no_form() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/api/v1/posts/5");
        then.status(503);
    });

    let response = get(router(&server), "/edit/5").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let html = body_text(response).await;
    assert!(html.contains("Failed to fetch post"));
    assert!(!html.contains("<form"));
}

#[tokio::test]
async fn delete_from_detail_confirms_then_redirects_home() {
    let server = MockServer::start();
    let delete = server.mock(|when, then| {
        when.method("DELETE").path("/api/v1/posts/1");
        then.status(204);
    });

    let response = get(router(&server), "/posts/1/delete?from=detail").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Are you sure you want to delete this post?"));
    assert!(html.contains(r#"href="/posts/1""#));

    let response = post_form(router(&server), "/posts/1/delete", "from=detail").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/posts/1");

    let response = post_form(router(&server), "/posts/1/delete", "from=detail&confirm=yes").await;
    delete.assert();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn delete_from_list_prunes_or_alerts() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/api/v1/posts");
        then.status(200)
            .header("content-type", "application/json")
            .body(format!("[{POST_ONE},{POST_TWO}]"));
    });
    server.mock(|when, then| {
        when.method("DELETE").path("/api/v1/posts/1");
        then.status(204);
    });
    server.mock(|when, then| {
        when.method("DELETE").path("/api/v1/posts/2");
        then.status(500);
    });

    let response = post_form(router(&server), "/posts/1/delete", "from=list&confirm=yes").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(!html.contains("Borrowing basics"));
    assert!(html.contains("Weird one"));

    let response = post_form(router(&server), "/posts/2/delete", "from=list&confirm=yes").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let html = body_text(response).await;
    assert!(html.contains("Failed to delete post"));
    assert!(html.contains("Weird one"));
}

#[tokio::test]
async fn delete_from_filtered_list_keeps_the_filter() {
    let server = MockServer::start();
    let filtered = server.mock(|when, then| {
        when.method("GET")
            .path("/api/v1/posts")
            .query_param("status", "draft");
        then.status(200)
            .header("content-type", "application/json")
            .body(format!("[{}]", POST_ONE.replace("published", "draft")));
    });
    let delete = server.mock(|when, then| {
        when.method("DELETE").path("/api/v1/posts/1");
        then.status(204);
    });

    let response = get(router(&server), "/?status=draft").await;
    let html = body_text(response).await;
    assert!(html.contains("/posts/1/delete?from=list"));
    assert!(html.contains("status=draft"));

    let response = get(router(&server), "/posts/1/delete?from=list&status=draft").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"name="status" value="draft""#));
    assert!(!html.contains(r#"name="type""#));
    assert!(html.contains(r#"href="/?status=draft""#));

    let response = post_form(router(&server), "/posts/1/delete", "from=list&status=draft").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/?status=draft");

    let response = post_form(
        router(&server),
        "/posts/1/delete",
        "from=list&status=draft&confirm=yes",
    )
    .await;
    delete.assert();
    filtered.assert_calls(3);
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"<option value="draft" selected>"#));
    assert!(html.contains("No posts found"));
}

#[tokio::test]
async fn delete_from_list_is_skipped_when_the_list_cannot_load() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/api/v1/posts");
        then.status(500);
    });
    let delete = server.mock(|when, then| {
        when.method("DELETE").path("/api/v1/posts/1");
        then.status(204);
    });

    let response = post_form(router(&server), "/posts/1/delete", "from=list&confirm=yes").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    delete.assert_calls(0);
    let html = body_text(response).await;
    assert!(html.contains("Failed to fetch posts"));
}

#[tokio::test]
async fn edit_round_trips_unrecognised_type_and_status() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/api/v1/posts/2");
        then.status(200)
            .header("content-type", "application/json")
            .body(POST_TWO);
    });
    let put = server.mock(|when, then| {
        when.method("PUT")
            .path("/api/v1/posts/2")
            .json_body(serde_json::json!({
                "title": "Weird one",
                "content": "x",
                "type": "podcast",
                "status": "pending",
                "author_id": 4
            }));
        then.status(200)
            .header("content-type", "application/json")
            .body(POST_TWO);
    });

    let response = get(router(&server), "/edit/2").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"<option value="podcast" selected>"#));
    assert!(html.contains(r#"<option value="pending" selected>"#));
    assert!(html.contains(r#"name="stored_type" value="podcast""#));
    assert!(html.contains(r#"name="stored_status" value="pending""#));

    let response = post_form(
        router(&server),
        "/edit/2",
        "title=Weird+one&content=x&type=podcast&status=pending&author_id=4&stored_type=podcast&stored_status=pending",
    )
    .await;
    put.assert();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/posts/2");
}

#[tokio::test]
async fn search_renders_matches() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET")
            .path("/api/v1/posts/search")
            .query_param("q", "borrow");
        then.status(200)
            .header("content-type", "application/json")
            .body(format!(
                r#"{{"query":"borrow","count":1,"results":[{POST_ONE}]}}"#
            ));
    });

    let response = get(router(&server), "/search?q=+borrow+").await;
    mock.assert();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Borrowing basics"));
}

#[tokio::test]
async fn health_and_unknown_routes() {
    let server = MockServer::start();

    let response = get(router(&server), "/_health").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(router(&server), "/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(router(&server), "/posts/0").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
