//! In-memory doubles for the ports, shared by the view tests.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use blogdesk_api_types::{Post, PostFilter, PostId, PostInput, PostStatus, PostType};
use time::macros::datetime;

use crate::application::ports::{Confirmation, Navigator, Notification, PostsApi, RequestError};
use crate::application::routes::Route;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    List(PostFilter),
    Get(PostId),
    Create(PostInput),
    Update(PostId, PostInput),
    Delete(PostId),
    Search(String),
}

#[derive(Default)]
struct FakeState {
    posts: Vec<Post>,
    failing: HashSet<&'static str>,
    absent_on_get: bool,
    calls: Vec<ApiCall>,
    next_id: PostId,
}

#[derive(Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
}

impl FakeApi {
    pub fn with_posts(posts: Vec<Post>) -> Self {
        let next_id = posts.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        Self {
            state: Mutex::new(FakeState {
                posts,
                next_id,
                ..FakeState::default()
            }),
        }
    }

    /// Make every call of `operation` fail with a 500.
    pub fn fail(&self, operation: &'static str) {
        self.state.lock().expect("lock").failing.insert(operation);
    }

    pub fn recover(&self, operation: &'static str) {
        self.state.lock().expect("lock").failing.remove(operation);
    }

    /// Answer `get_post` successfully but without a post.
    pub fn answer_absent(&self) {
        self.state.lock().expect("lock").absent_on_get = true;
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.state.lock().expect("lock").calls.clone()
    }

    fn record(&self, operation: &'static str, call: ApiCall) -> Result<(), RequestError> {
        let mut state = self.state.lock().expect("lock");
        state.calls.push(call);
        if state.failing.contains(operation) {
            return Err(RequestError::Status {
                status: 500,
                body: format!(r#"{{"error":"{operation} exploded"}}"#),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PostsApi for FakeApi {
    async fn list_posts(&self, filter: &PostFilter) -> Result<Vec<Post>, RequestError> {
        self.record("list_posts", ApiCall::List(filter.clone()))?;
        let state = self.state.lock().expect("lock");
        Ok(state
            .posts
            .iter()
            .filter(|p| filter.status.as_ref().is_none_or(|s| *s == p.status))
            .filter(|p| filter.post_type.as_ref().is_none_or(|t| *t == p.post_type))
            .cloned()
            .collect())
    }

    async fn get_post(&self, id: PostId) -> Result<Option<Post>, RequestError> {
        self.record("get_post", ApiCall::Get(id))?;
        let state = self.state.lock().expect("lock");
        if state.absent_on_get {
            return Ok(None);
        }
        state
            .posts
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .map(Some)
            .ok_or_else(|| RequestError::Status {
                status: 404,
                body: r#"{"error":"Post not found"}"#.into(),
            })
    }

    async fn create_post(&self, input: &PostInput) -> Result<Post, RequestError> {
        self.record("create_post", ApiCall::Create(input.clone()))?;
        let mut state = self.state.lock().expect("lock");
        let post = post_from_input(state.next_id, input);
        state.next_id += 1;
        state.posts.insert(0, post.clone());
        Ok(post)
    }

    async fn update_post(&self, id: PostId, input: &PostInput) -> Result<Post, RequestError> {
        self.record("update_post", ApiCall::Update(id, input.clone()))?;
        let mut state = self.state.lock().expect("lock");
        let updated = post_from_input(id, input);
        if let Some(slot) = state.posts.iter_mut().find(|p| p.id == id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    async fn delete_post(&self, id: PostId) -> Result<(), RequestError> {
        self.record("delete_post", ApiCall::Delete(id))?;
        self.state.lock().expect("lock").posts.retain(|p| p.id != id);
        Ok(())
    }

    async fn search_posts(&self, query: &str) -> Result<Vec<Post>, RequestError> {
        self.record("search_posts", ApiCall::Search(query.to_string()))?;
        let state = self.state.lock().expect("lock");
        Ok(state
            .posts
            .iter()
            .filter(|p| p.title.contains(query) || p.content.contains(query))
            .cloned()
            .collect())
    }
}

fn post_from_input(id: PostId, input: &PostInput) -> Post {
    Post {
        id,
        title: input.title.clone(),
        content: input.content.clone(),
        post_type: input.post_type.clone(),
        status: input.status.clone(),
        author_id: input.author_id,
        created_at: datetime!(2025-01-01 00:00 UTC),
        updated_at: datetime!(2025-01-02 00:00 UTC),
    }
}

pub fn sample_post(id: PostId, post_type: PostType, status: PostStatus) -> Post {
    Post {
        id,
        title: format!("Post {id}"),
        content: format!("Body of post {id}\nSecond line"),
        post_type,
        status,
        author_id: 3,
        created_at: datetime!(2025-01-01 09:05 UTC),
        updated_at: datetime!(2025-03-14 18:30 UTC),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    To(Route),
    Back,
}

#[derive(Default)]
pub struct RecordingNavigator {
    events: Mutex<Vec<NavEvent>>,
}

impl RecordingNavigator {
    pub fn events(&self) -> Vec<NavEvent> {
        self.events.lock().expect("lock").clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.events.lock().expect("lock").push(NavEvent::To(route));
    }

    fn back(&self) {
        self.events.lock().expect("lock").push(NavEvent::Back);
    }
}

pub struct ScriptedConfirmation {
    answer: bool,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedConfirmation {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("lock").clone()
    }
}

impl Confirmation for ScriptedConfirmation {
    fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().expect("lock").push(prompt.to_string());
        self.answer
    }
}

#[derive(Default)]
pub struct RecordingNotification {
    alerts: Mutex<Vec<String>>,
}

impl RecordingNotification {
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().expect("lock").clone()
    }
}

impl Notification for RecordingNotification {
    fn alert(&self, message: &str) {
        self.alerts.lock().expect("lock").push(message.to_string());
    }
}
