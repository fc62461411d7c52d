//! Request and response shapes exchanged with the posts API.
//!
//! The enumerations are lenient on the way in: a value the client does not
//! know deserializes into `Other` so one odd record cannot poison a whole
//! listing. Outgoing payloads are validated before they are built.

use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Server-assigned post identifier.
pub type PostId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PostType {
    Article,
    Tutorial,
    Review,
    Other(String),
}

impl PostType {
    pub const KNOWN: [PostType; 3] = [PostType::Article, PostType::Tutorial, PostType::Review];

    pub fn as_str(&self) -> &str {
        match self {
            PostType::Article => "article",
            PostType::Tutorial => "tutorial",
            PostType::Review => "review",
            PostType::Other(value) => value.as_str(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            PostType::Article => "Article",
            PostType::Tutorial => "Tutorial",
            PostType::Review => "Review",
            PostType::Other(value) => value.as_str(),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, PostType::Other(_))
    }
}

impl From<&str> for PostType {
    fn from(value: &str) -> Self {
        match value {
            "article" => PostType::Article,
            "tutorial" => PostType::Tutorial,
            "review" => PostType::Review,
            other => PostType::Other(other.to_string()),
        }
    }
}

impl From<String> for PostType {
    fn from(value: String) -> Self {
        PostType::from(value.as_str())
    }
}

impl From<PostType> for String {
    fn from(value: PostType) -> Self {
        match value {
            PostType::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PostStatus {
    Draft,
    Published,
    Archived,
    Other(String),
}

impl PostStatus {
    pub const KNOWN: [PostStatus; 3] = [
        PostStatus::Draft,
        PostStatus::Published,
        PostStatus::Archived,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
            PostStatus::Archived => "archived",
            PostStatus::Other(value) => value.as_str(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            PostStatus::Draft => "Draft",
            PostStatus::Published => "Published",
            PostStatus::Archived => "Archived",
            PostStatus::Other(value) => value.as_str(),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, PostStatus::Other(_))
    }
}

impl From<&str> for PostStatus {
    fn from(value: &str) -> Self {
        match value {
            "draft" => PostStatus::Draft,
            "published" => PostStatus::Published,
            "archived" => PostStatus::Archived,
            other => PostStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for PostStatus {
    fn from(value: String) -> Self {
        PostStatus::from(value.as_str())
    }
}

impl From<PostStatus> for String {
    fn from(value: PostStatus) -> Self {
        match value {
            PostStatus::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A blog post as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub post_type: PostType,
    pub status: PostStatus,
    pub author_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Editable fields of a post, sent on create and on full-record update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostInput {
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub post_type: PostType,
    pub status: PostStatus,
    pub author_id: i64,
}

impl From<&Post> for PostInput {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            content: post.content.clone(),
            post_type: post.post_type.clone(),
            status: post.status.clone(),
            author_id: post.author_id,
        }
    }
}

/// Listing constraints; `None` means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub status: Option<PostStatus>,
    pub post_type: Option<PostType>,
}

impl PostFilter {
    /// Build a filter from raw select values, treating blanks as unset.
    pub fn from_raw(status: Option<&str>, post_type: Option<&str>) -> Self {
        fn non_empty(value: Option<&str>) -> Option<&str> {
            value.map(str::trim).filter(|v| !v.is_empty())
        }

        Self {
            status: non_empty(status).map(PostStatus::from),
            post_type: non_empty(post_type).map(PostType::from),
        }
    }

    /// Query parameters for the listing endpoint, present keys only.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status.as_ref().filter(|s| !s.as_str().is_empty()) {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(post_type) = self.post_type.as_ref().filter(|t| !t.as_str().is_empty()) {
            pairs.push(("type", post_type.as_str().to_string()));
        }
        pairs
    }
}

/// Envelope returned by `GET /posts/search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub results: Option<Vec<Post>>,
}

impl SearchResponse {
    pub fn into_posts(self) -> Vec<Post> {
        self.results.unwrap_or_default()
    }
}

/// Error body the API attaches to non-success responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}
