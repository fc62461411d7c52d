//! Display rules for posts: badge colours, excerpts and dates.

use blogdesk_api_types::{PostStatus, PostType};
use time::{OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};

pub const DEFAULT_TYPE_COLOR: &str = "#95a5a6";
pub const EXCERPT_CHARS: usize = 150;
pub const ELLIPSIS: &str = "...";

const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[month repr:long] [day padding:none], [year]");
const DATE_TIME_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[month repr:long] [day padding:none], [year] at [hour repr:12 padding:zero]:[minute] [period]"
);

pub fn type_color(post_type: &PostType) -> &'static str {
    match post_type {
        PostType::Article => "#3498db",
        PostType::Tutorial => "#2ecc71",
        PostType::Review => "#e74c3c",
        PostType::Other(_) => DEFAULT_TYPE_COLOR,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBadge {
    pub color: &'static str,
    pub text: &'static str,
}

const DRAFT_BADGE: StatusBadge = StatusBadge {
    color: "#f39c12",
    text: "Draft",
};

/// Badge for a status; unknown statuses wear the draft badge.
pub fn status_badge(status: &PostStatus) -> StatusBadge {
    match status {
        PostStatus::Published => StatusBadge {
            color: "#27ae60",
            text: "Published",
        },
        PostStatus::Archived => StatusBadge {
            color: "#7f8c8d",
            text: "Archived",
        },
        PostStatus::Draft | PostStatus::Other(_) => DRAFT_BADGE,
    }
}

/// First [`EXCERPT_CHARS`] characters, with an ellipsis only when cut.
pub fn excerpt(content: &str) -> String {
    match content.char_indices().nth(EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &content[..cut]),
        None => content.to_string(),
    }
}

pub fn paragraphs(content: &str) -> Vec<String> {
    content.split('\n').map(str::to_string).collect()
}

pub fn author_label(author_id: i64) -> String {
    format!("Author #{author_id}")
}

/// e.g. "January 1, 2025".
pub fn format_date(value: OffsetDateTime) -> String {
    value
        .format(DATE_FORMAT)
        .unwrap_or_else(|_| value.date().to_string())
}

/// e.g. "January 1, 2025 at 09:05 AM".
pub fn format_date_time(value: OffsetDateTime) -> String {
    value
        .format(DATE_TIME_FORMAT)
        .unwrap_or_else(|_| value.to_string())
}
