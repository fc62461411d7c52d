//! Command-line surface for `blogdesk-cli`.

#![deny(clippy::all, clippy::pedantic)]

use std::fmt;
use std::path::PathBuf;

use blogdesk::config::DEFAULT_API_BASE_URL;
use blogdesk_api_types::PostId;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "blogdesk-cli", version, about = "Blog posts API CLI", long_about = None)]
pub struct Cli {
    /// API root, e.g. <http://127.0.0.1:8080/api/v1>
    #[arg(long, env = "BLOGDESK_API_URL", default_value = DEFAULT_API_BASE_URL)]
    pub api_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Post management (list/get/create/update/delete/search)
    Posts(PostsArgs),
}

#[derive(Parser, Debug)]
pub struct PostsArgs {
    #[command(subcommand)]
    pub action: PostsCmd,
}

#[derive(Subcommand, Debug)]
pub enum PostsCmd {
    /// List posts with optional filters
    List {
        #[arg(long)]
        status: Option<PostStatusArg>,
        #[arg(long = "type")]
        post_type: Option<PostTypeArg>,
    },
    /// Get a post by id
    Get { id: PostId },
    /// Create a post
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        content_file: Option<PathBuf>,
        #[arg(long = "type", default_value_t = PostTypeArg::Article)]
        post_type: PostTypeArg,
        #[arg(long, default_value_t = PostStatusArg::Draft)]
        status: PostStatusArg,
        #[arg(long, default_value = "1")]
        author_id: String,
    },
    /// Replace a post; omitted fields keep their current values
    Update {
        id: PostId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        content_file: Option<PathBuf>,
        #[arg(long = "type")]
        post_type: Option<PostTypeArg>,
        #[arg(long)]
        status: Option<PostStatusArg>,
        #[arg(long)]
        author_id: Option<String>,
    },
    /// Delete a post
    Delete {
        id: PostId,
        /// Skip the confirmation question
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
    /// Full-text search over titles and content
    Search { query: String },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PostStatusArg {
    Draft,
    Published,
    Archived,
}

impl PostStatusArg {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for PostStatusArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PostTypeArg {
    Article,
    Tutorial,
    Review,
}

impl PostTypeArg {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Tutorial => "tutorial",
            Self::Review => "review",
        }
    }
}

impl fmt::Display for PostTypeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
