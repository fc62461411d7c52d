#![deny(clippy::all, clippy::pedantic)]

use std::path::PathBuf;

use blogdesk::application::{
    form::{PostDraft, PostField, PostForm},
    ports::PostsApi,
};
use blogdesk_api_types::{PostFilter, PostId};

use crate::args::{PostStatusArg, PostTypeArg, PostsCmd};
use crate::client::CliError;
use crate::io::{read_opt_value, read_value};
use crate::print::print_json;

const CLI_SUBMIT_LABEL: &str = "Save";

pub async fn handle(api: &dyn PostsApi, cmd: PostsCmd) -> Result<(), CliError> {
    match cmd {
        PostsCmd::List { status, post_type } => list(api, status, post_type).await,
        PostsCmd::Get { id } => get(api, id).await,
        PostsCmd::Create {
            title,
            content,
            content_file,
            post_type,
            status,
            author_id,
        } => {
            let input = PostCreateInput {
                title,
                content,
                content_file,
                post_type,
                status,
                author_id,
            };
            create(api, input).await
        }
        PostsCmd::Update {
            id,
            title,
            content,
            content_file,
            post_type,
            status,
            author_id,
        } => {
            let input = PostUpdateInput {
                id,
                title,
                content,
                content_file,
                post_type,
                status,
                author_id,
            };
            update(api, input).await
        }
        PostsCmd::Delete { id, yes } => delete(api, id, yes).await,
        PostsCmd::Search { query } => search(api, &query).await,
    }
}

struct PostCreateInput {
    title: String,
    content: Option<String>,
    content_file: Option<PathBuf>,
    post_type: PostTypeArg,
    status: PostStatusArg,
    author_id: String,
}

struct PostUpdateInput {
    id: PostId,
    title: Option<String>,
    content: Option<String>,
    content_file: Option<PathBuf>,
    post_type: Option<PostTypeArg>,
    status: Option<PostStatusArg>,
    author_id: Option<String>,
}

async fn list(
    api: &dyn PostsApi,
    status: Option<PostStatusArg>,
    post_type: Option<PostTypeArg>,
) -> Result<(), CliError> {
    let filter = PostFilter::from_raw(
        status.map(PostStatusArg::as_str),
        post_type.map(PostTypeArg::as_str),
    );
    let posts = api.list_posts(&filter).await?;
    print_json(&posts)
}

async fn get(api: &dyn PostsApi, id: PostId) -> Result<(), CliError> {
    let post = api.get_post(id).await?.ok_or(CliError::NotFound(id))?;
    print_json(&post)
}

async fn create(api: &dyn PostsApi, input: PostCreateInput) -> Result<(), CliError> {
    let content = read_value(input.content, input.content_file)?;
    let mut form = PostForm::new(PostDraft::create_defaults(), CLI_SUBMIT_LABEL);
    form.set_field(PostField::Title, input.title);
    form.set_field(PostField::Content, content);
    form.set_field(PostField::Type, input.post_type.as_str());
    form.set_field(PostField::Status, input.status.as_str());
    form.set_field(PostField::AuthorId, input.author_id);

    let payload = form.submit()?;
    let created = api.create_post(&payload).await?;
    print_json(&created)
}

async fn update(api: &dyn PostsApi, input: PostUpdateInput) -> Result<(), CliError> {
    let content = read_opt_value(input.content, input.content_file)?;
    let current = api
        .get_post(input.id)
        .await?
        .ok_or(CliError::NotFound(input.id))?;

    let mut form = PostForm::new(PostDraft::from(&current), CLI_SUBMIT_LABEL);
    if let Some(title) = input.title {
        form.set_field(PostField::Title, title);
    }
    if let Some(content) = content {
        form.set_field(PostField::Content, content);
    }
    if let Some(post_type) = input.post_type {
        form.set_field(PostField::Type, post_type.as_str());
    }
    if let Some(status) = input.status {
        form.set_field(PostField::Status, status.as_str());
    }
    if let Some(author_id) = input.author_id {
        form.set_field(PostField::AuthorId, author_id);
    }

    let payload = form.submit()?;
    let updated = api.update_post(input.id, &payload).await?;
    print_json(&updated)
}

async fn delete(api: &dyn PostsApi, id: PostId, confirmed: bool) -> Result<(), CliError> {
    if !confirmed {
        return Err(CliError::NotConfirmed(id));
    }
    api.delete_post(id).await?;
    print_json(&serde_json::json!({ "deleted": id }))
}

async fn search(api: &dyn PostsApi, query: &str) -> Result<(), CliError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(CliError::InvalidInput("search query must not be blank".into()));
    }
    let posts = api.search_posts(query).await?;
    print_json(&posts)
}
