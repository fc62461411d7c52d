#![deny(clippy::all, clippy::pedantic)]

use blogdesk::{
    application::{form::ValidationError, ports::RequestError},
    infra::api::ApiClient,
};
use blogdesk_api_types::PostId;
use thiserror::Error;

use crate::args::Cli;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read input file {path}: {source}")]
    InputFile {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid post: {0}")]
    Validation(#[from] ValidationError),
    #[error("post {0} not found")]
    NotFound(PostId),
    #[error("delete of post {0} not confirmed (pass --yes)")]
    NotConfirmed(PostId),
    #[error("{}", describe_request_error(.0))]
    Request(#[from] RequestError),
    #[error("failed to render output: {0}")]
    Output(String),
}

fn describe_request_error(err: &RequestError) -> String {
    match (err.status(), err.server_message()) {
        (Some(status), Some(message)) => format!("server answered {status}: {message}"),
        _ => err.to_string(),
    }
}

pub fn build_client_from_cli(cli: &Cli) -> Result<ApiClient, CliError> {
    let url = cli.api_url.trim();
    if url.is_empty() {
        return Err(CliError::InvalidInput(
            "api url is required (use --api-url or BLOGDESK_API_URL)".into(),
        ));
    }
    Ok(ApiClient::new(url)?)
}
