use std::error::Error as StdError;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{
    application::{form::ValidationError, ports::RequestError},
    config::LoadError,
    infra::error::InfraError,
};

/// Failures a view turns into local state.
#[derive(Debug, Error)]
pub enum ViewError {
    /// Loading a list or a single post failed.
    #[error("fetch failed: {0}")]
    Fetch(RequestError),
    /// Create, update or delete failed.
    #[error("mutation failed: {0}")]
    Mutation(RequestError),
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
}

impl ViewError {
    pub fn kind(&self) -> &'static str {
        match self {
            ViewError::Fetch(_) => "fetch",
            ViewError::Mutation(_) => "mutation",
            ViewError::Validation(_) => "validation",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub source: &'static str,
    pub status: StatusCode,
    pub messages: Vec<String>,
}

impl ErrorReport {
    pub fn from_error(source: &'static str, status: StatusCode, error: &dyn StdError) -> Self {
        let mut messages = vec![error.to_string()];
        let mut current = error.source();
        while let Some(inner) = current {
            messages.push(inner.to_string());
            current = inner.source();
        }
        Self {
            source,
            status,
            messages,
        }
    }

    pub fn from_message(
        source: &'static str,
        status: StatusCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source,
            status,
            messages: vec![message.into()],
        }
    }

    pub fn attach(self, response: &mut Response) {
        response.extensions_mut().insert(self);
    }
}

#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    public_message: &'static str,
    report: ErrorReport,
}

impl HttpError {
    pub fn from_error(
        source: &'static str,
        status: StatusCode,
        public_message: &'static str,
        error: &dyn StdError,
    ) -> Self {
        let report = ErrorReport::from_error(source, status, error);
        Self {
            status,
            public_message,
            report,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let mut response = (self.status, self.public_message).into_response();
        self.report.attach(&mut response);
        response
    }
}

/// Startup failures of the desk binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] LoadError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error("posts api client could not be created: {0}")]
    Client(#[from] RequestError),
}
