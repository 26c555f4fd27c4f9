//! Typed errors and HTTP mapping.

use crate::response::Envelope;
use crate::validation::ValidationErrors;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("CONFIG_PATH environment variable not set")]
    MissingPath,
    #[error("config file does not exist: {0}")]
    FileNotFound(String),
    #[error("config load: {0}")]
    Load(String),
    #[error("validation: {0}")]
    Validation(String),
}

/// Failure of a record store operation.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("user not found")]
    NotFound,
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

/// Store operation a handler was performing when it failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
}

impl Operation {
    /// Client-facing message for a failed store call.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Create => "Failed to create user",
            Operation::Read => "User not found",
            Operation::Update => "Failed to edit user",
            Operation::Delete => "Failed to delete user",
        }
    }
}

/// Error category carried on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Decode,
    InvalidIdentifier,
    Validation,
    NotFound,
    Persistence,
    Timeout,
    Internal,
}

impl ErrorKind {
    /// Transport status used when the service reports errors as HTTP statuses.
    pub fn http_status(self) -> StatusCode {
        match self {
            ErrorKind::Decode | ErrorKind::InvalidIdentifier | ErrorKind::Validation => {
                StatusCode::BAD_REQUEST
            }
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Persistence | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::Timeout => StatusCode::REQUEST_TIMEOUT,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("decode: {0}")]
    Decode(String),
    #[error("invalid uuid: {0}")]
    InvalidId(#[from] uuid::Error),
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("{op:?}: {source}")]
    Store {
        op: Operation,
        #[source]
        source: StoreError,
    },
}

impl AppError {
    pub fn store(op: Operation, source: StoreError) -> Self {
        AppError::Store { op, source }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Decode(_) => ErrorKind::Decode,
            AppError::InvalidId(_) => ErrorKind::InvalidIdentifier,
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::Store {
                source: StoreError::NotFound,
                ..
            } => ErrorKind::NotFound,
            AppError::Store { .. } => ErrorKind::Persistence,
        }
    }

    /// Fixed message sent to the client. Internal detail stays in the logs.
    pub fn client_message(&self) -> &'static str {
        match self {
            AppError::Decode(_) => "Failed to decode request body",
            AppError::InvalidId(_) => "Invalid UUID",
            AppError::Validation(_) => "Failed to validate request body",
            AppError::Store { op, .. } => op.failure_message(),
        }
    }
}

/// Attached to every error response so the status-mode mapper can rewrite it.
#[derive(Clone, Debug)]
pub struct ErrorOutcome {
    pub kind: ErrorKind,
    pub message: &'static str,
}

impl ErrorOutcome {
    /// Outcome for a bare failure status produced below the handlers (request
    /// timeout, caught panic), which carry no envelope of their own.
    pub fn from_transport(status: StatusCode) -> Option<Self> {
        match status {
            StatusCode::REQUEST_TIMEOUT => Some(ErrorOutcome {
                kind: ErrorKind::Timeout,
                message: "Request timed out",
            }),
            StatusCode::INTERNAL_SERVER_ERROR => Some(ErrorOutcome {
                kind: ErrorKind::Internal,
                message: "Internal server error",
            }),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self.kind() {
            ErrorKind::Persistence => tracing::error!(error = %self, "request failed"),
            _ => tracing::warn!(error = %self, "request rejected"),
        }
        let outcome = ErrorOutcome {
            kind: self.kind(),
            message: self.client_message(),
        };
        let mut response = (StatusCode::OK, Json(Envelope::error(outcome.message))).into_response();
        response.extensions_mut().insert(outcome);
        response
    }
}
