//! Error types for the lookup service and its startup.

use std::path::PathBuf;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use subdex_core::error::DocumentStoreError;
use thiserror::Error;

use crate::{
    config::ConfigError,
    model::{ErrorBody, ValidationBody, ValidationIssue},
};

/// Errors surfaced by the search and detail operations.
#[derive(Error, Debug)]
pub enum SubstanceError {
    /// No record matched the name, exactly or ignoring case.
    #[error("Substance not found: {0}")]
    NotFound(String),
    /// The query string could not be decoded into the endpoint's parameters.
    #[error("invalid query string: {0}")]
    InvalidQuery(String),
    /// The store could not be reached or returned an unusable record.
    #[error(transparent)]
    Store(#[from] DocumentStoreError),
}

pub type SubstanceResult<T> = Result<T, SubstanceError>;

impl IntoResponse for SubstanceError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            SubstanceError::NotFound(_) => (StatusCode::NOT_FOUND, "Substance not found"),
            SubstanceError::InvalidQuery(msg) => {
                let body = ValidationBody {
                    detail: vec![ValidationIssue {
                        kind: "query_parsing".to_string(),
                        loc: vec!["query".to_string()],
                        msg: msg.clone(),
                    }],
                };

                return (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response();
            }
            SubstanceError::Store(err) => {
                tracing::error!(error = %err, "store call failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        };

        (status, Json(ErrorBody { detail: detail.to_string() })).into_response()
    }
}

/// Errors that abort process startup.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to open store: {0}")]
    Store(#[from] DocumentStoreError),
    #[error("failed to read seed file {path}: {source}")]
    SeedRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("seed file {path} is not a JSON array of documents: {source}")]
    SeedFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
