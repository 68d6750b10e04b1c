//! Error types for the assistant service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for assistant operations
pub type Result<T> = std::result::Result<T, Error>;

/// Message returned to clients for every non-validation failure
pub const INTERNAL_ERROR_DETAIL: &str = "Internal server error";

/// Pipeline stage that produced a structured model response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Classifier,
    Answerer,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Classifier => f.write_str("classifier"),
            Stage::Answerer => f.write_str("answerer"),
        }
    }
}

/// Assistant errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Caller-supplied input was rejected
    #[error("{0}")]
    Validation(String),

    /// Language model call failed
    #[error("LLM error: {0}")]
    Llm(String),

    /// Search provider call failed
    #[error("Search error: {0}")]
    Search(String),

    /// Model output did not match the stage contract
    #[error("Schema violation in {stage} output: {message}")]
    SchemaViolation { stage: Stage, message: String },

    /// Model cited a source it was never shown
    #[error("Invalid citation index {index}: {available} source(s) available")]
    InvalidCitation { index: usize, available: usize },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an LLM error
    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm(message.into())
    }

    /// Create a search error
    pub fn search(message: impl Into<String>) -> Self {
        Self::Search(message.into())
    }

    /// Create a schema violation for the given stage
    pub fn schema(stage: Stage, message: impl Into<String>) -> Self {
        Self::SchemaViolation {
            stage,
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// HTTP status this error maps to at the API boundary
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Detail string safe to show to the caller
    pub fn public_detail(&self) -> String {
        match self {
            Error::Validation(msg) => msg.clone(),
            _ => INTERNAL_ERROR_DETAIL.to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let body = Json(json!({ "detail": self.public_detail() }));
        (self.status_code(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err = Error::validation("field `query` is missing");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.public_detail(), "field `query` is missing");
    }

    #[test]
    fn test_internal_errors_hide_detail() {
        let errors = vec![
            Error::llm("upstream 502: secret body"),
            Error::search("quota exceeded"),
            Error::schema(Stage::Answerer, "missing field `reasoning`"),
            Error::InvalidCitation { index: 7, available: 2 },
        ];

        for err in errors {
            assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(err.public_detail(), INTERNAL_ERROR_DETAIL);
        }
    }

    #[test]
    fn test_schema_violation_display_names_stage() {
        let err = Error::schema(Stage::Classifier, "missing field `search_query`");
        assert_eq!(
            err.to_string(),
            "Schema violation in classifier output: missing field `search_query`"
        );
    }
}
