//! Error handling for the bookner server

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// API error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Server error types
#[derive(Debug, Error)]
pub enum ServerError {
    /// Bookner library error
    #[error("{0}")]
    BookNer(#[from] bookner::BookNerError),

    /// Bad request error
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl ServerError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::BookNer(bookner::BookNerError::InvalidInput(_))
            | ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::BookNer(bookner::BookNerError::Extraction { .. }) => {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            ServerError::BookNer(bookner::BookNerError::InvalidInput(_)) => "invalid_input",
            ServerError::BookNer(bookner::BookNerError::Extraction { .. }) => "extraction_error",
            ServerError::BookNer(_) => "bookner_error",
            ServerError::BadRequest(_) => "bad_request",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let error_response = ErrorResponse {
            error: self.error_type().to_string(),
            message: self.to_string(),
        };

        (status, Json(error_response)).into_response()
    }
}

/// Result type for server operations
pub type ServerResult<T> = Result<T, ServerError>;

/// Helper function to create a bad request error
pub fn bad_request(message: &str) -> ServerError {
    ServerError::BadRequest(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookner::BookNerError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ServerError::BadRequest("no text".into()), StatusCode::BAD_REQUEST, "bad_request"),
            (
                BookNerError::InvalidInput("empty".into()).into(),
                StatusCode::BAD_REQUEST,
                "invalid_input",
            ),
            (
                BookNerError::extraction("general", "timed out").into(),
                StatusCode::BAD_GATEWAY,
                "extraction_error",
            ),
            (
                BookNerError::Configuration("missing extractor".into()).into(),
                StatusCode::INTERNAL_SERVER_ERROR,
                "bookner_error",
            ),
        ];

        for (error, status, error_type) in cases {
            assert_eq!(error.status_code(), status);
            assert_eq!(error.error_type(), error_type);
        }
    }
}
