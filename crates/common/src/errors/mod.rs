//! Error types for the Objexis agent
//!
//! Two kinds of failure reach a caller:
//! - Validation errors (missing or malformed required input), surfaced verbatim as 400
//! - Everything else, surfaced as a generic 500 with the detail kept in the server log

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Public message for every server-side failure.
pub const UNAVAILABLE_MESSAGE: &str = "Agent is currently unavailable.";

/// Error codes for machine-readable error identification in logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Validation errors (1xxx)
    ValidationError,

    // Internal errors (9xxx)
    InternalError,
    ConfigurationError,
    SerializationError,
}

impl ErrorCode {
    /// Get the numeric code for this error
    pub fn as_code(&self) -> u16 {
        match self {
            ErrorCode::ValidationError => 1001,
            ErrorCode::InternalError => 9001,
            ErrorCode::ConfigurationError => 9002,
            ErrorCode::SerializationError => 9003,
        }
    }

    /// Label form used in logs and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
            ErrorCode::ConfigurationError => "CONFIGURATION_ERROR",
            ErrorCode::SerializationError => "SERIALIZATION_ERROR",
        }
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    #[error("Internal server error: {message}")]
    Internal { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    /// Validation failure for a required field
    pub fn required(field: &str, message: impl Into<String>) -> Self {
        AppError::Validation {
            message: message.into(),
            field: Some(field.to_string()),
        }
    }

    /// Internal failure with a diagnostic message
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::Internal {
            message: message.into(),
        }
    }

    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { .. } => ErrorCode::ValidationError,
            AppError::Internal { .. } => ErrorCode::InternalError,
            AppError::Configuration { .. } => ErrorCode::ConfigurationError,
            AppError::Serialization(_) => ErrorCode::SerializationError,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,

            AppError::Internal { .. }
            | AppError::Configuration { .. }
            | AppError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to hand back to the caller. Server errors never leak detail.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Validation { message, .. } => message.clone(),
            _ => UNAVAILABLE_MESSAGE.to_string(),
        }
    }

    /// Check if this error should be logged at error level
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Check if this error is a client error
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

/// Error body returned to API callers
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();
        let detail = self.to_string();

        if self.is_server_error() {
            tracing::error!(
                error = %detail,
                code = code.as_str(),
                error_code = code.as_code(),
                status = status.as_u16(),
                "Agent route error"
            );
        } else if self.is_client_error() {
            tracing::warn!(
                error = %detail,
                code = code.as_str(),
                error_code = code.as_code(),
                status = status.as_u16(),
                "Client error"
            );
        }

        let body = ErrorResponse {
            error: self.public_message(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Configuration {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = AppError::required("message", "Message is required.");
        assert_eq!(err.code(), ErrorCode::ValidationError);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.public_message(), "Message is required.");
        assert!(err.is_client_error());
        assert!(!err.is_server_error());
    }

    #[test]
    fn test_server_error_hides_detail() {
        let err = AppError::internal("phrase pool 'archetypes' is empty");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), UNAVAILABLE_MESSAGE);
        assert!(err.to_string().contains("archetypes"));
        assert!(err.is_server_error());
    }

    #[test]
    fn test_serialization_error_is_internal() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = AppError::from(parse);
        assert_eq!(err.code(), ErrorCode::SerializationError);
        assert_eq!(err.code().as_code(), 9003);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_config_error_mapping() {
        let err = AppError::from(config::ConfigError::Message("bad port".into()));
        assert_eq!(err.code(), ErrorCode::ConfigurationError);
        assert_eq!(err.public_message(), UNAVAILABLE_MESSAGE);
    }

    #[test]
    fn test_code_labels() {
        assert_eq!(ErrorCode::ValidationError.as_str(), "VALIDATION_ERROR");
        assert_eq!(ErrorCode::ValidationError.as_code(), 1001);
        assert_eq!(ErrorCode::SerializationError.as_str(), "SERIALIZATION_ERROR");
    }

    #[tokio::test]
    async fn test_into_response_body() {
        let response = AppError::required("message", "Message is required.").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: ErrorResponse = tokio_test::assert_ok!(serde_json::from_slice(&bytes));
        assert_eq!(body.error, "Message is required.");

        let response = AppError::internal("boom").into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(
            serde_json::from_slice::<serde_json::Value>(&bytes).unwrap(),
            serde_json::json!({ "error": UNAVAILABLE_MESSAGE })
        );
    }
}
