//! Response bodies and error mapping.
//!
//! # Design Decisions
//! - Every error is a 500 except undecodable or oversized bodies
//! - Missing code and HTML failures answer with a bare JSON string
//! - Error payloads never carry backtraces or file paths; `details` is only
//!   filled in development

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::minify::{Language, MinifyError};

/// Body returned when `code` is missing or empty.
pub const NO_CODE_MESSAGE: &str = "No code. :(";

/// Body returned for any HTML minification failure.
pub const HTML_ERROR_MESSAGE: &str =
    "HTML Minify does not report any useful errors, but there was an error. :(";

/// Successful minification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinifiedCode {
    pub code: String,
}

/// Body of `GET /status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Error payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error message
    pub message: String,
    /// Underlying error text (development only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// `code` absent or empty.
    MissingCode,
    /// The minifier rejected the input.
    Minify {
        language: Language,
        error: MinifyError,
        expose_details: bool,
    },
    /// A JSON body that does not decode.
    InvalidBody(String),
    /// The body could not be read (too large, connection error).
    Body(BytesRejection),
    /// The blocking minify task panicked or was cancelled.
    TaskFailed,
}

impl AppError {
    /// Status code this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            AppError::Body(rejection) => rejection.status(),
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AppError::MissingCode => (status, Json(NO_CODE_MESSAGE)).into_response(),
            AppError::Minify {
                language: Language::Html,
                ..
            } => (status, Json(HTML_ERROR_MESSAGE)).into_response(),
            AppError::Minify {
                language: Language::Javascript,
                error,
                ..
            } => (status, Json(ErrorBody::new(error.to_string()))).into_response(),
            AppError::Minify {
                language,
                error,
                expose_details,
            } => {
                let mut body = ErrorBody::new(format!("{} could not be minified", language.display_name()));
                if expose_details {
                    body = body.with_details(error.to_string());
                }
                (status, Json(body)).into_response()
            }
            AppError::InvalidBody(msg) => {
                (status, Json(ErrorBody::new("Request body could not be decoded").with_details(msg)))
                    .into_response()
            }
            AppError::Body(rejection) => rejection.into_response(),
            AppError::TaskFailed => (status, Json(ErrorBody::new("Internal server error"))).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_missing_code() {
        let response = AppError::MissingCode.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, serde_json::json!("No code. :("));
    }

    #[tokio::test]
    async fn test_css_details_only_in_development() {
        let error = || MinifyError::CssParse("Unexpected token".into());

        let response = AppError::Minify {
            language: Language::Css,
            error: error(),
            expose_details: false,
        }
        .into_response();
        let body = body_json(response).await;
        assert_eq!(body["message"], "CSS could not be minified");
        assert!(body.get("details").is_none());

        let response = AppError::Minify {
            language: Language::Css,
            error: error(),
            expose_details: true,
        }
        .into_response();
        assert_eq!(body_json(response).await["details"], "Unexpected token");
    }

    #[tokio::test]
    async fn test_html_generic_message() {
        let response = AppError::Minify {
            language: Language::Html,
            error: MinifyError::Javascript("ignored".into()),
            expose_details: true,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, serde_json::json!(HTML_ERROR_MESSAGE));
    }

    #[tokio::test]
    async fn test_invalid_body_is_bad_request() {
        let response = AppError::InvalidBody("expected value".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
