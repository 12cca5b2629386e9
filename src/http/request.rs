//! Request handling: request IDs and the minify request schema.
//!
//! # Responsibilities
//! - Generate a UUID v4 request ID for every request
//! - Decode form-encoded or JSON bodies into [`MinifyRequest`]
//!
//! # Design Decisions
//! - Form bodies use bracket nesting for options: `options[toplevel]=true`
//! - Bodies with any other content type decode to an empty request, so the
//!   handler reports the missing `code` itself
//! - JSON option values may be strings, booleans, numbers or null; they are
//!   stringified so every normalizer sees the same raw shape

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderValue},
};
use serde::Deserialize;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::http::response::AppError;
use crate::options::OptionSet;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// The body shared by every content endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MinifyRequest {
    /// Source to transform. Absent when the client sent none.
    pub code: Option<String>,
    /// Raw option strings; empty when the client sent none.
    pub options: OptionSet,
}

impl MinifyRequest {
    /// The submitted code, treating an empty string as missing.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref().filter(|c| !c.is_empty())
    }

    /// Decode an `application/x-www-form-urlencoded` body.
    pub fn from_form(body: &[u8]) -> Self {
        let mut request = MinifyRequest::default();

        for (key, value) in url::form_urlencoded::parse(body) {
            if key == "code" {
                request.code = Some(value.into_owned());
            } else if let Some(name) = option_name(&key) {
                request.options.insert(name.to_string(), value.into_owned());
            }
        }

        request
    }

    /// Decode an `application/json` body.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        let raw: JsonBody = serde_json::from_slice(body)?;

        let options = raw
            .options
            .unwrap_or_default()
            .into_iter()
            .map(|(key, value)| (key, json_option_string(value)))
            .collect();

        Ok(Self {
            code: raw.code,
            options,
        })
    }
}

/// `options[name]` → `name`.
fn option_name(key: &str) -> Option<&str> {
    key.strip_prefix("options[")
        .and_then(|rest| rest.strip_suffix(']'))
        .filter(|name| !name.is_empty())
}

fn json_option_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[derive(Deserialize)]
struct JsonBody {
    code: Option<String>,
    options: Option<serde_json::Map<String, serde_json::Value>>,
}

impl<S> FromRequest<S> for MinifyRequest
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_ascii_lowercase())
            .unwrap_or_default();

        let body = Bytes::from_request(req, state)
            .await
            .map_err(AppError::Body)?;

        if content_type.starts_with("application/json") {
            MinifyRequest::from_json(&body).map_err(|e| AppError::InvalidBody(e.to_string()))
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            Ok(MinifyRequest::from_form(&body))
        } else {
            Ok(MinifyRequest::default())
        }
    }
}
