//! HTTP handlers.
//!
//! Each content endpoint validates the body into a [`MinifyRequest`],
//! normalizes its options for the target minifier and runs the minifier on
//! the blocking pool.

use std::time::Instant;

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::http::request::MinifyRequest;
use crate::http::response::{AppError, MinifiedCode, StatusResponse};
use crate::http::server::AppState;
use crate::minify::{self, Language, MinifyError};
use crate::observability::metrics;
use crate::options::{self, OptionSet};

/// Result type for content handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// GET /
pub async fn root(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, state.redirect_url.to_string())],
    )
}

/// GET /status
pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse::ok())
}

/// Catch-all for unknown paths and wrong methods.
pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// POST /javascript/
pub async fn javascript(
    State(state): State<AppState>,
    request: MinifyRequest,
) -> HandlerResult<MinifiedCode> {
    run_minifier(
        &state,
        Language::Javascript,
        request,
        options::normalize_javascript,
        minify::minify_javascript,
    )
    .await
}

/// POST /css/
pub async fn css(State(state): State<AppState>, request: MinifyRequest) -> HandlerResult<MinifiedCode> {
    run_minifier(&state, Language::Css, request, options::normalize_css, minify::minify_css).await
}

/// POST /html/
pub async fn html(State(state): State<AppState>, request: MinifyRequest) -> HandlerResult<MinifiedCode> {
    run_minifier(&state, Language::Html, request, options::normalize_html, minify::minify_html).await
}

/// POST /gz/{file_name}
///
/// Compression failures are logged and answered with an empty 200 body.
pub async fn gz(Path(file_name): Path<String>, request: MinifyRequest) -> Result<Response, AppError> {
    let start = Instant::now();

    let Some(code) = request.code().map(str::to_owned) else {
        metrics::record_request("gz", 500, start);
        return Err(AppError::MissingCode);
    };
    let input_len = code.len();

    let compressed = match tokio::task::spawn_blocking(move || minify::gzip(code.as_bytes())).await {
        Ok(Ok(bytes)) => bytes,
        Ok(Err(e)) => {
            tracing::error!(file_name = %file_name, error = %e, "Gzip failed");
            Vec::new()
        }
        Err(e) => {
            tracing::error!(file_name = %file_name, error = %e, "Gzip task failed");
            Vec::new()
        }
    };

    metrics::record_sizes("gz", input_len, compressed.len());
    metrics::record_request("gz", 200, start);

    let mut response = compressed.into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/octet-stream"),
    );
    if let Some(disposition) = content_disposition(&file_name) {
        headers.insert(header::CONTENT_DISPOSITION, disposition);
    }

    Ok(response)
}

/// `attachment; filename="..."`, or `None` if the name cannot be carried in a
/// header.
fn content_disposition(file_name: &str) -> Option<HeaderValue> {
    let escaped = file_name.replace('\\', "\\\\").replace('"', "\\\"");
    HeaderValue::from_str(&format!("attachment; filename=\"{}\"", escaped)).ok()
}

async fn run_minifier<O, N, M>(
    state: &AppState,
    language: Language,
    request: MinifyRequest,
    normalize: N,
    minifier: M,
) -> HandlerResult<MinifiedCode>
where
    O: Serialize + Send + 'static,
    N: FnOnce(&OptionSet) -> O,
    M: FnOnce(&str, &O) -> Result<String, MinifyError> + Send + 'static,
{
    let start = Instant::now();
    let endpoint = language.as_str();

    let result: HandlerResult<MinifiedCode> = async {
        let code = request.code().ok_or(AppError::MissingCode)?.to_owned();
        let options = normalize(&request.options);
        tracing::debug!(
            endpoint,
            input_bytes = code.len(),
            options = %options_json(&options),
            "Minifying"
        );

        let input_len = code.len();
        let minified = tokio::task::spawn_blocking(move || minifier(&code, &options))
            .await
            .map_err(|e| {
                tracing::error!(endpoint, error = %e, "Minify task failed");
                AppError::TaskFailed
            })?
            .map_err(|error| {
                tracing::warn!(endpoint, error = %error, "Minification failed");
                AppError::Minify {
                    language,
                    error,
                    expose_details: state.environment.is_development(),
                }
            })?;

        metrics::record_sizes(endpoint, input_len, minified.len());
        Ok(Json(MinifiedCode { code: minified }))
    }
    .await;

    let status = match &result {
        Ok(_) => StatusCode::OK,
        Err(e) => e.status(),
    };
    metrics::record_request(endpoint, status.as_u16(), start);

    result
}

/// Normalized options rendered as compact JSON for logging.
fn options_json<O: Serialize>(options: &O) -> String {
    serde_json::to_string(options).unwrap_or_else(|e| format!("<unserializable: {}>", e))
}
