//! The single JSON response writer shared by every handler and by
//! [`AppError`](crate::error::AppError).

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Body of every error response: `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Body of successful responses that carry no entity: `{"result": "success"}`.
#[derive(Debug, Serialize)]
pub struct ResultResponse {
    pub result: &'static str,
}

impl ResultResponse {
    pub fn success() -> Self {
        Self { result: "success" }
    }
}

/// Serialize `payload` and write it with `status` and a JSON content type.
///
/// A payload that fails to serialize becomes a 500 error body instead.
pub fn json_response<T: Serialize + ?Sized>(status: StatusCode, payload: &T) -> Response {
    match serde_json::to_vec(payload) {
        Ok(body) => with_json_content_type(status, body),
        Err(err) => {
            tracing::error!(error = %err, "Failed to serialize response payload");
            let body = serde_json::json!({ "error": "Failed to serialize response" }).to_string();
            with_json_content_type(StatusCode::INTERNAL_SERVER_ERROR, body.into_bytes())
        }
    }
}

/// Rewrite non-JSON error responses into the `{"error": "..."}` shape.
///
/// Covers responses produced outside the handlers: unknown routes,
/// disallowed methods, body-limit rejections, timeouts and caught panics.
/// The message is the status code's canonical reason; other headers
/// (e.g. `allow`) are kept.
pub async fn ensure_json_error(response: Response) -> Response {
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) || is_json(&response) {
        return response;
    }

    let (parts, _body) = response.into_parts();
    let message = status.canonical_reason().unwrap_or("Request failed");
    let mut rewritten = json_response(
        status,
        &ErrorResponse {
            error: message.to_string(),
        },
    );
    for (name, value) in parts.headers.iter() {
        if *name != header::CONTENT_TYPE && *name != header::CONTENT_LENGTH {
            rewritten.headers_mut().append(name.clone(), value.clone());
        }
    }
    rewritten
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

fn with_json_content_type(status: StatusCode, body: Vec<u8>) -> Response {
    (
        status,
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        )],
        body,
    )
        .into_response()
}
