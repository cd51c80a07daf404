//! JSON bodies for rejections produced outside the handlers
//!
//! The timeout layer and the body limit answer with plain-text bodies; this
//! rewrites them into the `{error}` shape every other failure uses.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use objexis_common::errors::{ErrorResponse, UNAVAILABLE_MESSAGE};

/// Public message for a request body over the configured limit
pub const BODY_TOO_LARGE_MESSAGE: &str = "Request body is too large.";

/// Replace non-JSON 408 and 413 bodies with an error payload
pub async fn json_error_bodies(response: Response) -> Response {
    let message = match response.status() {
        StatusCode::PAYLOAD_TOO_LARGE => BODY_TOO_LARGE_MESSAGE,
        StatusCode::REQUEST_TIMEOUT => UNAVAILABLE_MESSAGE,
        _ => return response,
    };

    if is_json(&response) {
        return response;
    }

    let status = response.status();
    tracing::warn!(status = status.as_u16(), "Request rejected before reaching a handler");

    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .is_some_and(|value| value.as_bytes().starts_with(b"application/json"))
}
