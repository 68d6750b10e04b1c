//! Request/response logging middleware

use axum::{
    body::{to_bytes, Body, Bytes},
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::time::Instant;
use uuid::Uuid;

use crate::error::{Error, INTERNAL_ERROR_DETAIL};
use crate::server::state::AppState;

/// Log the raw request body, then the response status, body and duration
///
/// Both bodies are buffered so they can be logged; the response is passed
/// on unchanged. Request bodies over `server.max_body_size` are rejected here.
pub async fn log_requests(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let start = Instant::now();
    let logger = state.logger();
    let limit = state.config().server.max_body_size;
    let request_id = Uuid::new_v4();

    let method = request.method().clone();
    let uri = request.uri().clone();

    let (parts, body) = request.into_parts();
    let response = match to_bytes(body, limit).await {
        Ok(body) => {
            logger.info(format!(
                "[{}] Incoming request: {} {}\nRequest body: {}",
                request_id,
                method,
                uri,
                String::from_utf8_lossy(&body)
            ));
            next.run(Request::from_parts(parts, Body::from(body))).await
        }
        Err(e) => {
            logger.error(format!(
                "[{}] Incoming request: {} {}\nFailed to read request body: {}",
                request_id, method, uri, e
            ));
            Error::validation(format!(
                "Request body is unreadable or larger than {} bytes",
                limit
            ))
            .into_response()
        }
    };

    let (parts, body) = response.into_parts();
    let (parts, body) = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => (parts, bytes),
        Err(e) => {
            logger.error(format!(
                "[{}] Failed to read response body: {} {}: {}",
                request_id, method, uri, e
            ));
            let (parts, _) = Error::internal("response body unreadable")
                .into_response()
                .into_parts();
            (
                parts,
                Bytes::from(json!({ "detail": INTERNAL_ERROR_DETAIL }).to_string()),
            )
        }
    };

    logger.info(format!(
        "[{}] Request completed: {} {}\nStatus: {}\nResponse body: {}\nDuration: {:.3}s",
        request_id,
        method,
        uri,
        parts.status.as_u16(),
        String::from_utf8_lossy(&body),
        start.elapsed().as_secs_f64()
    ));

    Response::from_parts(parts, Body::from(body))
}
