//! Question endpoint

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap},
    Json,
};

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{PredictionRequest, PredictionResponse};

/// POST /api/request - Answer a question about the university
pub async fn handle_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<PredictionResponse>> {
    let logger = state.logger();

    let Json(request) = parse_request(&headers, &body).map_err(|detail| {
        match request_id_hint(&body) {
            Some(id) => logger.error(format!("Validation error for request {}: {}", id, detail)),
            None => logger.error(format!("Validation error for request: {}", detail)),
        }
        Error::validation(detail)
    })?;

    logger.info(format!("Processing prediction request with id: {}", request.id));

    match process(&state, &request).await {
        Ok(response) => {
            logger.info(format!("Successfully processed request {}", request.id));
            Ok(Json(response))
        }
        Err(Error::Validation(msg)) => {
            logger.error(format!("Validation error for request {}: {}", request.id, msg));
            Err(Error::Validation(msg))
        }
        Err(e) => {
            logger.error(format!(
                "Internal error processing request {}: {}",
                request.id, e
            ));
            tracing::error!(request_id = %request.id, "Pipeline failed: {}", e);
            Err(e)
        }
    }
}

async fn process(state: &AppState, request: &PredictionRequest) -> Result<PredictionResponse> {
    if request.query.trim().is_empty() {
        return Err(Error::validation("query must not be empty"));
    }

    let result = state.assistant().answer(&request.query).await?;
    state
        .logger()
        .info(format!("Results from id: {} # {:?}", request.id, result));

    Ok(PredictionResponse::new(request.id.clone(), result))
}

/// Decode the body, requiring a JSON content type
fn parse_request(
    headers: &HeaderMap,
    body: &[u8],
) -> std::result::Result<Json<PredictionRequest>, String> {
    if !has_json_content_type(headers) {
        return Err("Expected request with `Content-Type: application/json`".to_string());
    }
    Json::from_bytes(body).map_err(|rejection| rejection.body_text())
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
        })
        .unwrap_or(false)
}

/// `id` of a rejected body, when it is still a JSON object carrying one
fn request_id_hint(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    match value.as_object()?.get("id")? {
        serde_json::Value::String(id) => Some(id.clone()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}
