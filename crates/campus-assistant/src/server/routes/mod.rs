//! API routes for the assistant server

pub mod request;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/request", post(request::handle_request))
        .route("/info", get(info))
}

/// API info endpoint
async fn info(State(state): State<AppState>) -> Json<serde_json::Value> {
    let pipeline = &state.config().pipeline;

    Json(serde_json::json!({
        "name": "campus-assistant",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Answers questions about ITMO University using classified web search",
        "model": state.assistant().model_name(),
        "search": {
            "max_results": pipeline.max_results,
            "search_depth": pipeline.search_depth,
            "include_domains": pipeline.include_domains,
        },
        "endpoints": {
            "POST /api/request": "Answer a question: {id, query} -> {id, answer, reasoning, sources}",
            "GET /api/info": "Service description",
            "GET /health": "Liveness check"
        }
    }))
}
