//! HTTP request and response contract

use serde::{Deserialize, Serialize};

use super::answer::AssistantAnswer;

/// Body of `POST /api/request`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRequest {
    /// Caller-chosen identifier echoed back in the response
    pub id: String,
    /// The question to answer
    pub query: String,
}

/// Successful response of `POST /api/request`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub id: String,
    /// Chosen option (1-10) for multiple-choice questions, otherwise null
    pub answer: Option<u8>,
    pub reasoning: String,
    /// Source URLs backing the answer
    pub sources: Vec<String>,
}

impl PredictionResponse {
    /// Wrap a pipeline result with the request id
    pub fn new(id: impl Into<String>, answer: AssistantAnswer) -> Self {
        Self {
            id: id.into(),
            answer: answer.answer,
            reasoning: answer.reasoning,
            sources: answer.sources,
        }
    }
}
