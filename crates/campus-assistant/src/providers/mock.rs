//! Scripted providers for testing and offline development
//!
//! `MockLlm` replies per output schema with canned JSON and `MockSearch`
//! returns a fixed hit list. Both record every call so tests can assert
//! which stages ran and what they were sent.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{Error, Result};
use crate::types::{SearchHit, SearchRequest};

use super::llm::{ChatMessage, LlmProvider, OutputSchema};
use super::search::SearchProvider;

#[derive(Debug, Clone)]
enum MockReply {
    Json(serde_json::Value),
    Fail(String),
}

/// LLM that answers each schema with a scripted reply
#[derive(Debug)]
pub struct MockLlm {
    model: String,
    replies: HashMap<String, MockReply>,
    calls: Mutex<Vec<(String, Vec<ChatMessage>)>>,
}

impl MockLlm {
    /// Create a mock reporting the given model name
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            replies: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Reply to `schema_name` with this JSON value
    pub fn with_response(mut self, schema_name: &str, value: serde_json::Value) -> Self {
        self.replies
            .insert(schema_name.to_string(), MockReply::Json(value));
        self
    }

    /// Fail every call for `schema_name` with an LLM error
    pub fn with_failure(mut self, schema_name: &str, message: impl Into<String>) -> Self {
        self.replies
            .insert(schema_name.to_string(), MockReply::Fail(message.into()));
        self
    }

    /// Number of calls made with `schema_name`
    pub fn calls_for(&self, schema_name: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|(name, _)| name == schema_name)
            .count()
    }

    /// Messages of the most recent call made with `schema_name`
    pub fn last_messages(&self, schema_name: &str) -> Option<Vec<ChatMessage>> {
        self.calls
            .lock()
            .iter()
            .rev()
            .find(|(name, _)| name == schema_name)
            .map(|(_, messages)| messages.clone())
    }
}

#[async_trait]
impl LlmProvider for MockLlm {
    async fn generate_structured(
        &self,
        messages: &[ChatMessage],
        schema: &OutputSchema,
    ) -> Result<serde_json::Value> {
        self.calls
            .lock()
            .push((schema.name.to_string(), messages.to_vec()));

        match self.replies.get(schema.name) {
            Some(MockReply::Json(value)) => Ok(value.clone()),
            Some(MockReply::Fail(message)) => Err(Error::llm(message.clone())),
            None => Err(Error::llm(format!("No scripted reply for {}", schema.name))),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Search backend returning a fixed hit list
#[derive(Debug, Default)]
pub struct MockSearch {
    hits: Vec<SearchHit>,
    failure: Option<String>,
    calls: AtomicUsize,
    requests: Mutex<Vec<SearchRequest>>,
}

impl MockSearch {
    /// Return these hits for every query
    pub fn new(hits: Vec<SearchHit>) -> Self {
        Self {
            hits,
            ..Default::default()
        }
    }

    /// Fail every query with a search error
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Default::default()
        }
    }

    /// Number of searches performed
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The most recent search request
    pub fn last_request(&self) -> Option<SearchRequest> {
        self.requests.lock().last().cloned()
    }
}

#[async_trait]
impl SearchProvider for MockSearch {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchHit>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request.clone());

        match &self.failure {
            Some(message) => Err(Error::search(message.clone())),
            None => Ok(self.hits.clone()),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
