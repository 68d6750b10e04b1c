//! Classifier stage: question category and search query

use std::sync::Arc;

use crate::error::Result;
use crate::generation::PromptBuilder;
use crate::providers::LlmProvider;
use crate::types::Classification;

/// Decides whether and how a question should be answered
pub struct Classifier {
    llm: Arc<dyn LlmProvider>,
}

impl Classifier {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Classify `question` and produce a search query for it
    pub async fn classify(&self, question: &str) -> Result<Classification> {
        let messages = PromptBuilder::classifier_messages(question);
        let schema = PromptBuilder::classifier_schema();

        let raw = self.llm.generate_structured(&messages, &schema).await?;
        let classification = Classification::from_value(raw)?;

        tracing::info!(
            "Classified as {:?}, search query: \"{}\"",
            classification.category,
            classification.search_query
        );

        Ok(classification)
    }
}
