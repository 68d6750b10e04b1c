//! Answer stage: structured answer over the search context

use std::sync::Arc;

use crate::error::Result;
use crate::generation::PromptBuilder;
use crate::providers::LlmProvider;
use crate::types::AnswerDraft;

/// Produces the answer, reasoning and cited source numbers
pub struct Answerer {
    llm: Arc<dyn LlmProvider>,
}

impl Answerer {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Answer `question` given the rendered search context
    pub async fn answer(&self, question: &str, context: &str) -> Result<AnswerDraft> {
        let messages = PromptBuilder::answer_messages(question, context);
        let schema = PromptBuilder::answer_schema();

        tracing::info!("Generating answer with model: {}", self.llm.model());

        let raw = self.llm.generate_structured(&messages, &schema).await?;
        AnswerDraft::from_value(raw)
    }
}
