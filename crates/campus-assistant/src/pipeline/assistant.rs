//! Pipeline controller: classify, search, answer, resolve sources

use std::sync::Arc;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::generation::{build_context, resolve_sources};
use crate::providers::{LlmProvider, SearchProvider};
use crate::retrieval::WebRetriever;
use crate::types::{AssistantAnswer, QuestionCategory};

use super::answerer::Answerer;
use super::classifier::Classifier;

/// Reasoning returned for questions outside the service's subject
pub const IRRELEVANT_REASONING: &str = "Вопрос не связан с тематикой сервиса!";

/// Trailing note naming the model, appended to every reasoning string
pub fn attribution_suffix(model: &str) -> String {
    format!("\nAnswer prepared by model {}.", model)
}

/// Question-answering pipeline
pub struct Assistant {
    classifier: Classifier,
    retriever: WebRetriever,
    answerer: Answerer,
    model_name: String,
}

impl Assistant {
    /// Build the pipeline over a model and a search backend
    pub fn new(
        llm: Arc<dyn LlmProvider>,
        search: Arc<dyn SearchProvider>,
        config: &PipelineConfig,
    ) -> Self {
        Self {
            model_name: llm.model().to_string(),
            classifier: Classifier::new(Arc::clone(&llm)),
            answerer: Answerer::new(llm),
            retriever: WebRetriever::new(search, config),
        }
    }

    /// Model named in the attribution suffix
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Answer a question end to end
    ///
    /// Any stage failure aborts the whole call; there are no retries.
    pub async fn answer(&self, question: &str) -> Result<AssistantAnswer> {
        let classification = self.classifier.classify(question).await?;

        let mut result = match classification.category {
            QuestionCategory::Irrelevant => AssistantAnswer {
                answer: None,
                reasoning: IRRELEVANT_REASONING.to_string(),
                sources: Vec::new(),
            },
            category => {
                self.answer_relevant(question, category, &classification.search_query)
                    .await?
            }
        };

        result.reasoning.push_str(&attribution_suffix(&self.model_name));
        Ok(result)
    }

    async fn answer_relevant(
        &self,
        question: &str,
        category: QuestionCategory,
        search_query: &str,
    ) -> Result<AssistantAnswer> {
        let k = self.retriever.max_results();
        let hits = self.retriever.retrieve(search_query).await?;
        let context = build_context(&hits, k);

        let draft = self.answerer.answer(question, &context).await?;
        let sources = resolve_sources(&draft.sources, &hits, k)?;

        let answer = match category {
            QuestionCategory::MultipleChoice => draft.choice()?,
            _ => None,
        };

        Ok(AssistantAnswer {
            answer,
            reasoning: draft.reasoning,
            sources,
        })
    }
}
