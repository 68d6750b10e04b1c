//! Application state for the assistant server

use std::sync::Arc;

use crate::config::AssistantConfig;
use crate::error::Result;
use crate::logging::RequestLogger;
use crate::pipeline::Assistant;
use crate::providers::{LlmProvider, OpenAiClient, SearchProvider, TavilyClient};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: AssistantConfig,
    /// Question answering pipeline
    assistant: Assistant,
    /// Request log handle
    logger: RequestLogger,
}

impl AppState {
    /// Create state backed by the OpenAI and Tavily clients
    pub fn new(config: AssistantConfig, logger: RequestLogger) -> Result<Self> {
        let llm: Arc<dyn LlmProvider> = Arc::new(OpenAiClient::new(&config.llm)?);
        let search: Arc<dyn SearchProvider> = Arc::new(TavilyClient::new(&config.search)?);

        tracing::info!(
            "Providers initialized (llm: {} / {}, search: {})",
            llm.name(),
            llm.model(),
            search.name()
        );

        Ok(Self::with_providers(config, llm, search, logger))
    }

    /// Create state over explicit providers
    pub fn with_providers(
        config: AssistantConfig,
        llm: Arc<dyn LlmProvider>,
        search: Arc<dyn SearchProvider>,
        logger: RequestLogger,
    ) -> Self {
        let assistant = Assistant::new(llm, search, &config.pipeline);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                assistant,
                logger,
            }),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &AssistantConfig {
        &self.inner.config
    }

    /// Get the pipeline
    pub fn assistant(&self) -> &Assistant {
        &self.inner.assistant
    }

    /// Get the request log handle
    pub fn logger(&self) -> &RequestLogger {
        &self.inner.logger
    }
}
