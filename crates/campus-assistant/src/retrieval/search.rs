//! Domain-restricted web retrieval

use std::sync::Arc;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::providers::SearchProvider;
use crate::types::{SearchHit, SearchRequest};

/// Runs searches against the allow-listed domains and caps the hit list
pub struct WebRetriever {
    provider: Arc<dyn SearchProvider>,
    max_results: usize,
    search_depth: String,
    include_domains: Vec<String>,
}

impl WebRetriever {
    /// Create a retriever over the given provider
    pub fn new(provider: Arc<dyn SearchProvider>, config: &PipelineConfig) -> Self {
        Self {
            provider,
            max_results: config.max_results,
            search_depth: config.search_depth.clone(),
            include_domains: config.include_domains.clone(),
        }
    }

    /// Maximum number of hits returned (k)
    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Search for `query`, returning at most k hits in provider order
    pub async fn retrieve(&self, query: &str) -> Result<Vec<SearchHit>> {
        let request = SearchRequest {
            query: query.to_string(),
            max_results: self.max_results,
            search_depth: self.search_depth.clone(),
            include_domains: self.include_domains.clone(),
        };

        let mut hits = self.provider.search(&request).await?;
        hits.truncate(self.max_results);

        tracing::info!(
            "Search via {} for \"{}\" returned {} hit(s)",
            self.provider.name(),
            query,
            hits.len()
        );

        Ok(hits)
    }
}
