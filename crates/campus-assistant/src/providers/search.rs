//! Search provider trait for web retrieval

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{SearchHit, SearchRequest};

/// Trait for web search backends
///
/// Implementations:
/// - `TavilyClient`: Tavily search API
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run a search and return hits in provider rank order
    ///
    /// An empty vector is a normal outcome, not an error.
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchHit>>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
