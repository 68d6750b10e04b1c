//! Search result types

use serde::{Deserialize, Serialize};

/// A single ranked hit returned by the search provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Page URL
    pub url: String,
    /// Extracted page content used as model context
    pub content: String,
    /// Page title, if the provider returned one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Provider relevance score
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl SearchHit {
    /// Create a hit from a URL and its content
    pub fn new(url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content: content.into(),
            title: None,
            score: None,
        }
    }
}

/// Parameters of a single search call
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub max_results: usize,
    pub search_depth: String,
    pub include_domains: Vec<String>,
}
