//! Tavily web search client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::SearchConfig;
use crate::error::{Error, Result};
use crate::types::{SearchHit, SearchRequest};

use super::search::SearchProvider;

/// Tavily search API client
pub struct TavilyClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct TavilyRequest<'a> {
    query: &'a str,
    max_results: usize,
    search_depth: &'a str,
    include_domains: &'a [String],
    include_answer: bool,
    include_raw_content: bool,
}

#[derive(Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Deserialize)]
struct TavilyResult {
    #[serde(default)]
    url: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    score: Option<f64>,
}

impl TavilyClient {
    /// Create a new client from configuration
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/search", self.base_url)
    }
}

fn build_request(request: &SearchRequest) -> TavilyRequest<'_> {
    TavilyRequest {
        query: &request.query,
        max_results: request.max_results,
        search_depth: &request.search_depth,
        include_domains: &request.include_domains,
        include_answer: false,
        include_raw_content: false,
    }
}

/// Convert provider rows to hits, dropping rows without a URL
fn into_hits(response: TavilyResponse) -> Vec<SearchHit> {
    response
        .results
        .into_iter()
        .filter(|r| !r.url.trim().is_empty())
        .map(|r| SearchHit {
            url: r.url.trim().to_string(),
            content: r.content,
            title: r.title,
            score: r.score,
        })
        .collect()
}

#[async_trait]
impl SearchProvider for TavilyClient {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchHit>> {
        let body = build_request(request);

        let mut builder = self.client.post(self.endpoint()).json(&body);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Error::search(format!("Tavily request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::search(format!(
                "Tavily search failed: HTTP {} - {}",
                status, body
            )));
        }

        let payload: TavilyResponse = response
            .json()
            .await
            .map_err(|e| Error::search(format!("Failed to parse Tavily response: {}", e)))?;

        Ok(into_hits(payload))
    }

    fn name(&self) -> &str {
        "tavily"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body() {
        let request = SearchRequest {
            query: "ИТМО год основания".to_string(),
            max_results: 5,
            search_depth: "advanced".to_string(),
            include_domains: vec!["itmo.ru".to_string(), "news.itmo.ru".to_string()],
        };

        let body = serde_json::to_value(build_request(&request)).unwrap();
        assert_eq!(
            body,
            json!({
                "query": "ИТМО год основания",
                "max_results": 5,
                "search_depth": "advanced",
                "include_domains": ["itmo.ru", "news.itmo.ru"],
                "include_answer": false,
                "include_raw_content": false
            })
        );
    }

    #[test]
    fn test_into_hits_keeps_rank_and_drops_blank_urls() {
        let response: TavilyResponse = serde_json::from_value(json!({
            "query": "q",
            "results": [
                { "url": "https://itmo.ru/a", "content": "first", "score": 0.9 },
                { "url": " ", "content": "orphan" },
                { "url": "https://news.itmo.ru/b", "content": "second", "title": "B" }
            ]
        }))
        .unwrap();

        let hits = into_hits(response);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].url, "https://itmo.ru/a");
        assert_eq!(hits[0].score, Some(0.9));
        assert_eq!(hits[1].title.as_deref(), Some("B"));
    }

    #[test]
    fn test_missing_results_is_empty() {
        let response: TavilyResponse = serde_json::from_value(json!({ "query": "q" })).unwrap();
        assert!(into_hits(response).is_empty());
    }

    #[test]
    fn test_endpoint() {
        let client = TavilyClient::new(&SearchConfig::default()).unwrap();
        assert_eq!(client.endpoint(), "https://api.tavily.com/search");
    }
}
