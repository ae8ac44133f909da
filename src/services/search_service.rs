use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::TavilySettings;
use crate::error::{ChatError, Result};
use crate::models::SearchResult;

const SERVICE_NAME: &str = "Tavily";

/// A hosted web search returning ranked hits for a free-text query.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>>;
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    max_results: u32,
    search_depth: &'a str,
    topic: &'a str,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Clone)]
pub struct TavilyService {
    client: Client,
    settings: TavilySettings,
}

impl TavilyService {
    pub fn new(client: Client, settings: TavilySettings) -> Self {
        Self { client, settings }
    }
}

#[async_trait]
impl SearchProvider for TavilyService {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let body = SearchRequest {
            query,
            max_results: self.settings.max_results,
            search_depth: &self.settings.search_depth,
            topic: &self.settings.topic,
        };

        debug!(query, max_results = self.settings.max_results, "sending Tavily search");

        let response = self
            .client
            .post(format!("{}/search", self.settings.base_url))
            .bearer_auth(&self.settings.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Api {
                service: SERVICE_NAME,
                status: status.as_u16(),
                body,
            });
        }

        let parsed: SearchResponse = response.json().await?;
        debug!(hits = parsed.results.len(), "Tavily search finished");
        Ok(parsed.results)
    }
}
