// SPDX-License-Identifier: MIT

//! Web search via the Tavily API

use crate::error::{OutreachError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::env;
use url::Url;

/// One search result snippet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSnippet {
    pub title: String,
    pub url: String,
    pub content: String,
}

/// Search interface consumed by the research node
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<SearchSnippet>>;
}

pub struct TavilySearch {
    client: Client,
    api_key: String,
    base_url: String,
}

impl TavilySearch {
    /// Requires `TAVILY_API_KEY` environment variable to be set.
    pub fn new() -> Result<Self> {
        let api_key = env::var("TAVILY_API_KEY")
            .map_err(|_| OutreachError::config("TAVILY_API_KEY must be set"))?;
        Ok(Self {
            client: Client::new(),
            api_key,
            base_url: "https://api.tavily.com".to_string(),
        })
    }
}

#[async_trait]
impl SearchProvider for TavilySearch {
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<SearchSnippet>> {
        let url = Url::parse(&self.base_url)
            .and_then(|u| u.join("search"))
            .map_err(|e| OutreachError::config(format!("invalid Tavily endpoint: {}", e)))?;

        let resp = self
            .client
            .post(url)
            .json(&json!({
                "api_key": self.api_key,
                "query": query,
                "search_depth": "basic",
                "max_results": max_results.min(10),
            }))
            .send()
            .await?;

        if !resp.status().is_success() {
            let text = resp.text().await?;
            return Err(OutreachError::api("tavily", text));
        }

        let body: serde_json::Value = resp.json().await?;
        let results = body
            .get("results")
            .and_then(|r| r.as_array())
            .ok_or_else(|| OutreachError::api("tavily", "missing results in response"))?;

        Ok(results
            .iter()
            .map(|r| SearchSnippet {
                title: r["title"].as_str().unwrap_or_default().to_string(),
                url: r["url"].as_str().unwrap_or_default().to_string(),
                content: r["content"].as_str().unwrap_or_default().to_string(),
            })
            .collect())
    }
}
