// SPDX-License-Identifier: MIT

//! Gmail draft creation over the REST API
//!
//! Token acquisition and refresh are outside this crate; the client takes
//! a ready OAuth access token from the environment.

use crate::error::{OutreachError, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use reqwest::Client;
use serde_json::json;
use std::env;

/// Draft persistence interface for the email node
#[async_trait]
pub trait EmailDrafts: Send + Sync {
    /// Create a draft and return its id.
    async fn create_draft(&self, to: &str, subject: &str, body: &str) -> Result<String>;
}

pub struct GmailClient {
    client: Client,
    access_token: String,
    base_url: String,
}

impl GmailClient {
    /// Requires `GMAIL_ACCESS_TOKEN` environment variable to be set.
    pub fn new() -> Result<Self> {
        let access_token = env::var("GMAIL_ACCESS_TOKEN")
            .map_err(|_| OutreachError::config("GMAIL_ACCESS_TOKEN must be set"))?;
        Ok(Self {
            client: Client::new(),
            access_token,
            base_url: "https://gmail.googleapis.com".to_string(),
        })
    }

    /// Build the base64url-encoded RFC 2822 message the drafts endpoint expects
    fn encode_message(to: &str, subject: &str, body: &str) -> String {
        let raw = format!(
            "To: {}\r\nSubject: {}\r\nContent-Type: text/plain; charset=\"UTF-8\"\r\n\r\n{}",
            to, subject, body
        );
        URL_SAFE.encode(raw.as_bytes())
    }
}

#[async_trait]
impl EmailDrafts for GmailClient {
    async fn create_draft(&self, to: &str, subject: &str, body: &str) -> Result<String> {
        let url = format!("{}/gmail/v1/users/me/drafts", self.base_url);

        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.access_token))
            .json(&json!({
                "message": {
                    "raw": Self::encode_message(to, subject, body),
                }
            }))
            .send()
            .await?;

        if !resp.status().is_success() {
            let text = resp.text().await?;
            return Err(OutreachError::api("gmail", text));
        }

        let resp_json: serde_json::Value = resp.json().await?;
        resp_json["id"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| OutreachError::api("gmail", "missing draft id in response"))
    }
}
