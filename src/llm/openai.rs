// SPDX-License-Identifier: MIT

//! OpenAI Model - chat completions implementation

use super::{ChatMessage, GenerationConfig, Model, Role};
use crate::error::{OutreachError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::env;

/// OpenAI chat completions model
pub struct OpenAIModel {
    client: Client,
    api_key: String,
    model_name: String,
    base_url: String,
}

impl OpenAIModel {
    /// Create a new OpenAIModel
    ///
    /// Requires `OPENAI_API_KEY` environment variable to be set.
    /// Optionally uses `OPENAI_BASE_URL` for custom endpoints.
    pub fn new(model_name: String) -> Result<Self> {
        let api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| OutreachError::config("OPENAI_API_KEY must be set"))?;
        let base_url =
            env::var("OPENAI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".to_string());

        Ok(Self {
            client: Client::new(),
            api_key,
            model_name,
            base_url,
        })
    }

    fn role_str(role: Role) -> &'static str {
        match role {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    /// Convert messages to the OpenAI wire format
    fn build_messages(messages: &[ChatMessage]) -> Vec<serde_json::Value> {
        messages
            .iter()
            .map(|m| {
                json!({
                    "role": Self::role_str(m.role),
                    "content": m.content,
                })
            })
            .collect()
    }

    /// Extract the completion text from an OpenAI response
    fn parse_response(response: &serde_json::Value) -> Result<String> {
        response["choices"]
            .as_array()
            .and_then(|c| c.first())
            .and_then(|choice| choice["message"]["content"].as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| OutreachError::api("openai", "no completion content in response"))
    }
}

#[async_trait]
impl Model for OpenAIModel {
    async fn generate(
        &self,
        messages: &[ChatMessage],
        config: Option<&GenerationConfig>,
    ) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);

        let mut body = json!({
            "model": self.model_name,
            "messages": Self::build_messages(messages),
        });

        if let Some(cfg) = config {
            if let Some(temp) = cfg.temperature {
                body["temperature"] = json!(temp);
            }
            if let Some(max_tokens) = cfg.max_output_tokens {
                body["max_tokens"] = json!(max_tokens);
            }
            if let Some(top_p) = cfg.top_p {
                body["top_p"] = json!(top_p);
            }
        }

        log::debug!("OpenAI request to {} with model {}", url, self.model_name);

        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let text = resp.text().await?;
            return Err(OutreachError::api("openai", text));
        }

        let resp_json: serde_json::Value = resp.json().await?;
        Self::parse_response(&resp_json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_messages() {
        let messages = vec![
            ChatMessage::system("You are helpful"),
            ChatMessage::user("Hello"),
        ];

        let wire = OpenAIModel::build_messages(&messages);
        assert_eq!(wire.len(), 2);
        assert_eq!(wire[0]["role"], "system");
        assert_eq!(wire[0]["content"], "You are helpful");
        assert_eq!(wire[1]["role"], "user");
        assert_eq!(wire[1]["content"], "Hello");
    }

    #[test]
    fn test_parse_text_response() {
        let response = json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": "Hi there, how can I help?"
                }
            }]
        });

        let text = OpenAIModel::parse_response(&response).unwrap();
        assert_eq!(text, "Hi there, how can I help?");
    }

    #[test]
    fn test_parse_response_missing_choices() {
        let response = json!({"choices": []});
        assert!(OpenAIModel::parse_response(&response).is_err());
    }

    #[test]
    fn test_parse_response_null_content() {
        let response = json!({
            "choices": [{
                "message": {"role": "assistant", "content": null}
            }]
        });
        assert!(OpenAIModel::parse_response(&response).is_err());
    }
}
