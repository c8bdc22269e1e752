// SPDX-License-Identifier: MIT

//! Outreach configuration
//!
//! Non-secret settings come from an optional YAML profile file; secrets
//! (API keys, tokens) come from the environment. `validate` runs before
//! the graph so missing credentials surface immediately, not mid-run.

use crate::error::{OutreachError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutreachConfig {
    /// Company the outreach is sent on behalf of
    #[serde(default = "default_company_name")]
    pub company_name: String,
    /// One-line pitch injected into the drafting prompts
    #[serde(default = "default_company_pitch")]
    pub company_pitch: String,
    /// Email subject template; `{company}` is replaced with the lead's company
    #[serde(default = "default_subject_template")]
    pub email_subject_template: String,
    #[serde(default = "default_model_name")]
    pub model_name: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_search_results")]
    pub max_search_results: u32,
    /// Directory for call scripts and locally queued LinkedIn drafts
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default)]
    pub timeouts: TimeoutConfig,
}

/// Per-external-call deadlines so one unresponsive dependency cannot
/// stall the whole run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    #[serde(default = "default_enrichment_secs")]
    pub enrichment_secs: u64,
    #[serde(default = "default_search_secs")]
    pub search_secs: u64,
    #[serde(default = "default_generation_secs")]
    pub generation_secs: u64,
}

fn default_company_name() -> String {
    "Example AI".to_string()
}

fn default_company_pitch() -> String {
    "Example AI provides an ML observability and evaluation platform for LLM applications."
        .to_string()
}

fn default_subject_template() -> String {
    "Improving ML model quality at {company}".to_string()
}

fn default_model_name() -> String {
    "gpt-4o".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_search_results() -> u32 {
    3
}

fn default_output_dir() -> String {
    "outputs".to_string()
}

fn default_enrichment_secs() -> u64 {
    10
}

fn default_search_secs() -> u64 {
    20
}

fn default_generation_secs() -> u64 {
    60
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            enrichment_secs: default_enrichment_secs(),
            search_secs: default_search_secs(),
            generation_secs: default_generation_secs(),
        }
    }
}

impl Default for OutreachConfig {
    fn default() -> Self {
        Self {
            company_name: default_company_name(),
            company_pitch: default_company_pitch(),
            email_subject_template: default_subject_template(),
            model_name: default_model_name(),
            temperature: default_temperature(),
            max_search_results: default_max_search_results(),
            output_dir: default_output_dir(),
            timeouts: TimeoutConfig::default(),
        }
    }
}

impl OutreachConfig {
    /// Load a profile from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse_yaml(&content)
    }

    /// Parse a profile from a YAML string
    pub fn parse_yaml(content: &str) -> Result<Self> {
        let config: OutreachConfig = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Load the given profile path, or fall back to defaults
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Check required credentials and settings before any node executes
    pub fn validate(&self) -> Result<()> {
        if env::var("OPENAI_API_KEY").is_err() {
            return Err(OutreachError::config("OPENAI_API_KEY must be set"));
        }
        if env::var("TAVILY_API_KEY").is_err() {
            return Err(OutreachError::config("TAVILY_API_KEY must be set"));
        }
        if self.model_name.is_empty() {
            return Err(OutreachError::config("model_name cannot be empty"));
        }
        if self.email_subject_template.is_empty() {
            return Err(OutreachError::config(
                "email_subject_template cannot be empty",
            ));
        }
        Ok(())
    }

    /// Render the email subject for a lead's company
    pub fn render_subject(&self, company: &str) -> String {
        self.email_subject_template.replace("{company}", company)
    }
}
