// SPDX-License-Identifier: MIT

//! Node implementations
//!
//! Each node is an isolated function of the incoming state snapshot and
//! returns a [NodeUpdate]. Nodes never fail the run by returning `Err`;
//! failure policy lives in the delta (`error` field) and the executor's
//! routing.

use super::events::NodeId;
use super::prompts;
use crate::error::{OutreachError, Result};
use crate::llm::{ChatMessage, GenerationConfig};
use crate::outreach::state::{LeadState, NodeUpdate, Research, ResearchSource};
use crate::outreach::tools::search::SearchSnippet;
use std::future::Future;
use std::path::Path;
use std::time::Duration;

use super::executor::OutreachGraph;

/// Cap on the folded research summary
const MAX_SUMMARY_CHARS: usize = 2000;

/// Enforce a per-call deadline on an external dependency
pub(crate) async fn with_timeout<T, F>(operation: &str, secs: u64, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(Duration::from_secs(secs), fut).await {
        Ok(result) => result,
        Err(_) => Err(OutreachError::Timeout {
            operation: operation.to_string(),
            secs,
        }),
    }
}

/// Build the research query: company and title when enrichment knows them,
/// then the caller-provided name/company pair, then the raw identifier.
pub(crate) fn research_query(state: &LeadState) -> String {
    let mut parts: Vec<&str> = Vec::new();

    if let Some(enrichment) = &state.enrichment_data {
        let p = &enrichment.profile;
        if !p.company.is_empty() {
            parts.push(&p.company);
        }
        if !p.title.is_empty() {
            parts.push(&p.title);
        }
    }

    if parts.is_empty() {
        if let (Some(name), Some(company)) = (&state.lead_name, &state.lead_company) {
            return format!("{} {}", name, company);
        }
        return state.identifier();
    }

    parts.join(" ")
}

/// Fold search snippets into a bounded research summary plus sources
pub(crate) fn fold_snippets(query: String, snippets: Vec<SearchSnippet>) -> Research {
    let mut summary = String::new();
    for snippet in &snippets {
        if !summary.is_empty() {
            summary.push(' ');
        }
        summary.push_str(snippet.content.trim());
        if summary.chars().count() >= MAX_SUMMARY_CHARS {
            break;
        }
    }
    let summary: String = summary.chars().take(MAX_SUMMARY_CHARS).collect();

    let sources = snippets
        .into_iter()
        .map(|s| ResearchSource {
            title: s.title,
            url: s.url,
        })
        .collect();

    Research {
        summary,
        sources,
        query,
    }
}

impl OutreachGraph {
    /// Look up enrichment data and decide whether it is sufficient.
    /// Fails soft: a lookup failure routes to research, never to `failed`.
    pub(crate) async fn retrieve_enrichment(&self, state: &LeadState) -> NodeUpdate {
        let identifier = state.identifier();
        let lookup = with_timeout(
            "enrichment lookup",
            self.config.timeouts.enrichment_secs,
            self.store.query(&identifier),
        )
        .await;

        match lookup {
            Ok(Some(enrichment)) => {
                let sufficient = enrichment.is_sufficient();
                log::info!(
                    "Enrichment found for {} (sufficient: {})",
                    identifier,
                    sufficient
                );
                NodeUpdate {
                    enrichment_data: Some(enrichment),
                    enrichment_sufficient: Some(sufficient),
                    ..Default::default()
                }
            }
            Ok(None) => {
                log::info!("No enrichment found for {}", identifier);
                NodeUpdate {
                    enrichment_sufficient: Some(false),
                    ..Default::default()
                }
            }
            Err(e) => {
                log::warn!("Enrichment lookup failed for {}: {}", identifier, e);
                NodeUpdate {
                    enrichment_sufficient: Some(false),
                    ..Default::default()
                }
            }
        }
    }

    /// Perform web research. A failure here is terminal for the run.
    pub(crate) async fn web_research(&self, state: &LeadState) -> NodeUpdate {
        let query = research_query(state);
        log::info!("Researching lead with query: {}", query);

        let result = with_timeout(
            "web search",
            self.config.timeouts.search_secs,
            self.search.search(&query, self.config.max_search_results),
        )
        .await;

        match result {
            Ok(snippets) => {
                log::info!("Research returned {} snippets", snippets.len());
                NodeUpdate {
                    research_results: Some(fold_snippets(query, snippets)),
                    ..Default::default()
                }
            }
            Err(e) => NodeUpdate::error(format!("web research failed: {}", e)),
        }
    }

    async fn generate_draft(&self, node: NodeId, system: String, user: String) -> Result<String> {
        let messages = [ChatMessage::system(system), ChatMessage::user(user)];
        let config = GenerationConfig {
            temperature: Some(self.config.temperature),
            ..Default::default()
        };

        let text = with_timeout(
            "draft generation",
            self.config.timeouts.generation_secs,
            self.model.generate(&messages, Some(&config)),
        )
        .await?;

        if text.trim().is_empty() {
            return Err(OutreachError::generation(
                node.as_str(),
                "model returned an empty draft",
            ));
        }
        Ok(text)
    }

    /// Draft the outreach email and, when a sink is configured, persist it
    /// as a Gmail draft. Persistence failures are soft; the generated text
    /// is still the node's output.
    pub(crate) async fn draft_email(&self, state: &LeadState) -> NodeUpdate {
        let generated = self
            .generate_draft(
                NodeId::DraftEmail,
                prompts::email_system(&self.config),
                prompts::email_user(&self.config, state),
            )
            .await;

        match generated {
            Ok(draft) => {
                if let (Some(sink), Some(to)) = (&self.email_drafts, state.lead_email.as_deref()) {
                    let subject = self.config.render_subject(state.company_label());
                    match sink.create_draft(to, &subject, &draft).await {
                        Ok(draft_id) => log::info!("Created Gmail draft {}", draft_id),
                        Err(e) => log::warn!("Gmail draft creation failed: {}", e),
                    }
                }
                NodeUpdate {
                    email_draft: Some(draft),
                    ..Default::default()
                }
            }
            Err(e) => NodeUpdate::error(format!("email draft failed: {}", e)),
        }
    }

    /// Draft the LinkedIn connection message and queue it for sending
    pub(crate) async fn draft_linkedin(&self, state: &LeadState) -> NodeUpdate {
        let generated = self
            .generate_draft(
                NodeId::DraftLinkedin,
                prompts::LINKEDIN_SYSTEM.to_string(),
                prompts::linkedin_user(state),
            )
            .await;

        match generated {
            Ok(draft) => {
                if let Some(sink) = &self.linkedin_drafts {
                    let recipient = state.identifier();
                    if let Err(e) = sink.create_message_draft(&recipient, &draft).await {
                        log::warn!("LinkedIn draft queueing failed: {}", e);
                    }
                }
                NodeUpdate {
                    linkedin_draft: Some(draft),
                    ..Default::default()
                }
            }
            Err(e) => NodeUpdate::error(format!("linkedin draft failed: {}", e)),
        }
    }

    /// Draft the call script and save it as markdown under the output dir
    pub(crate) async fn draft_call_script(&self, state: &LeadState) -> NodeUpdate {
        let generated = self
            .generate_draft(
                NodeId::DraftCallScript,
                prompts::CALL_SCRIPT_SYSTEM.to_string(),
                prompts::call_script_user(&self.config, state),
            )
            .await;

        match generated {
            Ok(script) => {
                let dir = Path::new(&self.config.output_dir);
                let path = dir.join(format!("call_script_{}.md", state.lead_id));
                let write = async {
                    tokio::fs::create_dir_all(dir).await?;
                    tokio::fs::write(&path, &script).await?;
                    Ok::<_, std::io::Error>(())
                };
                match write.await {
                    Ok(()) => log::info!("Saved call script to {}", path.display()),
                    Err(e) => log::warn!("Failed to save call script: {}", e),
                }
                NodeUpdate {
                    call_script: Some(script),
                    ..Default::default()
                }
            }
            Err(e) => NodeUpdate::error(format!("call script draft failed: {}", e)),
        }
    }
}
