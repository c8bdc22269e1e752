// SPDX-License-Identifier: MIT

//! Prompt assembly for the drafting nodes
//!
//! All three drafting nodes share the same lead context block; each has
//! its own system prompt and output instructions.

use crate::outreach::config::OutreachConfig;
use crate::outreach::state::LeadState;

fn or_na(value: &str) -> &str {
    if value.is_empty() {
        "N/A"
    } else {
        value
    }
}

/// Render what the workflow knows about the lead: enrichment fields plus
/// whatever web research produced.
pub fn build_context(state: &LeadState) -> String {
    let mut parts = Vec::new();

    if let Some(enrichment) = &state.enrichment_data {
        let p = &enrichment.profile;
        parts.push(format!("Company: {}", or_na(&p.company)));
        parts.push(format!("Title: {}", or_na(&p.title)));
        parts.push(format!("Industry: {}", or_na(&p.industry)));
        parts.push(format!("Location: {}", or_na(&p.location)));
        parts.push(format!("\nEnrichment: {}", enrichment.content));
    }

    if let Some(research) = &state.research_results {
        parts.push(format!("\nWeb Research: {}", research.summary));
    }

    parts.join("\n")
}

pub fn email_system(config: &OutreachConfig) -> String {
    format!(
        "You are an expert SDR at {} drafting personalized outreach emails.\n\n\
         Key guidelines:\n\
         - Keep emails concise (100-150 words)\n\
         - Lead with value, not product pitch\n\
         - Reference specific, relevant context about the lead\n\
         - End with clear, low-friction CTA\n\
         - Professional but conversational tone",
        config.company_name
    )
}

pub fn email_user(config: &OutreachConfig, state: &LeadState) -> String {
    format!(
        "Draft an email to reach out to this lead:\n\n\
         Lead Context:\n{}\n\n\
         Company: {}\n\n\
         Draft the email body only (no subject line).",
        build_context(state),
        config.company_pitch
    )
}

pub const LINKEDIN_SYSTEM: &str =
    "You are an expert SDR drafting LinkedIn connection messages.\n\n\
     Key guidelines:\n\
     - Keep under 300 characters for initial connection request\n\
     - Mention mutual connection or shared interest\n\
     - Professional and friendly\n\
     - No sales pitch in connection request";

pub fn linkedin_user(state: &LeadState) -> String {
    format!(
        "Draft a LinkedIn connection request message:\n\n\
         Lead Context:\n{}\n\n\
         Draft the connection message only.",
        build_context(state)
    )
}

pub const CALL_SCRIPT_SYSTEM: &str = "You are an expert SDR drafting call scripts.\n\n\
     Key guidelines:\n\
     - Opening: Brief intro + permission to proceed\n\
     - Discovery: 3-4 key questions about their challenges\n\
     - Positioning: Connect their needs to the product's value\n\
     - Close: Calendar booking or next step\n\
     - Include objection handling tips\n\
     - Format as structured markdown";

pub fn call_script_user(config: &OutreachConfig, state: &LeadState) -> String {
    format!(
        "Draft a call script for this lead:\n\n\
         Lead Context:\n{}\n\n\
         Company: {}\n\n\
         Format with sections: Opening, Discovery Questions, Positioning, Close, Objection Handling.",
        build_context(state),
        config.company_pitch
    )
}
