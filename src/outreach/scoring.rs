// SPDX-License-Identifier: MIT

//! Draft scoring
//!
//! Lightweight heuristics for how personalized a draft is and how deep the
//! research went. Scores are advisory; they are reported alongside run
//! results and never gate the workflow.

use crate::outreach::state::{Enrichment, LeadState, Research};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

fn round2(score: f32) -> f32 {
    (score * 100.0).round() / 100.0
}

/// How much of the enrichment data a draft actually uses, in `[0, 1]`
pub fn personalization_score(draft: &str, enrichment: Option<&Enrichment>) -> f32 {
    let enrichment = match enrichment {
        Some(e) if !draft.is_empty() => e,
        _ => return 0.0,
    };

    let mut score = 0.0_f32;
    let draft_lower = draft.to_lowercase();
    let profile = &enrichment.profile;

    // Company mention (0.3)
    if !profile.company.is_empty() && draft_lower.contains(&profile.company.to_lowercase()) {
        score += 0.3;
    }

    // Industry or role mention (0.2)
    let industry_hit =
        !profile.industry.is_empty() && draft_lower.contains(&profile.industry.to_lowercase());
    let title_hit =
        !profile.title.is_empty() && draft_lower.contains(&profile.title.to_lowercase());
    if industry_hit || title_hit {
        score += 0.2;
    }

    // Overlap with the enrichment free text (0.3)
    if !enrichment.content.is_empty() {
        let content_words: HashSet<String> = enrichment
            .content
            .to_lowercase()
            .split_whitespace()
            .map(|w| w.to_string())
            .collect();
        let draft_words: HashSet<String> = draft_lower
            .split_whitespace()
            .map(|w| w.to_string())
            .collect();
        let overlap = content_words.intersection(&draft_words).count() as f32;
        score += (overlap / 20.0).min(0.3);
    }

    // Length and structure (0.2)
    if draft.len() > 100 {
        score += 0.2;
    }

    round2(score.min(1.0))
}

/// How comprehensive the web research was, in `[0, 1]`
pub fn research_depth_score(research: Option<&Research>) -> f32 {
    let research = match research {
        Some(r) => r,
        None => return 0.0,
    };

    let mut score = 0.0_f32;

    // Has a summary (0.5)
    if !research.summary.is_empty() {
        score += 0.5;
    }

    // Number of sources (0.5)
    score += (research.sources.len() as f32 / 3.0).min(0.5);

    round2(score)
}

/// Per-draft scores for a finished run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DraftScores {
    pub email: Option<f32>,
    pub linkedin: Option<f32>,
    pub call_script: Option<f32>,
    pub research_depth: f32,
    /// Fraction of the three drafts that were produced
    pub completion_rate: f32,
}

/// Score every produced draft against the enrichment data
pub fn score_run(state: &LeadState) -> DraftScores {
    let enrichment = state.enrichment_data.as_ref();
    let score = |draft: &Option<String>| {
        draft
            .as_deref()
            .map(|d| personalization_score(d, enrichment))
    };

    let produced = [
        state.email_draft.is_some(),
        state.linkedin_draft.is_some(),
        state.call_script.is_some(),
    ]
    .iter()
    .filter(|p| **p)
    .count() as f32;

    DraftScores {
        email: score(&state.email_draft),
        linkedin: score(&state.linkedin_draft),
        call_script: score(&state.call_script),
        research_depth: research_depth_score(state.research_results.as_ref()),
        completion_rate: round2(produced / 3.0),
    }
}
