//! Integration tests for the lead outreach workflow
//!
//! These tests drive the full graph end-to-end using mock collaborators.

use async_trait::async_trait;
use outreach_rs::error::{OutreachError, Result};
use outreach_rs::llm::{ChatMessage, GenerationConfig, Model};
use outreach_rs::outreach::config::OutreachConfig;
use outreach_rs::outreach::graph::OutreachGraph;
use outreach_rs::outreach::state::{Enrichment, LeadProfile, LeadState, Status};
use outreach_rs::outreach::store::{LeadStore, MemoryLeadStore};
use outreach_rs::outreach::tools::search::{SearchProvider, SearchSnippet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// ============================================================================
// Mock Components
// ============================================================================

/// Store that always returns the same enrichment record
struct StaticStore {
    enrichment: Option<Enrichment>,
}

#[async_trait]
impl LeadStore for StaticStore {
    async fn query(&self, _identifier: &str) -> Result<Option<Enrichment>> {
        Ok(self.enrichment.clone())
    }
}

/// Store whose lookups always fail
struct BrokenStore;

#[async_trait]
impl LeadStore for BrokenStore {
    async fn query(&self, _identifier: &str) -> Result<Option<Enrichment>> {
        Err(OutreachError::lookup("vector store", "connection refused"))
    }
}

/// Search provider with an invocation counter and a failure switch
struct SpySearch {
    calls: Arc<AtomicUsize>,
    fail: bool,
}

impl SpySearch {
    fn new(fail: bool) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                calls: calls.clone(),
                fail,
            },
            calls,
        )
    }
}

#[async_trait]
impl SearchProvider for SpySearch {
    async fn search(&self, query: &str, _max_results: u32) -> Result<Vec<SearchSnippet>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(OutreachError::api("tavily", "service unavailable"));
        }
        Ok(vec![
            SearchSnippet {
                title: "Company news".to_string(),
                url: "https://example.com/news".to_string(),
                content: format!("Recent activity relevant to {}", query),
            },
            SearchSnippet {
                title: "Company profile".to_string(),
                url: "https://example.com/profile".to_string(),
                content: "An established player in its market".to_string(),
            },
        ])
    }
}

/// Deterministic model: the draft depends only on the prompt kind
struct DeterministicModel;

fn prompt_kind(messages: &[ChatMessage]) -> &'static str {
    let system = &messages[0].content;
    if system.contains("LinkedIn") {
        "linkedin"
    } else if system.contains("call scripts") {
        "call_script"
    } else {
        "email"
    }
}

#[async_trait]
impl Model for DeterministicModel {
    async fn generate(
        &self,
        messages: &[ChatMessage],
        _config: Option<&GenerationConfig>,
    ) -> Result<String> {
        Ok(format!("generated {} draft", prompt_kind(messages)))
    }
}

/// Model that errors for one prompt kind and succeeds for the rest
struct PartiallyFailingModel {
    failing_kind: &'static str,
}

#[async_trait]
impl Model for PartiallyFailingModel {
    async fn generate(
        &self,
        messages: &[ChatMessage],
        _config: Option<&GenerationConfig>,
    ) -> Result<String> {
        let kind = prompt_kind(messages);
        if kind == self.failing_kind {
            return Err(OutreachError::api("openai", "model overloaded"));
        }
        Ok(format!("generated {} draft", kind))
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn sufficient_enrichment() -> Enrichment {
    Enrichment {
        content: "TechCorp is a rapidly growing SaaS company specializing in cloud \
                  infrastructure. They recently raised a Series B and are scaling \
                  their engineering team."
            .to_string(),
        profile: LeadProfile {
            lead_id: "lead_001".to_string(),
            email: "sarah.johnson@techcorp.com".to_string(),
            company: "TechCorp".to_string(),
            industry: "Software".to_string(),
            revenue: "10M-50M".to_string(),
            title: "VP of Engineering".to_string(),
            location: "San Francisco, CA".to_string(),
        },
    }
}

fn insufficient_enrichment() -> Enrichment {
    Enrichment {
        content: "sparse".to_string(),
        profile: LeadProfile {
            company: "TechCorp".to_string(),
            ..Default::default()
        },
    }
}

fn test_config() -> OutreachConfig {
    let mut config = OutreachConfig::default();
    config.output_dir = std::env::temp_dir()
        .join("outreach-integration-tests")
        .to_string_lossy()
        .to_string();
    config
}

fn build_graph(
    store: impl LeadStore + 'static,
    search: SpySearch,
    model: impl Model + 'static,
) -> OutreachGraph {
    OutreachGraph::new(
        test_config(),
        Arc::new(store),
        Arc::new(search),
        Arc::new(model),
    )
}

fn lead(id: &str, email: &str) -> LeadState {
    LeadState::new(id).with_email(email)
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test]
async fn scenario_a_sufficient_enrichment_drafts_without_research() {
    let (search, calls) = SpySearch::new(false);
    let graph = build_graph(
        StaticStore {
            enrichment: Some(sufficient_enrichment()),
        },
        search,
        DeterministicModel,
    );

    let state = graph.run(lead("1", "sarah.johnson@techcorp.com")).await;

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(state.research_results.is_none());
    assert_eq!(state.email_draft.as_deref(), Some("generated email draft"));
    assert_eq!(
        state.linkedin_draft.as_deref(),
        Some("generated linkedin draft")
    );
    assert_eq!(
        state.call_script.as_deref(),
        Some("generated call_script draft")
    );
    assert_eq!(state.status, Status::Complete);
    assert!(state.error.is_none());
}

#[tokio::test]
async fn scenario_b_insufficient_enrichment_researches_then_drafts() {
    let (search, calls) = SpySearch::new(false);
    let graph = build_graph(
        StaticStore {
            enrichment: Some(insufficient_enrichment()),
        },
        search,
        DeterministicModel,
    );

    let state = graph.run(lead("2", "mike.chen@datainsights.io")).await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    let research = state.research_results.as_ref().expect("research results");
    assert_eq!(research.sources.len(), 2);
    assert!(!research.summary.is_empty());
    assert!(state.email_draft.is_some());
    assert!(state.linkedin_draft.is_some());
    assert!(state.call_script.is_some());
    assert_eq!(state.status, Status::Complete);
}

#[tokio::test]
async fn scenario_c_research_failure_fails_run_without_drafting() {
    let (search, calls) = SpySearch::new(true);
    let graph = build_graph(
        StaticStore {
            enrichment: Some(insufficient_enrichment()),
        },
        search,
        DeterministicModel,
    );

    let state = graph.run(lead("3", "emma.wilson@financeai.com")).await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(state.status, Status::Failed);
    assert!(state.error.as_deref().unwrap().contains("web research"));
    assert!(state.email_draft.is_none());
    assert!(state.linkedin_draft.is_none());
    assert!(state.call_script.is_none());
}

#[tokio::test]
async fn scenario_d_one_draft_failure_leaves_the_others_intact() {
    let (search, _calls) = SpySearch::new(false);
    let graph = build_graph(
        StaticStore {
            enrichment: Some(sufficient_enrichment()),
        },
        search,
        PartiallyFailingModel {
            failing_kind: "linkedin",
        },
    );

    let state = graph.run(lead("4", "sarah.johnson@techcorp.com")).await;

    assert!(state.email_draft.is_some());
    assert!(state.call_script.is_some());
    assert!(state.linkedin_draft.is_none());
    assert_eq!(state.status, Status::Complete);
    assert!(state.error.as_deref().unwrap().contains("linkedin draft"));
}

// ============================================================================
// Properties
// ============================================================================

#[tokio::test]
async fn email_failure_does_not_block_other_drafts() {
    let (search, _calls) = SpySearch::new(false);
    let graph = build_graph(
        StaticStore {
            enrichment: Some(sufficient_enrichment()),
        },
        search,
        PartiallyFailingModel {
            failing_kind: "email",
        },
    );

    let state = graph.run(lead("5", "sarah.johnson@techcorp.com")).await;

    assert!(state.email_draft.is_none());
    assert!(state.linkedin_draft.is_some());
    assert!(state.call_script.is_some());
    assert!(state.error.as_deref().unwrap().contains("email draft"));
}

#[tokio::test]
async fn missing_enrichment_triggers_exactly_one_research_call() {
    let (search, calls) = SpySearch::new(false);
    let graph = build_graph(StaticStore { enrichment: None }, search, DeterministicModel);

    let state = graph.run(lead("6", "nobody@nowhere.com")).await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(state.enrichment_data.is_none());
    assert!(state.research_results.is_some());
    assert_eq!(state.status, Status::Complete);
}

#[tokio::test]
async fn store_failure_degrades_to_research_instead_of_failing() {
    let (search, calls) = SpySearch::new(false);
    let graph = build_graph(BrokenStore, search, DeterministicModel);

    let state = graph.run(lead("7", "sarah.johnson@techcorp.com")).await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(state.status, Status::Complete);
    assert!(state.error.is_none());
    assert!(state.research_results.is_some());
}

#[tokio::test]
async fn identical_inputs_yield_identical_outputs() {
    let run = || async {
        let (search, _calls) = SpySearch::new(false);
        let graph = build_graph(
            StaticStore {
                enrichment: Some(insufficient_enrichment()),
            },
            search,
            DeterministicModel,
        );
        graph.run(lead("8", "mike.chen@datainsights.io")).await
    };

    let first = run().await;
    let second = run().await;

    assert_eq!(first.status, second.status);
    assert_eq!(first.email_draft, second.email_draft);
    assert_eq!(first.linkedin_draft, second.linkedin_draft);
    assert_eq!(first.call_script, second.call_script);
    assert_eq!(first.research_results, second.research_results);
    assert_eq!(first.error, second.error);
}

#[tokio::test]
async fn execute_reports_run_metadata_and_scores() {
    let (search, _calls) = SpySearch::new(false);
    let graph = build_graph(
        StaticStore {
            enrichment: Some(sufficient_enrichment()),
        },
        search,
        DeterministicModel,
    );

    let report = graph.execute(lead("9", "sarah.johnson@techcorp.com")).await;

    assert_eq!(report.state.status, Status::Complete);
    assert!(report.finished_at >= report.started_at);
    assert_eq!(report.scores.completion_rate, 1.0);
    assert!(report.scores.email.is_some());
}

// ============================================================================
// Store loading
// ============================================================================

#[tokio::test]
async fn memory_store_loads_records_from_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("leads.json");
    std::fs::write(
        &path,
        r#"[
            {
                "lead_id": "lead_001",
                "email": "sarah.johnson@techcorp.com",
                "company": "TechCorp",
                "industry": "Software",
                "title": "VP of Engineering",
                "location": "San Francisco, CA",
                "enrichment_text": "Rapidly growing SaaS company with 200+ employees."
            }
        ]"#,
    )
    .unwrap();

    let store = MemoryLeadStore::from_json_file(&path).unwrap();
    assert_eq!(store.len(), 1);

    let enrichment = store
        .query("sarah.johnson@techcorp.com")
        .await
        .unwrap()
        .expect("record found");
    assert_eq!(enrichment.profile.company, "TechCorp");
    assert!(enrichment.content.contains("VP of Engineering"));
}
