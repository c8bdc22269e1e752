// SPDX-License-Identifier: MIT

//! Lead state threaded through the workflow graph
//!
//! Nodes never mutate state directly. Each node receives an immutable
//! snapshot and returns a [NodeUpdate] delta; the executor applies deltas
//! in order. The drafting fan-out therefore needs no locking: the three
//! nodes write disjoint draft fields and their deltas are merged
//! sequentially after the join.

use serde::{Deserialize, Serialize};

/// Coarse workflow progress. Terminal states are `Complete` and `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Started,
    Enriching,
    Researching,
    Drafting,
    Complete,
    Failed,
}

impl Status {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Complete | Status::Failed)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Status::Started => "started",
            Status::Enriching => "enriching",
            Status::Researching => "researching",
            Status::Drafting => "drafting",
            Status::Complete => "complete",
            Status::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

/// Structured background fields for a lead, as stored in the enrichment store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadProfile {
    #[serde(default)]
    pub lead_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub revenue: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location: String,
}

/// Enrichment record for a lead: free-text content plus structured profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrichment {
    pub content: String,
    pub profile: LeadProfile,
}

/// Minimum content length for enrichment to count as sufficient on its own
const MIN_ENRICHMENT_CONTENT_LEN: usize = 100;

impl Enrichment {
    /// Coverage heuristic deciding whether drafting can skip web research:
    /// company, industry, and title must be present and the free-text
    /// content must carry real detail.
    pub fn is_sufficient(&self) -> bool {
        let p = &self.profile;
        let has_required =
            !p.company.is_empty() && !p.industry.is_empty() && !p.title.is_empty();
        has_required && self.content.len() > MIN_ENRICHMENT_CONTENT_LEN
    }
}

/// A single web research source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchSource {
    pub title: String,
    pub url: String,
}

/// Result of the conditional web research step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Research {
    pub summary: String,
    pub sources: Vec<ResearchSource>,
    pub query: String,
}

/// The single mutable record threaded through a workflow run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadState {
    /// Opaque lead identifier, immutable after creation
    pub lead_id: String,
    pub lead_email: Option<String>,
    pub lead_name: Option<String>,
    pub lead_company: Option<String>,

    pub enrichment_data: Option<Enrichment>,
    pub enrichment_sufficient: bool,

    pub research_results: Option<Research>,

    pub email_draft: Option<String>,
    pub linkedin_draft: Option<String>,
    pub call_script: Option<String>,

    pub status: Status,
    pub error: Option<String>,
}

impl LeadState {
    pub fn new(lead_id: impl Into<String>) -> Self {
        Self {
            lead_id: lead_id.into(),
            lead_email: None,
            lead_name: None,
            lead_company: None,
            enrichment_data: None,
            enrichment_sufficient: false,
            research_results: None,
            email_draft: None,
            linkedin_draft: None,
            call_script: None,
            status: Status::Started,
            error: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.lead_email = Some(email.into());
        self
    }

    pub fn with_name_company(
        mut self,
        name: impl Into<String>,
        company: impl Into<String>,
    ) -> Self {
        self.lead_name = Some(name.into());
        self.lead_company = Some(company.into());
        self
    }

    /// Identifier used for store lookups and display: the email when known,
    /// otherwise `name - company`, otherwise the raw lead id.
    pub fn identifier(&self) -> String {
        if let Some(email) = &self.lead_email {
            return email.clone();
        }
        match (&self.lead_name, &self.lead_company) {
            (Some(name), Some(company)) => format!("{} - {}", name, company),
            _ => self.lead_id.clone(),
        }
    }

    /// Company label for subject lines and prompts
    pub fn company_label(&self) -> &str {
        if let Some(enr) = &self.enrichment_data {
            if !enr.profile.company.is_empty() {
                return &enr.profile.company;
            }
        }
        if let Some(company) = &self.lead_company {
            if !company.is_empty() {
                return company;
            }
        }
        "your company"
    }

    /// Drafting requires at least one of enrichment or research data
    pub fn has_usable_input(&self) -> bool {
        self.enrichment_data.is_some() || self.research_results.is_some()
    }

    /// Apply a node's delta. Draft fields are written at most once per run;
    /// errors accumulate so one drafting failure does not mask another.
    pub fn apply(&mut self, update: NodeUpdate) {
        if let Some(enrichment) = update.enrichment_data {
            self.enrichment_data = Some(enrichment);
        }
        if let Some(sufficient) = update.enrichment_sufficient {
            self.enrichment_sufficient = sufficient;
        }
        if let Some(research) = update.research_results {
            self.research_results = Some(research);
        }
        if let Some(draft) = update.email_draft {
            if self.email_draft.is_none() {
                self.email_draft = Some(draft);
            }
        }
        if let Some(draft) = update.linkedin_draft {
            if self.linkedin_draft.is_none() {
                self.linkedin_draft = Some(draft);
            }
        }
        if let Some(script) = update.call_script {
            if self.call_script.is_none() {
                self.call_script = Some(script);
            }
        }
        if let Some(message) = update.error {
            self.error = match self.error.take() {
                None => Some(message),
                Some(prev) => Some(format!("{}; {}", prev, message)),
            };
        }
    }
}

/// Delta returned by a node: only the fields the node actually wrote
#[derive(Debug, Clone, Default)]
pub struct NodeUpdate {
    pub enrichment_data: Option<Enrichment>,
    pub enrichment_sufficient: Option<bool>,
    pub research_results: Option<Research>,
    pub email_draft: Option<String>,
    pub linkedin_draft: Option<String>,
    pub call_script: Option<String>,
    pub error: Option<String>,
}

impl NodeUpdate {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
