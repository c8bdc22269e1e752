// SPDX-License-Identifier: MIT

//! Lead workflow executor
//!
//! Drives the fixed five-node graph: enrichment, the conditional research
//! step, then the three drafting nodes as a concurrent fan-out joined
//! before the terminal state. All failures are folded into the returned
//! state; `run` itself is infallible.

use super::events::{NodeId, WorkflowEvent};
use super::router::{route_after_enrichment, NextStep};
use crate::llm::Model;
use crate::outreach::config::OutreachConfig;
use crate::outreach::scoring::{score_run, DraftScores};
use crate::outreach::state::{LeadState, NodeUpdate, Status};
use crate::outreach::store::LeadStore;
use crate::outreach::tools::gmail::EmailDrafts;
use crate::outreach::tools::linkedin::LinkedInDrafts;
use crate::outreach::tools::search::SearchProvider;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

/// The compiled workflow graph with its collaborators
pub struct OutreachGraph {
    pub(crate) config: OutreachConfig,
    pub(crate) store: Arc<dyn LeadStore>,
    pub(crate) search: Arc<dyn SearchProvider>,
    pub(crate) model: Arc<dyn Model>,
    pub(crate) email_drafts: Option<Arc<dyn EmailDrafts>>,
    pub(crate) linkedin_drafts: Option<Arc<dyn LinkedInDrafts>>,
}

/// Final state plus run metadata and advisory scores
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub state: LeadState,
    pub scores: DraftScores,
}

impl OutreachGraph {
    pub fn new(
        config: OutreachConfig,
        store: Arc<dyn LeadStore>,
        search: Arc<dyn SearchProvider>,
        model: Arc<dyn Model>,
    ) -> Self {
        Self {
            config,
            store,
            search,
            model,
            email_drafts: None,
            linkedin_drafts: None,
        }
    }

    pub fn with_email_drafts(mut self, sink: Arc<dyn EmailDrafts>) -> Self {
        self.email_drafts = Some(sink);
        self
    }

    pub fn with_linkedin_drafts(mut self, sink: Arc<dyn LinkedInDrafts>) -> Self {
        self.linkedin_drafts = Some(sink);
        self
    }

    /// Run the workflow to completion and return the final state
    pub async fn run(&self, state: LeadState) -> LeadState {
        self.run_inner(state, None).await
    }

    /// Run the workflow, emitting per-node progress events along the way
    pub async fn run_with_events(
        &self,
        state: LeadState,
        events: mpsc::Sender<WorkflowEvent>,
    ) -> LeadState {
        self.run_inner(state, Some(events)).await
    }

    /// Run and wrap the result with run metadata and draft scores
    pub async fn execute(&self, state: LeadState) -> RunReport {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        log::info!("Run {} started for lead {}", run_id, state.lead_id);

        let state = self.run(state).await;

        let finished_at = Utc::now();
        log::info!("Run {} finished with status {}", run_id, state.status);
        RunReport {
            run_id,
            started_at,
            finished_at,
            scores: score_run(&state),
            state,
        }
    }

    async fn emit(events: &Option<mpsc::Sender<WorkflowEvent>>, event: WorkflowEvent) {
        if let Some(tx) = events {
            let _ = tx.send(event).await;
        }
    }

    async fn set_status(
        state: &mut LeadState,
        events: &Option<mpsc::Sender<WorkflowEvent>>,
        status: Status,
    ) {
        state.status = status;
        Self::emit(events, WorkflowEvent::StatusChanged { status }).await;
    }

    async fn run_inner(
        &self,
        mut state: LeadState,
        events: Option<mpsc::Sender<WorkflowEvent>>,
    ) -> LeadState {
        Self::set_status(&mut state, &events, Status::Enriching).await;
        Self::emit(
            &events,
            WorkflowEvent::NodeStarted {
                node: NodeId::RetrieveEnrichment,
            },
        )
        .await;
        let update = self.retrieve_enrichment(&state).await;
        Self::emit(
            &events,
            WorkflowEvent::NodeCompleted {
                node: NodeId::RetrieveEnrichment,
            },
        )
        .await;
        state.apply(update);

        match route_after_enrichment(&state) {
            NextStep::Research => {
                Self::set_status(&mut state, &events, Status::Researching).await;
                Self::emit(
                    &events,
                    WorkflowEvent::NodeStarted {
                        node: NodeId::WebResearch,
                    },
                )
                .await;
                let update = self.web_research(&state).await;
                if let Some(error) = &update.error {
                    Self::emit(
                        &events,
                        WorkflowEvent::NodeFailed {
                            node: NodeId::WebResearch,
                            error: error.clone(),
                        },
                    )
                    .await;
                    state.apply(update);
                    // No drafting without any usable input data
                    Self::set_status(&mut state, &events, Status::Failed).await;
                    Self::emit(
                        &events,
                        WorkflowEvent::Finished {
                            status: state.status,
                        },
                    )
                    .await;
                    return state;
                }
                Self::emit(
                    &events,
                    WorkflowEvent::NodeCompleted {
                        node: NodeId::WebResearch,
                    },
                )
                .await;
                state.apply(update);
            }
            NextStep::Draft => {
                log::info!(
                    "Enrichment sufficient for {}, skipping research",
                    state.identifier()
                );
            }
        }

        if !state.has_usable_input() {
            state.apply(NodeUpdate::error(
                "no enrichment or research data available",
            ));
            Self::set_status(&mut state, &events, Status::Failed).await;
            Self::emit(
                &events,
                WorkflowEvent::Finished {
                    status: state.status,
                },
            )
            .await;
            return state;
        }

        Self::set_status(&mut state, &events, Status::Drafting).await;
        for node in [
            NodeId::DraftEmail,
            NodeId::DraftLinkedin,
            NodeId::DraftCallScript,
        ] {
            Self::emit(&events, WorkflowEvent::NodeStarted { node }).await;
        }

        // The fan-out shares one read-only snapshot; each node writes a
        // disjoint draft field in its delta.
        let snapshot = state.clone();
        let (email, linkedin, script) = futures::future::join3(
            self.draft_email(&snapshot),
            self.draft_linkedin(&snapshot),
            self.draft_call_script(&snapshot),
        )
        .await;

        for (node, update) in [
            (NodeId::DraftEmail, &email),
            (NodeId::DraftLinkedin, &linkedin),
            (NodeId::DraftCallScript, &script),
        ] {
            match &update.error {
                Some(error) => {
                    Self::emit(
                        &events,
                        WorkflowEvent::NodeFailed {
                            node,
                            error: error.clone(),
                        },
                    )
                    .await
                }
                None => Self::emit(&events, WorkflowEvent::NodeCompleted { node }).await,
            }
        }

        state.apply(email);
        state.apply(linkedin);
        state.apply(script);

        Self::set_status(&mut state, &events, Status::Complete).await;
        Self::emit(
            &events,
            WorkflowEvent::Finished {
                status: state.status,
            },
        )
        .await;
        state
    }
}
