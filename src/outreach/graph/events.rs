// SPDX-License-Identifier: MIT

//! Progress events emitted during a workflow run

use crate::outreach::state::Status;
use serde::{Deserialize, Serialize};

/// The five nodes of the workflow graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeId {
    RetrieveEnrichment,
    WebResearch,
    DraftEmail,
    DraftLinkedin,
    DraftCallScript,
}

impl NodeId {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeId::RetrieveEnrichment => "retrieve_enrichment",
            NodeId::WebResearch => "web_research",
            NodeId::DraftEmail => "draft_email",
            NodeId::DraftLinkedin => "draft_linkedin",
            NodeId::DraftCallScript => "draft_call_script",
        }
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Event stream for callers that want per-node progress (CLI spinner, SSE)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorkflowEvent {
    StatusChanged { status: Status },
    NodeStarted { node: NodeId },
    NodeCompleted { node: NodeId },
    NodeFailed { node: NodeId, error: String },
    Finished { status: Status },
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_serde() {
        assert_eq!(
            serde_json::to_string(&NodeId::DraftCallScript).unwrap(),
            "\"draft_call_script\""
        );
    }

    #[test]
    fn test_event_tagged_serialization() {
        let event = WorkflowEvent::NodeFailed {
            node: NodeId::WebResearch,
            error: "boom".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "node_failed");
        assert_eq!(json["node"], "web_research");
        assert_eq!(json["error"], "boom");
    }
}
