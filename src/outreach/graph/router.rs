// SPDX-License-Identifier: MIT

//! Routing decision after enrichment retrieval

use crate::outreach::state::LeadState;

/// Closed set of next steps after `retrieve_enrichment`: either insert the
/// research step or go straight to the drafting fan-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    Research,
    Draft,
}

/// Route based on the coverage flag set by the enrichment node
pub fn route_after_enrichment(state: &LeadState) -> NextStep {
    if state.enrichment_sufficient {
        NextStep::Draft
    } else {
        NextStep::Research
    }
}
