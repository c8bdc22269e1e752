// SPDX-License-Identifier: MIT

//! Lead workflow graph
//!
//! Five nodes, one conditional edge, one drafting fan-out:
//!
//! ```text
//! retrieve_enrichment ──┬── (insufficient) ──► web_research ──┐
//!                       │                                     │
//!                       └── (sufficient) ─────────────────────┤
//!                                                             ▼
//!                               draft_email / draft_linkedin / draft_call_script
//!                                                             │
//!                                                             ▼
//!                                                   complete | failed
//! ```

mod events;
mod executor;
mod nodes;
pub mod prompts;
mod router;

pub use events::{NodeId, WorkflowEvent};
pub use executor::{OutreachGraph, RunReport};
pub use router::{route_after_enrichment, NextStep};
