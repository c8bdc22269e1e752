// SPDX-License-Identifier: MIT

//! outreach-rs - lead outreach automation
//!
//! Given a sales lead identifier, the crate retrieves or researches
//! enrichment data, then drafts an email, a LinkedIn message, and a call
//! script. The core is a five-node workflow graph with one conditional
//! edge and a three-way drafting fan-out.
//!
//! - [error] - typed error taxonomy
//! - [llm] - chat model trait and provider implementations
//! - [outreach] - lead state, workflow graph, tools, HTTP server

pub mod error;
pub mod llm;
pub mod outreach;
