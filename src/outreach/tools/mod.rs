// SPDX-License-Identifier: MIT

//! Clients for external collaborators: web search, Gmail drafts, LinkedIn drafts

pub mod gmail;
pub mod linkedin;
pub mod search;
