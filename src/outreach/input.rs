// SPDX-License-Identifier: MIT

//! Lead input parsing
//!
//! Two formats are accepted:
//! - Email: `john.doe@acme.com`
//! - Name + company: `john smith - Nike`

use crate::error::{OutreachError, Result};
use crate::outreach::state::LeadState;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap()
});

static NAME_COMPANY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.+?)\s*-\s*(.+)$").unwrap());

/// A parsed lead identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeadInput {
    Email(String),
    NameCompany { name: String, company: String },
}

impl LeadInput {
    pub fn parse(raw: &str) -> Result<Self> {
        let input = raw.trim();
        if input.is_empty() {
            return Err(OutreachError::Input("input cannot be empty".to_string()));
        }

        if EMAIL_RE.is_match(input) {
            return Ok(LeadInput::Email(input.to_string()));
        }

        if let Some(caps) = NAME_COMPANY_RE.captures(input) {
            let name = caps[1].trim().to_string();
            let company = caps[2].trim().to_string();

            if name.split_whitespace().count() < 2 {
                return Err(OutreachError::Input(
                    "name should include at least first and last name (e.g. 'john smith - Nike')"
                        .to_string(),
                ));
            }
            if company.is_empty() {
                return Err(OutreachError::Input("company name cannot be empty".to_string()));
            }

            return Ok(LeadInput::NameCompany { name, company });
        }

        Err(OutreachError::Input(
            "use either an email (john.doe@acme.com) or 'name - company' (john smith - Nike)"
                .to_string(),
        ))
    }

    /// Human-readable identifier for logs and display
    pub fn display_identifier(&self) -> String {
        match self {
            LeadInput::Email(email) => email.clone(),
            LeadInput::NameCompany { name, company } => format!("{} at {}", name, company),
        }
    }

    /// Build the initial workflow state for this lead
    pub fn into_state(self, lead_id: impl Into<String>) -> LeadState {
        let state = LeadState::new(lead_id);
        match self {
            LeadInput::Email(email) => state.with_email(email),
            LeadInput::NameCompany { name, company } => state.with_name_company(name, company),
        }
    }
}
