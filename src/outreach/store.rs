// SPDX-License-Identifier: MIT

//! Lead enrichment store
//!
//! The workflow only needs one operation from the store: look up the
//! enrichment record for a lead identifier. `MemoryLeadStore` keeps the
//! records loaded from a JSON file and matches exactly on email or lead
//! id, with a relaxed company/name fallback for `name - company` inputs.

use crate::error::Result;
use crate::outreach::state::{Enrichment, LeadProfile};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Lookup interface consumed by the enrichment node
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Look up enrichment data for a lead identifier (email or lead id).
    async fn query(&self, identifier: &str) -> Result<Option<Enrichment>>;
}

/// Raw enrichment record as stored in a leads JSON file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadRecord {
    pub lead_id: String,
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
    #[serde(default)]
    pub enrichment_text: String,
}

impl LeadRecord {
    fn to_enrichment(&self) -> Enrichment {
        let content = format!(
            "Company: {}\nIndustry: {}\nRevenue: {}\nTitle: {}\nLocation: {}\n{}",
            self.company, self.industry, self.revenue, self.title, self.location,
            self.enrichment_text.trim()
        );

        Enrichment {
            content: content.trim().to_string(),
            profile: LeadProfile {
                lead_id: self.lead_id.clone(),
                email: self.email.clone(),
                company: self.company.clone(),
                industry: self.industry.clone(),
                revenue: self.revenue.clone(),
                title: self.title.clone(),
                location: self.location.clone(),
            },
        }
    }
}

/// In-memory lead store backed by a JSON file
pub struct MemoryLeadStore {
    records: Vec<LeadRecord>,
}

impl MemoryLeadStore {
    pub fn new(records: Vec<LeadRecord>) -> Self {
        Self { records }
    }

    /// Load records from a JSON array file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let records: Vec<LeadRecord> = serde_json::from_str(&content)?;
        log::info!("Loaded {} lead records", records.len());
        Ok(Self::new(records))
    }

    pub fn records(&self) -> &[LeadRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl LeadStore for MemoryLeadStore {
    async fn query(&self, identifier: &str) -> Result<Option<Enrichment>> {
        let needle = identifier.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(None);
        }

        // Exact match on email or lead id first
        if let Some(record) = self.records.iter().find(|r| {
            r.email.to_lowercase() == needle || r.lead_id.to_lowercase() == needle
        }) {
            return Ok(Some(record.to_enrichment()));
        }

        // Relaxed fallback for "name - company" identifiers
        Ok(self
            .records
            .iter()
            .find(|r| !r.company.is_empty() && needle.contains(&r.company.to_lowercase()))
            .map(|r| r.to_enrichment()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<LeadRecord> {
        vec![
            LeadRecord {
                lead_id: "lead_001".to_string(),
                email: "sarah.johnson@techcorp.com".to_string(),
                company: "TechCorp".to_string(),
                industry: "Software".to_string(),
                revenue: "10M-50M".to_string(),
                title: "VP of Engineering".to_string(),
                location: "San Francisco, CA".to_string(),
                enrichment_text: "Rapidly growing SaaS company.".to_string(),
            },
            LeadRecord {
                lead_id: "lead_002".to_string(),
                email: "mike.chen@datainsights.io".to_string(),
                company: "DataInsights".to_string(),
                industry: "Data Analytics".to_string(),
                revenue: String::new(),
                title: "Director of Data Science".to_string(),
                location: "New York, NY".to_string(),
                enrichment_text: String::new(),
            },
        ]
    }

    #[tokio::test]
    async fn test_query_by_email() {
        let store = MemoryLeadStore::new(records());
        let enr = store
            .query("sarah.johnson@techcorp.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(enr.profile.company, "TechCorp");
        assert!(enr.content.contains("VP of Engineering"));
    }

    #[tokio::test]
    async fn test_query_by_lead_id() {
        let store = MemoryLeadStore::new(records());
        let enr = store.query("lead_002").await.unwrap().unwrap();
        assert_eq!(enr.profile.email, "mike.chen@datainsights.io");
    }

    #[tokio::test]
    async fn test_query_company_fallback() {
        let store = MemoryLeadStore::new(records());
        let enr = store.query("jane doe - TechCorp").await.unwrap().unwrap();
        assert_eq!(enr.profile.lead_id, "lead_001");
    }

    #[tokio::test]
    async fn test_query_miss() {
        let store = MemoryLeadStore::new(records());
        assert!(store.query("nobody@nowhere.com").await.unwrap().is_none());
        assert!(store.query("").await.unwrap().is_none());
    }
}
