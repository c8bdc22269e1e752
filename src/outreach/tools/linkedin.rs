// SPDX-License-Identifier: MIT

//! LinkedIn message drafts
//!
//! LinkedIn offers no supported API for personal message drafts, so drafts
//! are queued as files under the output directory for manual sending.

use crate::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Draft persistence interface for the LinkedIn node
#[async_trait]
pub trait LinkedInDrafts: Send + Sync {
    /// Queue a message draft. Returns `true` only when the draft reached
    /// LinkedIn itself rather than a local queue.
    async fn create_message_draft(&self, recipient: &str, message: &str) -> Result<bool>;
}

pub struct LocalLinkedInQueue {
    queue_dir: PathBuf,
}

impl LocalLinkedInQueue {
    pub fn new(queue_dir: impl Into<PathBuf>) -> Self {
        Self {
            queue_dir: queue_dir.into(),
        }
    }
}

fn sanitize(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

#[async_trait]
impl LinkedInDrafts for LocalLinkedInQueue {
    async fn create_message_draft(&self, recipient: &str, message: &str) -> Result<bool> {
        tokio::fs::create_dir_all(&self.queue_dir).await?;

        let path = self
            .queue_dir
            .join(format!("linkedin_{}.txt", sanitize(recipient)));
        let content = format!("To: {}\n\n{}\n", recipient, message);
        tokio::fs::write(&path, content).await?;

        log::info!(
            "Queued LinkedIn draft for {} at {}",
            recipient,
            path.display()
        );
        Ok(false)
    }
}
