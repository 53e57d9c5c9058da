//! Ports to durable storage
//!
//! The repository is the only place that talks to the submissions store;
//! the draft store is the only place that talks to local per-device
//! storage. Implementations live with the binaries that own the transport.

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::submission::{Submission, SubmissionStatus};
use crate::Result;

/// Durable submission storage
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Persist a submission, returning the canonical stored copy
    async fn save(&self, submission: Submission) -> Result<Submission>;

    /// Fetch submissions for a company, newest first
    async fn find_by_company(
        &self,
        company_id: &str,
        status: SubmissionStatus,
        limit: i64,
    ) -> Result<Vec<Submission>>;

    /// Fetch one submission by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Submission>>;
}

/// Local per-device draft storage for in-progress wizard answers
#[async_trait]
pub trait DraftStore: Send + Sync {
    /// Persist a draft snapshot under a key.
    ///
    /// Exhausted storage surfaces as `Error::StorageQuota`, distinct from
    /// generic `Error::Storage` failures.
    async fn save(&self, key: &str, data: &Value) -> Result<()>;

    /// Load a draft; missing keys are `Ok(None)`
    async fn load(&self, key: &str) -> Result<Option<Value>>;

    /// Remove a draft; removing a missing key is a no-op
    async fn clear(&self, key: &str) -> Result<()>;
}
