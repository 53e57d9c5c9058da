//! Database row models and row-to-entity mapping
//!
//! `SubmissionRow` is the only place the raw table shape appears; the
//! conversion to the domain entity happens in exactly one function.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::submission::{Submission, SubmissionStatus};
use crate::domain::tool_data::ToolData;
use crate::{Error, Result};

/// One row of the energy_submissions table
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SubmissionRow {
    pub id: String,
    pub tool_name: String,
    pub user_id: String,
    pub user_name: String,
    pub company_id: String,
    pub company_name: Option<String>,
    pub sprint_number: String,
    pub submitted_at: String,
    pub status: String,
    pub completion_percentage: i64,
    /// JSON document with the full nested payload
    pub tool_data: String,
}

impl SubmissionRow {
    /// Parse a row into the domain entity
    pub fn into_submission(self) -> Result<Submission> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| Error::Internal(format!("Bad submission id {:?}: {}", self.id, e)))?;
        let submitted_at = DateTime::parse_from_rfc3339(&self.submitted_at)
            .map_err(|e| {
                Error::Internal(format!("Bad submitted_at {:?}: {}", self.submitted_at, e))
            })?
            .with_timezone(&Utc);
        let status: SubmissionStatus = self.status.parse()?;
        let tool_data: ToolData = serde_json::from_str(&self.tool_data)
            .map_err(|e| Error::Internal(format!("Bad tool_data document: {}", e)))?;

        Ok(Submission {
            id,
            tool_name: self.tool_name,
            user_id: self.user_id,
            user_name: self.user_name,
            company_id: self.company_id,
            company_name: self.company_name,
            sprint_number: Some(self.sprint_number),
            submitted_at,
            status,
            completion_percentage: self.completion_percentage,
            tool_data,
        })
    }
}
