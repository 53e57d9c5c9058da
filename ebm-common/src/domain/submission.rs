//! Submission aggregate root

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::pillar::Pillar;
use crate::domain::tool_data::ToolData;

/// Tool name recorded on every submission row
pub const TOOL_NAME: &str = "energy_body_mind";

/// Sprint number recorded when the client does not supply one
pub const DEFAULT_SPRINT: &str = "energy";

/// Submission lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Completed,
    Draft,
    Deleted,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Completed => "completed",
            SubmissionStatus::Draft => "draft",
            SubmissionStatus::Deleted => "deleted",
        }
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completed" => Ok(SubmissionStatus::Completed),
            "draft" => Ok(SubmissionStatus::Draft),
            "deleted" => Ok(SubmissionStatus::Deleted),
            other => Err(crate::Error::InvalidInput(format!(
                "Unknown submission status: {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-supplied fields for a new submission
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub user_id: String,
    pub user_name: String,
    pub company_id: String,
    pub company_name: Option<String>,
    pub sprint_number: Option<String>,
    pub tool_data: ToolData,
}

/// One completed assessment. Constructed once, never updated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    pub tool_name: String,
    pub user_id: String,
    pub user_name: String,
    pub company_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprint_number: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub status: SubmissionStatus,
    pub completion_percentage: i64,
    pub tool_data: ToolData,
}

impl Submission {
    /// Build a completed submission: fresh id, current timestamp, status
    /// completed, completion 100. Field-level validation happens upstream
    /// (wizard + transport schema), not here.
    pub fn create(props: NewSubmission) -> Self {
        Submission {
            id: Uuid::new_v4(),
            tool_name: TOOL_NAME.to_string(),
            user_id: props.user_id,
            user_name: props.user_name,
            company_id: props.company_id,
            company_name: props.company_name,
            sprint_number: props.sprint_number,
            submitted_at: Utc::now(),
            status: SubmissionStatus::Completed,
            completion_percentage: 100,
            tool_data: props.tool_data,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.completion_percentage == 100 && self.status == SubmissionStatus::Completed
    }

    /// Unrounded arithmetic mean of the four pillar ratings
    pub fn average_pillar_rating(&self) -> f64 {
        let total: i64 = Pillar::ALL
            .iter()
            .map(|&p| self.tool_data.audit.get(p).rating)
            .sum();
        total as f64 / Pillar::ALL.len() as f64
    }
}
