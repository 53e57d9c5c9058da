//! SQLite implementation of the submission repository port

use async_trait::async_trait;
use chrono::SecondsFormat;
use sqlx::SqlitePool;
use uuid::Uuid;

use ebm_common::db::SubmissionRow;
use ebm_common::domain::submission::{Submission, SubmissionStatus, DEFAULT_SPRINT};
use ebm_common::domain::SubmissionRepository;
use ebm_common::{Error, Result};

const SELECT_COLUMNS: &str = "id, tool_name, user_id, user_name, company_id, company_name, \
                              sprint_number, submitted_at, status, completion_percentage, tool_data";

/// Repository over the energy_submissions table
#[derive(Clone)]
pub struct SqliteSubmissionRepository {
    db: SqlitePool,
}

impl SqliteSubmissionRepository {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SubmissionRepository for SqliteSubmissionRepository {
    async fn save(&self, submission: Submission) -> Result<Submission> {
        let tool_data = serde_json::to_string(&submission.tool_data)
            .map_err(|e| Error::Internal(format!("Cannot serialize tool_data: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO energy_submissions
                (id, tool_name, user_id, user_name, company_id, company_name,
                 sprint_number, submitted_at, status, completion_percentage, tool_data)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(submission.id.to_string())
        .bind(&submission.tool_name)
        .bind(&submission.user_id)
        .bind(&submission.user_name)
        .bind(&submission.company_id)
        .bind(&submission.company_name)
        .bind(submission.sprint_number.as_deref().unwrap_or(DEFAULT_SPRINT))
        .bind(
            submission
                .submitted_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        )
        .bind(submission.status.as_str())
        .bind(submission.completion_percentage)
        .bind(tool_data)
        .execute(&self.db)
        .await?;

        // Read the canonical stored copy back
        self.find_by_id(submission.id)
            .await?
            .ok_or_else(|| Error::Internal("Inserted submission not found".to_string()))
    }

    async fn find_by_company(
        &self,
        company_id: &str,
        status: SubmissionStatus,
        limit: i64,
    ) -> Result<Vec<Submission>> {
        let rows: Vec<SubmissionRow> = sqlx::query_as(&format!(
            "SELECT {} FROM energy_submissions \
             WHERE company_id = ? AND status = ? \
             ORDER BY submitted_at DESC LIMIT ?",
            SELECT_COLUMNS
        ))
        .bind(company_id)
        .bind(status.as_str())
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(SubmissionRow::into_submission).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Submission>> {
        let row: Option<SubmissionRow> = sqlx::query_as(&format!(
            "SELECT {} FROM energy_submissions WHERE id = ?",
            SELECT_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.db)
        .await?;

        row.map(SubmissionRow::into_submission).transpose()
    }
}
