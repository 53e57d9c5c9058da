//! HTTP implementation of the submission repository port
//!
//! Talks to ebm-sv. Backend failures surface as a generic user-facing
//! message; the underlying detail is logged.

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::error;
use uuid::Uuid;

use ebm_common::api::types::{
    ErrorBody, FetchResponse, ListResponse, SubmitRequest, SubmitResponse,
};
use ebm_common::domain::submission::{Submission, SubmissionStatus};
use ebm_common::domain::SubmissionRepository;
use ebm_common::{Error, Result};

const SAVE_FAILED: &str = "Failed to save submission. Please try again.";
const FETCH_FAILED: &str = "Failed to fetch submissions. Please try again.";

/// Repository client for the submissions server
#[derive(Debug, Clone)]
pub struct HttpSubmissionRepository {
    base_url: String,
    http: reqwest::Client,
}

impl HttpSubmissionRepository {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        HttpSubmissionRepository { base_url, http: reqwest::Client::new() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn log_error_body(response: reqwest::Response) -> String {
        match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => "unreadable error body".to_string(),
        }
    }
}

#[async_trait]
impl SubmissionRepository for HttpSubmissionRepository {
    async fn save(&self, submission: Submission) -> Result<Submission> {
        let request = SubmitRequest {
            user_id: submission.user_id.clone(),
            user_name: submission.user_name.clone(),
            company_id: submission.company_id.clone(),
            company_name: submission.company_name.clone(),
            sprint_number: submission.sprint_number.clone(),
            tool_data: submission.tool_data.clone(),
        };

        let response = self
            .http
            .post(self.url("/api/submissions"))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Submit request failed: {}", e);
                Error::Http(SAVE_FAILED.to_string())
            })?;

        if !response.status().is_success() {
            let detail = Self::log_error_body(response).await;
            error!("Submit rejected: {}", detail);
            return Err(Error::Http(SAVE_FAILED.to_string()));
        }

        let body: SubmitResponse = response.json().await.map_err(|e| {
            error!("Submit response unreadable: {}", e);
            Error::Http(SAVE_FAILED.to_string())
        })?;

        // The server assigns the canonical identity
        Ok(Submission { id: body.id, ..submission })
    }

    async fn find_by_company(
        &self,
        company_id: &str,
        status: SubmissionStatus,
        limit: i64,
    ) -> Result<Vec<Submission>> {
        let limit = limit.to_string();
        let response = self
            .http
            .get(self.url("/api/submissions"))
            .query(&[
                ("companyId", company_id),
                ("status", status.as_str()),
                ("limit", limit.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                error!("List request failed: {}", e);
                Error::Http(FETCH_FAILED.to_string())
            })?;

        if !response.status().is_success() {
            let detail = Self::log_error_body(response).await;
            error!("List rejected: {}", detail);
            return Err(Error::Http(FETCH_FAILED.to_string()));
        }

        let body: ListResponse = response.json().await.map_err(|e| {
            error!("List response unreadable: {}", e);
            Error::Http(FETCH_FAILED.to_string())
        })?;

        Ok(body.submissions)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Submission>> {
        let response = self
            .http
            .get(self.url(&format!("/api/submissions/{}", id)))
            .send()
            .await
            .map_err(|e| {
                error!("Fetch request failed: {}", e);
                Error::Http(FETCH_FAILED.to_string())
            })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            let detail = Self::log_error_body(response).await;
            error!("Fetch rejected: {}", detail);
            return Err(Error::Http(FETCH_FAILED.to_string()));
        }

        let body: FetchResponse = response.json().await.map_err(|e| {
            error!("Fetch response unreadable: {}", e);
            Error::Http(FETCH_FAILED.to_string())
        })?;

        Ok(Some(body.submission))
    }
}
