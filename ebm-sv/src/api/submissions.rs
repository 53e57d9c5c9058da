//! Submission endpoints: submit, list, fetch

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;
use uuid::Uuid;

use ebm_common::api::types::{
    ErrorBody, FetchResponse, ListQuery, ListResponse, SubmitRequest, SubmitResponse,
};
use ebm_common::domain::submission::{NewSubmission, Submission, SubmissionStatus};
use ebm_common::domain::tool_data::FieldError;

use crate::AppState;

/// Submission API errors
#[derive(Debug)]
pub enum SubmissionError {
    Validation(Vec<FieldError>),
    BadQuery(String),
    NotFound,
    SaveFailed,
    FetchFailed,
}

impl IntoResponse for SubmissionError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            SubmissionError::Validation(details) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::with_details("Validation failed", details),
            ),
            SubmissionError::BadQuery(message) => {
                (StatusCode::BAD_REQUEST, ErrorBody::new(message))
            }
            SubmissionError::NotFound => {
                (StatusCode::NOT_FOUND, ErrorBody::new("Submission not found"))
            }
            SubmissionError::SaveFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::new("Failed to save submission. Please try again."),
            ),
            SubmissionError::FetchFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::new("Failed to fetch submissions. Please try again."),
            ),
        };
        (status, Json(body)).into_response()
    }
}

/// POST /api/submissions
///
/// Validates the request body, constructs the entity (server-assigned id
/// and timestamp), and persists it.
pub async fn submit_protocol(
    State(state): State<AppState>,
    Json(request): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>, SubmissionError> {
    let errors = request.validation_errors();
    if !errors.is_empty() {
        return Err(SubmissionError::Validation(errors));
    }

    let submission = Submission::create(NewSubmission {
        user_id: request.user_id.to_lowercase(),
        user_name: request.user_name,
        company_id: request.company_id,
        company_name: request.company_name,
        sprint_number: request.sprint_number,
        tool_data: request.tool_data,
    });

    let persisted = state.repo.save(submission).await.map_err(|e| {
        error!("Failed to save submission: {}", e);
        SubmissionError::SaveFailed
    })?;

    Ok(Json(SubmitResponse {
        success: true,
        id: persisted.id,
        message: "Protocol submitted successfully".to_string(),
    }))
}

/// GET /api/submissions?companyId=&status=&limit=
pub async fn list_submissions(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse>, SubmissionError> {
    if query.company_id.is_empty() {
        return Err(SubmissionError::BadQuery("companyId is required".to_string()));
    }

    let status: SubmissionStatus = query
        .status
        .as_deref()
        .unwrap_or("completed")
        .parse()
        .map_err(|_| {
            SubmissionError::BadQuery("status must be completed, draft, or deleted".to_string())
        })?;

    let submissions = state
        .repo
        .find_by_company(&query.company_id, status, query.effective_limit())
        .await
        .map_err(|e| {
            error!("Failed to fetch submissions: {}", e);
            SubmissionError::FetchFailed
        })?;

    let message = submissions
        .is_empty()
        .then(|| "No submissions found for this company".to_string());

    Ok(Json(ListResponse {
        success: true,
        count: submissions.len(),
        submissions,
        message,
    }))
}

/// GET /api/submissions/:id
pub async fn fetch_submission(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FetchResponse>, SubmissionError> {
    let submission = state
        .repo
        .find_by_id(id)
        .await
        .map_err(|e| {
            error!("Failed to fetch submission {}: {}", id, e);
            SubmissionError::FetchFailed
        })?
        .ok_or(SubmissionError::NotFound)?;

    Ok(Json(FetchResponse { success: true, submission }))
}
