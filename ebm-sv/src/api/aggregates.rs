//! Read-only aggregate endpoints backing the two dashboards

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use ebm_common::api::types::{
    CompanyAggregatesQuery, CompanySummaryResponse, ErrorBody, MemberRatings,
    TeamAggregatesQuery, TeamComparisonResponse, TeamMember,
};
use ebm_common::domain::aggregate;
use ebm_common::domain::submission::{Submission, SubmissionStatus};
use ebm_common::limits::LIST_LIMIT_MAX;

use crate::AppState;

/// Aggregate API errors
#[derive(Debug)]
pub enum AggregateError {
    BadQuery(String),
    FetchFailed,
}

impl IntoResponse for AggregateError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AggregateError::BadQuery(message) => {
                (StatusCode::BAD_REQUEST, ErrorBody::new(message))
            }
            AggregateError::FetchFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::new("Failed to fetch submissions. Please try again."),
            ),
        };
        (status, Json(body)).into_response()
    }
}

async fn completed_submissions(
    state: &AppState,
    company_id: &str,
) -> Result<Vec<Submission>, AggregateError> {
    state
        .repo
        .find_by_company(company_id, SubmissionStatus::Completed, LIST_LIMIT_MAX)
        .await
        .map_err(|e| {
            error!("Failed to fetch submissions for {}: {}", company_id, e);
            AggregateError::FetchFailed
        })
}

/// GET /api/aggregates/company?companyId=
///
/// Per-company summary: pillar averages, top drains, completion rate.
pub async fn company_summary(
    State(state): State<AppState>,
    Query(query): Query<CompanyAggregatesQuery>,
) -> Result<Json<CompanySummaryResponse>, AggregateError> {
    if query.company_id.is_empty() {
        return Err(AggregateError::BadQuery("companyId is required".to_string()));
    }

    let submissions = completed_submissions(&state, &query.company_id).await?;

    Ok(Json(CompanySummaryResponse {
        success: true,
        company_id: query.company_id,
        submission_count: submissions.len(),
        pillar_averages: aggregate::pillar_averages(&submissions),
        common_drains: aggregate::common_drains(&submissions),
        completion_rate: aggregate::completion_rate(&submissions),
    }))
}

/// GET /api/aggregates/team?companyId=&userIds=a@x,b@y
///
/// Side-by-side comparison over the selected members' submissions.
pub async fn team_comparison(
    State(state): State<AppState>,
    Query(query): Query<TeamAggregatesQuery>,
) -> Result<Json<TeamComparisonResponse>, AggregateError> {
    if query.company_id.is_empty() {
        return Err(AggregateError::BadQuery("companyId is required".to_string()));
    }
    let selected = query.selected_users();
    if selected.is_empty() {
        return Err(AggregateError::BadQuery(
            "userIds must name at least one team member".to_string(),
        ));
    }

    let submissions = completed_submissions(&state, &query.company_id).await?;
    let team: Vec<Submission> = submissions
        .into_iter()
        .filter(|s| selected.contains(&s.user_id.to_lowercase()))
        .collect();

    let members = team
        .iter()
        .map(|s| TeamMember {
            user_id: s.user_id.clone(),
            user_name: s.user_name.clone(),
            ratings: MemberRatings {
                sleep: s.tool_data.audit.sleep.rating,
                food: s.tool_data.audit.food.rating,
                movement: s.tool_data.audit.movement.rating,
                brain: s.tool_data.audit.brain.rating,
            },
            average_rating: s.average_pillar_rating(),
        })
        .collect();

    Ok(Json(TeamComparisonResponse {
        success: true,
        company_id: query.company_id,
        member_count: team.len(),
        pillar_averages: aggregate::pillar_averages(&team),
        common_drains: aggregate::common_drains(&team),
        members,
        patterns: aggregate::team_patterns(&team),
    }))
}
