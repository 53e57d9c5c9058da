//! Shared API request/response types
//!
//! Requests use camelCase field names; responses carry submissions in
//! their snake_case storage form.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::aggregate::{DrainCount, PillarAverages, TeamPatterns};
use crate::domain::submission::Submission;
use crate::domain::tool_data::{FieldError, ToolData};
use crate::domain::user_id::UserId;
use crate::limits::{
    LIST_LIMIT_DEFAULT, LIST_LIMIT_MAX, LIST_LIMIT_MIN, MAX_COMPANY_ID, MAX_COMPANY_NAME,
    MAX_USER_NAME,
};

/// POST /api/submissions request body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub user_id: String,
    pub user_name: String,
    pub company_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprint_number: Option<String>,
    pub tool_data: ToolData,
}

impl SubmitRequest {
    /// Collect every failing field; an empty result means the request is
    /// well-formed
    pub fn validation_errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if UserId::new(&self.user_id).is_err() {
            errors.push(FieldError { field: "userId".to_string(), message: "Invalid email format".to_string() });
        }
        let name_len = self.user_name.chars().count();
        if name_len == 0 || name_len > MAX_USER_NAME {
            errors.push(FieldError {
                field: "userName".to_string(),
                message: format!("Name must be 1-{} characters", MAX_USER_NAME),
            });
        }
        let company_len = self.company_id.chars().count();
        if company_len == 0 || company_len > MAX_COMPANY_ID {
            errors.push(FieldError {
                field: "companyId".to_string(),
                message: format!("Company ID must be 1-{} characters", MAX_COMPANY_ID),
            });
        }
        if let Some(company_name) = &self.company_name {
            if company_name.chars().count() > MAX_COMPANY_NAME {
                errors.push(FieldError {
                    field: "companyName".to_string(),
                    message: format!("Company name must be at most {} characters", MAX_COMPANY_NAME),
                });
            }
        }
        self.tool_data.collect_errors("toolData", &mut errors);

        errors
    }
}

/// Successful submit response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub id: Uuid,
    pub message: String,
}

/// Error body shared by all endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        ErrorBody { success: false, error: error.into(), details: None }
    }

    pub fn with_details(error: impl Into<String>, details: Vec<FieldError>) -> Self {
        ErrorBody { success: false, error: error.into(), details: Some(details) }
    }
}

/// GET /api/submissions query parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub company_id: String,
    /// Defaults to "completed"
    pub status: Option<String>,
    /// Clamped to [1, 500], default 100
    pub limit: Option<i64>,
}

impl ListQuery {
    pub fn effective_limit(&self) -> i64 {
        self.limit
            .unwrap_or(LIST_LIMIT_DEFAULT)
            .clamp(LIST_LIMIT_MIN, LIST_LIMIT_MAX)
    }
}

/// GET /api/submissions response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    pub success: bool,
    pub count: usize,
    pub submissions: Vec<Submission>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// GET /api/submissions/:id response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchResponse {
    pub success: bool,
    pub submission: Submission,
}

/// GET /api/aggregates/company query parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyAggregatesQuery {
    pub company_id: String,
}

/// Per-company dashboard reduction
#[derive(Debug, Clone, Serialize)]
pub struct CompanySummaryResponse {
    pub success: bool,
    pub company_id: String,
    pub submission_count: usize,
    pub pillar_averages: PillarAverages,
    pub common_drains: Vec<DrainCount>,
    pub completion_rate: u64,
}

/// GET /api/aggregates/team query parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamAggregatesQuery {
    pub company_id: String,
    /// Comma-separated user emails selecting the team members
    pub user_ids: String,
}

impl TeamAggregatesQuery {
    /// Selected member ids, lowercase, empty entries dropped
    pub fn selected_users(&self) -> Vec<String> {
        self.user_ids
            .split(',')
            .map(|id| id.trim().to_lowercase())
            .filter(|id| !id.is_empty())
            .collect()
    }
}

/// One member row in the team comparison
#[derive(Debug, Clone, Serialize)]
pub struct TeamMember {
    pub user_id: String,
    pub user_name: String,
    pub ratings: MemberRatings,
    /// Unrounded mean of the four ratings
    pub average_rating: f64,
}

/// Per-pillar ratings for one member
#[derive(Debug, Clone, Serialize)]
pub struct MemberRatings {
    pub sleep: i64,
    pub food: i64,
    pub movement: i64,
    pub brain: i64,
}

/// Team comparison dashboard response
#[derive(Debug, Clone, Serialize)]
pub struct TeamComparisonResponse {
    pub success: bool,
    pub company_id: String,
    pub member_count: usize,
    pub pillar_averages: PillarAverages,
    pub common_drains: Vec<DrainCount>,
    pub members: Vec<TeamMember>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patterns: Option<TeamPatterns>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tool_data::fixtures::valid_tool_data;

    fn valid_request() -> SubmitRequest {
        SubmitRequest {
            user_id: "user@example.com".to_string(),
            user_name: "Test User".to_string(),
            company_id: "acme-corp".to_string(),
            company_name: Some("Acme Corp".to_string()),
            sprint_number: None,
            tool_data: valid_tool_data(),
        }
    }

    #[test]
    fn valid_request_has_no_errors() {
        assert!(valid_request().validation_errors().is_empty());
    }

    #[test]
    fn top_level_fields_are_checked() {
        let mut request = valid_request();
        request.user_id = "not-an-email".to_string();
        request.user_name = String::new();
        request.company_id = "x".repeat(51);

        let fields: Vec<String> = request
            .validation_errors()
            .into_iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(fields, vec!["userId", "userName", "companyId"]);
    }

    #[test]
    fn request_uses_camel_case_on_the_wire() {
        let json = serde_json::to_value(valid_request()).unwrap();
        assert!(json.get("userId").is_some());
        assert!(json.get("toolData").is_some());
        assert!(json.get("user_id").is_none());
        let back: SubmitRequest = serde_json::from_value(json).unwrap();
        assert!(back.validation_errors().is_empty());
    }

    #[test]
    fn list_limit_clamps() {
        let query = |limit| ListQuery {
            company_id: "acme".to_string(),
            status: None,
            limit,
        };
        assert_eq!(query(None).effective_limit(), 100);
        assert_eq!(query(Some(0)).effective_limit(), 1);
        assert_eq!(query(Some(9999)).effective_limit(), 500);
        assert_eq!(query(Some(25)).effective_limit(), 25);
    }

    #[test]
    fn team_query_splits_and_normalizes_user_ids() {
        let query = TeamAggregatesQuery {
            company_id: "acme".to_string(),
            user_ids: "A@x.com, b@y.com,,  ".to_string(),
        };
        assert_eq!(query.selected_users(), vec!["a@x.com", "b@y.com"]);
    }
}
