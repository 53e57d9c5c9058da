//! HTTP API handlers for ebm-sv

pub mod aggregates;
pub mod health;
pub mod submissions;

pub use aggregates::{company_summary, team_comparison};
pub use health::health_routes;
pub use submissions::{fetch_submission, list_submissions, submit_protocol};
