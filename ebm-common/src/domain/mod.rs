//! Domain model: value objects, entities, and the pure calculators

pub mod aggregate;
pub mod pillar;
pub mod ports;
pub mod protocol;
pub mod rating;
pub mod specificity;
pub mod strength;
pub mod submission;
pub mod tool_data;
pub mod user_id;

pub use pillar::Pillar;
pub use ports::{DraftStore, SubmissionRepository};
pub use protocol::Protocol;
pub use rating::{Rating, RatingBand};
pub use specificity::SpecificityReport;
pub use submission::{NewSubmission, Submission, SubmissionStatus};
pub use tool_data::ToolData;
pub use user_id::UserId;
