//! ebm-wz library - Assessment Wizard module
//!
//! Interactive client for the EBM assessment: section flow with live
//! validation, debounced draft autosave, progress tracking, and submission
//! over HTTP to ebm-sv.

pub mod autosave;
pub mod client;
pub mod forms;
pub mod progress;
pub mod storage;
pub mod wizard;

pub use autosave::{AutoSave, SaveState};
pub use client::HttpSubmissionRepository;
pub use forms::{FieldRule, FormValidator};
pub use progress::ProgressTracker;
pub use storage::FileDraftStore;
pub use wizard::{Identity, Wizard};
