//! # EBM Common Library
//!
//! Shared code for the EBM modules including:
//! - Domain model (value objects, submission entity, calculators)
//! - Specificity checker and strength scoring
//! - Database schema and row models
//! - API request/response types
//! - Configuration loading
//! - Storage and repository ports

pub mod api;
pub mod config;
#[cfg(feature = "sqlx")]
pub mod db;
pub mod domain;
pub mod error;
pub mod limits;

pub use error::{Error, Result};
