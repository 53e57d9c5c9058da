//! Shared API types for the EBM modules

pub mod types;
