//! Shared identifiers, errors, and configuration for Lendy.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for loan application records
//! - Application-wide error taxonomy
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::AppError;
pub use types::ApplicationId;
