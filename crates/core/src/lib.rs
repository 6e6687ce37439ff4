//! Core business logic for Lendy.
//!
//! This crate contains the loan application domain with no web server or database
//! dependencies. Persistence is reached through the
//! [`application::ApplicationRepository`] port, which the db crate implements.
//!
//! # Modules
//!
//! - `application` - Loan application records, validation, and the record service
//! - `document` - Purpose-specific URL derivation for stored documents
//! - `storage` - Upload client for the external object store

pub mod application;
pub mod document;
pub mod storage;
