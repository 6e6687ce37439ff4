//! Upload client for the external object store.
//!
//! Documents are sent as a multipart body to a pre-configured, unsigned upload
//! channel. The store answers with a permanent `secure_url` that later feeds
//! the [`crate::document`] URL derivation.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐  multipart: file + upload_preset  ┌──────────────┐
//! │  DocumentUploader    │ ─────────────────────────────────▶│ object store │
//! │  (StorageService)    │ ◀──────────────── { secure_url } ─│   endpoint   │
//! └──────────────────────┘                                   └──────────────┘
//! ```

mod config;
mod error;
mod service;

pub use config::StorageConfig;
pub use error::UploadError;
pub use service::{DocumentUploader, LocalDocument, StorageService};
