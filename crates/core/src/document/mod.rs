//! Purpose-specific access URLs for stored documents.
//!
//! Permanent object-store URLs have the shape `<prefix>/upload/<suffix>`.
//! Each [`DocumentPurpose`] splices its own transformation directives after
//! the first `/upload/` marker. Everything here is pure: no I/O, no failure.

mod inspect;
mod purpose;
mod url;

#[cfg(test)]
mod url_props;

pub use inspect::{DEFAULT_DOCUMENT_FILE_NAME, derive_file_name, is_plausible_document_url};
pub use purpose::DocumentPurpose;
pub use url::{
    DEFAULT_DOWNLOAD_FILE_NAME, DocumentLinks, UPLOAD_MARKER, derive_url, download_url, embed_url,
    mobile_url, optimized_url, view_url,
};
