//! Checks and extraction helpers for stored document URLs.

use reqwest::Url;

use crate::storage::StorageConfig;

/// Fallback name for documents whose URL carries no usable file name.
pub const DEFAULT_DOCUMENT_FILE_NAME: &str = "document.pdf";

/// Whether `url` plausibly points at a stored document.
///
/// The URL must parse, and it must either mention a `.pdf` or be served by the
/// configured document host.
#[must_use]
pub fn is_plausible_document_url(url: &str, config: &StorageConfig) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    url.contains(".pdf") || parsed.host_str().is_some_and(|h| config.is_document_host(h))
}

/// Extract a PDF file name from the last path segment of `url`.
///
/// Returns `fallback` when the segment does not look like a PDF name or cannot
/// be percent-decoded.
#[must_use]
pub fn derive_file_name(url: &str, fallback: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let segment = path.rsplit('/').next().unwrap_or_default();

    if segment.is_empty() || !segment.contains(".pdf") {
        return fallback.to_string();
    }

    urlencoding::decode(segment).map_or_else(|_| fallback.to_string(), |name| name.into_owned())
}
