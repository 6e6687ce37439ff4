//! URL derivation for stored documents.

use serde::Serialize;

use super::purpose::DocumentPurpose;

/// Delimiter between the object store's static prefix and the asset path.
pub const UPLOAD_MARKER: &str = "/upload/";

/// File name used by download URLs when none is supplied.
pub const DEFAULT_DOWNLOAD_FILE_NAME: &str = "paysheet.pdf";

const VIEW_DIRECTIVES: &str = "fl_attachment:inline,f_auto,q_auto,w_1200,dpr_auto";
const MOBILE_DIRECTIVES: &str = "f_auto,q_auto:eco,w_800";
const EMBED_DIRECTIVES: &str = "f_auto,q_auto";
const DOWNLOAD_DIRECTIVE_PREFIX: &str = "fl_attachment:";

/// Insert `directives` after the first upload marker, or return `url`
/// unchanged when there is no marker.
fn splice(url: &str, directives: &str) -> String {
    match url.split_once(UPLOAD_MARKER) {
        Some((prefix, suffix)) => format!("{prefix}{UPLOAD_MARKER}{directives}/{suffix}"),
        None => url.to_string(),
    }
}

/// Inline display URL: automatic format and quality, 1200px wide, DPR aware.
#[must_use]
pub fn view_url(url: &str) -> String {
    splice(url, VIEW_DIRECTIVES)
}

/// Attachment URL that forces a download under `file_name`.
///
/// The name is percent-encoded. A missing or empty name falls back to
/// [`DEFAULT_DOWNLOAD_FILE_NAME`].
#[must_use]
pub fn download_url(url: &str, file_name: Option<&str>) -> String {
    let name = file_name
        .filter(|name| !name.is_empty())
        .map_or_else(
            || DEFAULT_DOWNLOAD_FILE_NAME.to_string(),
            |name| urlencoding::encode(name).into_owned(),
        );
    splice(url, &format!("{DOWNLOAD_DIRECTIVE_PREFIX}{name}"))
}

/// Economical rendition for mobile devices; never forces a download.
#[must_use]
pub fn mobile_url(url: &str) -> String {
    splice(url, MOBILE_DIRECTIVES)
}

/// Automatic format and quality only, for in-app viewers.
#[must_use]
pub fn embed_url(url: &str) -> String {
    splice(url, EMBED_DIRECTIVES)
}

/// Derive the URL for a typed purpose.
#[must_use]
pub fn derive_url(url: &str, purpose: DocumentPurpose, file_name: Option<&str>) -> String {
    match purpose {
        DocumentPurpose::View => view_url(url),
        DocumentPurpose::Download => download_url(url, file_name),
        DocumentPurpose::Mobile => mobile_url(url),
        DocumentPurpose::Embed => embed_url(url),
    }
}

/// Derive the URL for a free-form usage string.
///
/// Unknown or missing usages are treated as [`DocumentPurpose::View`]. An
/// empty URL stays empty.
#[must_use]
pub fn optimized_url(url: &str, usage: Option<&str>, file_name: Option<&str>) -> String {
    if url.is_empty() {
        return String::new();
    }
    derive_url(url, DocumentPurpose::from_usage(usage), file_name)
}

/// All four derived URLs for one stored document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentLinks {
    /// Inline display URL.
    pub view: String,
    /// Forced download URL.
    pub download: String,
    /// Mobile-optimized URL.
    pub mobile: String,
    /// Embed URL.
    pub embed: String,
}

impl DocumentLinks {
    /// Build links for a stored document, or `None` when there is no document.
    #[must_use]
    pub fn for_document(url: &str, file_name: &str) -> Option<Self> {
        if url.is_empty() {
            return None;
        }
        let file_name = Some(file_name);
        Some(Self {
            view: derive_url(url, DocumentPurpose::View, file_name),
            download: derive_url(url, DocumentPurpose::Download, file_name),
            mobile: derive_url(url, DocumentPurpose::Mobile, file_name),
            embed: derive_url(url, DocumentPurpose::Embed, file_name),
        })
    }
}
