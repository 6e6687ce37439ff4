//! Document usage contexts.

use serde::{Deserialize, Serialize};

/// Intended consumption context for a derived document URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentPurpose {
    /// Inline display in a browser or viewer.
    #[default]
    View,
    /// Forced download under a chosen file name.
    Download,
    /// Bandwidth-economical rendition for phones.
    Mobile,
    /// Plain rendition for in-app viewers.
    Embed,
}

impl DocumentPurpose {
    /// All purposes, in a stable order.
    pub const ALL: [Self; 4] = [Self::View, Self::Download, Self::Mobile, Self::Embed];

    /// Convert to its wire string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Download => "download",
            Self::Mobile => "mobile",
            Self::Embed => "embed",
        }
    }

    /// Parse from its wire string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "view" => Some(Self::View),
            "download" => Some(Self::Download),
            "mobile" => Some(Self::Mobile),
            "embed" => Some(Self::Embed),
            _ => None,
        }
    }

    /// Resolve an optional usage string, falling back to [`Self::View`] for
    /// missing or unrecognized values.
    #[must_use]
    pub fn from_usage(usage: Option<&str>) -> Self {
        usage.and_then(Self::parse).unwrap_or_default()
    }
}

impl std::fmt::Display for DocumentPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
