//! Property-based tests for document URL derivation.

use proptest::prelude::*;

use super::purpose::DocumentPurpose;
use super::url::{derive_url, UPLOAD_MARKER};

fn without_marker() -> impl Strategy<Value = String> {
    ".*".prop_filter("must not contain the upload marker", |s| {
        !s.contains(UPLOAD_MARKER)
    })
}

proptest! {
    /// A URL without the marker segment is returned unchanged for every purpose.
    #[test]
    fn prop_malformed_url_is_untouched(
        url in without_marker(),
        file_name in proptest::option::of("[a-zA-Z0-9 _-]{0,20}\\.pdf"),
    ) {
        for purpose in DocumentPurpose::ALL {
            prop_assert_eq!(derive_url(&url, purpose, file_name.as_deref()), url.clone());
        }
    }

    /// With the marker present exactly once, the four derived URLs are pairwise
    /// distinct and each keeps the prefix and suffix verbatim.
    #[test]
    fn prop_purposes_are_distinct_and_keep_suffix(
        prefix in "https://[a-z]{1,12}\\.cloudinary\\.com/[a-z]{1,10}/(image|raw)",
        suffix in "v[0-9]{1,10}/[a-zA-Z0-9_]{1,20}\\.pdf",
        file_name in proptest::option::of("[a-zA-Z0-9 _-]{1,20}\\.pdf"),
    ) {
        let url = format!("{prefix}{UPLOAD_MARKER}{suffix}");
        prop_assume!(url.matches(UPLOAD_MARKER).count() == 1);
        let derived: Vec<String> = DocumentPurpose::ALL
            .iter()
            .map(|p| derive_url(&url, *p, file_name.as_deref()))
            .collect();

        for (i, a) in derived.iter().enumerate() {
            let expected_start = format!("{prefix}{UPLOAD_MARKER}");
            let expected_end = format!("/{suffix}");
            prop_assert!(a.starts_with(&expected_start));
            prop_assert!(a.ends_with(&expected_end));
            for b in derived.iter().skip(i + 1) {
                prop_assert_ne!(a, b);
            }
        }
    }
}
