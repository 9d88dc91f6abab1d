//! Account and repository identifier normalization
//!
//! Bitbucket addresses repositories by slug and accepts either an account
//! name or its GUID in braces.

use regex::Regex;
use std::sync::LazyLock;

/// Runs of characters not allowed in a slug
static NON_SLUG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9_.\-]+").unwrap());

/// A bare GUID, without braces
static GUID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-(?:[0-9a-fA-F]{4}-){3}[0-9a-fA-F]{12}$").unwrap()
});

/// Turn a repository name into its slug
///
/// Lower-cases, then replaces every run of characters outside
/// `[a-z0-9_.-]` with a single `-`. A value that is already a slug is
/// returned unchanged.
pub fn to_slug(name: &str) -> String {
    let lower = name.to_lowercase();
    NON_SLUG_REGEX.replace_all(&lower, "-").into_owned()
}

/// Wrap a bare GUID in braces; any other value passes through
pub fn guid_or_value(value: &str) -> String {
    if GUID_REGEX.is_match(value) {
        format!("{{{value}}}")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("my-repo", "my-repo" ; "already a slug")]
    #[test_case("My Repo", "my-repo" ; "space and case")]
    #[test_case("Repo   With  Spaces", "repo-with-spaces" ; "collapses runs")]
    #[test_case("sharp_bucket.v2", "sharp_bucket.v2" ; "keeps underscore and dot")]
    #[test_case("Répo#1", "r-po-1" ; "non ascii and symbols")]
    fn test_to_slug(input: &str, expected: &str) {
        assert_eq!(to_slug(input), expected);
    }

    #[test_case("3f2504e0-4f89-11d3-9a0c-0305e82c3301", "{3f2504e0-4f89-11d3-9a0c-0305e82c3301}" ; "bare guid")]
    #[test_case("{3f2504e0-4f89-11d3-9a0c-0305e82c3301}", "{3f2504e0-4f89-11d3-9a0c-0305e82c3301}" ; "braced guid")]
    #[test_case("atlassian", "atlassian" ; "account name")]
    #[test_case("3f2504e0-4f89", "3f2504e0-4f89" ; "partial guid")]
    fn test_guid_or_value(input: &str, expected: &str) {
        assert_eq!(guid_or_value(input), expected);
    }
}
