//! Version string helpers: clean-version derivation, URL template expansion
//! and prior-version filtering.

#[cfg(test)]
#[path = "version_test.rs"]
mod version_test;

/// Placeholder replaced with the full version string.
pub const VERSION_PLACEHOLDER: &str = "{version}";
/// Placeholder replaced with the version minus its leading `v`.
pub const CLEAN_VERSION_PLACEHOLDER: &str = "{cleanVer}";

/// Strip a single leading `v` marker.
///
/// `"v1.2.0"` becomes `"1.2.0"`, `"vv1"` becomes `"v1"`, anything without a
/// leading `v` is returned unchanged.
#[must_use]
pub fn clean_version(version: &str) -> &str {
    version.strip_prefix('v').unwrap_or(version)
}

/// Substitute every `{version}` and `{cleanVer}` placeholder in `template`.
#[must_use]
pub fn expand_template(template: &str, version: &str) -> String {
    template
        .replace(VERSION_PLACEHOLDER, version)
        .replace(CLEAN_VERSION_PLACEHOLDER, clean_version(version))
}

/// Versions from `known` that are not exactly `current`, in their original order.
///
/// Duplicates of other versions are kept; no other validation is applied.
#[must_use]
pub fn previous_versions<'a>(known: &'a [String], current: &str) -> Vec<&'a str> {
    known
        .iter()
        .map(String::as_str)
        .filter(|v| *v != current)
        .collect()
}
