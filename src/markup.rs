//! HTML for the prior-versions list.

#[cfg(test)]
#[path = "markup_test.rs"]
mod markup_test;

use crate::config::{ArtifactKind, ReleaseConfig};

/// Escape text for use in element content or a double-quoted attribute.
#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// One `.version-item` row: the version tag plus a link per configured artifact.
#[must_use]
pub fn version_row(config: &ReleaseConfig, version: &str) -> String {
    let mut links = String::new();
    for kind in ArtifactKind::ALL {
        let Some(url) = config.download_url(kind, version) else {
            continue;
        };
        links.push_str(&format!(
            "\n            <a href=\"{}\" class=\"v-link\"><i data-feather=\"{}\"></i> {}</a>",
            escape_html(&url),
            kind.icon(),
            kind.label()
        ));
    }

    format!(
        "\n    <div class=\"version-item\">\n        <span class=\"v-tag\">{}</span>\n        <div class=\"v-links\">{links}\n        </div>\n    </div>\n",
        escape_html(version)
    )
}

/// Concatenated rows for `versions`, in order.
#[must_use]
pub fn version_rows(config: &ReleaseConfig, versions: &[&str]) -> String {
    versions.iter().map(|v| version_row(config, v)).collect()
}
