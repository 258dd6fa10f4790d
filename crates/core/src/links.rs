//! Inline markdown link extraction from frontmatter values.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::frontmatter::FieldValue;

/// Extension of navigable documents, without the dot.
pub const DOCUMENT_EXTENSION: &str = "md";

/// A `[text](target)` link found inside a frontmatter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkReference {
    /// Display text between the brackets.
    pub text: String,
    /// Link destination with any `<...>` delimiters removed.
    pub target: String,
}

static MARKDOWN_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Matches [text](<target with spaces> "title") and [text](target "title").
    // Link text may hold one level of nested brackets.
    Regex::new(
        r#"\[((?:[^\[\]]|\[[^\]]*\])*)\]\(\s*(?:<([^>]*)>(?:\s+(?:"[^"]*"|'[^']*'))?|([^)]*))\s*\)"#,
    )
    .unwrap()
});

impl LinkReference {
    /// Target with any `#fragment` removed.
    pub fn path(&self) -> &str {
        self.target.split_once('#').map_or(self.target.as_str(), |(path, _)| path)
    }

    pub fn fragment(&self) -> Option<&str> {
        self.target.split_once('#').map(|(_, fragment)| fragment)
    }

    /// Whether the target points off-site (`https://...`, `mailto:...`).
    pub fn is_external(&self) -> bool {
        is_external_target(&self.target)
    }

    /// Whether this link references another local document.
    pub fn is_document(&self, extension: &str) -> bool {
        if self.is_external() {
            return false;
        }
        let path = self.path();
        path.len() > extension.len() + 1
            && path.strip_suffix(extension).is_some_and(|rest| rest.ends_with('.'))
    }
}

pub(crate) fn is_external_target(target: &str) -> bool {
    target.contains("://") || target.starts_with("mailto:")
}

/// Extract every inline link from a piece of text.
///
/// ```
/// use pkmsite_core::links::extract_links;
///
/// let links = extract_links("[Resume](<My Resume.md>) and [site](https://example.com)");
/// assert_eq!(links.len(), 2);
/// assert_eq!(links[0].target, "My Resume.md");
/// assert_eq!(links[1].text, "site");
/// ```
pub fn extract_links(text: &str) -> Vec<LinkReference> {
    MARKDOWN_LINK_RE
        .captures_iter(text)
        .map(|cap| {
            let target = match (cap.get(2), cap.get(3)) {
                (Some(m), _) => m.as_str(),
                (None, Some(m)) => strip_title(m.as_str()),
                (None, None) => "",
            };
            LinkReference { text: cap[1].to_string(), target: target.trim().to_string() }
        })
        .collect()
}

/// Drop a trailing `"title"` or `'title'` from an unbracketed destination.
fn strip_title(dest: &str) -> &str {
    let dest = dest.trim_end();
    for quote in ['"', '\''] {
        if let Some(inner) = dest.strip_suffix(quote)
            && let Some((target, _)) = inner.rsplit_once(quote)
            && target.ends_with(char::is_whitespace)
        {
            return target.trim_end();
        }
    }
    dest
}

/// Navigable document links held by a frontmatter value.
///
/// Scalars and sequences are handled alike by flattening the value first.
pub fn document_links(value: &FieldValue, extension: &str) -> Vec<LinkReference> {
    value
        .flatten()
        .into_iter()
        .flat_map(extract_links)
        .filter(|link| link.is_document(extension))
        .collect()
}
