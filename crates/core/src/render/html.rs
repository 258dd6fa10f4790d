//! Markdown to HTML conversion with document link rewriting.

use comrak::nodes::NodeValue;
use comrak::{Arena, Options, format_html, parse_document};

use crate::links::{LinkReference, is_external_target};

/// Render a markdown body to HTML.
///
/// Local links to `.{extension}` documents are rewritten to the matching `.html`
/// page, keeping any `#fragment`. `root_prefix` leads from the page back to the
/// output root and replaces the leading `/` of root-anchored links.
pub fn markdown_to_html(
    markdown: &str,
    extension: &str,
    root_prefix: &str,
) -> std::io::Result<String> {
    let arena = Arena::new();
    let options = default_options();
    let root = parse_document(&arena, markdown, &options);

    for node in root.descendants() {
        if let NodeValue::Link(ref mut link) = node.data.borrow_mut().value
            && let Some(url) = rewrite_document_url(&link.url, extension, root_prefix)
        {
            link.url = url;
        }
    }

    let mut out = Vec::new();
    format_html(root, &options, &mut out)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Render a single line of markdown without the surrounding paragraph.
pub fn inline_markdown_to_html(
    text: &str,
    extension: &str,
    root_prefix: &str,
) -> std::io::Result<String> {
    let html = markdown_to_html(text, extension, root_prefix)?;
    let trimmed = html.trim_end();
    Ok(match trimmed.strip_prefix("<p>").and_then(|s| s.strip_suffix("</p>")) {
        Some(inner) if !inner.contains("<p>") => inner.to_string(),
        _ => trimmed.to_string(),
    })
}

/// Map `dir/Page.md#sec` to `dir/Page.html#sec`; other URLs are left alone.
///
/// A link anchored at the source root (`/Top.md`) becomes relative to the page
/// through `root_prefix`.
///
/// ```
/// use pkmsite_core::render::html::rewrite_document_url;
///
/// assert_eq!(rewrite_document_url("sub/Child.md", "md", "").as_deref(), Some("sub/Child.html"));
/// assert_eq!(rewrite_document_url("a.md#top", "md", "").as_deref(), Some("a.html#top"));
/// assert_eq!(rewrite_document_url("/Top.md", "md", "../../").as_deref(), Some("../../Top.html"));
/// assert_eq!(rewrite_document_url("https://x.org/a.md", "md", ""), None);
/// assert_eq!(rewrite_document_url("cv.pdf", "md", ""), None);
/// ```
pub fn rewrite_document_url(url: &str, extension: &str, root_prefix: &str) -> Option<String> {
    if is_external_target(url) {
        return None;
    }

    let link = LinkReference { text: String::new(), target: url.to_string() };
    if !link.is_document(extension) {
        return None;
    }

    let stem = link.path().strip_suffix(extension)?;
    let stem = match stem.strip_prefix('/') {
        Some(anchored) => format!("{root_prefix}{}", anchored.trim_start_matches('/')),
        None => stem.to_string(),
    };
    Some(match link.fragment() {
        Some(fragment) => format!("{stem}html#{fragment}"),
        None => format!("{stem}html"),
    })
}

/// Title of a document body: first heading, if any.
pub fn first_heading(body: &str) -> Option<String> {
    let mut in_fence = false;
    for line in body.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        if let Some(heading) = trimmed.strip_prefix('#') {
            let heading = heading.trim_start_matches('#');
            if heading.starts_with(char::is_whitespace) && !heading.trim().is_empty() {
                return Some(heading.trim().to_string());
            }
        }
    }
    None
}

/// Escape text for use in HTML content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn default_options() -> Options<'static> {
    let mut options = Options::default();
    // Enable GFM extensions for compatibility
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.footnotes = true;
    options.extension.description_lists = true;

    options.parse.smart = false;

    options.render.hardbreaks = false;
    options.render.github_pre_lang = true;
    options.render.unsafe_ = true; // Allow raw HTML passthrough

    options
}
