//! Frontmatter display as an HTML definition list.

use std::fmt::Write as _;

use super::html::{escape_html, inline_markdown_to_html};
use crate::frontmatter::{FieldValue, Frontmatter};

/// Render a frontmatter record in field order.
///
/// Scalars go through inline markdown, so links in `contents` or `part_of` become
/// anchors to the generated pages. Returns an empty string for an empty record.
pub fn render_metadata(
    record: &Frontmatter,
    extension: &str,
    root_prefix: &str,
) -> std::io::Result<String> {
    if record.is_empty() {
        return Ok(String::new());
    }

    let mut out = String::from("<dl class=\"metadata\">\n");
    for (key, value) in &record.fields {
        let _ = write!(out, "<dt>{}</dt><dd>", escape_html(key));
        render_value(&mut out, value, extension, root_prefix)?;
        out.push_str("</dd>\n");
    }
    out.push_str("</dl>\n");
    Ok(out)
}

fn render_value(
    out: &mut String,
    value: &FieldValue,
    extension: &str,
    root_prefix: &str,
) -> std::io::Result<()> {
    match value {
        FieldValue::Null => {}
        FieldValue::Scalar(s) => out.push_str(&inline_markdown_to_html(s, extension, root_prefix)?),
        FieldValue::Sequence(items) => {
            out.push_str("<ul>");
            for item in items {
                out.push_str("<li>");
                render_value(out, item, extension, root_prefix)?;
                out.push_str("</li>");
            }
            out.push_str("</ul>");
        }
        FieldValue::Mapping(entries) => {
            out.push_str("<dl>");
            for (key, inner) in entries {
                let _ = write!(out, "<dt>{}</dt><dd>", escape_html(key));
                render_value(out, inner, extension, root_prefix)?;
                out.push_str("</dd>");
            }
            out.push_str("</dl>");
        }
    }
    Ok(())
}
