//! Frontmatter parsing from markdown documents.

use serde_yaml::Value;
use thiserror::Error;

use super::types::{FieldValue, Frontmatter, ParsedDocument, key_to_string};

/// Errors that can occur during frontmatter parsing.
#[derive(Debug, Error)]
pub enum FrontmatterParseError {
    #[error("invalid YAML frontmatter: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("frontmatter must be a mapping of properties, found {0}")]
    NotAMapping(&'static str),
}

/// Split a document into its raw frontmatter block and body.
///
/// The opening `---` must be the first non-blank line and the closing `---` must sit
/// on a line of its own. Without both delimiters the whole text is body.
pub fn split(content: &str) -> (Option<&str>, &str) {
    let without_bom = content.strip_prefix('\u{feff}').unwrap_or(content);
    let start = content.len() - without_bom.trim_start().len();

    let mut lines = content[start..].split_inclusive('\n');
    let Some(first) = lines.next() else {
        return (None, content);
    };
    if first.trim_end() != "---" {
        return (None, content);
    }

    let yaml_start = start + first.len();
    let mut offset = yaml_start;
    for line in lines {
        if line.trim() == "---" {
            return (Some(&content[yaml_start..offset]), &content[offset + line.len()..]);
        }
        offset += line.len();
    }

    // No closing ---, treat as no frontmatter
    (None, content)
}

/// Parse frontmatter from markdown content.
///
/// Frontmatter is delimited by `---` at the start of the document:
/// ```markdown
/// ---
/// key: value
/// ---
/// # Document content
/// ```
pub fn parse(content: &str) -> Result<ParsedDocument, FrontmatterParseError> {
    match split(content) {
        (Some(yaml), body) => Ok(ParsedDocument {
            frontmatter: Some(parse_yaml(yaml)?),
            body: body.to_string(),
        }),
        (None, _) => Ok(ParsedDocument { frontmatter: None, body: content.to_string() }),
    }
}

fn parse_yaml(yaml: &str) -> Result<Frontmatter, FrontmatterParseError> {
    if yaml.trim().is_empty() {
        return Ok(Frontmatter::default());
    }

    match serde_yaml::from_str::<Value>(yaml)? {
        Value::Null => Ok(Frontmatter::default()),
        Value::Mapping(map) => Ok(Frontmatter {
            fields: map
                .iter()
                .map(|(k, v)| (key_to_string(k), FieldValue::from(v)))
                .collect(),
        }),
        Value::Sequence(_) => Err(FrontmatterParseError::NotAMapping("a sequence")),
        Value::Tagged(_) => Err(FrontmatterParseError::NotAMapping("a tagged value")),
        _ => Err(FrontmatterParseError::NotAMapping("a scalar")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_no_frontmatter() {
        let content = "# Hello\n\nSome content";
        let result = parse(content).unwrap();
        assert!(result.frontmatter.is_none());
        assert_eq!(result.body, content);
    }

    #[test]
    fn parse_simple_frontmatter() {
        let content = "---\ntitle: Hello\n---\n# Content";
        let result = parse(content).unwrap();
        let fm = result.frontmatter.unwrap();
        assert_eq!(fm.title(), Some("Hello"));
        assert_eq!(result.body, "# Content");
    }

    #[test]
    fn parse_frontmatter_with_multiple_fields() {
        let content =
            "---\ntitle: Test\ndate: 2024-01-15\ntags:\n  - rust\n  - cli\n---\n\nBody";
        let result = parse(content).unwrap();
        let fm = result.frontmatter.unwrap();
        assert_eq!(fm.title(), Some("Test"));
        assert_eq!(
            fm.get("tags"),
            Some(&FieldValue::Sequence(vec![
                FieldValue::Scalar("rust".into()),
                FieldValue::Scalar("cli".into()),
            ]))
        );
        assert_eq!(result.body, "\nBody");
    }

    #[test]
    fn parse_keeps_field_order() {
        let content = "---\nzeta: 1\nalpha: 2\nmid: true\n---\n";
        let fm = parse(content).unwrap().frontmatter.unwrap();
        let keys: Vec<_> = fm.fields.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        assert_eq!(fm.get("mid"), Some(&FieldValue::Scalar("true".into())));
    }

    #[test]
    fn parse_empty_frontmatter() {
        let content = "---\n---\n# Content";
        let result = parse(content).unwrap();
        assert!(result.frontmatter.unwrap().is_empty());
        assert_eq!(result.body, "# Content");
    }

    #[test]
    fn parse_crlf_frontmatter() {
        let content = "---\r\ntitle: Windows\r\n---\r\nBody\r\n";
        let result = parse(content).unwrap();
        assert_eq!(result.frontmatter.unwrap().title(), Some("Windows"));
        assert_eq!(result.body, "Body\r\n");
    }

    #[test]
    fn unclosed_block_is_body() {
        let content = "---\ntitle: Hello\n# no closing delimiter";
        let result = parse(content).unwrap();
        assert!(result.frontmatter.is_none());
        assert_eq!(result.body, content);
    }

    #[test]
    fn horizontal_rule_later_in_body_is_not_frontmatter() {
        let content = "# Heading\n\n---\n\ntext";
        assert!(parse(content).unwrap().frontmatter.is_none());
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let content = "---\ntitle: [unclosed\n---\nBody";
        let err = parse(content).unwrap_err();
        assert!(matches!(err, FrontmatterParseError::InvalidYaml(_)));
    }

    #[test]
    fn non_mapping_is_an_error() {
        let content = "---\n- a\n- b\n---\nBody";
        let err = parse(content).unwrap_err();
        assert!(matches!(err, FrontmatterParseError::NotAMapping(_)));
    }

    #[test]
    fn quoted_links_parse_as_strings() {
        let content = "---\ncontents:\n  - \"[Resume](<Resume.md>)\"\npart_of: \"[Home](Home.md)\"\n---\n";
        let fm = parse(content).unwrap().frontmatter.unwrap();
        assert_eq!(fm.get("contents").unwrap().flatten(), vec!["[Resume](<Resume.md>)"]);
        assert_eq!(fm.get("part_of").unwrap().flatten(), vec!["[Home](Home.md)"]);
    }
}
