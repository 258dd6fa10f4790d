//! Frontmatter types and data structures.

use serde_yaml::Value;

/// A single frontmatter value.
///
/// YAML numbers and booleans are kept as [`FieldValue::Scalar`] holding their
/// textual form, so callers only ever deal with strings, lists and maps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Null,
    Scalar(String),
    Sequence(Vec<FieldValue>),
    Mapping(Vec<(String, FieldValue)>),
}

impl FieldValue {
    /// Return the value as a string if it is a scalar.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            FieldValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Collect every scalar string in this value, in document order.
    ///
    /// Sequences and mapping values are walked recursively; `Null` yields nothing.
    /// ```
    /// use pkmsite_core::frontmatter::FieldValue;
    ///
    /// let v = FieldValue::Sequence(vec![
    ///     FieldValue::Scalar("a".into()),
    ///     FieldValue::Sequence(vec![FieldValue::Scalar("b".into())]),
    ///     FieldValue::Null,
    /// ]);
    /// assert_eq!(v.flatten(), vec!["a", "b"]);
    /// assert_eq!(FieldValue::Scalar("x".into()).flatten(), vec!["x"]);
    /// ```
    pub fn flatten(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            FieldValue::Null => {}
            FieldValue::Scalar(s) => out.push(s),
            FieldValue::Sequence(items) => {
                for item in items {
                    item.flatten_into(out);
                }
            }
            FieldValue::Mapping(entries) => {
                for (_, value) in entries {
                    value.flatten_into(out);
                }
            }
        }
    }
}

impl From<&Value> for FieldValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Scalar(b.to_string()),
            Value::Number(n) => FieldValue::Scalar(n.to_string()),
            Value::String(s) => FieldValue::Scalar(s.clone()),
            Value::Sequence(seq) => {
                FieldValue::Sequence(seq.iter().map(FieldValue::from).collect())
            }
            Value::Mapping(map) => FieldValue::Mapping(
                map.iter().map(|(k, v)| (key_to_string(k), FieldValue::from(v))).collect(),
            ),
            Value::Tagged(tagged) => FieldValue::from(&tagged.value),
        }
    }
}

/// Render a YAML mapping key as a plain string.
pub(crate) fn key_to_string(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => "null".to_string(),
        other => serde_yaml::to_string(other).unwrap_or_default().trim_end().to_string(),
    }
}

/// Parsed YAML frontmatter, with fields kept in the order they were written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    pub fields: Vec<(String, FieldValue)>,
}

impl Frontmatter {
    /// Look up a field by name.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Scalar `title` field, if any.
    pub fn title(&self) -> Option<&str> {
        self.get("title").and_then(FieldValue::as_scalar)
    }
}

/// Result of splitting frontmatter from markdown.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    /// Parsed frontmatter (if present).
    pub frontmatter: Option<Frontmatter>,
    /// The markdown body (everything after frontmatter).
    pub body: String,
}

impl ParsedDocument {
    /// The frontmatter record, empty when the document has none.
    pub fn record(&self) -> Frontmatter {
        self.frontmatter.clone().unwrap_or_default()
    }
}
