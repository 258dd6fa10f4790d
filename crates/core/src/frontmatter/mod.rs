//! Frontmatter parsing.
//!
//! This module provides functionality to:
//! - Split a leading `---` delimited YAML block from a markdown document
//! - Parse it into an ordered [`Frontmatter`] record of tagged [`FieldValue`]s

pub mod parser;
pub mod types;

pub use parser::{FrontmatterParseError, parse, split};
pub use types::{FieldValue, Frontmatter, ParsedDocument};
