//! Discovery inputs and results.

use std::fmt;

use serde::Serialize;

use crate::ids::DocumentId;
use crate::links::DOCUMENT_EXTENSION;

/// Frontmatter properties whose links are followed unless configured otherwise.
pub const DEFAULT_LINK_FIELDS: [&str; 2] = ["contents", "part_of"];

/// Which properties to follow and which targets count as documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverOptions {
    pub link_fields: Vec<String>,
    /// Document extension without the leading dot.
    pub extension: String,
}

impl Default for DiscoverOptions {
    fn default() -> Self {
        Self {
            link_fields: DEFAULT_LINK_FIELDS.iter().map(|s| s.to_string()).collect(),
            extension: DOCUMENT_EXTENSION.to_string(),
        }
    }
}

/// Why a document contributed no links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// The referenced file does not exist.
    Missing,
    /// The file exists but could not be read.
    Unreadable,
    /// The frontmatter block is not valid YAML or not a mapping.
    MalformedFrontmatter,
    /// A link resolved to a location above the source directory.
    OutsideSource,
}

impl WarningKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Unreadable => "unreadable",
            Self::MalformedFrontmatter => "malformed_frontmatter",
            Self::OutsideSource => "outside_source",
        }
    }
}

/// A recoverable problem met while walking the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveryWarning {
    /// Document the problem was found in (or that could not be read).
    pub document: DocumentId,
    pub kind: WarningKind,
    pub message: String,
}

impl fmt::Display for DiscoveryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.document, self.message, self.kind.as_str())
    }
}

/// The discovery closure of a root document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Discovery {
    /// Every visited identifier, sorted.
    pub documents: Vec<DocumentId>,
    pub warnings: Vec<DiscoveryWarning>,
}

impl Discovery {
    pub fn contains(&self, id: &DocumentId) -> bool {
        self.documents.binary_search(id).is_ok()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Warnings recorded against one document.
    pub fn warnings_for<'a>(
        &'a self,
        id: &'a DocumentId,
    ) -> impl Iterator<Item = &'a DiscoveryWarning> + 'a {
        self.warnings.iter().filter(move |w| &w.document == id)
    }
}
