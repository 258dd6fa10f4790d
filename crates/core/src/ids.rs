//! Document identifiers.
//!
//! A [`DocumentId`] is a `/`-separated path relative to the source root, with `.`
//! segments and empty components removed and `..` collapsed. Two links that reach
//! the same file through different spellings produce equal identifiers.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentIdError {
    #[error("document identifier is empty")]
    Empty,

    #[error("'{0}' points outside the source directory")]
    OutsideRoot(String),
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Normalize a relative path into an identifier.
    ///
    /// # Examples
    /// ```
    /// use pkmsite_core::ids::DocumentId;
    ///
    /// assert_eq!(DocumentId::new("./a/./b/../c.md").unwrap().as_str(), "a/c.md");
    /// assert_eq!(DocumentId::new("/Index.md").unwrap().as_str(), "Index.md");
    /// assert!(DocumentId::new("../up.md").is_err());
    /// ```
    pub fn new(raw: &str) -> Result<Self, DocumentIdError> {
        let mut segments: Vec<&str> = Vec::new();
        for segment in raw.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    if segments.pop().is_none() {
                        return Err(DocumentIdError::OutsideRoot(raw.to_string()));
                    }
                }
                s => segments.push(s),
            }
        }

        if segments.is_empty() {
            return Err(DocumentIdError::Empty);
        }
        Ok(Self(segments.join("/")))
    }

    /// Build an identifier from a filesystem path relative to the source root.
    pub fn from_relative_path(path: &Path) -> Result<Self, DocumentIdError> {
        let raw: Vec<String> =
            path.components().map(|c| c.as_os_str().to_string_lossy().into_owned()).collect();
        Self::new(&raw.join("/"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Directory part of the identifier, `""` for documents at the source root.
    pub fn dir(&self) -> &str {
        self.0.rsplit_once('/').map_or("", |(dir, _)| dir)
    }

    pub fn file_name(&self) -> &str {
        self.0.rsplit_once('/').map_or(self.0.as_str(), |(_, name)| name)
    }

    /// File name without its final extension.
    pub fn file_stem(&self) -> &str {
        let name = self.file_name();
        match name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => name,
        }
    }

    /// Resolve a link target written inside this document.
    ///
    /// Relative targets are joined to this document's directory; a leading `/`
    /// anchors the target at the source root instead.
    ///
    /// ```
    /// use pkmsite_core::ids::DocumentId;
    ///
    /// let parent = DocumentId::new("dir/Parent.md").unwrap();
    /// assert_eq!(parent.resolve("sub/Child.md").unwrap().as_str(), "dir/sub/Child.md");
    /// assert_eq!(parent.resolve("../Top.md").unwrap().as_str(), "Top.md");
    /// assert_eq!(parent.resolve("/Top.md").unwrap().as_str(), "Top.md");
    /// ```
    pub fn resolve(&self, target: &str) -> Result<Self, DocumentIdError> {
        if target.starts_with('/') {
            return Self::new(target);
        }

        let dir = self.dir();
        if dir.is_empty() { Self::new(target) } else { Self::new(&format!("{dir}/{target}")) }
    }

    /// Same identifier with the final extension replaced.
    pub fn with_extension(&self, ext: &str) -> String {
        let dir = self.dir();
        let file = format!("{}.{}", self.file_stem(), ext);
        if dir.is_empty() { file } else { format!("{dir}/{file}") }
    }

    /// Number of directories between the source root and this document.
    pub fn depth(&self) -> usize {
        self.0.matches('/').count()
    }

    /// Relative prefix leading from this document's directory back to the root.
    pub fn root_prefix(&self) -> String {
        "../".repeat(self.depth())
    }

    /// Filesystem location of this document under `root`.
    pub fn to_path(&self, root: &Path) -> PathBuf {
        let mut path = root.to_path_buf();
        path.extend(self.0.split('/'));
        path
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for DocumentId {
    type Err = DocumentIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
