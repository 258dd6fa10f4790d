//! Breadth-first traversal of the frontmatter link graph.

use std::collections::{BTreeSet, VecDeque};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use super::types::{DiscoverOptions, Discovery, DiscoveryWarning, WarningKind};
use crate::frontmatter::{self, Frontmatter};
use crate::ids::DocumentId;
use crate::links::document_links;

#[derive(Debug, Error)]
pub enum DiscoverError {
    #[error("root document '{root}' not found in {}", source_dir.display())]
    NotFound { root: DocumentId, source_dir: PathBuf },

    #[error("failed to read root document {}: {source}", path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Collect every document reachable from `root` through the navigable properties.
///
/// Only a missing or unreadable root is fatal. Any other document that cannot be
/// read or parsed is still part of the result; it just contributes no links, and a
/// warning is recorded.
pub fn discover(
    root: &DocumentId,
    source_dir: &Path,
    options: &DiscoverOptions,
) -> Result<Discovery, DiscoverError> {
    if !root.to_path(source_dir).is_file() {
        return Err(DiscoverError::NotFound {
            root: root.clone(),
            source_dir: source_dir.to_path_buf(),
        });
    }

    let mut visited: BTreeSet<DocumentId> = BTreeSet::new();
    let mut queue: VecDeque<DocumentId> = VecDeque::from([root.clone()]);
    let mut warnings = Vec::new();

    while let Some(current) = queue.pop_front() {
        if !visited.insert(current.clone()) {
            continue;
        }

        let record = match read_record(&current, source_dir) {
            Ok(record) => record,
            Err(ReadFailure::Io(source)) if &current == root => {
                return Err(DiscoverError::RootUnreadable {
                    path: current.to_path(source_dir),
                    source,
                });
            }
            Err(failure) => {
                let warning = failure.into_warning(current);
                warn!("{warning}");
                warnings.push(warning);
                continue;
            }
        };

        for field in &options.link_fields {
            let Some(value) = record.get(field) else {
                continue;
            };

            for link in document_links(value, &options.extension) {
                match current.resolve(link.path()) {
                    Ok(target) if !visited.contains(&target) => {
                        debug!("{current} -> {target} (via {field})");
                        queue.push_back(target);
                    }
                    Ok(_) => {}
                    Err(e) => {
                        let warning = DiscoveryWarning {
                            document: current.clone(),
                            kind: WarningKind::OutsideSource,
                            message: format!("skipping link in '{field}': {e}"),
                        };
                        warn!("{warning}");
                        warnings.push(warning);
                    }
                }
            }
        }
    }

    debug!("discovered {} documents from {root}", visited.len());
    Ok(Discovery { documents: visited.into_iter().collect(), warnings })
}

enum ReadFailure {
    Io(std::io::Error),
    Frontmatter(frontmatter::FrontmatterParseError),
}

impl ReadFailure {
    fn into_warning(self, document: DocumentId) -> DiscoveryWarning {
        let (kind, message) = match self {
            ReadFailure::Io(e) if e.kind() == ErrorKind::NotFound => {
                (WarningKind::Missing, "referenced document does not exist".to_string())
            }
            ReadFailure::Io(e) => (WarningKind::Unreadable, format!("cannot read: {e}")),
            ReadFailure::Frontmatter(e) => (WarningKind::MalformedFrontmatter, e.to_string()),
        };
        DiscoveryWarning { document, kind, message }
    }
}

/// Read a document and parse its frontmatter; no frontmatter is an empty record.
fn read_record(id: &DocumentId, source_dir: &Path) -> Result<Frontmatter, ReadFailure> {
    let content = std::fs::read_to_string(id.to_path(source_dir)).map_err(ReadFailure::Io)?;
    let parsed = frontmatter::parse(&content).map_err(ReadFailure::Frontmatter)?;
    Ok(parsed.frontmatter.unwrap_or_default())
}
