//! Copying of non-document files that sit next to discovered documents.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read asset directory {0}: {1}")]
    WalkError(String, #[source] walkdir::Error),

    #[error("failed to copy {from} to {to}: {source}")]
    Copy {
        from: String,
        to: String,
        #[source]
        source: std::io::Error,
    },
}

/// Copy the regular files directly inside `src` into `dest`.
///
/// Subdirectories, hidden files and documents with `extension` are skipped, as is
/// any file whose destination is in `pages` so generated pages are never replaced.
/// Returns the number of files copied.
pub fn copy_dir_assets(
    src: &Path,
    dest: &Path,
    extension: &str,
    pages: &BTreeSet<PathBuf>,
) -> Result<usize, AssetError> {
    let mut copied = 0;

    for entry in WalkDir::new(src).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| AssetError::WalkError(src.display().to_string(), e))?;

        if !entry.file_type().is_file() || is_hidden(entry.file_name()) {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some(extension) {
            continue;
        }

        let target = dest.join(entry.file_name());
        if pages.contains(&target) {
            tracing::warn!("not copying {}: it would replace a generated page", path.display());
            continue;
        }
        let copy_err = |source| AssetError::Copy {
            from: path.display().to_string(),
            to: target.display().to_string(),
            source,
        };
        fs::create_dir_all(dest).map_err(copy_err)?;
        fs::copy(path, &target).map_err(copy_err)?;
        tracing::debug!("copied asset {}", path.display());
        copied += 1;
    }

    Ok(copied)
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}
