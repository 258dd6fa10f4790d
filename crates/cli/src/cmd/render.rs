//! Render command implementation.

use std::fs;
use std::path::Path;

use pkmsite_core::config::{ConfigOverrides, SiteConfig};
use pkmsite_core::ids::DocumentId;
use pkmsite_core::render::{PageRenderer, load_template};

use super::{EXIT_FAILURE, fail, load};
use crate::RenderArgs;

pub fn run(config: Option<&Path>, log_level: Option<String>, args: RenderArgs) {
    let overrides = ConfigOverrides { template: args.template, log_level, ..Default::default() };
    let rc = load("render", config, &overrides);

    let content = match fs::read_to_string(&args.file) {
        Ok(content) => content,
        Err(e) => {
            fail("render", format!("failed to read {}: {e}", args.file.display()), EXIT_FAILURE)
        }
    };

    let id = match document_id(&args.file, &rc.source_dir) {
        Some(id) => id,
        None => fail("render", format!("{} is not a file", args.file.display()), EXIT_FAILURE),
    };

    let template = match load_template(rc.template.as_deref()) {
        Ok(t) => t,
        Err(e) => fail("render", e, EXIT_FAILURE),
    };

    let renderer = renderer(template, &rc);
    match renderer.render(&id, &content) {
        Ok(page) => print!("{}", page.html),
        Err(e) => fail("render", e, EXIT_FAILURE),
    }
}

fn renderer(template: String, rc: &SiteConfig) -> PageRenderer {
    let renderer = PageRenderer::new(template);
    match &rc.root {
        Some(root) => {
            let title = rc.site_title.clone().unwrap_or_else(|| root.file_stem().to_string());
            renderer.with_home(root.clone(), title)
        }
        None => renderer,
    }
}

/// Identifier of `file` relative to the source directory, or just its file name
/// when it lives elsewhere.
fn document_id(file: &Path, source_dir: &Path) -> Option<DocumentId> {
    if let (Ok(file), Ok(source)) = (file.canonicalize(), source_dir.canonicalize())
        && let Ok(rel) = file.strip_prefix(&source)
        && let Ok(id) = DocumentId::from_relative_path(rel)
    {
        return Some(id);
    }

    let name = file.file_name()?.to_string_lossy();
    DocumentId::new(&name).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn id_is_relative_to_source() {
        let src = TempDir::new().unwrap();
        fs::create_dir(src.path().join("notes")).unwrap();
        let file = src.path().join("notes/Page.md");
        fs::write(&file, "").unwrap();

        let id = document_id(&file, src.path()).unwrap();
        assert_eq!(id.as_str(), "notes/Page.md");
    }

    #[test]
    fn id_outside_source_uses_file_name() {
        let src = TempDir::new().unwrap();
        let other = TempDir::new().unwrap();
        let file = other.path().join("Loose.md");
        fs::write(&file, "").unwrap();

        let id = document_id(&file, src.path()).unwrap();
        assert_eq!(id.as_str(), "Loose.md");
    }
}
