//! Site build orchestration.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::assets::{AssetError, copy_dir_assets};
use crate::config::{ConfigError, SiteConfig};
use crate::discovery::{DiscoverError, Discovery, discover};
use crate::frontmatter;
use crate::ids::DocumentId;
use crate::render::{PageRenderer, RenderError, load_template, page_title};

#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Discover(#[from] DiscoverError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error("output directory {0} is the source directory")]
    OutputIsSource(String),

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Statistics from a build.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    /// Discovery result the build worked from.
    pub discovery: Discovery,
    /// Number of HTML pages written.
    pub pages_written: usize,
    /// Discovered documents that could not be read.
    pub pages_skipped: usize,
    /// Number of asset files copied.
    pub assets_copied: usize,
    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

/// Builds the static site for one root document.
pub struct SiteBuilder<'a> {
    config: &'a SiteConfig,
}

impl<'a> SiteBuilder<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self { config }
    }

    /// Discover the documents reachable from the root and write one page per document.
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        let start = std::time::Instant::now();
        let cfg = self.config;
        let root = cfg.root()?;
        let options = cfg.discover_options();

        let discovery = discover(root, &cfg.source_dir, &options)?;
        if same_dir(&cfg.source_dir, &cfg.output_dir) {
            return Err(BuildError::OutputIsSource(cfg.output_dir.display().to_string()));
        }

        let template = load_template(cfg.template.as_deref())?;
        let site_title = match &cfg.site_title {
            Some(title) => title.clone(),
            None => root_title(root, &cfg.source_dir),
        };
        let renderer = PageRenderer::new(template)
            .with_home(root.clone(), site_title)
            .with_extension(options.extension.clone());

        fs::create_dir_all(&cfg.output_dir).map_err(|source| BuildError::Write {
            path: cfg.output_dir.display().to_string(),
            source,
        })?;

        let mut report = BuildReport::default();
        let mut pages = BTreeSet::new();
        for id in &discovery.documents {
            let source_path = id.to_path(&cfg.source_dir);
            let content = match fs::read_to_string(&source_path) {
                Ok(content) => content,
                Err(e) => {
                    // Log error but continue building
                    tracing::warn!("Skipping {id}: {e}");
                    report.pages_skipped += 1;
                    continue;
                }
            };

            let page = renderer.render(id, &content)?;
            let out_path = output_path(&cfg.output_dir, id);
            write_page(&out_path, &page.html)?;
            tracing::debug!("wrote {}", out_path.display());
            pages.insert(out_path);
            report.pages_written += 1;
        }

        let dirs: BTreeSet<&str> = discovery.documents.iter().map(DocumentId::dir).collect();
        for dir in dirs {
            let src = join_segments(&cfg.source_dir, dir);
            if !src.is_dir() {
                continue;
            }
            let dest = join_segments(&cfg.output_dir, dir);
            report.assets_copied += copy_dir_assets(&src, &dest, &options.extension, &pages)?;
        }

        report.discovery = discovery;
        report.duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            "built {} pages ({} skipped, {} assets) in {}ms",
            report.pages_written,
            report.pages_skipped,
            report.assets_copied,
            report.duration_ms
        );
        Ok(report)
    }
}

/// Where the page for `id` is written.
pub fn output_path(output_dir: &Path, id: &DocumentId) -> PathBuf {
    join_segments(output_dir, &id.with_extension("html"))
}

fn join_segments(base: &Path, rel: &str) -> PathBuf {
    let mut path = base.to_path_buf();
    path.extend(rel.split('/').filter(|s| !s.is_empty()));
    path
}

fn write_page(path: &Path, html: &str) -> Result<(), BuildError> {
    let write_err =
        |source| BuildError::Write { path: path.display().to_string(), source };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, html).map_err(write_err)
}

fn root_title(root: &DocumentId, source_dir: &Path) -> String {
    let content = fs::read_to_string(root.to_path(source_dir)).unwrap_or_default();
    match frontmatter::parse(&content) {
        Ok(doc) => page_title(root, &doc.frontmatter.unwrap_or_default(), &doc.body),
        Err(_) => root.file_stem().to_string(),
    }
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn config(src: &Path, out: &Path, root: &str) -> SiteConfig {
        SiteConfig {
            source_dir: src.to_path_buf(),
            output_dir: out.to_path_buf(),
            root: Some(DocumentId::new(root).unwrap()),
            ..Default::default()
        }
    }

    #[test]
    fn test_output_path() {
        let id = DocumentId::new("dir/Page One.md").unwrap();
        assert_eq!(output_path(Path::new("/out"), &id), PathBuf::from("/out/dir/Page One.html"));
    }

    #[test]
    fn test_build_writes_pages_and_assets() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write(src.path(), "Home.md", "---\ncontents: \"[Child](<sub/Child Page.md>)\"\n---\n# Home");
        write(src.path(), "sub/Child Page.md", "---\npart_of: \"[Home](../Home.md)\"\n---\nChild");
        write(src.path(), "sub/diagram.svg", "<svg/>");
        write(src.path(), "unlinked.md", "# Not reachable");

        let cfg = config(src.path(), out.path(), "Home.md");
        let report = SiteBuilder::new(&cfg).build().unwrap();

        assert_eq!(report.pages_written, 2);
        assert_eq!(report.pages_skipped, 0);
        assert_eq!(report.assets_copied, 1);
        assert!(out.path().join("Home.html").exists());
        assert!(out.path().join("sub/Child Page.html").exists());
        assert!(out.path().join("sub/diagram.svg").exists());
        assert!(!out.path().join("unlinked.html").exists());

        let child = fs::read_to_string(out.path().join("sub/Child Page.html")).unwrap();
        assert!(child.contains(r#"href="../Home.html""#));
    }

    #[test]
    fn test_build_keeps_page_over_same_named_asset() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write(src.path(), "Home.md", "# Home");
        write(src.path(), "Home.html", "OLD EXPORT");

        let cfg = config(src.path(), out.path(), "Home.md");
        let report = SiteBuilder::new(&cfg).build().unwrap();

        assert_eq!(report.pages_written, 1);
        assert_eq!(report.assets_copied, 0);
        let html = fs::read_to_string(out.path().join("Home.html")).unwrap();
        assert!(html.contains("<h1>Home</h1>"));
        assert!(!html.contains("OLD EXPORT"));
    }

    #[test]
    fn test_build_skips_missing_documents() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write(src.path(), "Home.md", "---\ncontents: \"[Gone](Gone.md)\"\n---\n");

        let cfg = config(src.path(), out.path(), "Home.md");
        let report = SiteBuilder::new(&cfg).build().unwrap();

        assert_eq!(report.discovery.documents.len(), 2);
        assert_eq!(report.pages_written, 1);
        assert_eq!(report.pages_skipped, 1);
    }

    #[test]
    fn test_build_refuses_to_overwrite_source() {
        let src = TempDir::new().unwrap();
        write(src.path(), "Home.md", "");

        let cfg = config(src.path(), src.path(), "Home.md");
        let err = SiteBuilder::new(&cfg).build().unwrap_err();
        assert!(matches!(err, BuildError::OutputIsSource(_)));
    }

    #[test]
    fn test_build_without_root_fails() {
        let src = TempDir::new().unwrap();
        let cfg = SiteConfig { source_dir: src.path().to_path_buf(), ..Default::default() };
        let err = SiteBuilder::new(&cfg).build().unwrap_err();
        assert!(matches!(err, BuildError::Config(ConfigError::NoRoot)));
    }
}
