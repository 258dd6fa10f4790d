use crate::config::types::{ConfigFile, ConfigOverrides, DEFAULT_OUTPUT_DIR, SiteConfig};
use crate::ids::{DocumentId, DocumentIdError};
use shellexpand::full;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Config file looked up in the working directory when none is given.
pub const CONFIG_FILE_NAME: &str = "pkmsite.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found at {0}")]
    NotFound(String),

    #[error("failed to read config file {0}: {1}")]
    ReadError(String, #[source] std::io::Error),

    #[error("failed to parse TOML in {0}: {1}")]
    ParseError(String, #[source] toml::de::Error),

    #[error("version {0} is unsupported (expected 1)")]
    BadVersion(u32),

    #[error("link_fields must name at least one frontmatter property")]
    NoLinkFields,

    #[error("no root document given (set `root` in the config or pass it on the command line)")]
    NoRoot,

    #[error("invalid root document '{0}': {1}")]
    InvalidRoot(String, #[source] DocumentIdError),

    #[error("cannot expand '{0}': {1}")]
    Expand(String, String),
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load settings from `config_path`, or from `./pkmsite.toml` when present.
    ///
    /// An explicit path must exist. Without one, a missing default file simply
    /// yields the built-in defaults.
    pub fn load(config_path: Option<&Path>) -> Result<SiteConfig, ConfigError> {
        Self::load_with_overrides(config_path, &ConfigOverrides::default())
    }

    /// Load and then apply command-line overrides.
    ///
    /// A `source_dir` override is in place before `{{source_dir}}` is substituted,
    /// so paths derived from it follow the override.
    pub fn load_with_overrides(
        config_path: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<SiteConfig, ConfigError> {
        let cfg = match Self::read(config_path)? {
            Some((cf, path)) => {
                let base = path.parent().map(Path::to_path_buf).unwrap_or_default();
                let mut resolved = Self::resolve(&cf, &base, overrides.source_dir.as_deref())?;
                resolved.config_path = Some(path);
                resolved
            }
            None => SiteConfig::default(),
        };
        apply_overrides(cfg, overrides)
    }

    /// Read and check the config file; `None` when no file is given or found.
    fn read(config_path: Option<&Path>) -> Result<Option<(ConfigFile, PathBuf)>, ConfigError> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => {
                let p = default_config_path();
                if !p.exists() {
                    return Ok(None);
                }
                p
            }
        };

        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let s = fs::read_to_string(&path)
            .map_err(|e| ConfigError::ReadError(path.display().to_string(), e))?;

        let cf: ConfigFile = toml::from_str(&s)
            .map_err(|e| ConfigError::ParseError(path.display().to_string(), e))?;

        if cf.version != 1 {
            return Err(ConfigError::BadVersion(cf.version));
        }

        Ok(Some((cf, path)))
    }

    fn resolve(
        cf: &ConfigFile,
        base: &Path,
        source_override: Option<&Path>,
    ) -> Result<SiteConfig, ConfigError> {
        let source_dir = match source_override {
            Some(dir) => dir.to_path_buf(),
            None => expand_path(cf.source_dir.as_deref().unwrap_or("."), base)?,
        };
        let sub = |s: &str| s.replace("{{source_dir}}", &source_dir.to_string_lossy());

        let output_dir =
            expand_path(&sub(cf.output_dir.as_deref().unwrap_or(DEFAULT_OUTPUT_DIR)), base)?;
        let template = match &cf.template {
            Some(t) => Some(expand_path(&sub(t), base)?),
            None => None,
        };

        let link_fields = match &cf.link_fields {
            Some(fields) if fields.iter().all(|f| f.trim().is_empty()) => {
                return Err(ConfigError::NoLinkFields);
            }
            Some(fields) => fields.iter().filter(|f| !f.trim().is_empty()).cloned().collect(),
            None => SiteConfig::default().link_fields,
        };

        let root = cf.root.as_deref().map(parse_root).transpose()?;

        // Resolve log file path if present
        let mut logging = cf.logging.clone();
        if let Some(ref file) = logging.file {
            logging.file = Some(expand_path(&sub(&file.to_string_lossy()), base)?);
        }

        Ok(SiteConfig {
            config_path: None,
            source_dir,
            root,
            output_dir,
            template,
            site_title: cf.site_title.clone(),
            link_fields,
            logging,
        })
    }
}

/// Replace config values with the ones given on the command line.
pub fn apply_overrides(
    mut cfg: SiteConfig,
    overrides: &ConfigOverrides,
) -> Result<SiteConfig, ConfigError> {
    if let Some(ref dir) = overrides.source_dir {
        cfg.source_dir = dir.clone();
    }
    if let Some(ref root) = overrides.root {
        cfg.root = Some(parse_root(root)?);
    }
    if let Some(ref dir) = overrides.output_dir {
        cfg.output_dir = dir.clone();
    }
    if let Some(ref template) = overrides.template {
        cfg.template = Some(template.clone());
    }
    if let Some(ref level) = overrides.log_level {
        cfg.logging.level = level.clone();
    }
    Ok(cfg)
}

impl SiteConfig {
    /// The configured root document.
    pub fn root(&self) -> Result<&DocumentId, ConfigError> {
        self.root.as_ref().ok_or(ConfigError::NoRoot)
    }
}

fn parse_root(raw: &str) -> Result<DocumentId, ConfigError> {
    DocumentId::new(raw).map_err(|e| ConfigError::InvalidRoot(raw.to_string(), e))
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from(CONFIG_FILE_NAME)
}

/// Expand `~` and environment variables; relative results are taken from `base`.
fn expand_path(input: &str, base: &Path) -> Result<PathBuf, ConfigError> {
    let expanded =
        full(input).map_err(|e| ConfigError::Expand(input.to_string(), e.to_string()))?;
    let path = PathBuf::from(expanded.to_string());
    if path.is_absolute() { Ok(path) } else { Ok(base.join(path)) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_join_base() {
        let p = expand_path("notes", Path::new("/site")).unwrap();
        assert_eq!(p, PathBuf::from("/site/notes"));
        let p = expand_path("/abs/notes", Path::new("/site")).unwrap();
        assert_eq!(p, PathBuf::from("/abs/notes"));
    }

    #[test]
    fn overrides_win() {
        let cfg = SiteConfig::default();
        let overrides = ConfigOverrides {
            source_dir: Some(PathBuf::from("src")),
            root: Some("./Home.md".into()),
            output_dir: Some(PathBuf::from("out")),
            template: Some(PathBuf::from("t.html")),
            log_level: Some("debug".into()),
        };
        let cfg = apply_overrides(cfg, &overrides).unwrap();
        assert_eq!(cfg.source_dir, PathBuf::from("src"));
        assert_eq!(cfg.root().unwrap().as_str(), "Home.md");
        assert_eq!(cfg.output_dir, PathBuf::from("out"));
        assert_eq!(cfg.template, Some(PathBuf::from("t.html")));
        assert_eq!(cfg.logging.level, "debug");
    }

    #[test]
    fn source_override_rederives_placeholders() {
        let cf: ConfigFile = toml::from_str(
            "version = 1\nsource_dir = \"notes\"\noutput_dir = \"{{source_dir}}/_site\"\n\
             template = \"{{source_dir}}/page.html\"\n",
        )
        .unwrap();

        let cfg = ConfigLoader::resolve(&cf, Path::new("/site"), None).unwrap();
        assert_eq!(cfg.output_dir, PathBuf::from("/site/notes/_site"));

        let cfg = ConfigLoader::resolve(&cf, Path::new("/site"), Some(Path::new("/other"))).unwrap();
        assert_eq!(cfg.source_dir, PathBuf::from("/other"));
        assert_eq!(cfg.output_dir, PathBuf::from("/other/_site"));
        assert_eq!(cfg.template, Some(PathBuf::from("/other/page.html")));
    }

    #[test]
    fn invalid_root_override_fails() {
        let overrides = ConfigOverrides { root: Some("../x.md".into()), ..Default::default() };
        let err = apply_overrides(SiteConfig::default(), &overrides).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRoot(..)));
    }

    #[test]
    fn missing_root_is_reported() {
        assert!(matches!(SiteConfig::default().root(), Err(ConfigError::NoRoot)));
    }
}
