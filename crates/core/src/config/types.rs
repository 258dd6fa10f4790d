use std::path::PathBuf;

use serde::Deserialize;

use crate::discovery::{DEFAULT_LINK_FIELDS, DiscoverOptions};
use crate::ids::DocumentId;
use crate::links::DOCUMENT_EXTENSION;

/// On-disk shape of `pkmsite.toml`.
#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    pub source_dir: Option<String>,
    pub root: Option<String>,
    pub output_dir: Option<String>,
    pub template: Option<String>,
    pub site_title: Option<String>,
    /// Frontmatter properties whose links are followed.
    pub link_fields: Option<Vec<String>>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

pub const DEFAULT_OUTPUT_DIR: &str = "_site";

/// Fully resolved settings for a discovery or build run.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Config file the settings came from, if any.
    pub config_path: Option<PathBuf>,
    pub source_dir: PathBuf,
    pub root: Option<DocumentId>,
    pub output_dir: PathBuf,
    pub template: Option<PathBuf>,
    pub site_title: Option<String>,
    pub link_fields: Vec<String>,
    pub logging: LoggingConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            config_path: None,
            source_dir: PathBuf::from("."),
            root: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            template: None,
            site_title: None,
            link_fields: DEFAULT_LINK_FIELDS.iter().map(|s| s.to_string()).collect(),
            logging: LoggingConfig::default(),
        }
    }
}

impl SiteConfig {
    pub fn discover_options(&self) -> DiscoverOptions {
        DiscoverOptions {
            link_fields: self.link_fields.clone(),
            extension: DOCUMENT_EXTENSION.to_string(),
        }
    }
}

/// Values given on the command line; they win over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub source_dir: Option<PathBuf>,
    pub root: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub template: Option<PathBuf>,
    pub log_level: Option<String>,
}
