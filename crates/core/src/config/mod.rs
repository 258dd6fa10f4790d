//! Site configuration: `pkmsite.toml` plus command-line overrides.

pub mod loader;
pub mod types;

pub use loader::{CONFIG_FILE_NAME, ConfigError, ConfigLoader, apply_overrides};
pub use types::{ConfigOverrides, LoggingConfig, SiteConfig};
