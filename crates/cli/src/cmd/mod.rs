pub mod build;
pub mod discover;
pub mod doctor;
pub mod render;

use std::fmt::Display;
use std::path::Path;

use pkmsite_core::config::{ConfigLoader, ConfigOverrides, SiteConfig};

use crate::logging;

/// Exit code for any failure other than a missing root.
pub const EXIT_FAILURE: i32 = 1;
/// Exit code when the root document does not exist.
pub const EXIT_ROOT_NOT_FOUND: i32 = 3;

/// Load the configuration and start logging, or fail the command.
pub fn load(command: &str, config: Option<&Path>, overrides: &ConfigOverrides) -> SiteConfig {
    let rc = match ConfigLoader::load_with_overrides(config, overrides) {
        Ok(rc) => rc,
        Err(e) => fail(command, e, EXIT_FAILURE),
    };

    if let Err(e) = logging::init(&rc.logging) {
        let path = rc.logging.file.as_deref().unwrap_or(Path::new("")).display().to_string();
        fail(command, format!("failed to create log file {path}: {e}"), EXIT_FAILURE);
    }

    rc
}

/// Report a failed command and exit with `code`.
pub fn fail(command: &str, err: impl Display, code: i32) -> ! {
    tracing::debug!("pkms {command} failed with exit code {code}");
    logging::flush();
    println!("FAIL pkms {command}");
    println!("{err}");
    std::process::exit(code);
}
