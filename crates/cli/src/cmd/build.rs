//! Build command implementation.

use std::path::Path;

use pkmsite_core::config::ConfigOverrides;
use pkmsite_core::discovery::DiscoverError;
use pkmsite_core::site::{BuildError, SiteBuilder};

use super::{EXIT_FAILURE, EXIT_ROOT_NOT_FOUND, fail, load};
use crate::BuildArgs;

pub fn run(config: Option<&Path>, log_level: Option<String>, args: BuildArgs) {
    let overrides = ConfigOverrides {
        source_dir: args.source,
        root: args.root,
        output_dir: args.output,
        template: args.template,
        log_level,
    };
    let rc = load("build", config, &overrides);

    let report = match SiteBuilder::new(&rc).build() {
        Ok(report) => report,
        Err(e @ BuildError::Discover(DiscoverError::NotFound { .. })) => {
            fail("build", e, EXIT_ROOT_NOT_FOUND)
        }
        Err(e) => fail("build", e, EXIT_FAILURE),
    };

    println!("OK   pkms build");
    println!("output: {}", rc.output_dir.display());
    println!("documents: {}", report.discovery.len());
    println!("pages written: {}", report.pages_written);
    if report.pages_skipped > 0 {
        println!("pages skipped: {}", report.pages_skipped);
    }
    println!("assets copied: {}", report.assets_copied);
    if !report.discovery.warnings.is_empty() {
        println!("warnings: {}", report.discovery.warnings.len());
        for w in &report.discovery.warnings {
            println!("  {w}");
        }
    }
    println!("time: {}ms", report.duration_ms);
}
