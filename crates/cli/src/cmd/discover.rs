//! Discover command implementation.

use std::path::Path;

use pkmsite_core::config::ConfigOverrides;
use pkmsite_core::discovery::{DiscoverError, Discovery, discover};

use super::{EXIT_FAILURE, EXIT_ROOT_NOT_FOUND, fail, load};
use crate::DiscoverArgs;

pub fn run(config: Option<&Path>, log_level: Option<String>, args: DiscoverArgs) {
    let overrides = ConfigOverrides {
        source_dir: args.source,
        root: args.root,
        log_level,
        ..Default::default()
    };
    let rc = load("discover", config, &overrides);

    let root = match rc.root() {
        Ok(root) => root,
        Err(e) => fail("discover", e, EXIT_FAILURE),
    };

    let found = match discover(root, &rc.source_dir, &rc.discover_options()) {
        Ok(found) => found,
        Err(e @ DiscoverError::NotFound { .. }) => fail("discover", e, EXIT_ROOT_NOT_FOUND),
        Err(e) => fail("discover", e, EXIT_FAILURE),
    };

    if args.json {
        print_json(&found);
    } else {
        print_plain(&found);
    }
}

fn print_plain(found: &Discovery) {
    for id in &found.documents {
        println!("{id}");
    }
}

fn print_json(found: &Discovery) {
    match serde_json::to_string_pretty(found) {
        Ok(json) => println!("{json}"),
        Err(e) => fail("discover", format!("failed to serialize result: {e}"), EXIT_FAILURE),
    }
}
