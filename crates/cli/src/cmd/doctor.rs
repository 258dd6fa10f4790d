use pkmsite_core::config::ConfigOverrides;
use pkmsite_core::config::loader::default_config_path;
use std::path::Path;

use super::load;

pub fn run(config: Option<&Path>, log_level: Option<String>) {
    let overrides = ConfigOverrides { log_level, ..Default::default() };
    let rc = load("doctor", config, &overrides);

    println!("OK   pkms doctor");
    match &rc.config_path {
        Some(p) => println!("path: {}", p.display()),
        None => {
            println!("path: (none, {} not found; using defaults)", default_config_path().display())
        }
    }
    println!("source_dir: {}", rc.source_dir.display());
    println!(
        "root: {}",
        rc.root.as_ref().map_or_else(|| "(unset)".to_string(), |r| r.to_string())
    );
    println!("output_dir: {}", rc.output_dir.display());
    println!(
        "template: {}",
        rc.template.as_ref().map_or_else(|| "(built-in)".to_string(), |t| t.display().to_string())
    );
    if let Some(ref title) = rc.site_title {
        println!("site_title: {title}");
    }
    println!("link_fields: {}", rc.link_fields.join(", "));
    println!("logging.level: {}", rc.logging.level);
    if let Some(ref file) = rc.logging.file {
        println!("logging.file: {}", file.display());
    }

    if let Ok(root) = rc.root() {
        let path = root.to_path(&rc.source_dir);
        if !path.is_file() {
            println!("warning: root document {} does not exist", path.display());
        }
    }
}
