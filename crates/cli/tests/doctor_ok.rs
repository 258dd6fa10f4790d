use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn doctor_prints_resolved_config() {
    let tmp = tempdir().unwrap();
    let cfg = tmp.path().join("pkmsite.toml");
    fs::write(
        &cfg,
        r#"
version = 1
source_dir = "/tmp/notes"
root = "Portfolio site.md"
output_dir = "{{source_dir}}/_site"
site_title = "Portfolio"
"#,
    )
    .unwrap();

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("pkms"));
    cmd.args(["doctor", "--config", cfg.to_str().unwrap()]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("OK   pkms doctor"))
        .stdout(predicate::str::contains("source_dir: /tmp/notes"))
        .stdout(predicate::str::contains("root: Portfolio site.md"))
        .stdout(predicate::str::contains("output_dir: /tmp/notes/_site"))
        .stdout(predicate::str::contains("link_fields: contents, part_of"));
}

#[test]
fn doctor_without_config_uses_defaults() {
    let tmp = tempdir().unwrap();

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("pkms"));
    cmd.current_dir(tmp.path()).arg("doctor");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("using defaults"))
        .stdout(predicate::str::contains("root: (unset)"));
}

#[test]
fn doctor_fails_when_config_missing() {
    let tmp = tempdir().unwrap();
    let cfg = tmp.path().join("missing.toml");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("pkms"));
    cmd.arg("doctor").arg("--config").arg(&cfg);
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("FAIL pkms doctor"))
        .stdout(predicate::str::contains("config file not found"));
}
