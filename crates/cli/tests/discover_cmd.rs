use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn portfolio(root: &Path) {
    write(
        root,
        "Portfolio site.md",
        "---\ncontents:\n  - \"[Resume](<Resume.md>)\"\n  - \"[Projects Overview](<Projects Overview.md>)\"\n---\n# Portfolio\n",
    );
    write(root, "Resume.md", "---\npart_of:\n  - \"[Portfolio site](<Portfolio site.md>)\"\n---\n");
    write(root, "Projects Overview.md", "# Projects\n");
    write(root, "Unlinked.md", "# Nobody links here\n");
}

fn pkms(cwd: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("pkms"));
    cmd.current_dir(cwd).env_remove("RUST_LOG");
    cmd
}

#[test]
fn discover_prints_closure_sorted() {
    let tmp = tempdir().unwrap();
    portfolio(tmp.path());

    pkms(tmp.path())
        .args(["discover", "Portfolio site.md"])
        .assert()
        .success()
        .stdout("Portfolio site.md\nProjects Overview.md\nResume.md\n");
}

#[test]
fn discover_reads_root_and_source_from_config() {
    let tmp = tempdir().unwrap();
    portfolio(&tmp.path().join("notes"));
    write(tmp.path(), "pkmsite.toml", "version = 1\nsource_dir = \"notes\"\nroot = \"Resume.md\"\n");

    pkms(tmp.path())
        .arg("discover")
        .assert()
        .success()
        .stdout(predicate::str::contains("Portfolio site.md"))
        .stdout(predicate::str::contains("Unlinked.md").not());
}

#[test]
fn discover_source_flag() {
    let tmp = tempdir().unwrap();
    let notes = tmp.path().join("notes");
    portfolio(&notes);

    pkms(tmp.path())
        .args(["discover", "Resume.md", "--source"])
        .arg(&notes)
        .assert()
        .success()
        .stdout("Portfolio site.md\nProjects Overview.md\nResume.md\n");
}

#[test]
fn discover_json_includes_warnings() {
    let tmp = tempdir().unwrap();
    write(tmp.path(), "A.md", "---\ncontents:\n  - \"[Gone](Gone.md)\"\n---\n");

    let output = pkms(tmp.path()).args(["discover", "A.md", "--json"]).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["documents"], serde_json::json!(["A.md", "Gone.md"]));
    assert_eq!(value["warnings"][0]["document"], "Gone.md");
    assert_eq!(value["warnings"][0]["kind"], "missing");
}

#[test]
fn discover_warns_on_stderr() {
    let tmp = tempdir().unwrap();
    write(tmp.path(), "A.md", "---\ncontents: \"[Gone](Gone.md)\"\n---\n");

    pkms(tmp.path())
        .args(["discover", "A.md"])
        .assert()
        .success()
        .stdout("A.md\nGone.md\n")
        .stderr(predicate::str::contains("Gone.md"));

    pkms(tmp.path())
        .args(["-q", "discover", "A.md"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn discover_missing_root_exits_3() {
    let tmp = tempdir().unwrap();
    portfolio(tmp.path());

    pkms(tmp.path())
        .args(["discover", "Nope.md"])
        .assert()
        .code(3)
        .stdout(predicate::str::contains("FAIL pkms discover"))
        .stdout(predicate::str::contains("Nope.md"));
}

#[test]
fn discover_without_root_fails() {
    let tmp = tempdir().unwrap();

    pkms(tmp.path())
        .arg("discover")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("FAIL pkms discover"))
        .stdout(predicate::str::contains("no root document"));
}
