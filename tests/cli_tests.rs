//! Integration tests for the tfimport CLI
//!
//! These tests run the binary against configuration files in a temp directory.

use std::fs;
use std::path::Path;
use std::process::Command;

/// Get the path to the tfimport binary
fn tfimport_binary() -> std::path::PathBuf {
    std::path::PathBuf::from(env!("CARGO_BIN_EXE_tfimport"))
}

/// Run tfimport inside `dir` and return output
fn run_tfimport(dir: &Path, args: &[&str]) -> std::process::Output {
    Command::new(tfimport_binary())
        .current_dir(dir)
        .env_remove("TFIMPORT_CONFIG")
        .args(args)
        .output()
        .expect("Failed to execute tfimport")
}

fn write_manifest(dir: &Path) {
    fs::write(
        dir.join("resources.json"),
        r#"[
  {"type": "onelogin_apps", "name": "app1", "provider": "onelogin/onelogin"},
  {"type": "onelogin_users", "name": "user1", "provider": "onelogin/onelogin"}
]"#,
    )
    .unwrap();
}

#[test]
fn test_tfimport_help() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_tfimport(dir.path(), &["--help"]);

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("reconcile"));
    assert!(stdout.contains("state"));
}

#[test]
fn test_reconcile_appends_to_default_config() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path());
    fs::write(dir.path().join("main.tf"), "resource onelogin_apps app1 {}\n").unwrap();

    let output = run_tfimport(dir.path(), &["reconcile", "--resources", "resources.json"]);
    assert!(output.status.success());

    let config = fs::read_to_string(dir.path().join("main.tf")).unwrap();
    assert_eq!(
        config,
        "resource onelogin_apps app1 {}\n\
         terraform {\n\trequired_providers {\n\t\tonelogin = {\n\t\t\tsource = \"onelogin/onelogin\"\n\t\t}\n\t}\n}\n\
         resource onelogin_users user1 {}\n"
    );
}

#[test]
fn test_reconcile_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path());

    let first = run_tfimport(dir.path(), &["reconcile", "-r", "resources.json"]);
    assert!(first.status.success());
    let after_first = fs::read_to_string(dir.path().join("main.tf")).unwrap();

    let second = run_tfimport(dir.path(), &["reconcile", "-r", "resources.json"]);
    assert!(second.status.success());
    let after_second = fs::read_to_string(dir.path().join("main.tf")).unwrap();

    assert_eq!(after_first, after_second);
    assert_eq!(after_first.matches("source = ").count(), 1);
}

#[test]
fn test_reconcile_dry_run_prints_declarations() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path());

    let output = run_tfimport(
        dir.path(),
        &["reconcile", "-r", "resources.json", "--dry-run"],
    );
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("resource onelogin_apps app1 {}"));
    assert!(stdout.contains("resource onelogin_users user1 {}"));
    assert!(!dir.path().join("main.tf").exists());
}

#[test]
fn test_reconcile_writes_staging_file() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path());
    fs::write(
        dir.path().join("main.tf"),
        "terraform {\n  required_providers {\n    onelogin = {\n      source = \"onelogin/onelogin\"\n    }\n  }\n}\n",
    )
    .unwrap();

    let output = run_tfimport(
        dir.path(),
        &["reconcile", "-r", "resources.json", "-o", "staged.tf"],
    );
    assert!(output.status.success());

    let original = fs::read_to_string(dir.path().join("main.tf")).unwrap();
    let staged = fs::read_to_string(dir.path().join("staged.tf")).unwrap();

    assert!(staged.starts_with(&original));
    assert!(staged.ends_with("resource onelogin_apps app1 {}\nresource onelogin_users user1 {}\n"));
    // Provider was already declared, so only an empty requirements block is added
    assert!(staged.contains("terraform {\n\trequired_providers {\n\t}\n}\n"));
}

#[test]
fn test_reconcile_reads_config_with_latin1_comment() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path());

    let mut config = b"# caf\xe9 owner\n".to_vec();
    config.extend_from_slice(
        b"terraform {\n  required_providers {\n    onelogin = {\n      source = \"onelogin/onelogin\"\n    }\n  }\n}\n\
          resource onelogin_apps app1 {}\n\
          resource onelogin_users user1 {}\n",
    );
    fs::write(dir.path().join("main.tf"), &config).unwrap();

    let output = run_tfimport(dir.path(), &["reconcile", "-r", "resources.json"]);
    assert!(output.status.success());

    // Every declaration after the undecodable line was found, so nothing is appended
    assert_eq!(fs::read(dir.path().join("main.tf")).unwrap(), config);
}

#[test]
fn test_reconcile_stages_latin1_config_byte_for_byte() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path());

    let config = b"# caf\xe9\nresource onelogin_apps app1 {}\n".to_vec();
    fs::write(dir.path().join("main.tf"), &config).unwrap();

    let output = run_tfimport(
        dir.path(),
        &["reconcile", "-r", "resources.json", "-o", "staged.tf"],
    );
    assert!(output.status.success());

    let staged = fs::read(dir.path().join("staged.tf")).unwrap();
    assert!(staged.starts_with(&config));
    assert!(staged.ends_with(b"resource onelogin_users user1 {}\n"));
    assert_eq!(fs::read(dir.path().join("main.tf")).unwrap(), config);
}

#[test]
fn test_reconcile_rejects_invalid_manifest() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("resources.json"),
        r#"[{"type": "", "name": "app1", "provider": "onelogin/onelogin"}]"#,
    )
    .unwrap();

    let output = run_tfimport(dir.path(), &["reconcile", "-r", "resources.json"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("Error: Failed to load resource manifest"));
    assert_eq!(output.status.code(), Some(1));
    assert!(!dir.path().join("main.tf").exists());
}

#[test]
fn test_state_lists_resources() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("terraform.tfstate"),
        r#"{"version": 4, "resources": [{"type": "onelogin_apps", "name": "app1", "provider": "provider[\"registry.terraform.io/onelogin/onelogin\"]", "instances": [{"attributes": {"name": "Wiki"}}]}]}"#,
    )
    .unwrap();

    let output = run_tfimport(dir.path(), &["state"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("onelogin_apps.app1"));
}
