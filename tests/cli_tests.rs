//! Integration tests for the CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn bin() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("staged-config"))
}

fn fixture_tree() -> TempDir {
    let tmp = TempDir::new().expect("tmp");
    fs::create_dir_all(tmp.path().join("defaults")).expect("mkdir");
    fs::create_dir_all(tmp.path().join("prod")).expect("mkdir");
    fs::write(
        tmp.path().join("defaults/app.yaml"),
        "defaults:\n  debug: true\n  host: 127.0.0.1\n",
    )
    .expect("write");
    fs::write(tmp.path().join("prod/app.yaml"), "prod:\n  host: 0.0.0.0\n").expect("write");
    tmp
}

#[test]
fn test_cli_version() {
    let mut cmd = bin();
    cmd.arg("--version");
    cmd.assert().success().stdout(predicate::str::contains("staged-config"));
}

#[test]
fn test_cli_help() {
    let mut cmd = bin();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Stage-layered YAML configuration reader"))
        .stdout(predicate::str::contains("--stage"))
        .stdout(predicate::str::contains("--config-path"));
}

#[test]
fn test_cli_prints_merged_stage_config() {
    let tmp = fixture_tree();
    let mut cmd = bin();
    cmd.args(["--stage", "prod", "--config-path"]).arg(tmp.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("host: 0.0.0.0"))
        .stdout(predicate::str::contains("debug: true"));
}

#[test]
fn test_cli_defaults_stage_skips_overlay() {
    let tmp = fixture_tree();
    let mut cmd = bin();
    cmd.args(["--stage", "defaults", "--config-path"]).arg(tmp.path());
    cmd.assert().success().stdout(predicate::str::contains("host: 127.0.0.1"));
}

#[test]
fn test_cli_missing_config_path_fails() {
    let tmp = TempDir::new().expect("tmp");
    let mut cmd = bin();
    cmd.args(["--stage", "prod", "--config-path"]).arg(tmp.path().join("missing"));
    cmd.assert().failure().stderr(predicate::str::contains("config path"));
}

#[test]
fn test_cli_missing_defaults_fails() {
    let tmp = TempDir::new().expect("tmp");
    fs::create_dir_all(tmp.path().join("prod")).expect("mkdir");
    fs::write(tmp.path().join("prod/app.yaml"), "prod:\n  host: 0.0.0.0\n").expect("write");

    let mut cmd = bin();
    cmd.args(["--stage", "prod", "--config-path"]).arg(tmp.path());
    cmd.assert().failure().stderr(predicate::str::contains("no default config"));
}

#[test]
fn test_cli_resolves_relative_config_path() {
    let tmp = TempDir::new().expect("tmp");
    fs::create_dir_all(tmp.path().join("configuration/defaults")).expect("mkdir");
    fs::write(
        tmp.path().join("configuration/defaults/app.yaml"),
        "defaults:\n  host: 127.0.0.1\n",
    )
    .expect("write");

    let mut cmd = bin();
    cmd.current_dir(tmp.path());
    cmd.args(["--stage", "dev", "--config-path", "./configuration"]);
    cmd.assert().success().stdout(predicate::str::contains("host: 127.0.0.1"));
}

#[test]
fn test_cli_stage_flag_overrides_environment() {
    let tmp = fixture_tree();
    let mut cmd = bin();
    cmd.env("STAGE", "defaults");
    cmd.args(["--stage", "prod", "--config-path"]).arg(tmp.path());
    cmd.assert().success().stdout(predicate::str::contains("host: 0.0.0.0"));
}

#[test]
fn test_cli_resolves_stage_from_environment() {
    let tmp = fixture_tree();
    let mut cmd = bin();
    cmd.env("STAGE", "prod");
    cmd.args(["--config-path"]).arg(tmp.path());
    cmd.assert().success().stdout(predicate::str::contains("host: 0.0.0.0"));
}
