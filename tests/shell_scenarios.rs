//! Integration tests driving the built `pshell` binary via `-c`, covering
//! the end-to-end scenarios that need a real fork/exec/pipe (spec §8,
//! S1-S8).

use std::fs;
use std::process::Command;

use assert_cmd::cargo::cargo_bin;
use predicates::prelude::*;

fn pshell() -> Command {
    Command::new(cargo_bin("pshell"))
}

#[test]
fn s1_echo_joins_args_with_single_spaces() {
    pshell()
        .arg("-c")
        .arg("echo hello   world")
        .assert()
        .success()
        .stdout("hello world\n");
}

#[test]
fn s2_quoting_preserves_internal_spacing() {
    pshell()
        .arg("-c")
        .arg(r#"echo 'a  b' "c d""#)
        .assert()
        .success()
        .stdout("a  b c d\n");
}

#[test]
fn s3_redirection_truncate_then_append() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("t.out");
    let path_str = path.to_str().unwrap();

    pshell().arg("-c").arg(format!("echo x > {path_str}")).assert().success();
    pshell().arg("-c").arg(format!("echo x > {path_str}")).assert().success();
    assert_eq!(fs::read_to_string(&path).unwrap(), "x\n");

    pshell().arg("-c").arg(format!("echo y >> {path_str}")).assert().success();
    assert_eq!(fs::read_to_string(&path).unwrap(), "x\ny\n");
}

#[test]
fn s4_pipeline_reports_last_stage_status() {
    pshell()
        .arg("-c")
        .arg("echo one two three | wc -w")
        .assert()
        .success()
        .stdout(predicate::str::contains("3"));
}

#[test]
fn s5_unresolved_command_reports_not_found() {
    pshell()
        .arg("-c")
        .arg("nosuchcmd foo")
        .assert()
        .failure()
        .stderr("nosuchcmd: command not found\n");
}

#[test]
fn s6_cd_reports_missing_directory() {
    pshell()
        .arg("-c")
        .arg("cd /no/such/directory/xyz")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No such file or directory"));
}

#[test]
fn s8_stderr_redirection_captures_os_error_text() {
    let dir = tempfile::tempdir().unwrap();
    let err_path = dir.path().join("err");
    let err_str = err_path.to_str().unwrap();

    pshell()
        .arg("-c")
        .arg(format!("ls /no/such/path/xyz 2> {err_str}"))
        .assert()
        .stdout("");
    let contents = fs::read_to_string(&err_path).unwrap();
    assert!(!contents.is_empty());
}

#[test]
fn version_flag_prints_crate_version() {
    pshell()
        .arg("-V")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn exit_builtin_sets_process_status() {
    pshell().arg("-c").arg("exit 7").assert().code(7);
}

#[test]
fn missing_command_after_redirection_reports_usage_error() {
    pshell()
        .arg("-c")
        .arg("> /tmp/should-not-matter")
        .assert()
        .failure();
}
