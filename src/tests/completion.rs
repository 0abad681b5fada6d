use super::super::builtins::default_registry;
use super::super::completion::complete;
use std::fs;
use std::fs::Permissions;
use std::os::unix::fs::PermissionsExt;

#[test]
fn matches_builtin_prefix() {
    let registry = default_registry();
    let got = complete("ec", &registry, "");
    assert_eq!(got, vec!["echo"]);
}

#[test]
fn matches_path_executables_and_dedups_with_builtins() {
    let dir = tempfile::tempdir().unwrap();
    let exe = dir.path().join("echo-helper");
    fs::write(&exe, "#!/bin/sh\n").unwrap();
    fs::set_permissions(&exe, Permissions::from_mode(0o755)).unwrap();
    let not_exec = dir.path().join("echo-data");
    fs::write(&not_exec, "hi").unwrap();

    let registry = default_registry();
    let path_var = dir.path().to_str().unwrap();
    let got = complete("echo", &registry, path_var);
    assert_eq!(got, vec!["echo", "echo-helper"]);
}

#[test]
fn empty_path_yields_only_builtins() {
    let registry = default_registry();
    assert_eq!(complete("p", &registry, ""), vec!["pwd"]);
}
