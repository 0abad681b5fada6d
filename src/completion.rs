//! Completion provider (spec §4.8): given a prefix, enumerates built-in
//! names plus PATH executables that start with it. Pure with respect to its
//! inputs; multi-Tab cycling and bell-ringing are the line editor's concern,
//! not this crate's (spec §9).

use std::fs;
use std::os::unix::fs::PermissionsExt;

use crate::builtins::BuiltinRegistry;

/// Returns the sorted, deduplicated set of names starting with `prefix`:
/// built-ins from `registry` plus every regular, executable file in any
/// `path_var` directory. Directory scan errors are silently skipped per
/// directory.
pub fn complete(prefix: &str, registry: &BuiltinRegistry, path_var: &str) -> Vec<String> {
    let mut candidates: Vec<String> = registry
        .names()
        .filter(|name| name.starts_with(prefix))
        .map(str::to_string)
        .collect();

    for dir in path_var.split(':').filter(|d| !d.is_empty()) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };
        for entry in entries.flatten() {
            let name = entry.file_name();
            let name = match name.to_str() {
                Some(n) => n,
                None => continue,
            };
            if !name.starts_with(prefix) {
                continue;
            }
            let is_executable_file = entry
                .metadata()
                .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
                .unwrap_or(false);
            if is_executable_file {
                candidates.push(name.to_string());
            }
        }
    }

    candidates.sort_unstable();
    candidates.dedup();
    candidates
}
