//! Built-in commands (spec §4.5): `exit`, `echo`, `pwd`, `cd`, `type`,
//! `history`. Each is a plain function over an argument vector and the
//! current stage's standard descriptors — no trait object hierarchy, per
//! the spec §9 redesign note ("no inheritance is needed; polymorphism is
//! over `{argv, fds} -> status`").

mod cd;
mod echo;
mod exit;
mod history_cmd;
mod pwd;
mod type_cmd;

use std::collections::HashMap;
use std::io::{self, Write};
use std::os::unix::io::RawFd;

use crate::history::HistoryStore;

/// Signature shared by every built-in: reads from `stdin_fd`, writes normal
/// output to `stdout_fd`, diagnostics to `stderr_fd`, and returns an exit
/// status (0 success, nonzero failure).
pub type BuiltinFn = fn(&[String], RawFd, RawFd, RawFd, &mut BuiltinContext) -> i32;

/// Shared state a built-in can observe or mutate when run in-process.
/// `exit_requested` is how the `exit` built-in signals the REPL to stop —
/// its return value alone can't distinguish "exit with status 0" from
/// "succeeded with status 0".
pub struct BuiltinContext<'a> {
    pub history: &'a mut HistoryStore,
    pub registry: &'a BuiltinRegistry,
    pub exit_requested: Option<i32>,
}

impl<'a> BuiltinContext<'a> {
    pub fn new(history: &'a mut HistoryStore, registry: &'a BuiltinRegistry) -> Self {
        Self {
            history,
            registry,
            exit_requested: None,
        }
    }
}

/// Maps built-in names to their handlers. No inheritance, no dynamic
/// dispatch beyond the function pointer itself.
pub struct BuiltinRegistry {
    handlers: HashMap<&'static str, BuiltinFn>,
}

impl BuiltinRegistry {
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<BuiltinFn> {
        self.handlers.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.handlers.keys().copied()
    }
}

/// The registry spec §3 mandates: exactly `exit`, `echo`, `pwd`, `cd`,
/// `type`, `history`.
pub fn default_registry() -> BuiltinRegistry {
    let mut handlers: HashMap<&'static str, BuiltinFn> = HashMap::new();
    handlers.insert("exit", exit::run);
    handlers.insert("echo", echo::run);
    handlers.insert("pwd", pwd::run);
    handlers.insert("cd", cd::run);
    handlers.insert("type", type_cmd::run);
    handlers.insert("history", history_cmd::run);
    BuiltinRegistry { handlers }
}

/// Writes `bytes` to `fd` in full, without taking ownership of (or closing)
/// the descriptor — built-ins are handed fds they don't own, whether that's
/// the shell's own stdout or a redirection target the executor opened.
pub(crate) fn write_all_fd(fd: RawFd, bytes: &[u8]) -> io::Result<()> {
    // SAFETY: fd is a valid, open descriptor for the duration of this call,
    // guaranteed by the executor that handed it to us.
    let mut file = std::mem::ManuallyDrop::new(unsafe {
        <std::fs::File as std::os::unix::io::FromRawFd>::from_raw_fd(fd)
    });
    file.write_all(bytes)
}
