//! The executor (spec §4.6): the crate's core. Orchestrates single-stage
//! and multi-stage execution, grounded on the teacher's `posix.rs`
//! primitives (`pipe`, `fork`, `dup2`, `execv`, `waitpid`, `kill`) and its
//! exec-fail-pipe pattern for surfacing a child's failure synchronously.

mod spawn;
pub mod stage;

use std::fs::File;
use std::io;
use std::os::unix::io::{AsRawFd, RawFd};

use log::debug;

use crate::builtins::{BuiltinContext, BuiltinRegistry};
use crate::history::HistoryStore;
use crate::posix;
use crate::redirect::{Redirect, RedirectMode};
use crate::resolve::{resolve, Resolution};

pub use stage::{build_pipeline, Stage};

/// The result of running one pipeline: the shell-visible status, and
/// whether `exit` was requested. `exit_requested` can only be `Some` for a
/// single in-process builtin stage — built-ins forked into a pipeline
/// cannot reach back into shell state (spec §4.6).
pub struct RunOutcome {
    pub status: i32,
    pub exit_requested: Option<i32>,
}

/// Opens the file named by a [`Redirect`], create-or-truncate or
/// create-or-append at mode `0644` per spec §6.
fn open_redirect_file(r: &Redirect) -> io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;
    let mut opts = std::fs::OpenOptions::new();
    opts.write(true).create(true).mode(0o644);
    match r.mode {
        RedirectMode::Truncate => opts.truncate(true),
        RedirectMode::Append => opts.append(true),
    };
    opts.open(&r.path)
}

/// Runs `stages` to completion, wiring pipes and redirections as spec §4.6
/// describes, and returns the pipeline's reported status (that of its last
/// stage).
pub fn execute(stages: &[Stage], registry: &BuiltinRegistry, history: &mut HistoryStore) -> RunOutcome {
    let path_var = std::env::var("PATH").unwrap_or_default();

    if stages.len() == 1 {
        return execute_single(&stages[0], registry, history, &path_var);
    }
    RunOutcome {
        status: run_multi_stage(stages, registry, &*history, &path_var),
        exit_requested: None,
    }
}

fn execute_single(
    stage: &Stage,
    registry: &BuiltinRegistry,
    history: &mut HistoryStore,
    path_var: &str,
) -> RunOutcome {
    let resolution = resolve(&stage.argv[0], registry, path_var);

    match resolution {
        Resolution::Unresolved => {
            eprintln!("{}: command not found", stage.argv[0]);
            RunOutcome { status: 1, exit_requested: None }
        }
        Resolution::Builtin if stage.redirect.stdout.is_none() && stage.redirect.stderr.is_none() => {
            let mut ctx = BuiltinContext::new(history, registry);
            let func = registry.get(&stage.argv[0]).expect("resolved as builtin");
            let status = func(
                &stage.argv,
                libc::STDIN_FILENO,
                libc::STDOUT_FILENO,
                libc::STDERR_FILENO,
                &mut ctx,
            );
            RunOutcome { status, exit_requested: ctx.exit_requested }
        }
        Resolution::Builtin => RunOutcome {
            status: run_builtin_with_redirection(stage, registry, history),
            exit_requested: None,
        },
        Resolution::External(_) => {
            let status = match spawn::spawn_stage(
                stage,
                &resolution,
                libc::STDIN_FILENO,
                libc::STDOUT_FILENO,
                &[],
                registry,
                &*history,
            ) {
                Ok(child) => spawn::finish(child).to_shell_code(),
                Err(e) => {
                    eprintln!("{}: {e}", stage.argv[0]);
                    1
                }
            };
            RunOutcome { status, exit_requested: None }
        }
    }
}

/// Restores a shell descriptor from a saved duplicate on drop, so the
/// restoration happens on every control path including a built-in's own
/// error return (spec §4.6's "guaranteed-release discipline").
struct FdRestore {
    saved: File,
    target: RawFd,
}

impl Drop for FdRestore {
    fn drop(&mut self) {
        let _ = posix::dup2(self.saved.as_raw_fd(), self.target);
    }
}

fn run_builtin_with_redirection(stage: &Stage, registry: &BuiltinRegistry, history: &mut HistoryStore) -> i32 {
    let mut restores = Vec::new();

    // stderr first, then stdout, per spec §3's fixed application order.
    if let Some(r) = &stage.redirect.stderr {
        match prepare_redirect(r, libc::STDERR_FILENO) {
            Ok(restore) => restores.push(restore),
            Err(e) => {
                eprintln!("{}: {e}", r.path);
                return 1;
            }
        }
    }
    if let Some(r) = &stage.redirect.stdout {
        match prepare_redirect(r, libc::STDOUT_FILENO) {
            Ok(restore) => restores.push(restore),
            Err(e) => {
                eprintln!("{}: {e}", r.path);
                return 1;
            }
        }
    }

    let mut ctx = BuiltinContext::new(history, registry);
    let func = registry.get(&stage.argv[0]).expect("resolved as builtin");
    func(
        &stage.argv,
        libc::STDIN_FILENO,
        libc::STDOUT_FILENO,
        libc::STDERR_FILENO,
        &mut ctx,
    )
    // `restores` drop here, unconditionally, even if `func` itself failed.
}

fn prepare_redirect(r: &Redirect, target: RawFd) -> io::Result<FdRestore> {
    let saved = posix::dup(target)?;
    let file = open_redirect_file(r)?;
    posix::dup2(file.as_raw_fd(), target)?;
    Ok(FdRestore { saved, target })
}

fn run_multi_stage(stages: &[Stage], registry: &BuiltinRegistry, history: &HistoryStore, path_var: &str) -> i32 {
    let n = stages.len();
    let mut pipes = Vec::with_capacity(n - 1);
    for _ in 0..n - 1 {
        match posix::pipe() {
            Ok(p) => pipes.push(p),
            Err(e) => {
                eprintln!("pipe: {e}");
                return 1;
            }
        }
    }
    let pipe_fds: Vec<RawFd> = pipes
        .iter()
        .flat_map(|(r, w): &(File, File)| [r.as_raw_fd(), w.as_raw_fd()])
        .collect();

    let mut children: Vec<spawn::SpawnedChild> = Vec::with_capacity(n);

    for (i, stage) in stages.iter().enumerate() {
        let resolution = resolve(&stage.argv[0], registry, path_var);
        if let Resolution::Unresolved = resolution {
            eprintln!("{}: command not found", stage.argv[0]);
            abort_pipeline(children, pipes);
            return 1;
        }

        let stdin_fd = if i == 0 { libc::STDIN_FILENO } else { pipes[i - 1].0.as_raw_fd() };
        let stdout_fd = if i == n - 1 { libc::STDOUT_FILENO } else { pipes[i].1.as_raw_fd() };

        let mut child = match spawn::spawn_stage(stage, &resolution, stdin_fd, stdout_fd, &pipe_fds, registry, history) {
            Ok(child) => child,
            Err(e) => {
                eprintln!("{}: {e}", stage.argv[0]);
                abort_pipeline(children, pipes);
                return 1;
            }
        };

        // Block here, per stage, until this child has either started
        // running or reported a spawn failure (redirection-open error or
        // failed `execv`) — before forking the next stage, so a failure in
        // stage i aborts stage i+1..n-1 rather than letting the whole
        // pipeline finish forking first (spec §4.6).
        if let Some(message) = spawn::check_spawn_error(&mut child) {
            eprint!("{message}");
            children.push(child);
            abort_pipeline(children, pipes);
            return 1;
        }
        children.push(child);
    }

    // Parent closes both ends of every pipe after forking all stages.
    drop(pipes);

    let last_index = children.len() - 1;
    let mut last_status = 1;
    for (i, child) in children.into_iter().enumerate() {
        let status = spawn::finish(child);
        debug!("stage {i} exited with {status:?}");
        if i == last_index {
            last_status = status.to_shell_code();
        }
    }
    last_status
}

fn abort_pipeline(children: Vec<spawn::SpawnedChild>, pipes: Vec<(File, File)>) {
    for child in &children {
        let _ = posix::kill(child.pid, posix::SIGTERM);
    }
    for child in children {
        let _ = posix::waitpid(child.pid);
    }
    drop(pipes);
}

#[cfg(test)]
mod tests {
    mod executor;
    mod stage;
}
