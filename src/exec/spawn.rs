//! The single routine every stage is spawned through, builtin or external
//! alike (spec §9 redesign note). Grounded on the teacher's `posix.rs`
//! primitives and the exec-fail-pipe trick its `popen.rs` used to surface a
//! child's `execvp` failure back to the parent synchronously: before
//! forking we open a `CLOEXEC` pipe; the child writes a message to it only
//! if something goes wrong before (or during) taking on the new process
//! image, and a successful `exec` closes it for free.

use std::fs::File;
use std::io::{self, Read, Write};
use std::os::unix::io::{AsRawFd, RawFd};

use log::{debug, trace};

use crate::builtins::{BuiltinContext, BuiltinRegistry};
use crate::history::HistoryStore;
use crate::posix;
use crate::resolve::Resolution;

use super::open_redirect_file;
use super::stage::Stage;

/// A forked child the parent still needs to drain an error message from and
/// `waitpid` on.
pub struct SpawnedChild {
    pub pid: libc::pid_t,
    pub err_pipe: File,
}

/// Forks and runs `stage` in the child according to `resolution`, wiring
/// `stdin_fd`/`stdout_fd` onto the child's descriptors 0/1 first. `pipe_fds`
/// lists every descriptor belonging to the pipeline's inter-stage pipes (not
/// including `stdin_fd`/`stdout_fd` themselves if the caller already
/// resolved them to something else); the child closes all of them once its
/// own wiring is done, per spec §4.6.
pub fn spawn_stage(
    stage: &Stage,
    resolution: &Resolution,
    stdin_fd: RawFd,
    stdout_fd: RawFd,
    pipe_fds: &[RawFd],
    registry: &BuiltinRegistry,
    history: &HistoryStore,
) -> io::Result<SpawnedChild> {
    let (err_r, err_w) = posix::pipe()?;
    posix::set_cloexec(&err_w, true)?;

    trace!("spawning stage argv={:?} stdin={stdin_fd} stdout={stdout_fd}", stage.argv);

    // SAFETY: the shell is single-threaded, the precondition `fork` documents.
    match unsafe { posix::fork() }? {
        0 => {
            drop(err_r);
            child_run(stage, resolution, stdin_fd, stdout_fd, pipe_fds, registry, history, err_w);
        }
        pid => {
            debug!("forked pid {pid} for stage argv={:?}", stage.argv);
            Ok(SpawnedChild { pid, err_pipe: err_r })
        }
    }
}

fn report_and_exit(mut err_w: File, message: &str, code: i32) -> ! {
    let _ = err_w.write_all(message.as_bytes());
    let _ = err_w.write_all(b"\n");
    posix::exit_immediately(code);
}

fn child_run(
    stage: &Stage,
    resolution: &Resolution,
    stdin_fd: RawFd,
    stdout_fd: RawFd,
    pipe_fds: &[RawFd],
    registry: &BuiltinRegistry,
    history: &HistoryStore,
    err_w: File,
) -> ! {
    if stdin_fd != libc::STDIN_FILENO && posix::dup2(stdin_fd, libc::STDIN_FILENO).is_err() {
        report_and_exit(err_w, "failed to wire stdin", 1);
    }
    if stdout_fd != libc::STDOUT_FILENO && posix::dup2(stdout_fd, libc::STDOUT_FILENO).is_err() {
        report_and_exit(err_w, "failed to wire stdout", 1);
    }
    for fd in pipe_fds {
        unsafe {
            libc::close(*fd);
        }
    }

    if let Err(e) = apply_redirections(stage) {
        report_and_exit(err_w, &e, 1);
    }

    match resolution {
        Resolution::External(path) => match posix::execv(path, &stage.argv) {
            Err(e) => report_and_exit(err_w, &format!("{}: {e}", stage.argv[0]), 127),
            Ok(()) => unreachable!("execv only returns on error"),
        },
        Resolution::Builtin => {
            // There is no `execv` for a builtin to signal "spawn succeeded",
            // so drop the write end here, once setup can no longer fail,
            // rather than after the builtin runs: the parent's synchronous
            // check (`check_spawn_error`) would otherwise block on this
            // pipe until the builtin finishes, which deadlocks if the
            // builtin is itself blocked writing into a downstream pipe
            // stage the parent hasn't forked yet.
            drop(err_w);
            let mut history = history.clone();
            let mut ctx = BuiltinContext::new(&mut history, registry);
            let func = registry
                .get(&stage.argv[0])
                .expect("resolution claimed this name is a builtin");
            let status = func(
                &stage.argv,
                libc::STDIN_FILENO,
                libc::STDOUT_FILENO,
                libc::STDERR_FILENO,
                &mut ctx,
            );
            posix::exit_immediately(status);
        }
        Resolution::Unresolved => {
            unreachable!("callers filter out unresolved stages before spawning")
        }
    }
}

fn apply_redirections(stage: &Stage) -> Result<(), String> {
    // stderr first, then stdout, per spec §3's fixed application order.
    if let Some(r) = &stage.redirect.stderr {
        let file = open_redirect_file(r).map_err(|e| format!("{}: {e}", r.path))?;
        posix::dup2(file.as_raw_fd(), libc::STDERR_FILENO).map_err(|e| e.to_string())?;
    }
    if let Some(r) = &stage.redirect.stdout {
        let file = open_redirect_file(r).map_err(|e| format!("{}: {e}", r.path))?;
        posix::dup2(file.as_raw_fd(), libc::STDOUT_FILENO).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Blocks until `child`'s `err_pipe` write end closes — synchronously,
/// before the caller moves on to spawn the next stage of a pipeline — and
/// returns whatever failure message it wrote, if any. The write end closes
/// either because a successful `exec` carried it away via `CLOEXEC`, because
/// a builtin stage got past its own setup (see the comment in `child_run`),
/// or because `report_and_exit` wrote a message and exited. Mirrors the
/// teacher's `Popen::start`, which blocks on its own exec-fail pipe and
/// returns `Err` before the caller spawns the next stage of a pipeline.
pub fn check_spawn_error(child: &mut SpawnedChild) -> Option<String> {
    let mut buf = Vec::new();
    let _ = child.err_pipe.read_to_end(&mut buf);
    (!buf.is_empty()).then(|| String::from_utf8_lossy(&buf).into_owned())
}

/// Reaps `child`, reporting any spawn-failure message that hasn't already
/// been drained by [`check_spawn_error`]. Used once a pipeline has finished
/// forking (and every stage has already passed its synchronous spawn check).
pub fn finish(mut child: SpawnedChild) -> posix::ExitStatus {
    if let Some(message) = check_spawn_error(&mut child) {
        eprint!("{message}");
    }
    posix::waitpid(child.pid).unwrap_or(posix::ExitStatus::Exited(127))
}
