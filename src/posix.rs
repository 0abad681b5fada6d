//! Thin, `Result`-returning wrappers around the POSIX primitives the
//! executor needs: `pipe`, `fork`, `dup2`, `execv`, `waitpid`, and `kill`,
//! plus the `fcntl` call used to keep descriptors from leaking across an
//! unrelated `exec` in a sibling stage of the same pipeline.
//!
//! Nothing here is shell-specific; it is the same layer a process-execution
//! library maintains around raw `libc` calls, kept separate so the
//! fd-plumbing in `exec` reads as plain Rust rather than a thicket of
//! `unsafe` blocks.

use std::ffi::{CString, OsStr};
use std::fs::File;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::io::{AsRawFd, FromRawFd, RawFd};
use std::path::Path;

fn check_err<T: Ord + Default>(num: T) -> io::Result<T> {
    if num < T::default() {
        return Err(io::Error::last_os_error());
    }
    Ok(num)
}

/// Creates an OS pipe, returning `(read_end, write_end)`.
pub fn pipe() -> io::Result<(File, File)> {
    let mut fds = [0 as libc::c_int; 2];
    check_err(unsafe { libc::pipe(fds.as_mut_ptr()) })?;
    Ok(unsafe { (File::from_raw_fd(fds[0]), File::from_raw_fd(fds[1])) })
}

/// Forks the process. Returns `0` in the child and the child's pid in the
/// parent.
///
/// # Safety
/// Must only be called from the single-threaded shell main loop: a fork in
/// a multithreaded process only carries the calling thread into the child,
/// which can deadlock on locks held by other threads. The shell never
/// spawns threads, so this always holds here.
pub unsafe fn fork() -> io::Result<libc::pid_t> {
    check_err(libc::fork())
}

fn os_str_to_cstring(s: &OsStr) -> io::Result<CString> {
    CString::new(s.as_bytes())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "argument contains a NUL byte"))
}

/// Replaces the current process image with `path`, passing `args` as
/// `argv` (`args[0]` conventionally equals the invoked name). Only returns
/// on error.
pub fn execv(path: &Path, args: &[String]) -> io::Result<()> {
    let path_cstr = os_str_to_cstring(path.as_os_str())?;
    let arg_cstrings: Vec<CString> = args
        .iter()
        .map(|a| os_str_to_cstring(OsStr::new(a)))
        .collect::<io::Result<_>>()?;
    let mut argv: Vec<*const libc::c_char> = arg_cstrings.iter().map(|s| s.as_ptr()).collect();
    argv.push(std::ptr::null());
    check_err(unsafe { libc::execv(path_cstr.as_ptr(), argv.as_ptr()) })?;
    unreachable!("execv only returns to report an error, already handled above")
}

/// Calls `_exit(2)` directly, bypassing unwinding and `atexit` handlers.
/// Used only in a forked child that must not run the parent's destructors
/// (buffered stdio flushes, `Drop` impls it doesn't own, etc).
pub fn exit_immediately(code: i32) -> ! {
    unsafe { libc::_exit(code as libc::c_int) }
}

/// The reaped exit state of a child process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Exited(i32),
    Signaled(i32),
}

impl ExitStatus {
    /// Converts to the shell-visible status code: the raw exit code when
    /// the process exited normally, or `128 + signal` when it was killed by
    /// a signal, matching conventional shell behavior.
    pub fn to_shell_code(self) -> i32 {
        match self {
            ExitStatus::Exited(code) => code,
            ExitStatus::Signaled(sig) => 128 + sig,
        }
    }

    pub fn success(self) -> bool {
        matches!(self, ExitStatus::Exited(0))
    }
}

fn decode_wait_status(status: libc::c_int) -> ExitStatus {
    unsafe {
        if libc::WIFEXITED(status) {
            ExitStatus::Exited(libc::WEXITSTATUS(status))
        } else if libc::WIFSIGNALED(status) {
            ExitStatus::Signaled(libc::WTERMSIG(status))
        } else {
            ExitStatus::Exited(status)
        }
    }
}

/// Blocking `waitpid` for exactly `pid`.
pub fn waitpid(pid: libc::pid_t) -> io::Result<ExitStatus> {
    let mut status: libc::c_int = 0;
    check_err(unsafe { libc::waitpid(pid, &mut status, 0) })?;
    Ok(decode_wait_status(status))
}

pub const SIGTERM: i32 = libc::SIGTERM;

/// Sends `signal` to `pid`.
pub fn kill(pid: libc::pid_t, signal: i32) -> io::Result<()> {
    check_err(unsafe { libc::kill(pid, signal) })?;
    Ok(())
}

/// Duplicates `oldfd` onto `newfd`, closing `newfd` first if it was open.
pub fn dup2(oldfd: RawFd, newfd: RawFd) -> io::Result<()> {
    check_err(unsafe { libc::dup2(oldfd, newfd) })?;
    Ok(())
}

/// Duplicates `fd` to the lowest available descriptor.
pub fn dup(fd: RawFd) -> io::Result<File> {
    let newfd = check_err(unsafe { libc::dup(fd) })?;
    Ok(unsafe { File::from_raw_fd(newfd) })
}

/// Sets or clears `FD_CLOEXEC` on `f`.
pub fn set_cloexec(f: &File, cloexec: bool) -> io::Result<()> {
    let fd = f.as_raw_fd();
    let old = check_err(unsafe { libc::fcntl(fd, libc::F_GETFD) })?;
    let new = if cloexec {
        old | libc::FD_CLOEXEC
    } else {
        old & !libc::FD_CLOEXEC
    };
    check_err(unsafe { libc::fcntl(fd, libc::F_SETFD, new) })?;
    Ok(())
}
