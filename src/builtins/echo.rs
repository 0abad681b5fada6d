use std::os::unix::io::RawFd;

use super::{write_all_fd, BuiltinContext};

/// `echo [args...]`: writes `args` joined by single spaces, newline
/// terminated.
pub fn run(argv: &[String], _stdin: RawFd, stdout: RawFd, stderr: RawFd, _ctx: &mut BuiltinContext) -> i32 {
    let line = argv[1..].join(" ");
    match write_all_fd(stdout, format!("{line}\n").as_bytes()) {
        Ok(()) => 0,
        Err(e) => {
            let _ = write_all_fd(stderr, format!("echo: {e}\n").as_bytes());
            1
        }
    }
}
