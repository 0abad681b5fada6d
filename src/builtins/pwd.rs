use std::os::unix::io::RawFd;

use super::{write_all_fd, BuiltinContext};

/// `pwd`: writes the current working directory followed by a newline.
pub fn run(_argv: &[String], _stdin: RawFd, stdout: RawFd, stderr: RawFd, _ctx: &mut BuiltinContext) -> i32 {
    match std::env::current_dir() {
        Ok(dir) => match write_all_fd(stdout, format!("{}\n", dir.display()).as_bytes()) {
            Ok(()) => 0,
            Err(e) => {
                let _ = write_all_fd(stderr, format!("pwd: {e}\n").as_bytes());
                1
            }
        },
        Err(e) => {
            let _ = write_all_fd(stderr, format!("pwd: {e}\n").as_bytes());
            1
        }
    }
}
