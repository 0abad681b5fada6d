use std::os::unix::io::RawFd;

use super::{write_all_fd, BuiltinContext};

/// `exit [N]`: requests shell termination with status `N` (default 0).
/// Invalid arguments are treated as a usage error, status 2, and do not
/// request termination.
pub fn run(argv: &[String], _stdin: RawFd, _stdout: RawFd, stderr: RawFd, ctx: &mut BuiltinContext) -> i32 {
    let code = match argv.get(1) {
        None => 0,
        Some(s) => match s.parse::<i32>() {
            Ok(n) => n,
            Err(_) => {
                let _ = write_all_fd(stderr, format!("exit: {s}: numeric argument required\n").as_bytes());
                return 2;
            }
        },
    };
    ctx.exit_requested = Some(code);
    code
}
