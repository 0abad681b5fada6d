use std::os::unix::io::RawFd;

use super::{write_all_fd, BuiltinContext};

/// `history [N | -r file | -w file | -a file]` (spec §4.5). The invocation
/// line itself is already recorded in the store by the time this runs
/// (the shell appends before dispatch), so `history N` counts itself.
pub fn run(argv: &[String], _stdin: RawFd, stdout: RawFd, stderr: RawFd, ctx: &mut BuiltinContext) -> i32 {
    match argv.get(1).map(String::as_str) {
        None => {
            let mut out = String::new();
            for (idx, entry) in ctx.history.all() {
                out.push_str(&format!("{idx:>5}  {entry}\n"));
            }
            write_ok_or_err(stdout, stderr, &out)
        }
        Some("-r") => with_path(argv, stderr, |path| ctx.history.read_file(path), "history"),
        Some("-w") => with_path(argv, stderr, |path| ctx.history.write_file(path), "history"),
        Some("-a") => with_path(argv, stderr, |path| ctx.history.append_file(path), "history"),
        Some(n) => match n.parse::<usize>() {
            Ok(count) => {
                let mut out = String::new();
                for (idx, entry) in ctx.history.last_n(count) {
                    out.push_str(&format!("{idx:>5}  {entry}\n"));
                }
                write_ok_or_err(stdout, stderr, &out)
            }
            Err(_) => {
                let _ = write_all_fd(stderr, format!("history: {n}: numeric argument required\n").as_bytes());
                2
            }
        },
    }
}

fn write_ok_or_err(stdout: RawFd, stderr: RawFd, out: &str) -> i32 {
    match write_all_fd(stdout, out.as_bytes()) {
        Ok(()) => 0,
        Err(e) => {
            let _ = write_all_fd(stderr, format!("history: {e}\n").as_bytes());
            1
        }
    }
}

fn with_path(
    argv: &[String],
    stderr: RawFd,
    op: impl FnOnce(&str) -> std::io::Result<()>,
    name: &str,
) -> i32 {
    let path = match argv.get(2) {
        Some(p) => p,
        None => {
            let _ = write_all_fd(stderr, format!("{name}: option requires an argument\n").as_bytes());
            return 2;
        }
    };
    match op(path) {
        Ok(()) => 0,
        Err(e) => {
            let _ = write_all_fd(stderr, format!("{name}: {path}: {e}\n").as_bytes());
            1
        }
    }
}
