use std::os::unix::io::RawFd;

use super::{write_all_fd, BuiltinContext};

/// `cd [path]`: changes the working directory. No argument, or an empty
/// argument, is a no-op (spec §9 resolves "no argument" as no-op, not
/// "go HOME"). A bare `~` is replaced by `$HOME`.
pub fn run(argv: &[String], _stdin: RawFd, _stdout: RawFd, stderr: RawFd, _ctx: &mut BuiltinContext) -> i32 {
    let arg = match argv.get(1) {
        None => return 0,
        Some(a) if a.is_empty() => return 0,
        Some(a) => a,
    };

    let target = if arg == "~" {
        match std::env::var("HOME") {
            Ok(home) => home,
            Err(_) => arg.clone(),
        }
    } else {
        arg.clone()
    };

    match std::env::set_current_dir(&target) {
        Ok(()) => 0,
        Err(e) => {
            let reason = if e.kind() == std::io::ErrorKind::NotFound {
                "No such file or directory".to_string()
            } else {
                e.to_string()
            };
            let _ = write_all_fd(stderr, format!("cd: {arg}: {reason}\n").as_bytes());
            1
        }
    }
}
