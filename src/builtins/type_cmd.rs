use std::os::unix::io::RawFd;

use super::{write_all_fd, BuiltinContext};
use crate::resolve::{resolve, Resolution};

/// `type name...`: classifies each name as a built-in, a PATH-resolved
/// external, or not found. Overall status is nonzero if any name was
/// unfound.
pub fn run(argv: &[String], _stdin: RawFd, stdout: RawFd, _stderr: RawFd, ctx: &mut BuiltinContext) -> i32 {
    let path_var = std::env::var("PATH").unwrap_or_default();
    let mut status = 0;

    for name in &argv[1..] {
        let line = match resolve(name, ctx.registry, &path_var) {
            Resolution::Builtin => format!("{name} is a shell builtin\n"),
            Resolution::External(path) => format!("{name} is {}\n", path.display()),
            Resolution::Unresolved => {
                status = 1;
                format!("{name}: not found\n")
            }
        };
        let _ = write_all_fd(stdout, line.as_bytes());
    }
    status
}
