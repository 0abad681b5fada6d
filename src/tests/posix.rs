use super::super::posix::{exit_immediately, fork, pipe, waitpid, ExitStatus};

#[test]
fn pipe_roundtrip() {
    use std::io::{Read, Write};
    let (mut r, mut w) = pipe().unwrap();
    w.write_all(b"hi").unwrap();
    drop(w);
    let mut buf = String::new();
    r.read_to_string(&mut buf).unwrap();
    assert_eq!(buf, "hi");
}

#[test]
fn exit_status_shell_code() {
    assert_eq!(ExitStatus::Exited(0).to_shell_code(), 0);
    assert_eq!(ExitStatus::Exited(7).to_shell_code(), 7);
    assert_eq!(ExitStatus::Signaled(9).to_shell_code(), 137);
    assert!(ExitStatus::Exited(0).success());
    assert!(!ExitStatus::Exited(1).success());
}

#[test]
fn fork_and_waitpid() {
    unsafe {
        let pid = fork().unwrap();
        if pid == 0 {
            exit_immediately(42);
        }
        let status = waitpid(pid).unwrap();
        assert_eq!(status, ExitStatus::Exited(42));
    }
}
