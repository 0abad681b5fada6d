use super::super::pwd::run;
use super::super::{default_registry, BuiltinContext};
use super::super::super::history::HistoryStore;
use super::super::super::posix;
use std::io::Read;
use std::os::unix::io::AsRawFd;

#[test]
fn writes_current_directory_and_newline() {
    let registry = default_registry();
    let mut history = HistoryStore::new();
    let mut ctx = BuiltinContext::new(&mut history, &registry);
    let (mut r, w) = posix::pipe().unwrap();
    let status = run(&["pwd".to_string()], 0, w.as_raw_fd(), 2, &mut ctx);
    drop(w);
    let mut out = String::new();
    r.read_to_string(&mut out).unwrap();

    assert_eq!(status, 0);
    assert_eq!(out, format!("{}\n", std::env::current_dir().unwrap().display()));
}
