use super::super::history_cmd::run;
use super::super::{default_registry, BuiltinContext};
use super::super::super::history::HistoryStore;
use super::super::super::posix;
use std::io::Read;
use std::os::unix::io::AsRawFd;

fn run_history(argv: &[String], history: &mut HistoryStore) -> (i32, String) {
    let registry = default_registry();
    let mut ctx = BuiltinContext::new(history, &registry);
    let (mut r, w) = posix::pipe().unwrap();
    let status = run(argv, 0, w.as_raw_fd(), 2, &mut ctx);
    drop(w);
    let mut out = String::new();
    r.read_to_string(&mut out).unwrap();
    (status, out)
}

// Spec §8 scenario S7: `history N` counts its own invocation, recorded
// before display, so the third-to-last shown entry is `history 2` itself.
#[test]
fn s7_history_n_counts_its_own_invocation() {
    let mut history = HistoryStore::new();
    history.push("echo a");
    history.push("echo b");
    history.push("echo c");
    history.push("history 2");

    let argv = vec!["history".to_string(), "2".to_string()];
    let (status, out) = run_history(&argv, &mut history);

    assert_eq!(status, 0);
    assert_eq!(out, "    2  echo b\n    3  echo c\n    4  history 2\n");
}

#[test]
fn no_args_prints_every_entry() {
    let mut history = HistoryStore::new();
    history.push("echo a");
    history.push("echo b");

    let argv = vec!["history".to_string()];
    let (status, out) = run_history(&argv, &mut history);

    assert_eq!(status, 0);
    assert_eq!(out, "    1  echo a\n    2  echo b\n");
}
