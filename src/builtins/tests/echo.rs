use super::super::echo::run;
use super::super::{default_registry, BuiltinContext};
use super::super::super::history::HistoryStore;
use super::super::super::posix;
use std::io::Read;
use std::os::unix::io::AsRawFd;

fn run_echo(args: &[&str]) -> String {
    let registry = default_registry();
    let mut history = HistoryStore::new();
    let mut ctx = BuiltinContext::new(&mut history, &registry);
    let (mut r, w) = posix::pipe().unwrap();
    let mut argv = vec!["echo".to_string()];
    argv.extend(args.iter().map(|a| a.to_string()));
    run(&argv, 0, w.as_raw_fd(), 2, &mut ctx);
    drop(w);
    let mut out = String::new();
    r.read_to_string(&mut out).unwrap();
    out
}

// Spec §8 scenario S1.
#[test]
fn joins_args_with_single_spaces() {
    assert_eq!(run_echo(&["hello", "world"]), "hello world\n");
}

#[test]
fn no_args_prints_bare_newline() {
    assert_eq!(run_echo(&[]), "\n");
}
