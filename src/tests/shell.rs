use super::super::error::ShellError;
use super::super::shell::{LineOutcome, Shell};

#[test]
fn empty_line_is_not_recorded() {
    let mut shell = Shell::new();
    shell.run_line("");
    assert_eq!(shell.history.len(), 0);
}

#[test]
fn whitespace_only_line_is_not_recorded_or_executed() {
    let mut shell = Shell::new();
    let before = shell.last_status;
    let outcome = shell.run_line("   ");
    assert_eq!(outcome, LineOutcome::Ran(before));
    assert_eq!(shell.history.len(), 0);
}

#[test]
fn parse_error_does_not_change_last_status() {
    let mut shell = Shell::new();
    shell.last_status = 0;
    let outcome = shell.run_line("echo 'unterminated");
    assert!(matches!(outcome, LineOutcome::ParseError(ShellError::UnterminatedQuote)));
    assert_eq!(shell.last_status, 0);
}

#[test]
fn accepted_line_is_recorded() {
    let mut shell = Shell::new();
    shell.run_line("pwd");
    assert_eq!(shell.history.len(), 1);
}

#[test]
fn exit_builtin_yields_exit_outcome() {
    let mut shell = Shell::new();
    let outcome = shell.run_line("exit 3");
    assert_eq!(outcome, LineOutcome::Exit(3));
}

#[test]
fn cd_changes_cwd_for_subsequent_lines() {
    let original = std::env::current_dir().unwrap();
    let mut shell = Shell::new();
    shell.run_line("cd /tmp");
    assert_eq!(std::env::current_dir().unwrap(), std::path::Path::new("/tmp"));
    std::env::set_current_dir(original).unwrap();
}
