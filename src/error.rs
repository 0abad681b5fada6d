//! Error kinds for the parse stages (spec §7). Executor-time failures
//! (`UNRESOLVED_COMMAND`, `REDIRECTION_OPEN_FAILED`, `SPAWN_FAILED`) are not
//! modeled here: their disposition is to print an exact, tested line of
//! text to stderr and carry on, so they are produced and reported inline by
//! `exec` rather than bubbled up as a typed `Err`.

use thiserror::Error;

/// Failures that can occur while turning a raw input line into a runnable
/// pipeline of [`crate::exec::Stage`]s. Every variant is fatal only to the
/// current line: the caller reports it and prompts again.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShellError {
    #[error("unterminated quote")]
    UnterminatedQuote,

    #[error("syntax error: empty pipeline stage")]
    EmptyPipelineStage,

    #[error("missing command")]
    MissingCommand,
}
