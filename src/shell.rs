//! Ties the parsing pipeline, the executor, and the history store together
//! into the one stateful object both the REPL and `-c` entry points drive.

use crate::builtins::{default_registry, BuiltinRegistry};
use crate::error::ShellError;
use crate::exec::{self, build_pipeline};
use crate::history::HistoryStore;

/// What running one line produced.
#[derive(Debug, PartialEq, Eq)]
pub enum LineOutcome {
    /// The line parsed and ran (successfully or not); carries the
    /// pipeline's reported status.
    Ran(i32),
    /// `exit` was invoked as a single in-process builtin stage; the shell
    /// should stop with this status.
    Exit(i32),
    /// The line failed to parse; nothing was executed.
    ParseError(ShellError),
}

pub struct Shell {
    pub registry: BuiltinRegistry,
    pub history: HistoryStore,
    pub last_status: i32,
}

impl Shell {
    /// Builds a shell with the default built-in registry and history
    /// preloaded from `HISTFILE` if set and readable.
    pub fn new() -> Self {
        let mut history = HistoryStore::new();
        if let Some(e) = history.load_from_env() {
            log::debug!("failed to load HISTFILE: {e}");
        }
        Shell {
            registry: default_registry(),
            history,
            last_status: 0,
        }
    }

    /// Runs one input line: records it in history (if non-empty), parses
    /// it into a pipeline, and executes it.
    pub fn run_line(&mut self, line: &str) -> LineOutcome {
        if line.trim().is_empty() {
            return LineOutcome::Ran(self.last_status);
        }
        // Recorded before dispatch, per spec §9 — `history N` counts its
        // own invocation.
        self.history.push(line);

        let stages = match build_pipeline(line) {
            Ok(stages) => stages,
            Err(e) => {
                eprintln!("{e}");
                return LineOutcome::ParseError(e);
            }
        };

        let outcome = exec::execute(&stages, &self.registry, &mut self.history);
        self.last_status = outcome.status;

        if let Some(code) = outcome.exit_requested {
            return LineOutcome::Exit(code);
        }
        LineOutcome::Ran(outcome.status)
    }

    /// Saves history to `HISTFILE` if set. Called on normal shutdown.
    pub fn save_history(&self) {
        if let Some(e) = self.history.save_to_env() {
            log::debug!("failed to save HISTFILE: {e}");
        }
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}
