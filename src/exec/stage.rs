//! Refines a raw pipeline stage string into the runnable [`Stage`] (spec
//! §3): an argument vector plus a redirection plan.

use crate::error::ShellError;
use crate::pipeline::split_pipeline;
use crate::redirect::{parse_redirections, RedirectionPlan};
use crate::token::tokenize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    pub argv: Vec<String>,
    pub redirect: RedirectionPlan,
}

/// Tokenizes and redirection-parses every stage of `line`, in order.
/// Validation-only failures (unterminated quote, empty stage, missing
/// command) are reported before any process is touched.
pub fn build_pipeline(line: &str) -> Result<Vec<Stage>, ShellError> {
    let raw_stages = split_pipeline(line)?;
    raw_stages
        .iter()
        .map(|raw| {
            let tokens = tokenize(raw)?;
            let (argv, redirect) = parse_redirections(&tokens)?;
            Ok(Stage { argv, redirect })
        })
        .collect()
}
