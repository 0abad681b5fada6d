//! Redirection parser (spec §4.3): extracts trailing redirection operators
//! from a stage's tokens, working on the already-tokenized stream (per the
//! spec §9 redesign note) so that a literal `>` inside quotes is preserved
//! as data rather than mistaken for an operator.

use crate::error::ShellError;
use crate::token::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectMode {
    Truncate,
    Append,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub path: String,
    pub mode: RedirectMode,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedirectionPlan {
    pub stdout: Option<Redirect>,
    pub stderr: Option<Redirect>,
}

fn operator(token: &Token) -> Option<(bool, RedirectMode)> {
    // Returns (is_stderr, mode) for a recognized, unquoted operator token.
    if token.quoted {
        return None;
    }
    match token.text.as_str() {
        ">" | "1>" => Some((false, RedirectMode::Truncate)),
        ">>" | "1>>" => Some((false, RedirectMode::Append)),
        "2>" => Some((true, RedirectMode::Truncate)),
        "2>>" => Some((true, RedirectMode::Append)),
        _ => None,
    }
}

/// Strips redirection operator/target pairs from `tokens`, returning the
/// remaining argument vector and the accumulated [`RedirectionPlan`].
/// Multiple redirections to the same stream overwrite earlier ones (last
/// wins). Fails with [`ShellError::MissingCommand`] if no argument tokens
/// remain once redirections are stripped.
pub fn parse_redirections(tokens: &[Token]) -> Result<(Vec<String>, RedirectionPlan), ShellError> {
    let mut argv = Vec::new();
    let mut plan = RedirectionPlan::default();

    let mut i = 0;
    while i < tokens.len() {
        if let Some((is_stderr, mode)) = operator(&tokens[i]) {
            let target = tokens.get(i + 1).filter(|t| operator(t).is_none());
            let target = match target {
                Some(t) => t,
                None => return Err(ShellError::MissingCommand),
            };
            let redirect = Redirect {
                path: target.text.clone(),
                mode,
            };
            if is_stderr {
                plan.stderr = Some(redirect);
            } else {
                plan.stdout = Some(redirect);
            }
            i += 2;
        } else {
            argv.push(tokens[i].text.clone());
            i += 1;
        }
    }

    if argv.is_empty() {
        return Err(ShellError::MissingCommand);
    }
    Ok((argv, plan))
}
