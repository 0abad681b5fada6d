//! Binary entry point: wires the `pshell` library to a real terminal via
//! `rustyline`, and exposes the thin CLI surface spec §4.9 describes.

use clap::Parser;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use pshell::builtins::{default_registry, BuiltinRegistry};
use pshell::completion::complete;
use pshell::shell::{LineOutcome, Shell};

/// An interactive POSIX-style command shell.
#[derive(Parser, Debug)]
#[command(name = "pshell", version, about = "An interactive POSIX-style command shell core")]
struct Cli {
    /// Run a single line non-interactively and exit with its status.
    #[arg(short = 'c', long = "command")]
    command: Option<String>,
}

struct ShellHelper {
    registry: BuiltinRegistry,
}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let start = line[..pos].rfind(char::is_whitespace).map(|i| i + 1).unwrap_or(0);
        let prefix = &line[start..pos];
        if prefix.is_empty() {
            return Ok((pos, Vec::new()));
        }
        let path_var = std::env::var("PATH").unwrap_or_default();
        let candidates = complete(prefix, &self.registry, &path_var)
            .into_iter()
            .map(|name| Pair {
                display: name.clone(),
                replacement: name,
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Hinter for ShellHelper {
    type Hint = String;
}

impl Highlighter for ShellHelper {}

impl Validator for ShellHelper {}

impl Helper for ShellHelper {}

const PROMPT: &str = "$ ";

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let mut shell = Shell::new();

    if let Some(command) = cli.command {
        let status = match shell.run_line(&command) {
            LineOutcome::Exit(code) => code,
            LineOutcome::Ran(status) => status,
            LineOutcome::ParseError(_) => 1,
        };
        std::process::exit(status);
    }

    let mut editor: Editor<ShellHelper, rustyline::history::DefaultHistory> =
        Editor::new().expect("failed to initialize line editor");
    editor.set_helper(Some(ShellHelper { registry: default_registry() }));

    let exit_code = loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());
                match shell.run_line(&line) {
                    LineOutcome::Exit(code) => break code,
                    LineOutcome::Ran(_) | LineOutcome::ParseError(_) => {}
                }
            }
            // SIGINT during read: discard the partial line, fresh prompt.
            Err(ReadlineError::Interrupted) => continue,
            // EOF: exit the loop normally, status 0.
            Err(ReadlineError::Eof) => break 0,
            Err(e) => {
                log::debug!("readline error: {e}");
                break 1;
            }
        }
    };

    shell.save_history();
    std::process::exit(exit_code);
}
