use std::io::{self, BufRead};

use shell_words::split;

use crate::cli::output;
use crate::cli::shell_context::{CommandError, LoopControl, ShellContext};
use crate::config::Config;

/// Reads commands from stdin until EOF or `exit`.
pub fn run_cli(config: Config) -> Result<(), CommandError> {
    let mut context = ShellContext::new(config);
    let stdin = io::stdin();
    run_script(&mut context, stdin.lock())
}

pub fn run_script<R: BufRead>(context: &mut ShellContext, reader: R) -> Result<(), CommandError> {
    for line in reader.lines() {
        let line = line?;
        match handle_line(context, &line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err),
        }
    }
    Ok(())
}

pub fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(LoopControl::Continue);
    }
    let tokens = match split(trimmed) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(err);
            return Ok(LoopControl::Continue);
        }
    };
    let Some((command, rest)) = tokens.split_first() else {
        return Ok(LoopControl::Continue);
    };
    let command = match command.to_lowercase().as_str() {
        "quit" => "exit".to_string(),
        other => other.to_string(),
    };
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();
    context.dispatch(&command, &args)
}
