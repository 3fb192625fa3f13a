use std::io;

use thiserror::Error;

use crate::cli::commands;
use crate::cli::output;
use crate::cli::registry::CommandRegistry;
use crate::config::Config;
use crate::core::commands::{Command, CommandOutcome, Timed};
use crate::core::Finance;
use crate::errors::LedgerError;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("Unknown command `{0}`. Type `help` to list commands.")]
    UnknownCommand(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type CommandResult = Result<LoopControl, CommandError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// State shared by every command handler during a shell session.
pub struct ShellContext {
    pub finance: Finance,
    pub config: Config,
    registry: CommandRegistry,
}

impl ShellContext {
    pub fn new(config: Config) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        Self {
            finance: Finance::new(),
            config,
            registry,
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn dispatch(&mut self, command: &str, args: &[&str]) -> CommandResult {
        let handler = self
            .registry
            .get(command)
            .map(|entry| entry.handler)
            .ok_or_else(|| CommandError::UnknownCommand(command.to_string()))?;
        handler(self, args)
    }

    /// Runs a ledger command, timing it when configured to.
    pub fn execute<C: Command>(&mut self, command: C) -> Result<CommandOutcome, CommandError> {
        let outcome = if self.config.time_commands {
            Timed::new(command).execute(&mut self.finance)?
        } else {
            command.execute(&mut self.finance)?
        };
        Ok(outcome)
    }

    /// Prints the error and lets the session continue.
    pub fn report_error(&self, err: CommandError) {
        tracing::warn!(%err, "command failed");
        output::error(err);
    }

    pub fn money(&self, amount: impl std::fmt::Display) -> String {
        format!("{} {}", amount, self.config.currency)
    }
}
