//! Line-oriented shell over a [`crate::core::Finance`] book.

pub mod commands;
pub mod help;
pub mod output;
pub mod registry;
pub mod shell;
pub mod shell_context;

pub use shell::{handle_line, run_cli, run_script};
pub use shell_context::{CommandError, LoopControl, ShellContext};
