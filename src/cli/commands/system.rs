use crate::cli::help;
use crate::cli::shell_context::{CommandError, CommandResult, LoopControl, ShellContext};

pub fn handle_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first() {
        Some(name) => {
            let entry = context
                .registry()
                .get(name)
                .ok_or_else(|| CommandError::UnknownCommand(name.to_string()))?;
            help::print_command(entry);
        }
        None => help::print_overview(context.registry()),
    }
    Ok(LoopControl::Continue)
}

pub fn handle_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Ok(LoopControl::Exit)
}
