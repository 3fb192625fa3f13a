pub mod account;
pub mod category;
pub mod operation;
pub mod report;
pub mod system;
pub mod transfer;

use std::{collections::HashMap, str::FromStr};

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::cli::shell_context::CommandError;
use crate::domain::{parse_timestamp, DateRange, EntityId};

pub fn register_all(registry: &mut CommandRegistry) {
    registry.register(CommandEntry::new(
        "account",
        "Manage accounts",
        "account add <name> <balance> [checking|savings|credit] | list | rename <id> <name> | delete <id> | adjust <id> <delta> | total",
        account::handle,
    ));
    registry.register(CommandEntry::new(
        "category",
        "Manage categories",
        "category add <income|expense> <name> | list [kind] | rename <id> <name> | delete <id>",
        category::handle,
    ));
    registry.register(CommandEntry::new(
        "op",
        "Record and inspect operations",
        "op add <income|expense> <account> <amount> <category> [--date D] [--desc text] | list [--account id] [--category id] [--from D] [--to D] | amount <id> <amount> | describe <id> [text] | delete <id>",
        operation::handle,
    ));
    registry.register(CommandEntry::new(
        "report",
        "Show analytics",
        "report diff <from> <to> | income [from] [to] | expense [from] [to] | average <kind> [from] [to]",
        report::handle,
    ));
    registry.register(CommandEntry::new(
        "import",
        "Import rows from a file",
        "import <csv|json|yaml> <path>",
        transfer::handle_import,
    ));
    registry.register(CommandEntry::new(
        "export",
        "Export every entity",
        "export <csv|json> [path]",
        transfer::handle_export,
    ));
    registry.register(CommandEntry::new(
        "help",
        "Show available commands",
        "help [command]",
        system::handle_help,
    ));
    registry.register(CommandEntry::new(
        "exit",
        "Leave the shell",
        "exit",
        system::handle_exit,
    ));
}

pub(crate) fn arg<'a>(args: &[&'a str], index: usize, label: &str) -> Result<&'a str, CommandError> {
    args.get(index)
        .copied()
        .ok_or_else(|| CommandError::InvalidArguments(format!("missing argument <{label}>")))
}

pub(crate) fn parse_arg<T: FromStr>(
    args: &[&str],
    index: usize,
    label: &str,
) -> Result<T, CommandError> {
    let raw = arg(args, index, label)?;
    raw.parse()
        .map_err(|_| CommandError::InvalidArguments(format!("invalid {label} `{raw}`")))
}

pub(crate) fn parse_id(args: &[&str], index: usize, label: &str) -> Result<EntityId, CommandError> {
    parse_arg::<EntityId>(args, index, label)
}

pub(crate) fn parse_amount(args: &[&str], index: usize, label: &str) -> Result<Decimal, CommandError> {
    parse_arg::<Decimal>(args, index, label)
}

/// Separates `--key value` pairs from positional arguments.
pub(crate) fn split_options<'a>(
    args: &[&'a str],
) -> Result<(Vec<&'a str>, HashMap<&'a str, &'a str>), CommandError> {
    let mut positional = Vec::new();
    let mut options = HashMap::new();
    let mut iter = args.iter().copied();
    while let Some(token) = iter.next() {
        if let Some(key) = token.strip_prefix("--") {
            let value = iter.next().ok_or_else(|| {
                CommandError::InvalidArguments(format!("option --{key} needs a value"))
            })?;
            options.insert(key, value);
        } else {
            positional.push(token);
        }
    }
    Ok((positional, options))
}

pub(crate) fn optional_date(
    raw: Option<&str>,
    end_of_day: bool,
) -> Result<Option<NaiveDateTime>, CommandError> {
    raw.map(|value| parse_timestamp(value, end_of_day))
        .transpose()
        .map_err(CommandError::from)
}

/// Builds a range from optional positional `from`/`to` arguments.
pub(crate) fn range_from(args: &[&str], from_index: usize) -> Result<DateRange, CommandError> {
    let start = optional_date(args.get(from_index).copied(), false)?;
    let end = optional_date(args.get(from_index + 1).copied(), true)?;
    Ok(DateRange::new(start, end))
}
