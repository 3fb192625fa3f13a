use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::cli::commands::{arg, range_from};
use crate::cli::output;
use crate::cli::shell_context::{CommandError, CommandResult, LoopControl, ShellContext};
use crate::domain::{parse_timestamp, OperationKind};

pub fn handle(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let rest = args.get(1..).unwrap_or_default();
    match args.first().copied() {
        Some("diff") => diff(context, rest),
        Some("income") => {
            let breakdown = context.finance.analytics().income_by_category(range_from(rest, 0)?)?;
            print_breakdown(context, "Income by category", &breakdown);
            Ok(LoopControl::Continue)
        }
        Some("expense") => {
            let breakdown = context.finance.analytics().expense_by_category(range_from(rest, 0)?)?;
            print_breakdown(context, "Expense by category", &breakdown);
            Ok(LoopControl::Continue)
        }
        Some("average") => average(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown report `{}`",
            other.unwrap_or_default()
        ))),
    }
}

fn diff(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let start = parse_timestamp(arg(args, 0, "from")?, false)?;
    let end = parse_timestamp(arg(args, 1, "to")?, true)?;
    let difference = context
        .finance
        .analytics()
        .income_expense_difference(start, end)?;
    output::info(format!(
        "Income minus expense: {}",
        context.money(difference)
    ));
    Ok(LoopControl::Continue)
}

fn average(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let kind: OperationKind = arg(args, 0, "kind")?.parse()?;
    let range = range_from(args, 1)?;
    let mean = context
        .finance
        .analytics()
        .average_operation_amount(kind, range)?
        .round_dp(2);
    output::info(format!("Average {kind} amount: {}", context.money(mean)));
    Ok(LoopControl::Continue)
}

fn print_breakdown(context: &ShellContext, title: &str, breakdown: &BTreeMap<String, Decimal>) {
    output::section(title);
    if breakdown.is_empty() {
        output::info("No matching operations.");
    }
    for (name, amount) in breakdown {
        output::info(format!("{name}: {}", context.money(amount)));
    }
}
