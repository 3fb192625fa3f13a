use chrono::Local;

use crate::cli::commands::{arg, optional_date, parse_amount, parse_id, split_options};
use crate::cli::output;
use crate::cli::shell_context::{CommandError, CommandResult, LoopControl, ShellContext};
use crate::core::commands::{
    CommandOutcome, CreateOperation, DeleteOperation, UpdateOperationAmount,
    UpdateOperationDescription,
};
use crate::domain::{DateRange, EntityId, Identifiable, Operation, OperationDraft, OperationKind};
use crate::export::TIMESTAMP_FORMAT;

pub fn handle(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let rest = args.get(1..).unwrap_or_default();
    match args.first().copied() {
        Some("add") => add(context, rest),
        Some("list") => list(context, rest),
        Some("amount") => amount(context, rest),
        Some("describe") => describe(context, rest),
        Some("delete") => delete(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown op action `{}`",
            other.unwrap_or_default()
        ))),
    }
}

fn add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (positional, options) = split_options(args)?;
    let kind: OperationKind = arg(&positional, 0, "kind")?.parse()?;
    let account_id = parse_id(&positional, 1, "account")?;
    let amount = parse_amount(&positional, 2, "amount")?;
    let category_id = parse_id(&positional, 3, "category")?;
    let date = optional_date(options.get("date").copied(), false)?
        .unwrap_or_else(|| Local::now().naive_local());

    let mut draft = OperationDraft::new(kind, account_id, amount, date, category_id);
    if let Some(description) = options.get("desc") {
        draft = draft.with_description(*description);
    }
    if let CommandOutcome::Created(id) = context.execute(CreateOperation { draft })? {
        let balance = context
            .finance
            .accounts
            .get(account_id)
            .map(|account| account.balance())
            .unwrap_or_default();
        output::success(format!(
            "Operation #{id} recorded. Account #{account_id} balance: {}",
            context.money(balance)
        ));
    }
    Ok(LoopControl::Continue)
}

fn list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (_, options) = split_options(args)?;
    let account = parse_filter(options.get("account").copied(), "account")?;
    let category = parse_filter(options.get("category").copied(), "category")?;
    let range = DateRange::new(
        optional_date(options.get("from").copied(), false)?,
        optional_date(options.get("to").copied(), true)?,
    );

    let operations: Vec<&Operation> = context
        .finance
        .operations
        .by_date_range(range)
        .into_iter()
        .filter(|op| account.map_or(true, |id| op.account_id() == id))
        .filter(|op| category.map_or(true, |id| op.category_id() == id))
        .collect();

    output::section("Operations");
    for op in operations {
        output::info(format!(
            "#{} {} {} {} account #{} category #{} {}",
            op.id(),
            op.date().format(TIMESTAMP_FORMAT),
            op.kind(),
            context.money(op.amount()),
            op.account_id(),
            op.category_id(),
            op.description()
        ));
    }
    Ok(LoopControl::Continue)
}

fn amount(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let operation_id = parse_id(args, 0, "id")?;
    let amount = parse_amount(args, 1, "amount")?;
    match context.execute(UpdateOperationAmount {
        operation_id,
        amount,
    })? {
        CommandOutcome::Applied(true) => {
            output::success(format!("Operation #{operation_id} amount updated."))
        }
        _ => output::warning(format!("Operation #{operation_id} not found.")),
    }
    Ok(LoopControl::Continue)
}

fn describe(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let operation_id = parse_id(args, 0, "id")?;
    let description = args.get(1).map(|text| text.to_string());
    match context.execute(UpdateOperationDescription {
        operation_id,
        description,
    })? {
        CommandOutcome::Applied(true) => {
            output::success(format!("Operation #{operation_id} description updated."))
        }
        _ => output::warning(format!("Operation #{operation_id} not found.")),
    }
    Ok(LoopControl::Continue)
}

fn delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let operation_id = parse_id(args, 0, "id")?;
    match context.execute(DeleteOperation { operation_id })? {
        CommandOutcome::Applied(true) => {
            output::success(format!("Operation #{operation_id} deleted."))
        }
        _ => output::warning(format!("Operation #{operation_id} not found.")),
    }
    Ok(LoopControl::Continue)
}

fn parse_filter(raw: Option<&str>, label: &str) -> Result<Option<EntityId>, CommandError> {
    raw.map(|value| {
        value
            .parse()
            .map_err(|_| CommandError::InvalidArguments(format!("invalid {label} `{value}`")))
    })
    .transpose()
}
