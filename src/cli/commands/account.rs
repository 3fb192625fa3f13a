use crate::cli::commands::{arg, parse_amount, parse_id};
use crate::cli::output;
use crate::cli::shell_context::{CommandError, CommandResult, LoopControl, ShellContext};
use crate::core::commands::{
    CommandOutcome, CreateAccount, DeleteAccount, RenameAccount, UpdateBalance,
};
use crate::domain::{AccountKind, Displayable, Identifiable};

pub fn handle(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let rest = args.get(1..).unwrap_or_default();
    match args.first().copied() {
        Some("add") => add(context, rest),
        Some("list") => list(context),
        Some("rename") => rename(context, rest),
        Some("delete") => delete(context, rest),
        Some("adjust") => adjust(context, rest),
        Some("total") => {
            let total = context.finance.accounts.total_balance()?;
            output::info(format!("Total balance: {}", context.money(total)));
            Ok(LoopControl::Continue)
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown account action `{}`",
            other.unwrap_or_default()
        ))),
    }
}

fn add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = arg(args, 0, "name")?.to_string();
    let initial_balance = parse_amount(args, 1, "balance")?;
    let kind = match args.get(2) {
        Some(raw) => raw.parse()?,
        None => AccountKind::default(),
    };
    if let CommandOutcome::Created(id) = context.execute(CreateAccount {
        name,
        initial_balance,
        kind,
    })? {
        output::success(format!("Account #{id} created."));
    }
    Ok(LoopControl::Continue)
}

fn list(context: &mut ShellContext) -> CommandResult {
    output::section("Accounts");
    for account in context.finance.accounts.list() {
        output::info(format!(
            "#{} {} balance {}",
            account.id(),
            account.display_label(),
            context.money(account.balance())
        ));
    }
    Ok(LoopControl::Continue)
}

fn rename(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let account_id = parse_id(args, 0, "id")?;
    let name = arg(args, 1, "name")?.to_string();
    match context.execute(RenameAccount { account_id, name })? {
        CommandOutcome::Applied(true) => output::success(format!("Account #{account_id} renamed.")),
        _ => output::warning(format!("Account #{account_id} not found.")),
    }
    Ok(LoopControl::Continue)
}

fn delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let account_id = parse_id(args, 0, "id")?;
    match context.execute(DeleteAccount { account_id })? {
        CommandOutcome::Applied(true) => output::success(format!("Account #{account_id} deleted.")),
        _ => output::warning(format!("Account #{account_id} not found.")),
    }
    Ok(LoopControl::Continue)
}

fn adjust(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let account_id = parse_id(args, 0, "id")?;
    let delta = parse_amount(args, 1, "delta")?;
    match context.execute(UpdateBalance { account_id, delta })? {
        CommandOutcome::Applied(true) => {
            output::success(format!("Account #{account_id} balance adjusted."))
        }
        _ => output::warning(format!("Account #{account_id} not found.")),
    }
    Ok(LoopControl::Continue)
}
