use crate::cli::commands::{arg, parse_id};
use crate::cli::output;
use crate::cli::shell_context::{CommandError, CommandResult, LoopControl, ShellContext};
use crate::core::commands::{CommandOutcome, CreateCategory, DeleteCategory, RenameCategory};
use crate::domain::{CategoryKind, Displayable, Identifiable};

pub fn handle(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let rest = args.get(1..).unwrap_or_default();
    match args.first().copied() {
        Some("add") => add(context, rest),
        Some("list") => list(context, rest),
        Some("rename") => rename(context, rest),
        Some("delete") => delete(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown category action `{}`",
            other.unwrap_or_default()
        ))),
    }
}

fn add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let kind: CategoryKind = arg(args, 0, "kind")?.parse()?;
    let name = arg(args, 1, "name")?.to_string();
    if let CommandOutcome::Created(id) = context.execute(CreateCategory { kind, name })? {
        output::success(format!("Category #{id} created."));
    }
    Ok(LoopControl::Continue)
}

fn list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let categories = match args.first() {
        Some(raw) => context.finance.categories.list_by_kind(raw.parse()?),
        None => context.finance.categories.list(),
    };
    output::section("Categories");
    for category in categories {
        output::info(format!("#{} {}", category.id(), category.display_label()));
    }
    Ok(LoopControl::Continue)
}

fn rename(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let category_id = parse_id(args, 0, "id")?;
    let name = arg(args, 1, "name")?.to_string();
    match context.execute(RenameCategory { category_id, name })? {
        CommandOutcome::Applied(true) => {
            output::success(format!("Category #{category_id} renamed."))
        }
        _ => output::warning(format!("Category #{category_id} not found.")),
    }
    Ok(LoopControl::Continue)
}

fn delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let category_id = parse_id(args, 0, "id")?;
    match context.execute(DeleteCategory { category_id })? {
        CommandOutcome::Applied(true) => {
            output::success(format!("Category #{category_id} deleted."))
        }
        _ => output::warning(format!("Category #{category_id} not found.")),
    }
    Ok(LoopControl::Continue)
}
