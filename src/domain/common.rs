use std::fmt;

use rust_decimal::Decimal;

use crate::errors::{LedgerError, LedgerResult};

/// Integer identifier issued per entity kind.
pub type EntityId = u32;

/// Identifies entities that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> EntityId;
}

/// Provides access to a human-friendly entity name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// The closed set of entity kinds tracked by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Account,
    Category,
    Operation,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::Account => "Account",
            EntityKind::Category => "Category",
            EntityKind::Operation => "Operation",
        };
        f.write_str(label)
    }
}

/// Rejects empty or whitespace-only names.
pub(crate) fn validate_name(kind: EntityKind, name: &str) -> LedgerResult<()> {
    if name.trim().is_empty() {
        return Err(LedgerError::Validation(format!(
            "{} name must not be empty",
            kind.to_string().to_lowercase()
        )));
    }
    Ok(())
}

/// `a + b`, or a validation error when the result leaves the decimal range.
pub(crate) fn checked_add(a: Decimal, b: Decimal) -> LedgerResult<Decimal> {
    a.checked_add(b)
        .ok_or_else(|| LedgerError::Validation(format!("amount overflow adding {b} to {a}")))
}

/// Sums amounts without panicking on overflow.
pub(crate) fn checked_sum<I>(amounts: I) -> LedgerResult<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |total, amount| checked_add(total, amount))
}
