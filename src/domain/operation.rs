use std::{fmt, str::FromStr};

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::common::{EntityId, Identifiable};
use crate::errors::{LedgerError, LedgerResult};

/// A single income or expense movement recorded against an account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Operation {
    id: EntityId,
    kind: OperationKind,
    account_id: EntityId,
    amount: Decimal,
    date: NaiveDateTime,
    category_id: EntityId,
    description: String,
}

impl Operation {
    pub fn new(id: EntityId, draft: OperationDraft) -> LedgerResult<Self> {
        validate_amount(draft.amount)?;
        Ok(Self {
            id,
            kind: draft.kind,
            account_id: draft.account_id,
            amount: draft.amount,
            date: draft.date,
            category_id: draft.category_id,
            description: draft.description,
        })
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn account_id(&self) -> EntityId {
        self.account_id
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn date(&self) -> NaiveDateTime {
        self.date
    }

    pub fn category_id(&self) -> EntityId {
        self.category_id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Balance effect of this operation on its account.
    pub fn signed_amount(&self) -> Decimal {
        self.kind.apply_sign(self.amount)
    }

    pub fn update_amount(&mut self, amount: Decimal) -> LedgerResult<()> {
        validate_amount(amount)?;
        self.amount = amount;
        Ok(())
    }

    pub fn update_description(&mut self, description: Option<&str>) {
        self.description = description.unwrap_or_default().to_string();
    }
}

impl Identifiable for Operation {
    fn id(&self) -> EntityId {
        self.id
    }
}

/// Caller-supplied fields for a new operation; the id is assigned on creation.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationDraft {
    pub kind: OperationKind,
    pub account_id: EntityId,
    pub amount: Decimal,
    pub date: NaiveDateTime,
    pub category_id: EntityId,
    pub description: String,
}

impl OperationDraft {
    pub fn new(
        kind: OperationKind,
        account_id: EntityId,
        amount: Decimal,
        date: NaiveDateTime,
        category_id: EntityId,
    ) -> Self {
        Self {
            kind,
            account_id,
            amount,
            date,
            category_id,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Direction of a money movement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Income,
    Expense,
}

impl OperationKind {
    /// Income adds to the balance, expense subtracts.
    pub fn apply_sign(self, amount: Decimal) -> Decimal {
        match self {
            OperationKind::Income => amount,
            OperationKind::Expense => -amount,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OperationKind::Income => "Income",
            OperationKind::Expense => "Expense",
        };
        f.write_str(label)
    }
}

impl FromStr for OperationKind {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(OperationKind::Income),
            "expense" => Ok(OperationKind::Expense),
            other => Err(LedgerError::Validation(format!(
                "unknown operation kind `{other}`"
            ))),
        }
    }
}

pub(crate) fn validate_amount(amount: Decimal) -> LedgerResult<()> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::Validation(format!(
            "operation amount must be positive, got {amount}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn draft(amount: Decimal) -> OperationDraft {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        OperationDraft::new(OperationKind::Expense, 1, amount, date, 1)
    }

    #[test]
    fn zero_and_negative_amounts_are_rejected() {
        assert!(Operation::new(1, draft(Decimal::ZERO)).is_err());
        assert!(Operation::new(1, draft(dec!(-5))).is_err());
    }

    #[test]
    fn update_amount_keeps_old_value_on_failure() {
        let mut op = Operation::new(1, draft(dec!(20))).unwrap();
        assert!(op.update_amount(dec!(0)).is_err());
        assert_eq!(op.amount(), dec!(20));
        op.update_amount(dec!(35.5)).unwrap();
        assert_eq!(op.amount(), dec!(35.5));
    }

    #[test]
    fn missing_description_becomes_empty() {
        let mut op = Operation::new(1, draft(dec!(20)).with_description("lunch")).unwrap();
        assert_eq!(op.description(), "lunch");
        op.update_description(None);
        assert_eq!(op.description(), "");
    }

    #[test]
    fn expense_has_negative_balance_effect() {
        let op = Operation::new(1, draft(dec!(12.25))).unwrap();
        assert_eq!(op.signed_amount(), dec!(-12.25));
    }
}
