//! Mutating calls packaged as commands, plus a timing decorator.

use std::time::Instant;

use rust_decimal::Decimal;
use tracing::info;

use crate::core::finance::Finance;
use crate::domain::{AccountKind, CategoryKind, EntityId, Identifiable, OperationDraft};
use crate::errors::LedgerResult;

/// Result of a successfully executed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// A new entity was created under this id.
    Created(EntityId),
    /// The soft-failure result of an update or delete.
    Applied(bool),
}

pub trait Command {
    fn name(&self) -> &str;
    fn execute(&self, finance: &mut Finance) -> LedgerResult<CommandOutcome>;
}

#[derive(Debug, Clone)]
pub struct CreateAccount {
    pub name: String,
    pub initial_balance: Decimal,
    pub kind: AccountKind,
}

impl Command for CreateAccount {
    fn name(&self) -> &str {
        "CreateAccount"
    }

    fn execute(&self, finance: &mut Finance) -> LedgerResult<CommandOutcome> {
        let account = finance
            .accounts
            .create(&self.name, self.initial_balance, self.kind)?;
        Ok(CommandOutcome::Created(account.id()))
    }
}

/// Direct balance adjustment that bypasses the operation ledger.
#[derive(Debug, Clone)]
pub struct UpdateBalance {
    pub account_id: EntityId,
    pub delta: Decimal,
}

impl Command for UpdateBalance {
    fn name(&self) -> &str {
        "UpdateBalance"
    }

    fn execute(&self, finance: &mut Finance) -> LedgerResult<CommandOutcome> {
        Ok(CommandOutcome::Applied(
            finance.accounts.update_balance(self.account_id, self.delta)?,
        ))
    }
}

#[derive(Debug, Clone)]
pub struct DeleteAccount {
    pub account_id: EntityId,
}

impl Command for DeleteAccount {
    fn name(&self) -> &str {
        "DeleteAccount"
    }

    fn execute(&self, finance: &mut Finance) -> LedgerResult<CommandOutcome> {
        Ok(CommandOutcome::Applied(finance.accounts.delete(self.account_id)))
    }
}

#[derive(Debug, Clone)]
pub struct CreateCategory {
    pub kind: CategoryKind,
    pub name: String,
}

impl Command for CreateCategory {
    fn name(&self) -> &str {
        "CreateCategory"
    }

    fn execute(&self, finance: &mut Finance) -> LedgerResult<CommandOutcome> {
        let category = finance.categories.create(self.kind, &self.name)?;
        Ok(CommandOutcome::Created(category.id()))
    }
}

#[derive(Debug, Clone)]
pub struct DeleteCategory {
    pub category_id: EntityId,
}

impl Command for DeleteCategory {
    fn name(&self) -> &str {
        "DeleteCategory"
    }

    fn execute(&self, finance: &mut Finance) -> LedgerResult<CommandOutcome> {
        Ok(CommandOutcome::Applied(
            finance.categories.delete(self.category_id),
        ))
    }
}

#[derive(Debug, Clone)]
pub struct CreateOperation {
    pub draft: OperationDraft,
}

impl Command for CreateOperation {
    fn name(&self) -> &str {
        "CreateOperation"
    }

    fn execute(&self, finance: &mut Finance) -> LedgerResult<CommandOutcome> {
        let operation = finance.create_operation(self.draft.clone())?;
        Ok(CommandOutcome::Created(operation.id()))
    }
}

#[derive(Debug, Clone)]
pub struct DeleteOperation {
    pub operation_id: EntityId,
}

impl Command for DeleteOperation {
    fn name(&self) -> &str {
        "DeleteOperation"
    }

    fn execute(&self, finance: &mut Finance) -> LedgerResult<CommandOutcome> {
        Ok(CommandOutcome::Applied(
            finance.delete_operation(self.operation_id)?,
        ))
    }
}

#[derive(Debug, Clone)]
pub struct RenameAccount {
    pub account_id: EntityId,
    pub name: String,
}

impl Command for RenameAccount {
    fn name(&self) -> &str {
        "RenameAccount"
    }

    fn execute(&self, finance: &mut Finance) -> LedgerResult<CommandOutcome> {
        Ok(CommandOutcome::Applied(
            finance.accounts.rename(self.account_id, &self.name)?,
        ))
    }
}

#[derive(Debug, Clone)]
pub struct RenameCategory {
    pub category_id: EntityId,
    pub name: String,
}

impl Command for RenameCategory {
    fn name(&self) -> &str {
        "RenameCategory"
    }

    fn execute(&self, finance: &mut Finance) -> LedgerResult<CommandOutcome> {
        Ok(CommandOutcome::Applied(
            finance.categories.rename(self.category_id, &self.name)?,
        ))
    }
}

/// Changes an operation amount; the account balance follows the difference.
#[derive(Debug, Clone)]
pub struct UpdateOperationAmount {
    pub operation_id: EntityId,
    pub amount: Decimal,
}

impl Command for UpdateOperationAmount {
    fn name(&self) -> &str {
        "UpdateOperationAmount"
    }

    fn execute(&self, finance: &mut Finance) -> LedgerResult<CommandOutcome> {
        Ok(CommandOutcome::Applied(
            finance.update_operation_amount(self.operation_id, self.amount)?,
        ))
    }
}

#[derive(Debug, Clone)]
pub struct UpdateOperationDescription {
    pub operation_id: EntityId,
    pub description: Option<String>,
}

impl Command for UpdateOperationDescription {
    fn name(&self) -> &str {
        "UpdateOperationDescription"
    }

    fn execute(&self, finance: &mut Finance) -> LedgerResult<CommandOutcome> {
        Ok(CommandOutcome::Applied(finance.operations.update_description(
            self.operation_id,
            self.description.as_deref(),
        )))
    }
}

/// Logs how long the wrapped command took. Inputs, outputs and errors pass
/// through unchanged.
#[derive(Debug, Clone)]
pub struct Timed<C> {
    inner: C,
}

impl<C: Command> Timed<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: Command> Command for Timed<C> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn execute(&self, finance: &mut Finance) -> LedgerResult<CommandOutcome> {
        let started = Instant::now();
        let result = self.inner.execute(finance);
        let elapsed_us = started.elapsed().as_micros() as u64;
        info!(
            command = self.inner.name(),
            elapsed_us,
            ok = result.is_ok(),
            "command executed"
        );
        result
    }
}

impl<C: Command + ?Sized> Command for Box<C> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn execute(&self, finance: &mut Finance) -> LedgerResult<CommandOutcome> {
        (**self).execute(finance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LedgerError;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    #[test]
    fn create_then_delete_operation_restores_balance() {
        let mut finance = Finance::new();
        let CommandOutcome::Created(account) = CreateAccount {
            name: "Main".into(),
            initial_balance: dec!(100),
            kind: AccountKind::Checking,
        }
        .execute(&mut finance)
        .unwrap() else {
            panic!("account was not created");
        };

        let create = Timed::new(CreateOperation {
            draft: OperationDraft::new(
                crate::domain::OperationKind::Expense,
                account,
                dec!(30),
                date(),
                1,
            ),
        });
        let CommandOutcome::Created(op) = create.execute(&mut finance).unwrap() else {
            panic!("operation was not created");
        };
        assert_eq!(finance.accounts.get(account).unwrap().balance(), dec!(70));

        let outcome = DeleteOperation { operation_id: op }
            .execute(&mut finance)
            .unwrap();
        assert_eq!(outcome, CommandOutcome::Applied(true));
        assert_eq!(finance.accounts.get(account).unwrap().balance(), dec!(100));
    }

    #[test]
    fn timed_passes_errors_through() {
        let mut finance = Finance::new();
        let command = Timed::new(CreateOperation {
            draft: OperationDraft::new(
                crate::domain::OperationKind::Income,
                5,
                dec!(1),
                date(),
                1,
            ),
        });
        assert_eq!(command.name(), "CreateOperation");
        let err = command.execute(&mut finance).unwrap_err();
        assert!(matches!(err, LedgerError::AccountNotFound(5)));
    }

    #[test]
    fn update_balance_reports_missing_account() {
        let mut finance = Finance::new();
        let boxed: Box<dyn Command> = Box::new(Timed::new(UpdateBalance {
            account_id: 1,
            delta: dec!(10),
        }));
        assert_eq!(
            boxed.execute(&mut finance).unwrap(),
            CommandOutcome::Applied(false)
        );
    }

    fn book() -> (Finance, EntityId, EntityId) {
        let mut finance = Finance::new();
        let account = finance
            .accounts
            .create("Main", dec!(100), AccountKind::Checking)
            .unwrap()
            .id();
        let operation = finance
            .create_operation(
                OperationDraft::new(
                    crate::domain::OperationKind::Expense,
                    account,
                    dec!(40),
                    date(),
                    1,
                )
                .with_description("groceries"),
            )
            .unwrap()
            .id();
        (finance, account, operation)
    }

    #[test]
    fn rename_account_validates_and_reports_missing() {
        let (mut finance, account, _) = book();
        let rename = Timed::new(RenameAccount {
            account_id: account,
            name: "Daily".into(),
        });
        assert_eq!(rename.name(), "RenameAccount");
        assert_eq!(
            rename.execute(&mut finance).unwrap(),
            CommandOutcome::Applied(true)
        );
        assert_eq!(
            crate::domain::NamedEntity::name(finance.accounts.get(account).unwrap()),
            "Daily"
        );

        let blank = RenameAccount {
            account_id: account,
            name: "  ".into(),
        };
        assert!(matches!(
            blank.execute(&mut finance),
            Err(LedgerError::Validation(_))
        ));
        let missing = RenameAccount {
            account_id: 42,
            name: "Ghost".into(),
        };
        assert_eq!(
            missing.execute(&mut finance).unwrap(),
            CommandOutcome::Applied(false)
        );
    }

    #[test]
    fn rename_category_goes_through_the_store() {
        let mut finance = Finance::new();
        let CommandOutcome::Created(category) = CreateCategory {
            kind: CategoryKind::Expense,
            name: "Food".into(),
        }
        .execute(&mut finance)
        .unwrap() else {
            panic!("category was not created");
        };

        let outcome = Timed::new(RenameCategory {
            category_id: category,
            name: "Groceries".into(),
        })
        .execute(&mut finance)
        .unwrap();
        assert_eq!(outcome, CommandOutcome::Applied(true));
        assert_eq!(
            crate::domain::NamedEntity::name(finance.categories.get(category).unwrap()),
            "Groceries"
        );
        assert!(RenameCategory {
            category_id: category,
            name: String::new(),
        }
        .execute(&mut finance)
        .is_err());
    }

    #[test]
    fn update_operation_amount_moves_balance() {
        let (mut finance, account, operation) = book();
        let outcome = Timed::new(UpdateOperationAmount {
            operation_id: operation,
            amount: dec!(15),
        })
        .execute(&mut finance)
        .unwrap();
        assert_eq!(outcome, CommandOutcome::Applied(true));
        assert_eq!(finance.accounts.get(account).unwrap().balance(), dec!(85));

        let invalid = UpdateOperationAmount {
            operation_id: operation,
            amount: dec!(0),
        };
        assert!(invalid.execute(&mut finance).is_err());
        assert_eq!(finance.accounts.get(account).unwrap().balance(), dec!(85));
    }

    #[test]
    fn update_operation_description_clears_on_none() {
        let (mut finance, _, operation) = book();
        let outcome = Timed::new(UpdateOperationDescription {
            operation_id: operation,
            description: None,
        })
        .execute(&mut finance)
        .unwrap();
        assert_eq!(outcome, CommandOutcome::Applied(true));
        assert_eq!(finance.operations.get(operation).unwrap().description(), "");

        let missing = UpdateOperationDescription {
            operation_id: operation + 1,
            description: Some("x".into()),
        };
        assert_eq!(
            missing.execute(&mut finance).unwrap(),
            CommandOutcome::Applied(false)
        );
    }
}
