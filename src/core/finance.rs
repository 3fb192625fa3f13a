//! Aggregate context owning every table of a single book of accounts.

use rust_decimal::Decimal;

use crate::core::services::{
    AccountService, AnalyticsService, CategoryService, OperationService,
};
use crate::domain::{EntityId, Operation, OperationDraft};
use crate::errors::LedgerResult;
use crate::export::Entity;

/// Owns the account, category, and operation tables and routes the calls
/// that need more than one of them.
#[derive(Debug, Default)]
pub struct Finance {
    pub accounts: AccountService,
    pub categories: CategoryService,
    pub operations: OperationService,
}

impl Finance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_operation(&mut self, draft: OperationDraft) -> LedgerResult<&Operation> {
        self.operations.create(&mut self.accounts, draft)
    }

    pub fn delete_operation(&mut self, id: EntityId) -> LedgerResult<bool> {
        self.operations.delete(&mut self.accounts, id)
    }

    pub fn update_operation_amount(&mut self, id: EntityId, amount: Decimal) -> LedgerResult<bool> {
        self.operations.update_amount(&mut self.accounts, id, amount)
    }

    pub fn analytics(&self) -> AnalyticsService<'_> {
        AnalyticsService::new(&self.operations, &self.categories)
    }

    /// Accounts, then categories, then operations, each in id order.
    pub fn entities(&self) -> impl Iterator<Item = Entity<'_>> {
        let accounts = self.accounts.list().into_iter().map(Entity::Account);
        let categories = self.categories.list().into_iter().map(Entity::Category);
        let operations = self.operations.list().into_iter().map(Entity::Operation);
        accounts.chain(categories).chain(operations)
    }
}
