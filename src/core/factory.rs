//! Identifier sequences and validated entity construction.

use rust_decimal::Decimal;

use crate::domain::{
    Account, AccountKind, Category, CategoryKind, EntityId, Operation, OperationDraft,
};
use crate::errors::{LedgerError, LedgerResult};

/// Issues `1, 2, 3, ...` for a single entity kind. Ids are never reused, and
/// `EntityId::MAX` is never issued so the sequence always has a successor.
#[derive(Debug, Clone)]
pub struct IdSequence {
    next: EntityId,
}

impl Default for IdSequence {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> LedgerResult<EntityId> {
        let id = self.next;
        self.next = successor(id)?;
        Ok(id)
    }

    /// Moves the sequence past an externally supplied id.
    pub fn observe(&mut self, id: EntityId) -> LedgerResult<()> {
        let following = successor(id)?;
        if id >= self.next {
            self.next = following;
        }
        Ok(())
    }

    pub fn peek(&self) -> EntityId {
        self.next
    }
}

fn successor(id: EntityId) -> LedgerResult<EntityId> {
    id.checked_add(1)
        .ok_or_else(|| LedgerError::Validation(format!("id {id} is out of range")))
}

/// Builds validated accounts. Validation runs before an id is allocated.
#[derive(Debug, Default, Clone)]
pub struct AccountFactory {
    ids: IdSequence,
}

impl AccountFactory {
    pub fn create(
        &mut self,
        name: &str,
        initial_balance: Decimal,
        kind: AccountKind,
    ) -> LedgerResult<Account> {
        if initial_balance < Decimal::ZERO {
            return Err(LedgerError::Validation(format!(
                "initial balance must not be negative, got {initial_balance}"
            )));
        }
        let account = Account::new(self.ids.peek(), name, initial_balance, kind)?;
        self.ids.allocate()?;
        Ok(account)
    }

    pub fn restore(
        &mut self,
        id: EntityId,
        name: &str,
        balance: Decimal,
        kind: AccountKind,
    ) -> LedgerResult<Account> {
        let account = Account::new(id, name, balance, kind)?;
        self.ids.observe(id)?;
        Ok(account)
    }
}

#[derive(Debug, Default, Clone)]
pub struct CategoryFactory {
    ids: IdSequence,
}

impl CategoryFactory {
    pub fn create(&mut self, kind: CategoryKind, name: &str) -> LedgerResult<Category> {
        let category = Category::new(self.ids.peek(), kind, name)?;
        self.ids.allocate()?;
        Ok(category)
    }

    pub fn restore(&mut self, id: EntityId, kind: CategoryKind, name: &str) -> LedgerResult<Category> {
        let category = Category::new(id, kind, name)?;
        self.ids.observe(id)?;
        Ok(category)
    }
}

#[derive(Debug, Default, Clone)]
pub struct OperationFactory {
    ids: IdSequence,
}

impl OperationFactory {
    pub fn create(&mut self, draft: OperationDraft) -> LedgerResult<Operation> {
        let operation = Operation::new(self.ids.peek(), draft)?;
        self.ids.allocate()?;
        Ok(operation)
    }

    pub fn restore(&mut self, id: EntityId, draft: OperationDraft) -> LedgerResult<Operation> {
        let operation = Operation::new(id, draft)?;
        self.ids.observe(id)?;
        Ok(operation)
    }
}
