//! The operation ledger: the only writer of operation-driven balance changes.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::core::factory::OperationFactory;
use crate::core::services::AccountService;
use crate::domain::common::{checked_add, checked_sum};
use crate::domain::operation::validate_amount;
use crate::domain::{
    DateRange, EntityId, EntityKind, Identifiable, Operation, OperationDraft, OperationKind,
};
use crate::errors::{LedgerError, LedgerResult};

/// Stores operations and keeps every account balance equal to its opening
/// balance plus the signed sum of the operations currently recorded for it.
#[derive(Debug, Default)]
pub struct OperationService {
    operations: BTreeMap<EntityId, Operation>,
    factory: OperationFactory,
}

impl OperationService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an operation and applies its signed amount to the account.
    ///
    /// Fails with [`LedgerError::AccountNotFound`] when the account is unknown
    /// and with [`LedgerError::Validation`] when the amount is not positive or
    /// the balance could not absorb it. Nothing is stored on failure.
    pub fn create(
        &mut self,
        accounts: &mut AccountService,
        draft: OperationDraft,
    ) -> LedgerResult<&Operation> {
        let account_id = draft.account_id;
        let delta = draft.kind.apply_sign(draft.amount);
        if let Err(err) = accounts.check_delta(account_id, delta) {
            warn!(account_id, %err, "operation rejected");
            return Err(err);
        }
        let operation = self.factory.create(draft)?;
        let id = operation.id();
        self.operations.insert(id, operation);

        match accounts.update_balance(account_id, delta) {
            Ok(true) => {}
            Ok(false) => {
                self.operations.remove(&id);
                return Err(LedgerError::AccountNotFound(account_id));
            }
            Err(err) => {
                self.operations.remove(&id);
                return Err(err);
            }
        }
        debug!(id, account_id, %delta, "operation recorded");
        Ok(&self.operations[&id])
    }

    /// Inserts a historical operation without touching any balance.
    pub fn restore(&mut self, id: EntityId, draft: OperationDraft) -> LedgerResult<&Operation> {
        if self.operations.contains_key(&id) {
            return Err(LedgerError::DuplicateId {
                kind: EntityKind::Operation,
                id,
            });
        }
        let operation = self.factory.restore(id, draft)?;
        Ok(self.operations.entry(id).or_insert(operation))
    }

    /// Reverses the balance effect and removes the operation; `Ok(false)`
    /// when the id is unknown.
    ///
    /// A dangling account id is tolerated: the reversal is skipped and the
    /// operation is still removed. A reversal the balance cannot absorb is an
    /// error and the operation stays.
    pub fn delete(&mut self, accounts: &mut AccountService, id: EntityId) -> LedgerResult<bool> {
        let Some(operation) = self.operations.get(&id) else {
            return Ok(false);
        };
        let account_id = operation.account_id();
        let reversal = -operation.signed_amount();
        if !accounts.update_balance(account_id, reversal)? {
            debug!(id, account_id, "account already gone, reversal skipped");
        }
        self.operations.remove(&id);
        debug!(id, account_id, %reversal, "operation deleted");
        Ok(true)
    }

    /// Changes the amount and shifts the account balance by the difference.
    pub fn update_amount(
        &mut self,
        accounts: &mut AccountService,
        id: EntityId,
        amount: Decimal,
    ) -> LedgerResult<bool> {
        let Some(operation) = self.operations.get_mut(&id) else {
            return Ok(false);
        };
        validate_amount(amount)?;
        let account_id = operation.account_id();
        let delta = operation.kind().apply_sign(amount) - operation.signed_amount();
        if accounts.contains(account_id) {
            accounts.check_delta(account_id, delta)?;
        }
        operation.update_amount(amount)?;
        accounts.update_balance(account_id, delta)?;
        Ok(true)
    }

    pub fn update_description(&mut self, id: EntityId, description: Option<&str>) -> bool {
        match self.operations.get_mut(&id) {
            Some(operation) => {
                operation.update_description(description);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: EntityId) -> Option<&Operation> {
        self.operations.get(&id)
    }

    pub fn list(&self) -> Vec<&Operation> {
        self.operations.values().collect()
    }

    pub fn by_account(&self, account_id: EntityId) -> Vec<&Operation> {
        self.filtered(|op| op.account_id() == account_id)
    }

    pub fn by_category(&self, category_id: EntityId) -> Vec<&Operation> {
        self.filtered(|op| op.category_id() == category_id)
    }

    /// Operations dated within `range`, both ends inclusive.
    pub fn by_date_range(&self, range: DateRange) -> Vec<&Operation> {
        self.filtered(|op| range.contains(op.date()))
    }

    /// Operations of `kind` inside the optional inclusive range.
    pub fn matching(&self, kind: OperationKind, range: DateRange) -> Vec<&Operation> {
        self.filtered(|op| op.kind() == kind && range.contains(op.date()))
    }

    pub fn income_total(&self, range: DateRange) -> LedgerResult<Decimal> {
        self.total(OperationKind::Income, range)
    }

    pub fn expense_total(&self, range: DateRange) -> LedgerResult<Decimal> {
        self.total(OperationKind::Expense, range)
    }

    /// Sums amounts per category id. Categories without matches are absent.
    pub fn grouped_by_category(
        &self,
        kind: OperationKind,
        range: DateRange,
    ) -> LedgerResult<HashMap<EntityId, Decimal>> {
        let mut grouped = HashMap::new();
        for op in self.matching(kind, range) {
            let total = grouped.entry(op.category_id()).or_insert(Decimal::ZERO);
            *total = checked_add(*total, op.amount())?;
        }
        Ok(grouped)
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    fn total(&self, kind: OperationKind, range: DateRange) -> LedgerResult<Decimal> {
        checked_sum(self.matching(kind, range).iter().map(|op| op.amount()))
    }

    fn filtered<F>(&self, predicate: F) -> Vec<&Operation>
    where
        F: Fn(&Operation) -> bool,
    {
        self.operations.values().filter(|op| predicate(op)).collect()
    }
}
