use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::core::factory::AccountFactory;
use crate::domain::common::{checked_add, checked_sum};
use crate::domain::{Account, AccountKind, EntityId, EntityKind, Identifiable};
use crate::errors::{LedgerError, LedgerResult};

/// Authoritative table of accounts.
#[derive(Debug, Default)]
pub struct AccountService {
    accounts: BTreeMap<EntityId, Account>,
    factory: AccountFactory,
}

impl AccountService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(
        &mut self,
        name: &str,
        initial_balance: Decimal,
        kind: AccountKind,
    ) -> LedgerResult<&Account> {
        let account = self.factory.create(name, initial_balance, kind).map_err(|err| {
            warn!(%err, "account rejected");
            err
        })?;
        let id = account.id();
        debug!(id, name, %initial_balance, %kind, "account created");
        Ok(self.accounts.entry(id).or_insert(account))
    }

    /// Inserts an account under a known id, e.g. when loading a snapshot.
    pub fn restore(
        &mut self,
        id: EntityId,
        name: &str,
        balance: Decimal,
        kind: AccountKind,
    ) -> LedgerResult<&Account> {
        if self.accounts.contains_key(&id) {
            return Err(LedgerError::DuplicateId {
                kind: EntityKind::Account,
                id,
            });
        }
        let account = self.factory.restore(id, name, balance, kind)?;
        Ok(self.accounts.entry(id).or_insert(account))
    }

    pub fn get(&self, id: EntityId) -> Option<&Account> {
        self.accounts.get(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.accounts.contains_key(&id)
    }

    pub fn list(&self) -> Vec<&Account> {
        self.accounts.values().collect()
    }

    /// Removes the account. Operations that reference it are left untouched.
    pub fn delete(&mut self, id: EntityId) -> bool {
        let removed = self.accounts.remove(&id).is_some();
        if removed {
            debug!(id, "account deleted");
        }
        removed
    }

    /// Adds `delta` to the balance; `Ok(false)` when the account does not
    /// exist. An overflowing delta is an error and leaves the balance as is.
    pub fn update_balance(&mut self, id: EntityId, delta: Decimal) -> LedgerResult<bool> {
        match self.accounts.get_mut(&id) {
            Some(account) => {
                account.update_balance(delta)?;
                debug!(id, %delta, balance = %account.balance(), "balance updated");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Fails unless the account exists and can absorb `delta`.
    pub fn check_delta(&self, id: EntityId, delta: Decimal) -> LedgerResult<()> {
        let account = self.accounts.get(&id).ok_or(LedgerError::AccountNotFound(id))?;
        checked_add(account.balance(), delta).map(|_| ())
    }

    pub fn rename(&mut self, id: EntityId, name: &str) -> LedgerResult<bool> {
        match self.accounts.get_mut(&id) {
            Some(account) => {
                account.rename(name)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn total_balance(&self) -> LedgerResult<Decimal> {
        checked_sum(self.accounts.values().map(Account::balance))
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NamedEntity;
    use rust_decimal_macros::dec;

    #[test]
    fn create_assigns_sequential_ids() {
        let mut service = AccountService::new();
        let first = service.create("Main", dec!(100), AccountKind::Checking).unwrap().id();
        let second = service.create("Rainy day", dec!(0), AccountKind::Savings).unwrap().id();
        assert_eq!((first, second), (1, 2));
        assert_eq!(service.len(), 2);
    }

    #[test]
    fn create_rejects_negative_balance_and_blank_name() {
        let mut service = AccountService::new();
        assert!(service.create("Main", dec!(-0.01), AccountKind::Checking).is_err());
        assert!(service.create(" ", dec!(1), AccountKind::Checking).is_err());
        assert!(service.is_empty());
    }

    #[test]
    fn missing_ids_are_soft_failures() {
        let mut service = AccountService::new();
        assert!(service.get(9).is_none());
        assert!(!service.delete(9));
        assert!(!service.update_balance(9, dec!(5)).unwrap());
        assert!(!service.rename(9, "Ghost").unwrap());
    }

    #[test]
    fn rename_validates_existing_account() {
        let mut service = AccountService::new();
        let id = service.create("Main", dec!(0), AccountKind::Checking).unwrap().id();
        assert!(service.rename(id, "").is_err());
        assert!(service.rename(id, "Daily").unwrap());
        assert_eq!(service.get(id).unwrap().name(), "Daily");
    }

    #[test]
    fn total_balance_sums_all_accounts() {
        let mut service = AccountService::new();
        assert_eq!(service.total_balance().unwrap(), Decimal::ZERO);

        let id = service.create("Main", dec!(1000), AccountKind::Checking).unwrap().id();
        service.create("Savings", dec!(250.25), AccountKind::Savings).unwrap();
        service.update_balance(id, dec!(-1100)).unwrap();
        assert_eq!(service.total_balance().unwrap(), dec!(150.25));
    }

    #[test]
    fn huge_balances_overflow_into_errors() {
        let mut service = AccountService::new();
        let huge = dec!(50000000000000000000000000000);
        let first = service.create("A", huge, AccountKind::Savings).unwrap().id();
        service.create("B", huge, AccountKind::Savings).unwrap();

        assert!(matches!(service.total_balance(), Err(LedgerError::Validation(_))));
        assert!(service.update_balance(first, huge).is_err());
        assert_eq!(service.get(first).unwrap().balance(), huge);
        assert!(matches!(
            service.check_delta(9, dec!(1)),
            Err(LedgerError::AccountNotFound(9))
        ));
        assert!(service.check_delta(first, -huge).is_ok());
    }

    #[test]
    fn restore_rejects_occupied_id() {
        let mut service = AccountService::new();
        service.create("Main", dec!(0), AccountKind::Checking).unwrap();
        let err = service
            .restore(1, "Copy", dec!(0), AccountKind::Checking)
            .unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateId { id: 1, .. }));

        service.restore(5, "Restored", dec!(-20), AccountKind::Credit).unwrap();
        let next = service.create("Next", dec!(0), AccountKind::Checking).unwrap().id();
        assert_eq!(next, 6);
    }
}
