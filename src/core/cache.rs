//! Memoization layer in front of account lookups.

use std::collections::HashMap;

use crate::core::services::AccountService;
use crate::domain::{Account, EntityId, Identifiable};

/// Keeps account snapshots keyed by id.
///
/// The cache never writes to the store and is not invalidated when the store
/// changes; callers refresh entries with [`AccountCache::save`] or drop them
/// with [`AccountCache::remove`].
#[derive(Debug, Default)]
pub struct AccountCache {
    entries: HashMap<EntityId, Account>,
    hits: u64,
    misses: u64,
}

impl AccountCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save(&mut self, account: Account) -> &Account {
        let id = account.id();
        self.entries.insert(id, account);
        &self.entries[&id]
    }

    pub fn get_by_id(&self, id: EntityId) -> Option<&Account> {
        self.entries.get(&id)
    }

    /// Returns the cached snapshot, loading it from `store` on a miss.
    pub fn get_or_load(&mut self, store: &AccountService, id: EntityId) -> Option<&Account> {
        if self.entries.contains_key(&id) {
            self.hits += 1;
        } else {
            self.misses += 1;
            let account = store.get(id)?.clone();
            self.entries.insert(id, account);
        }
        self.entries.get(&id)
    }

    pub fn remove(&mut self, id: EntityId) -> bool {
        self.entries.remove(&id).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(hits, misses)` observed by [`AccountCache::get_or_load`].
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AccountKind, NamedEntity};
    use rust_decimal_macros::dec;

    #[test]
    fn save_get_remove() {
        let mut cache = AccountCache::new();
        let account = Account::new(1, "Test Account", dec!(1000), AccountKind::Checking).unwrap();
        cache.save(account);

        let cached = cache.get_by_id(1).unwrap();
        assert_eq!(cached.name(), "Test Account");
        assert_eq!(cached.balance(), dec!(1000));
        assert!(cache.get_by_id(2).is_none());

        assert!(cache.remove(1));
        assert!(cache.get_by_id(1).is_none());
        assert!(!cache.remove(1));
    }

    #[test]
    fn read_through_counts_hits_and_diverges_from_store() {
        let mut store = AccountService::new();
        let id = store.create("Main", dec!(10), AccountKind::Savings).unwrap().id();
        let mut cache = AccountCache::new();

        assert_eq!(cache.get_or_load(&store, id).unwrap().balance(), dec!(10));
        store.update_balance(id, dec!(5)).unwrap();
        assert_eq!(cache.get_or_load(&store, id).unwrap().balance(), dec!(10));
        assert_eq!(cache.stats(), (1, 1));

        assert!(cache.get_or_load(&store, 99).is_none());
        cache.clear();
        assert_eq!(cache.get_or_load(&store, id).unwrap().balance(), dec!(15));
    }
}
