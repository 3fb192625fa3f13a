use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::core::factory::CategoryFactory;
use crate::domain::{Category, CategoryKind, EntityId, EntityKind, Identifiable};
use crate::errors::{LedgerError, LedgerResult};

/// Owns categories. Deleting one never touches operations that reference it.
#[derive(Debug, Default)]
pub struct CategoryService {
    categories: BTreeMap<EntityId, Category>,
    factory: CategoryFactory,
}

impl CategoryService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, kind: CategoryKind, name: &str) -> LedgerResult<&Category> {
        let category = self.factory.create(kind, name).map_err(|err| {
            warn!(%err, "category rejected");
            err
        })?;
        let id = category.id();
        debug!(id, name, %kind, "category created");
        Ok(self.categories.entry(id).or_insert(category))
    }

    pub fn restore(
        &mut self,
        id: EntityId,
        kind: CategoryKind,
        name: &str,
    ) -> LedgerResult<&Category> {
        if self.categories.contains_key(&id) {
            return Err(LedgerError::DuplicateId {
                kind: EntityKind::Category,
                id,
            });
        }
        let category = self.factory.restore(id, kind, name)?;
        Ok(self.categories.entry(id).or_insert(category))
    }

    pub fn get(&self, id: EntityId) -> Option<&Category> {
        self.categories.get(&id)
    }

    pub fn list(&self) -> Vec<&Category> {
        self.categories.values().collect()
    }

    pub fn list_by_kind(&self, kind: CategoryKind) -> Vec<&Category> {
        self.categories
            .values()
            .filter(|category| category.kind() == kind)
            .collect()
    }

    pub fn delete(&mut self, id: EntityId) -> bool {
        let removed = self.categories.remove(&id).is_some();
        if removed {
            debug!(id, "category deleted");
        }
        removed
    }

    pub fn rename(&mut self, id: EntityId, name: &str) -> LedgerResult<bool> {
        match self.categories.get_mut(&id) {
            Some(category) => {
                category.rename(name)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
