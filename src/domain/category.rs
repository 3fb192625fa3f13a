//! Domain types representing income and expense categories.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::*;
use crate::errors::{LedgerError, LedgerResult};

/// Classifies ledger activity for reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    id: EntityId,
    kind: CategoryKind,
    name: String,
    created_at: DateTime<Utc>,
}

impl Category {
    pub fn new(id: EntityId, kind: CategoryKind, name: impl Into<String>) -> LedgerResult<Self> {
        let name = name.into();
        validate_name(EntityKind::Category, &name)?;
        Ok(Self {
            id,
            kind,
            name,
            created_at: Utc::now(),
        })
    }

    pub fn kind(&self) -> CategoryKind {
        self.kind
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn rename(&mut self, name: impl Into<String>) -> LedgerResult<()> {
        let name = name.into();
        validate_name(EntityKind::Category, &name)?;
        self.name = name;
        Ok(())
    }
}

impl Identifiable for Category {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl NamedEntity for Category {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Category {
    fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.kind)
    }
}

/// Supported category types.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CategoryKind {
    Income,
    Expense,
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CategoryKind::Income => "Income",
            CategoryKind::Expense => "Expense",
        };
        f.write_str(label)
    }
}

impl FromStr for CategoryKind {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(CategoryKind::Income),
            "expense" => Ok(CategoryKind::Expense),
            other => Err(LedgerError::Validation(format!(
                "unknown category kind `{other}`"
            ))),
        }
    }
}
