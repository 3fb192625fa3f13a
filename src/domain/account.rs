use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::common::*;
use crate::errors::{LedgerError, LedgerResult};

/// Represents a bank account tracked within the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    id: EntityId,
    name: String,
    balance: Decimal,
    kind: AccountKind,
    created_at: DateTime<Utc>,
}

impl Account {
    /// Builds an account, rejecting blank names. Any balance is accepted here.
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        balance: Decimal,
        kind: AccountKind,
    ) -> LedgerResult<Self> {
        let name = name.into();
        validate_name(EntityKind::Account, &name)?;
        Ok(Self {
            id,
            name,
            balance,
            kind,
            created_at: Utc::now(),
        })
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Adds a signed delta to the balance. Balances may go negative; a delta
    /// that would leave the decimal range is rejected and the balance kept.
    pub fn update_balance(&mut self, delta: Decimal) -> LedgerResult<()> {
        self.balance = checked_add(self.balance, delta)?;
        Ok(())
    }

    pub fn rename(&mut self, name: impl Into<String>) -> LedgerResult<()> {
        let name = name.into();
        validate_name(EntityKind::Account, &name)?;
        self.name = name;
        Ok(())
    }
}

impl Identifiable for Account {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl NamedEntity for Account {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Account {
    fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.kind)
    }
}

/// Enumerates the supported account classifications.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AccountKind {
    #[default]
    Checking,
    Savings,
    Credit,
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AccountKind::Checking => "Checking",
            AccountKind::Savings => "Savings",
            AccountKind::Credit => "Credit",
        };
        f.write_str(label)
    }
}

impl FromStr for AccountKind {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "checking" => Ok(AccountKind::Checking),
            "savings" => Ok(AccountKind::Savings),
            "credit" => Ok(AccountKind::Credit),
            other => Err(LedgerError::Validation(format!(
                "unknown account kind `{other}`"
            ))),
        }
    }
}
