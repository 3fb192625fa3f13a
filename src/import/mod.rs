//! Row-oriented importers. Each format only knows how to turn text into
//! [`ParsedRow`]s; applying them to a [`Finance`] is shared.

mod csv_import;
mod json_import;
mod yaml_import;

use std::{fmt::Display, fs, path::Path, str::FromStr};

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use tracing::{info, warn};

use crate::core::Finance;
use crate::domain::{
    parse_timestamp, AccountKind, CategoryKind, EntityId, EntityKind, Identifiable,
    OperationDraft, OperationKind,
};
use crate::errors::LedgerResult;

pub use csv_import::CsvImporter;
pub use json_import::JsonImporter;
pub use yaml_import::YamlImporter;

/// A single pre-parsed row, tagged by entity type.
///
/// Rows carrying an `id` come from an export: they are restored under that id
/// as-is, and an operation restored this way leaves its account balance alone
/// because the exported balance already includes it. `created_at` is not
/// carried over; restored entities are stamped at import time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum ImportRecord {
    #[serde(alias = "BankAccount")]
    Account {
        #[serde(default)]
        id: Option<EntityId>,
        name: String,
        #[serde(default)]
        balance: Decimal,
        #[serde(default, deserialize_with = "from_str_field")]
        kind: AccountKind,
    },
    Category {
        #[serde(default)]
        id: Option<EntityId>,
        #[serde(deserialize_with = "from_str_field")]
        kind: CategoryKind,
        name: String,
    },
    Operation {
        #[serde(default)]
        id: Option<EntityId>,
        #[serde(deserialize_with = "from_str_field")]
        kind: OperationKind,
        account_id: EntityId,
        amount: Decimal,
        #[serde(deserialize_with = "timestamp_field")]
        date: NaiveDateTime,
        category_id: EntityId,
        #[serde(default)]
        description: Option<String>,
    },
}

/// Outcome of parsing one row; `row` is 1-based within the source.
#[derive(Debug)]
pub struct ParsedRow {
    pub row: usize,
    pub record: LedgerResult<ImportRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFailure {
    pub row: usize,
    pub message: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub created: Vec<(EntityKind, EntityId)>,
    pub failures: Vec<RowFailure>,
}

impl ImportReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn created_count(&self, kind: EntityKind) -> usize {
        self.created.iter().filter(|(k, _)| *k == kind).count()
    }
}

pub trait Importer {
    fn format(&self) -> &'static str;

    /// Splits the document into rows. Fails only when the document as a
    /// whole cannot be read.
    fn parse(&self, content: &str) -> LedgerResult<Vec<ParsedRow>>;

    fn import_str(&self, finance: &mut Finance, content: &str) -> LedgerResult<ImportReport> {
        let rows = self.parse(content)?;
        let report = apply_rows(finance, rows);
        info!(
            format = self.format(),
            created = report.created.len(),
            failed = report.failures.len(),
            "import finished"
        );
        Ok(report)
    }

    fn import_file(&self, finance: &mut Finance, path: &Path) -> LedgerResult<ImportReport> {
        let content = fs::read_to_string(path)?;
        self.import_str(finance, &content)
    }
}

/// Applies each row in order. A failing row is recorded and skipped.
pub fn apply_rows(finance: &mut Finance, rows: Vec<ParsedRow>) -> ImportReport {
    let mut report = ImportReport::default();
    for ParsedRow { row, record } in rows {
        match record.and_then(|record| apply_record(finance, record)) {
            Ok(created) => report.created.push(created),
            Err(err) => {
                warn!(row, %err, "import row skipped");
                report.failures.push(RowFailure {
                    row,
                    message: err.to_string(),
                });
            }
        }
    }
    report
}

pub fn apply_record(
    finance: &mut Finance,
    record: ImportRecord,
) -> LedgerResult<(EntityKind, EntityId)> {
    match record {
        ImportRecord::Account {
            id,
            name,
            balance,
            kind,
        } => {
            let account = match id {
                Some(id) => finance.accounts.restore(id, &name, balance, kind)?,
                None => finance.accounts.create(&name, balance, kind)?,
            };
            Ok((EntityKind::Account, account.id()))
        }
        ImportRecord::Category { id, kind, name } => {
            let category = match id {
                Some(id) => finance.categories.restore(id, kind, &name)?,
                None => finance.categories.create(kind, &name)?,
            };
            Ok((EntityKind::Category, category.id()))
        }
        ImportRecord::Operation {
            id,
            kind,
            account_id,
            amount,
            date,
            category_id,
            description,
        } => {
            let draft = OperationDraft::new(kind, account_id, amount, date, category_id)
                .with_description(description.unwrap_or_default());
            let operation = match id {
                Some(id) => finance.operations.restore(id, draft)?,
                None => finance.create_operation(draft)?,
            };
            Ok((EntityKind::Operation, operation.id()))
        }
    }
}

fn from_str_field<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}

fn timestamp_field<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw, false).map_err(serde::de::Error::custom)
}
