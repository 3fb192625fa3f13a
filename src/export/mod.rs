//! Renders ledger entities as CSV or JSON text.

use std::io;

use chrono::SecondsFormat;
use serde_json::{json, Value};

use crate::domain::{
    Account, Category, EntityKind, Identifiable, NamedEntity, Operation,
};
use crate::errors::{LedgerError, LedgerResult};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Borrowed view over any exportable entity.
#[derive(Debug, Clone, Copy)]
pub enum Entity<'a> {
    Account(&'a Account),
    Category(&'a Category),
    Operation(&'a Operation),
}

impl Entity<'_> {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Account(_) => EntityKind::Account,
            Entity::Category(_) => EntityKind::Category,
            Entity::Operation(_) => EntityKind::Operation,
        }
    }
}

pub trait Exporter {
    fn write(&mut self, entity: Entity<'_>) -> LedgerResult<()>;
    fn finish(self) -> LedgerResult<String>;

    fn write_all<'a, I>(&mut self, entities: I) -> LedgerResult<()>
    where
        I: IntoIterator<Item = Entity<'a>>,
    {
        for entity in entities {
            self.write(entity)?;
        }
        Ok(())
    }
}

/// One tagged, delimiter-separated row per entity.
pub struct CsvExporter {
    writer: csv::Writer<Vec<u8>>,
}

impl CsvExporter {
    pub fn new(delimiter: u8) -> Self {
        let writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        Self { writer }
    }
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new(b';')
    }
}

impl Exporter for CsvExporter {
    fn write(&mut self, entity: Entity<'_>) -> LedgerResult<()> {
        let tag = entity.kind().to_string();
        let record = match entity {
            Entity::Account(account) => vec![
                tag,
                account.id().to_string(),
                account.name().to_string(),
                account.balance().to_string(),
                account.kind().to_string(),
                account.created_at().to_rfc3339_opts(SecondsFormat::Secs, true),
            ],
            Entity::Category(category) => vec![
                tag,
                category.id().to_string(),
                category.kind().to_string(),
                category.name().to_string(),
                category.created_at().to_rfc3339_opts(SecondsFormat::Secs, true),
            ],
            Entity::Operation(operation) => vec![
                tag,
                operation.id().to_string(),
                operation.kind().to_string(),
                operation.account_id().to_string(),
                operation.amount().to_string(),
                operation.date().format(TIMESTAMP_FORMAT).to_string(),
                operation.category_id().to_string(),
                operation.description().to_string(),
            ],
        };
        self.writer.write_record(&record)?;
        Ok(())
    }

    fn finish(self) -> LedgerResult<String> {
        let bytes = self
            .writer
            .into_inner()
            .map_err(|err| LedgerError::Io(err.into_error()))?;
        String::from_utf8(bytes)
            .map_err(|err| LedgerError::Io(io::Error::new(io::ErrorKind::InvalidData, err)))
    }
}

/// Collects entities into a pretty-printed JSON array.
#[derive(Debug, Default)]
pub struct JsonExporter {
    entries: Vec<Value>,
}

impl JsonExporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Exporter for JsonExporter {
    fn write(&mut self, entity: Entity<'_>) -> LedgerResult<()> {
        let value = match entity {
            Entity::Account(account) => json!({
                "type": "Account",
                "id": account.id(),
                "name": account.name(),
                "balance": account.balance(),
                "kind": account.kind(),
                "created_at": account.created_at(),
            }),
            Entity::Category(category) => json!({
                "type": "Category",
                "id": category.id(),
                "kind": category.kind(),
                "name": category.name(),
                "created_at": category.created_at(),
            }),
            Entity::Operation(operation) => json!({
                "type": "Operation",
                "id": operation.id(),
                "kind": operation.kind(),
                "account_id": operation.account_id(),
                "amount": operation.amount(),
                "date": operation.date().format(TIMESTAMP_FORMAT).to_string(),
                "category_id": operation.category_id(),
                "description": operation.description(),
            }),
        };
        self.entries.push(value);
        Ok(())
    }

    fn finish(self) -> LedgerResult<String> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }
}
