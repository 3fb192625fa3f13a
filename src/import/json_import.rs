use serde_json::Value;

use super::{ImportRecord, Importer, ParsedRow};
use crate::errors::{LedgerError, LedgerResult};

/// Imports a JSON array of objects tagged by `"type"`.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonImporter;

impl Importer for JsonImporter {
    fn format(&self) -> &'static str {
        "json"
    }

    fn parse(&self, content: &str) -> LedgerResult<Vec<ParsedRow>> {
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let Value::Array(items) = serde_json::from_str::<Value>(content)? else {
            return Err(LedgerError::validation(
                "JSON import expects an array of objects",
            ));
        };
        Ok(items
            .into_iter()
            .enumerate()
            .map(|(index, item)| ParsedRow {
                row: index + 1,
                record: serde_json::from_value::<ImportRecord>(item).map_err(LedgerError::from),
            })
            .collect())
    }
}
