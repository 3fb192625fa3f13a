use serde::Deserialize;
use serde_yaml::Value;

use super::{ImportRecord, Importer, ParsedRow};
use crate::errors::{LedgerError, LedgerResult};

/// Imports `---`-separated YAML documents, one entity per document.
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlImporter;

impl Importer for YamlImporter {
    fn format(&self) -> &'static str {
        "yaml"
    }

    fn parse(&self, content: &str) -> LedgerResult<Vec<ParsedRow>> {
        let mut rows = Vec::new();
        for document in serde_yaml::Deserializer::from_str(content) {
            let value = match Value::deserialize(document) {
                Ok(Value::Null) => continue,
                Ok(value) => value,
                Err(err) => return Err(err.into()),
            };
            rows.push(ParsedRow {
                row: rows.len() + 1,
                record: serde_yaml::from_value::<ImportRecord>(value).map_err(LedgerError::from),
            });
        }
        Ok(rows)
    }
}
