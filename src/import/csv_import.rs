use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;

use super::{ImportRecord, Importer, ParsedRow};
use crate::domain::{parse_timestamp, EntityId};
use crate::errors::{LedgerError, LedgerResult};

/// Imports delimiter-separated rows such as `Account;Main;1000;Checking`.
///
/// Rows written by the CSV exporter are recognised by their field count
/// (they lead with the id and, for accounts and categories, trail with
/// `created_at`) and are restored under their id.
#[derive(Debug, Clone, Copy)]
pub struct CsvImporter {
    delimiter: u8,
}

impl CsvImporter {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }
}

impl Default for CsvImporter {
    fn default() -> Self {
        Self::new(b';')
    }
}

impl Importer for CsvImporter {
    fn format(&self) -> &'static str {
        "csv"
    }

    fn parse(&self, content: &str) -> LedgerResult<Vec<ParsedRow>> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .comment(Some(b'#'))
            .from_reader(content.as_bytes());

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let (row, record) = match result {
                Ok(fields) => {
                    let row = fields
                        .position()
                        .map_or(index + 1, |pos| pos.line() as usize);
                    (row, parse_record(&fields))
                }
                Err(err) => {
                    let row = err
                        .position()
                        .map_or(index + 1, |pos| pos.line() as usize);
                    (row, Err(LedgerError::from(err)))
                }
            };
            rows.push(ParsedRow { row, record });
        }
        Ok(rows)
    }
}

const EXPORTED_ACCOUNT_FIELDS: usize = 6;
const EXPORTED_CATEGORY_FIELDS: usize = 5;
const EXPORTED_OPERATION_FIELDS: usize = 8;

fn parse_record(fields: &StringRecord) -> LedgerResult<ImportRecord> {
    let tag = fields.get(0).unwrap_or_default().to_ascii_lowercase();
    let exported = match tag.as_str() {
        "account" | "bankaccount" => fields.len() == EXPORTED_ACCOUNT_FIELDS,
        "category" => fields.len() == EXPORTED_CATEGORY_FIELDS,
        "operation" => fields.len() == EXPORTED_OPERATION_FIELDS,
        _ => false,
    };
    if exported {
        parse_exported(&tag, fields)
    } else {
        parse_import(&tag, fields)
    }
}

fn parse_import(tag: &str, fields: &StringRecord) -> LedgerResult<ImportRecord> {
    match tag {
        "account" | "bankaccount" => Ok(ImportRecord::Account {
            id: None,
            name: required(fields, 1, "name")?.to_string(),
            balance: parse_field::<Decimal>(fields, 2, "balance")?,
            kind: match fields.get(3).filter(|kind| !kind.is_empty()) {
                Some(kind) => kind.parse()?,
                None => Default::default(),
            },
        }),
        "category" => Ok(ImportRecord::Category {
            id: None,
            kind: required(fields, 1, "kind")?.parse()?,
            name: required(fields, 2, "name")?.to_string(),
        }),
        "operation" => Ok(ImportRecord::Operation {
            id: None,
            kind: required(fields, 1, "kind")?.parse()?,
            account_id: parse_field::<EntityId>(fields, 2, "account_id")?,
            amount: parse_field::<Decimal>(fields, 3, "amount")?,
            date: parse_timestamp(required(fields, 4, "date")?, false)?,
            category_id: parse_field::<EntityId>(fields, 5, "category_id")?,
            description: fields.get(6).map(str::to_string),
        }),
        other => Err(LedgerError::Validation(format!(
            "unknown row type `{other}`"
        ))),
    }
}

/// `Account;id;name;balance;kind;created_at`, `Category;id;kind;name;created_at`
/// and `Operation;id;kind;account_id;amount;date;category_id;description`.
fn parse_exported(tag: &str, fields: &StringRecord) -> LedgerResult<ImportRecord> {
    let id = Some(parse_field::<EntityId>(fields, 1, "id")?);
    match tag {
        "category" => Ok(ImportRecord::Category {
            id,
            kind: required(fields, 2, "kind")?.parse()?,
            name: required(fields, 3, "name")?.to_string(),
        }),
        "operation" => Ok(ImportRecord::Operation {
            id,
            kind: required(fields, 2, "kind")?.parse()?,
            account_id: parse_field::<EntityId>(fields, 3, "account_id")?,
            amount: parse_field::<Decimal>(fields, 4, "amount")?,
            date: parse_timestamp(required(fields, 5, "date")?, false)?,
            category_id: parse_field::<EntityId>(fields, 6, "category_id")?,
            description: fields.get(7).map(str::to_string),
        }),
        _ => Ok(ImportRecord::Account {
            id,
            name: required(fields, 2, "name")?.to_string(),
            balance: parse_field::<Decimal>(fields, 3, "balance")?,
            kind: required(fields, 4, "kind")?.parse()?,
        }),
    }
}

fn required<'r>(fields: &'r StringRecord, index: usize, label: &str) -> LedgerResult<&'r str> {
    fields
        .get(index)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| LedgerError::Validation(format!("missing field `{label}`")))
}

fn parse_field<T: FromStr>(fields: &StringRecord, index: usize, label: &str) -> LedgerResult<T> {
    let raw = required(fields, index, label)?;
    raw.parse()
        .map_err(|_| LedgerError::Validation(format!("invalid {label} `{raw}`")))
}
