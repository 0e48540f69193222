//! Table assembly on top of the field scanner.

use log::{debug, warn};

use super::scanner::{Scanner, Terminator};
use crate::config::ReaderConfig;
use crate::error::{FormError, Result};

/// One row: fields in column order.
pub type Record = Vec<String>;

/// Parse result: records in row order.
pub type Table = Vec<Record>;

/// Parse `input` into a table of records.
///
/// Never fails. Malformed input yields a best-effort table: text after the
/// last field-end marker is trimmed and kept as a final field, including an
/// unterminated quoted field with its opening quote.
///
/// # Examples
///
/// ```
/// use formcsv::parse;
///
/// assert_eq!(parse("a,b\nc,d"), vec![vec!["a", "b"], vec!["c", "d"]]);
/// assert_eq!(parse(r#"a,"b,c",d"#), vec![vec!["a", "b,c", "d"]]);
/// assert!(parse("").is_empty());
/// ```
pub fn parse(input: &str) -> Table {
    let mut scanner = Scanner::new(input);
    let mut table = Table::new();
    let mut record = Record::new();

    while let Some(field) = scanner.next_field() {
        record.push(field.value.into_owned());
        if field.terminator == Terminator::LineBreak {
            table.push(std::mem::take(&mut record));
        }
    }

    let trailing = scanner.remainder().trim();
    if !trailing.is_empty() {
        record.push(trailing.to_string());
    }

    if !record.is_empty() {
        table.push(record);
    }

    table
}

/// Parse `input` and enforce the limits in `config`.
///
/// The input size is checked before scanning; record and field counts are
/// checked on the parsed table.
pub fn read_table(input: &str, config: &ReaderConfig) -> Result<Table> {
    if config.max_input_size > 0 && input.len() > config.max_input_size {
        warn!(
            "Rejecting {} byte input (limit {})",
            input.len(),
            config.max_input_size
        );
        return Err(FormError::InputTooLarge {
            size: input.len(),
            limit: config.max_input_size,
        });
    }

    let table = parse(input);
    debug!("Parsed {} records from {} bytes", table.len(), input.len());

    if config.max_records > 0 && table.len() > config.max_records {
        return Err(FormError::TooManyRecords {
            limit: config.max_records,
        });
    }

    if config.max_fields_per_record > 0 {
        if let Some(idx) = table
            .iter()
            .position(|record| record.len() > config.max_fields_per_record)
        {
            return Err(FormError::TooManyFields {
                record: idx + 1,
                limit: config.max_fields_per_record,
            });
        }
    }

    Ok(table)
}

/// Render a table as a JSON array of arrays of strings.
pub fn table_to_json(table: &Table) -> serde_json::Value {
    serde_json::Value::Array(
        table
            .iter()
            .map(|record| {
                serde_json::Value::Array(
                    record
                        .iter()
                        .map(|field| serde_json::Value::String(field.clone()))
                        .collect(),
                )
            })
            .collect(),
    )
}

/// Form-field CSV parser.
///
/// Holds only reader limits; every call is independent. Equivalent to calling
/// [`parse`] or [`read_table`] with those limits.
#[derive(Debug, Clone, Default)]
pub struct CsvParser {
    config: ReaderConfig,
}

impl CsvParser {
    /// Create a parser with the default reader configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser that checks input against `config` in [`read`](Self::read).
    pub fn with_config(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// The configuration used by [`read`](Self::read).
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Parse without limits. See [`parse`].
    pub fn parse(&self, input: &str) -> Table {
        parse(input)
    }

    /// Parse with this parser's limits. See [`read_table`].
    pub fn read(&self, input: &str) -> Result<Table> {
        read_table(input, &self.config)
    }
}
