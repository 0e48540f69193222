//! Form-field CSV parsing.
//!
//! This module contains the single-pass field scanner, the quote un-escaper
//! and the table assembly built on top of them.

mod escape;
mod parser;
mod scanner;

pub use escape::unescape_quoted;
pub use parser::{parse, read_table, table_to_json, CsvParser, Record, Table};
pub use scanner::{ScanMode, ScannedField, Scanner, Terminator};
