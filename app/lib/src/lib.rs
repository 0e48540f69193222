//! # formcsv
//!
//! Best-effort CSV tokenizer for multi-value form fields, plus small helpers
//! over JSON documents.
//!
//! The parser turns free-form text into an ordered table of records and
//! fields. It understands quoted fields with embedded delimiters, line breaks
//! and doubled quotes, and it never fails: malformed input still produces a
//! table.
//!
//! ## Quick Start
//!
//! ```rust
//! use formcsv::parse;
//!
//! let table = parse("red, green\n\"dark, blue\",\"say \"\"hi\"\"\"\n");
//! assert_eq!(table, vec![
//!     vec!["red", "green"],
//!     vec!["dark, blue", "say \"hi\""],
//! ]);
//! ```
//!
//! ### Limits for untrusted input
//!
//! ```rust
//! use formcsv::{read_table, FormError, ReaderConfig};
//!
//! let config = ReaderConfig::default().with_max_records(1);
//! let result = read_table("a\nb", &config);
//! assert!(matches!(result, Err(FormError::TooManyRecords { limit: 1 })));
//! ```
//!
//! ### Document helpers
//!
//! ```rust
//! use formcsv::{below_path_value, get_path};
//! use serde_json::json;
//!
//! let doc = json!({
//!     "fields": {"colors": ["red", "green"]},
//!     "_attachments": {"images/a.png": {"content_type": "image/png"}}
//! });
//!
//! assert_eq!(get_path(&doc, ["fields", "colors", "1"]), Some(&json!("green")));
//! assert!(below_path_value(&doc, "images").contains_key("a.png"));
//! ```
//!
//! ### Collecting validation errors
//!
//! ```rust
//! use formcsv::{collect_errors, parse, FormError};
//!
//! let record = parse("ana,,ana@example.com").remove(0);
//! let errors = collect_errors(
//!     |fields: &[String]| {
//!         Ok(fields
//!             .iter()
//!             .enumerate()
//!             .filter(|(_, f)| f.is_empty())
//!             .map(|(i, _)| FormError::validation(format!("column {}", i + 1), "required"))
//!             .collect())
//!     },
//!     &record[..],
//! );
//! assert_eq!(errors.len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Module declarations
pub mod collect;
pub mod config;
pub mod csv;
pub mod doc;
pub mod error;

// Re-exports for convenience
pub use crate::collect::{collect, collect_errors};
pub use crate::csv::{
    parse, read_table, table_to_json, unescape_quoted, CsvParser, Record, ScanMode,
    ScannedField, Scanner, Table, Terminator,
};
pub use config::ReaderConfig;
pub use doc::{below_path, below_path_value, get_path, AttachmentMeta, Document, Key, KeyPath};
pub use error::{FormError, Result};
