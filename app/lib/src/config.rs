//! Configuration for the checked CSV reader.
//!
//! [`parse`](crate::parse) takes no configuration. [`ReaderConfig`] only
//! bounds what [`read_table`](crate::read_table) accepts from untrusted input.

use serde::Deserialize;

/// Limits applied by [`read_table`](crate::read_table).
///
/// A limit of `0` disables the corresponding check.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Maximum input size in bytes.
    ///
    /// Default: 1,073,741,824 bytes (1 GB)
    pub max_input_size: usize,

    /// Maximum number of records in the parsed table.
    ///
    /// Default: 0 (unlimited)
    pub max_records: usize,

    /// Maximum number of fields in any single record.
    ///
    /// Default: 0 (unlimited)
    pub max_fields_per_record: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            max_input_size: 1_073_741_824, // 1 GB
            max_records: 0,
            max_fields_per_record: 0,
        }
    }
}

impl ReaderConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum input size limit.
    pub fn with_max_input_size(mut self, max: usize) -> Self {
        self.max_input_size = max;
        self
    }

    /// Set the maximum record count.
    pub fn with_max_records(mut self, max: usize) -> Self {
        self.max_records = max;
        self
    }

    /// Set the maximum field count per record.
    pub fn with_max_fields_per_record(mut self, max: usize) -> Self {
        self.max_fields_per_record = max;
        self
    }

    /// Load a configuration from JSON text. Missing keys keep their defaults.
    pub fn from_json(input: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(input)?)
    }
}
