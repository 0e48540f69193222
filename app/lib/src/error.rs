//! Error types for the formcsv library.
//!
//! The CSV parser itself is total and never returns an error. These types
//! cover the checked reader, document decoding and validators run through
//! [`collect`](crate::collect).

use thiserror::Error;

/// Main error type for the formcsv library.
#[derive(Debug, Error)]
pub enum FormError {
    /// Input exceeds the configured size limit.
    #[error("Input too large: {size} bytes exceeds the limit of {limit} bytes")]
    InputTooLarge {
        /// Size of the rejected input in bytes
        size: usize,
        /// Configured maximum in bytes
        limit: usize,
    },

    /// The parsed table has more records than allowed.
    #[error("Too many records: more than {limit}")]
    TooManyRecords {
        /// Configured maximum number of records
        limit: usize,
    },

    /// A record has more fields than allowed.
    #[error("Too many fields in record {record}: more than {limit}")]
    TooManyFields {
        /// Record number (1-indexed)
        record: usize,
        /// Configured maximum number of fields per record
        limit: usize,
    },

    /// A validator rejected a field.
    #[error("Validation failed for '{field}': {message}")]
    Validation {
        /// Name of the field that failed validation
        field: String,
        /// Description of the failure
        message: String,
    },

    /// A function run through `collect` panicked.
    #[error("Validator panicked: {message}")]
    ValidatorPanicked {
        /// Panic payload, when it was a string
        message: String,
    },

    /// Error parsing JSON input.
    ///
    /// Wraps errors from the `serde_json` crate.
    #[error("JSON parsing error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    /// I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl FormError {
    /// Shorthand for a [`FormError::Validation`] error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        FormError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Type alias for Results using `FormError`.
pub type Result<T> = std::result::Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_too_large_display() {
        let error = FormError::InputTooLarge {
            size: 2048,
            limit: 1024,
        };
        let display = format!("{}", error);
        assert!(display.contains("2048 bytes"));
        assert!(display.contains("limit of 1024"));
    }

    #[test]
    fn test_too_many_fields_display() {
        let error = FormError::TooManyFields { record: 3, limit: 5 };
        let display = format!("{}", error);
        assert!(display.contains("record 3"));
        assert!(display.contains("more than 5"));
    }

    #[test]
    fn test_validation_display() {
        let error = FormError::validation("email", "must contain '@'");
        let display = format!("{}", error);
        assert!(display.contains("'email'"));
        assert!(display.contains("must contain '@'"));
    }

    #[test]
    fn test_json_parse_error_from() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error: FormError = json_error.into();
        assert!(matches!(error, FormError::JsonParseError(_)));
    }

    #[test]
    fn test_io_error_from() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: FormError = io_error.into();
        assert!(matches!(error, FormError::IoError(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FormError>();
    }
}
