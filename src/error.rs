//! Error types for loading an uploaded activity export.
//!
//! Every variant is terminal for the current upload attempt: nothing is
//! retried, and the session shows the message instead of any partial data.

use thiserror::Error;

/// Errors raised while turning an uploaded file into a [`crate::Dataset`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    /// The file is neither named `*.csv` nor typed `text/csv`
    #[error("Please upload a CSV file (rejected '{name}')")]
    FileTypeRejected { name: String },

    /// The underlying read failed
    #[error("Failed to read file: error code {code}, {message}")]
    FileReadFailed { code: String, message: String },

    /// The read finished but the upload had been aborted
    #[error("File read was aborted")]
    FileReadAborted,

    /// The file holds nothing but whitespace
    #[error("File content is empty")]
    EmptyFileContent,

    /// The parser produced no records
    #[error("CSV file is empty or has no valid data")]
    EmptyParsedDataset,

    /// The first record has no value for a required column
    #[error("No '{field}' field found in the CSV file")]
    MissingRequiredField { field: String },

    /// The row parser reported an error. Text input in flexible mode rarely
    /// triggers this; it is mapped from any `csv::Error`.
    #[error("CSV parsing failed: {message}")]
    ParseFailure { line: Option<u64>, message: String },
}

impl UploadError {
    /// Create a file type rejection for the given file name
    pub fn rejected(name: impl Into<String>) -> Self {
        Self::FileTypeRejected { name: name.into() }
    }

    /// Create a read failure from an error code and description
    pub fn read_failed(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FileReadFailed {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingRequiredField {
            field: field.into(),
        }
    }

    /// Create a parse failure, optionally pinned to a line of the input
    pub fn parse_failure(line: Option<u64>, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = match line {
            Some(line) => format!("line {}: {}", line, message),
            None => message,
        };
        Self::ParseFailure { line, message }
    }
}
