//! I/O utilities for reading uploaded activity exports.
//!
//! This module provides the CSV row parser and the one-shot upload pipeline
//! that feeds the [`crate::Dataset`] loader.

pub mod csv_reader;
pub mod upload;

// Re-export commonly used types and functions
pub use csv_reader::{parse_csv_str, ParsedTable};
pub use upload::{
    check_file_type, load_dataset, load_from_text, read_upload, upload_file, AbortHandle,
    ReadOutcome,
};
