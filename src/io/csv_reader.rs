//! CSV text to [`Record`]s, first line as header.

use crate::dataset::Record;
use crate::error::UploadError;
use std::collections::HashSet;
use tracing::debug;

/// Header names plus the rows under them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTable {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

/// Parse comma separated text whose first line names the columns.
///
/// Blank lines are skipped. Short rows leave their trailing columns absent
/// and surplus cells past the header are dropped. A repeated header name is
/// renamed (see [`dedupe_headers`]).
pub fn parse_csv_str(text: &str) -> Result<ParsedTable, UploadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = dedupe_headers(reader.headers().map_err(to_upload_error)?.iter());

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(to_upload_error)?;
        records.push(Record::from_pairs(
            headers.iter().map(String::as_str).zip(row.iter()),
        ));
    }

    Ok(ParsedTable { headers, records })
}

/// Keep the first occurrence of each name and suffix later ones with
/// `_1`, `_2`, ... skipping any name already taken.
fn dedupe_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::new();
    let mut headers = Vec::new();
    for name in raw {
        let mut candidate = name.to_string();
        let mut suffix = 1;
        while taken.contains(&candidate) {
            candidate = format!("{}_{}", name, suffix);
            suffix += 1;
        }
        if candidate != name {
            debug!(header = %name, renamed = %candidate, "Duplicate header renamed");
        }
        taken.insert(candidate.clone());
        headers.push(candidate);
    }
    headers
}

fn to_upload_error(error: csv::Error) -> UploadError {
    let line = error.position().map(|position| position.line());
    UploadError::parse_failure(line, error.to_string())
}
