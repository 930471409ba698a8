//! One-shot file upload: type gate, read, parse, load.
//!
//! The read is a single blocking call with three outcomes. It is never
//! cancelled half way; an abort raised while it runs only changes how the
//! finished read is reported.

use crate::dataset::Dataset;
use crate::error::UploadError;
use crate::io::csv_reader::parse_csv_str;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

const CSV_EXTENSION: &str = ".csv";
const CSV_MIME_TYPE: &str = "text/csv";

/// Result of reading the uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// Full file content
    Loaded(String),
    /// The read failed
    Failed { code: String, message: String },
    /// The upload was aborted
    Aborted,
}

/// Shared flag used to abort an upload (set from the Ctrl-C handler).
///
/// Also tracks whether a read is in flight, so the handler can tell if the
/// flag will still be observed.
#[derive(Debug, Clone, Default)]
pub struct AbortHandle {
    aborted: Arc<AtomicBool>,
    reading: Arc<AtomicBool>,
}

/// Marks a read as in flight until dropped.
pub(crate) struct ReadGuard<'a>(&'a AtomicBool);

impl Drop for ReadGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl AbortHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the flag. Returns `true` when a read is in flight and will
    /// report [`ReadOutcome::Aborted`]; `false` means nothing is listening.
    pub fn abort(&self) -> bool {
        self.aborted.store(true, Ordering::SeqCst);
        self.reading.load(Ordering::SeqCst)
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::SeqCst)
    }

    pub(crate) fn begin_read(&self) -> ReadGuard<'_> {
        self.reading.store(true, Ordering::SeqCst);
        ReadGuard(&self.reading)
    }
}

/// Accept files named `*.csv` or typed `text/csv`.
pub fn check_file_type(name: &str, mime: Option<&str>) -> Result<(), UploadError> {
    if name.ends_with(CSV_EXTENSION) || mime == Some(CSV_MIME_TYPE) {
        Ok(())
    } else {
        Err(UploadError::rejected(name))
    }
}

/// Decode file bytes as UTF-8, replacing invalid sequences and dropping a BOM.
pub fn decode_text(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text.into_owned(),
    }
}

/// Read the whole file in one go.
pub fn read_upload(path: &Path, abort: &AbortHandle) -> ReadOutcome {
    // held until the post-read abort check below has run
    let _guard = abort.begin_read();
    if abort.is_aborted() {
        return ReadOutcome::Aborted;
    }

    match fs::read(path) {
        Ok(_) if abort.is_aborted() => ReadOutcome::Aborted,
        Ok(bytes) => {
            debug!(path = %path.display(), bytes = bytes.len(), "File read");
            ReadOutcome::Loaded(decode_text(&bytes))
        }
        Err(e) if e.kind() == ErrorKind::Interrupted => ReadOutcome::Aborted,
        Err(e) => {
            let code = e
                .raw_os_error()
                .map(|code| code.to_string())
                .unwrap_or_else(|| format!("{:?}", e.kind()));
            ReadOutcome::Failed {
                code,
                message: e.to_string(),
            }
        }
    }
}

/// Turn raw CSV text into a dataset.
pub fn load_from_text(text: &str) -> Result<Dataset, UploadError> {
    if text.trim().is_empty() {
        return Err(UploadError::EmptyFileContent);
    }
    let table = parse_csv_str(text)?;
    Dataset::from_records(table.headers, table.records)
}

/// Map a read outcome onto the upload error taxonomy and load the dataset.
pub fn load_dataset(outcome: ReadOutcome) -> Result<Dataset, UploadError> {
    match outcome {
        ReadOutcome::Loaded(text) => load_from_text(&text),
        ReadOutcome::Failed { code, message } => Err(UploadError::read_failed(code, message)),
        ReadOutcome::Aborted => Err(UploadError::FileReadAborted),
    }
}

/// Full upload pipeline for a file on disk.
pub fn upload_file(
    path: &Path,
    mime: Option<&str>,
    abort: &AbortHandle,
) -> Result<Dataset, UploadError> {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    check_file_type(&name, mime)?;

    info!(path = %path.display(), "📂 Loading upload");
    let result = load_dataset(read_upload(path, abort));
    if let Err(e) = &result {
        debug!(path = %path.display(), error = %e, "Upload rejected");
    }
    result
}
