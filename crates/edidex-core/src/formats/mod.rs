//! Dump format detection and decoding.
//!
//! Each dialect follows a layered structure:
//! - `layout`: literal markers (source of truth for the textual protocol)
//! - `reader`: name/footer grammar over a [`ByteView`]
//! - `parser`: scanner driving the shared nibble decoder
//!
//! Shared pieces live in `common`. Everything here is pure and works on a
//! borrowed byte view; file access lives in `source` and `output`.

pub mod common;
pub mod error;
pub mod log;
pub mod text;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::EdidRecord;
pub use common::ByteView;
pub use error::ScanError;
pub use log::LogScanner;
pub use text::TextScanner;

/// Producer of decoded EDID records, one per call.
pub trait RecordSource {
    /// Return the next record, `Ok(None)` once no more dumps can be found.
    ///
    /// # Errors
    /// Returns `ScanError` when a dump was located but could not be decoded
    /// or named.
    fn next_record(&mut self) -> Result<Option<EdidRecord>, ScanError>;
}

/// Which dump dialect a file contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileClassification {
    #[serde(rename = "log")]
    LogStyle,
    #[serde(rename = "text")]
    TextStyle,
    Unrecognized,
}

impl fmt::Display for FileClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FileClassification::LogStyle => "log",
            FileClassification::TextStyle => "text",
            FileClassification::Unrecognized => "unrecognized",
        };
        f.write_str(label)
    }
}

/// Classify the whole view, leaving its cursor at the start.
///
/// A log header wins over a text marker when both are present.
///
/// # Examples
/// ```
/// use edidex_core::{ByteView, FileClassification, detect_format};
///
/// let mut view = ByteView::new(b"EDID Version : 1.3\r\n");
/// assert_eq!(detect_format(&mut view), FileClassification::TextStyle);
/// assert_eq!(view.position(), 0);
/// ```
pub fn detect_format(view: &mut ByteView<'_>) -> FileClassification {
    view.rewind();
    let classification = if view.find(log::layout::HEADER.as_bytes()).is_some() {
        FileClassification::LogStyle
    } else if view.find(text::layout::VERSION_MARKER.as_bytes()).is_some() {
        FileClassification::TextStyle
    } else {
        FileClassification::Unrecognized
    };
    view.rewind();
    classification
}

/// Drain `source`, keeping every record produced before the first failure.
pub fn collect_records<S: RecordSource>(mut source: S) -> Vec<EdidRecord> {
    let mut records = Vec::new();
    loop {
        match source.next_record() {
            Ok(Some(record)) => records.push(record),
            Ok(None) => break,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    kept = records.len(),
                    "stopped scanning after malformed EDID dump"
                );
                break;
            }
        }
    }
    records
}

/// Classify `data` and decode every EDID it holds.
///
/// # Examples
/// ```
/// use edidex_core::{FileClassification, scan_bytes};
///
/// let log = b"(--) GPU(0): Raw EDID bytes:\n(--) GPU(0):   00 ff\n\
/// (--) GPU(0): --- End of EDID for DFP-0 ---\n";
/// let (format, records) = scan_bytes(log);
/// assert_eq!(format, FileClassification::LogStyle);
/// assert_eq!(records[0].bytes, vec![0x00, 0xff]);
/// assert_eq!(records[0].name.as_deref(), Some("DFP-0"));
/// ```
pub fn scan_bytes(data: &[u8]) -> (FileClassification, Vec<EdidRecord>) {
    let mut view = ByteView::new(data);
    let classification = detect_format(&mut view);
    tracing::debug!(format = %classification, bytes = data.len(), "classified input");
    let records = match classification {
        FileClassification::LogStyle => collect_records(LogScanner::new(view)),
        FileClassification::TextStyle => collect_records(TextScanner::new(view)),
        FileClassification::Unrecognized => Vec::new(),
    };
    (classification, records)
}
