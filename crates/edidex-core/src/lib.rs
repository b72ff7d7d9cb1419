//! edidex core library: EDID extraction from driver logs and text dumps.
//!
//! The input file is mapped once and exposed as a [`ByteView`]. Detection
//! picks one of two dialects (verbose driver log or plain text dump), a
//! scanner pairs the shared nibble decoder with that dialect's footer/label
//! grammar, and every decoded blob becomes an [`EdidRecord`]. The records are
//! then written next to a single base path, each under its own unused name.
//!
//! Invariants:
//! - The source mapping is released before any output is written.
//! - A record always holds between 1 and 4096 bytes.
//! - Output never replaces an existing file; collisions get `.0`, `.1`, …
//! - A malformed log dump ends the scan; earlier records are kept.
//!
//! # Examples
//! ```no_run
//! use std::path::PathBuf;
//!
//! use edidex_core::{ConsoleReporter, ExtractOptions, extract_edids};
//!
//! let options = ExtractOptions::new(PathBuf::from("nvidia-bug-report.log"));
//! let summary = extract_edids(&options, &mut ConsoleReporter::default())?;
//! println!("found {} EDIDs", summary.edids_found);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

mod extraction;
pub mod formats;
pub mod output;
mod report;
mod source;

pub use extraction::{ExtractError, ExtractOptions, extract_edids, extract_edids_with};
pub use formats::common::{ByteView, DecodeError, Dialect, ScanState, decode_hex_dump};
pub use formats::{
    FileClassification, LogScanner, RecordSource, ScanError, TextScanner, collect_records,
    detect_format, scan_bytes,
};
pub use report::{ConsoleReporter, MemoryReporter, Reporter};
pub use source::{MappedSource, SourceError};

/// Current summary schema version.
pub const SUMMARY_VERSION: u32 = 1;

/// Name printed for records whose footer carried no device name.
pub const UNKNOWN_DISPLAY: &str = "unknown display";

/// One decoded EDID blob and the device name found next to it.
///
/// # Examples
/// ```
/// use edidex_core::EdidRecord;
///
/// let record = EdidRecord::new(vec![0x00, 0xff], Some("DFP-0".to_string()));
/// assert_eq!(record.display_name(), "DFP-0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdidRecord {
    /// Decoded bytes, exactly one per nibble pair.
    pub bytes: Vec<u8>,
    /// Device or monitor name, when the dump carried one.
    pub name: Option<String>,
}

impl EdidRecord {
    pub fn new(bytes: Vec<u8>, name: Option<String>) -> Self {
        Self { bytes, name }
    }

    /// The name to show in report lines.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN_DISPLAY)
    }
}

/// Tool metadata embedded in summaries.
///
/// # Examples
/// ```
/// use edidex_core::ToolInfo;
///
/// let tool = ToolInfo {
///     name: "edidex".to_string(),
///     version: "0.1.0".to_string(),
/// };
/// assert_eq!(tool.name, "edidex");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name (e.g., "edidex").
    pub name: String,
    /// Tool version (semver).
    pub version: String,
}

/// Input file metadata embedded in summaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided by the caller.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// Outcome of one write attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteStatus {
    Written,
    Failed,
}

/// Per-record entry of an [`ExtractionSummary`].
///
/// # Examples
/// ```
/// use edidex_core::{WriteReport, WriteStatus};
///
/// let report = WriteReport {
///     name: Some("AppleStudio".to_string()),
///     path: "./edid.bin".to_string(),
///     bytes: 128,
///     status: WriteStatus::Written,
///     error: None,
/// };
/// assert_eq!(report.bytes, 128);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteReport {
    /// Device name of the record, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Destination after uniquification.
    pub path: String,
    /// Number of bytes in the record.
    pub bytes: usize,
    pub status: WriteStatus,
    /// Failure reason for failed writes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of one extraction run.
///
/// # Examples
/// ```
/// use edidex_core::{ExtractionSummary, FileClassification};
///
/// let summary = ExtractionSummary::new("Xorg.0.log", 2048, FileClassification::Unrecognized, 0);
/// assert_eq!(summary.edids_found, 0);
/// assert!(summary.writes.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionSummary {
    /// Summary schema version (not the binary version).
    pub summary_version: u32,
    pub tool: ToolInfo,
    pub input: InputInfo,
    /// Dialect detected in the input.
    pub format: FileClassification,
    /// Number of records decoded from the input.
    pub edids_found: usize,
    /// Base output path shared by all records; absent when nothing was found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_base: Option<String>,
    /// Write attempts in discovery order.
    pub writes: Vec<WriteReport>,
}

impl ExtractionSummary {
    pub fn new(
        input_path: &str,
        input_bytes: u64,
        format: FileClassification,
        edids_found: usize,
    ) -> Self {
        Self {
            summary_version: SUMMARY_VERSION,
            tool: ToolInfo {
                name: "edidex".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            input: InputInfo {
                path: input_path.to_string(),
                bytes: input_bytes,
            },
            format,
            edids_found,
            output_base: None,
            writes: Vec::new(),
        }
    }

    pub fn written(&self) -> usize {
        self.writes
            .iter()
            .filter(|write| write.status == WriteStatus::Written)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.writes.len() - self.written()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_omits_optional_fields_when_none() {
        let mut summary = ExtractionSummary::new("Xorg.0.log", 10, FileClassification::LogStyle, 1);
        summary.writes.push(WriteReport {
            name: None,
            path: "./edid.bin".to_string(),
            bytes: 128,
            status: WriteStatus::Written,
            error: None,
        });

        let value = serde_json::to_value(&summary).expect("summary json");
        assert!(value.get("output_base").is_none());
        assert_eq!(value["format"], "log");
        let write = &value["writes"][0];
        assert!(write.get("name").is_none());
        assert!(write.get("error").is_none());
        assert_eq!(write["status"], "written");
    }

    #[test]
    fn counts_written_and_failed() {
        let mut summary = ExtractionSummary::new("dump.txt", 10, FileClassification::TextStyle, 2);
        for status in [WriteStatus::Written, WriteStatus::Failed] {
            summary.writes.push(WriteReport {
                name: Some("AppleStudio".to_string()),
                path: "edid.bin".to_string(),
                bytes: 128,
                status,
                error: None,
            });
        }
        assert_eq!(summary.written(), 1);
        assert_eq!(summary.failed(), 1);
    }

    #[test]
    fn unnamed_record_uses_placeholder() {
        let record = EdidRecord::new(vec![1], None);
        assert_eq!(record.display_name(), UNKNOWN_DISPLAY);
    }
}
