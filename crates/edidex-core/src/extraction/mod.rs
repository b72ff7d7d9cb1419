use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::formats::scan_bytes;
use crate::output::{BlobWriter, Environment, SystemEnvironment, WriteOutcome, resolve_output_base};
use crate::report::Reporter;
use crate::source::{MappedSource, SourceError};
use crate::{EdidRecord, ExtractionSummary, WriteReport, WriteStatus};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// What to extract and where to put it.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Log or text file to scan.
    pub input: PathBuf,
    /// Explicit output base path; `~` is expanded.
    pub output: Option<PathBuf>,
}

impl ExtractOptions {
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            output: None,
        }
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }
}

/// Extract every EDID in `options.input` and write each one to disk.
///
/// # Errors
/// Returns `ExtractError` only when the input cannot be opened, sized or
/// mapped, or is empty. Parse and write failures are reported through
/// `reporter` and recorded in the summary.
pub fn extract_edids<R: Reporter + ?Sized>(
    options: &ExtractOptions,
    reporter: &mut R,
) -> Result<ExtractionSummary, ExtractError> {
    extract_edids_with(options, &SystemEnvironment, reporter)
}

/// [`extract_edids`] with an explicit environment for output naming.
///
/// # Errors
/// See [`extract_edids`].
pub fn extract_edids_with<E, R>(
    options: &ExtractOptions,
    env: &E,
    reporter: &mut R,
) -> Result<ExtractionSummary, ExtractError>
where
    E: Environment + ?Sized,
    R: Reporter + ?Sized,
{
    let (input_bytes, format, records) = {
        let source = MappedSource::open(&options.input)?;
        let (format, records) = scan_bytes(source.bytes());
        (source.len(), format, records)
    };

    reporter.info(&found_message(records.len(), &options.input));
    let mut summary = ExtractionSummary::new(
        &options.input.display().to_string(),
        input_bytes,
        format,
        records.len(),
    );
    if records.is_empty() {
        return Ok(summary);
    }

    let base = resolve_output_base(options.output.as_deref(), env);
    info!(base = %base.display(), count = records.len(), "writing EDIDs");
    summary.output_base = Some(base.display().to_string());

    let writer = BlobWriter::new(base);
    for record in records {
        let outcome = writer.write(&record);
        match &outcome.result {
            Ok(()) => reporter.info(&written_message(&record, &outcome)),
            Err(failure) => {
                warn!(path = %outcome.path.display(), error = %failure, "EDID write failed");
                reporter.error(&failed_message(&record, &outcome));
            }
        }
        summary.writes.push(write_report(record, outcome));
    }

    Ok(summary)
}

fn write_report(record: EdidRecord, outcome: WriteOutcome) -> WriteReport {
    let (status, error) = match outcome.result {
        Ok(()) => (WriteStatus::Written, None),
        Err(failure) => (WriteStatus::Failed, Some(failure.to_string())),
    };
    WriteReport {
        name: record.name,
        path: outcome.path.display().to_string(),
        bytes: outcome.bytes,
        status,
        error,
    }
}

fn found_message(count: usize, input: &Path) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("Found {count} EDID{plural} in \"{}\".", input.display())
}

fn written_message(record: &EdidRecord, outcome: &WriteOutcome) -> String {
    format!(
        "  Wrote EDID for \"{}\" to \"{}\" ({} bytes).",
        record.display_name(),
        outcome.path.display(),
        outcome.bytes
    )
}

fn failed_message(record: &EdidRecord, outcome: &WriteOutcome) -> String {
    let reason = match &outcome.result {
        Ok(()) => String::new(),
        Err(failure) => failure.to_string(),
    };
    format!(
        "Failed to write EDID for \"{}\" to \"{}\" ({reason})",
        record.display_name(),
        outcome.path.display()
    )
}

#[cfg(test)]
mod tests {
    use super::{ExtractOptions, extract_edids_with, found_message};
    use crate::output::Environment;
    use crate::{ExtractError, FileClassification, MemoryReporter, SourceError, WriteStatus};
    use std::fs;
    use std::path::{Path, PathBuf};

    struct NoHome;

    impl Environment for NoHome {
        fn home_dir(&self) -> Option<PathBuf> {
            None
        }

        fn is_accessible(&self, _dir: &Path) -> bool {
            false
        }
    }

    const LOG: &[u8] = b"(--) NVIDIA(0): Raw EDID bytes:\n\
(--) NVIDIA(0):   00 ff ff ff ff ff ff 00\n\
(--) NVIDIA(0): --- End of EDID for CRT-0 ---\n";

    #[test]
    fn found_message_pluralizes() {
        assert_eq!(
            found_message(1, Path::new("x.log")),
            "Found 1 EDID in \"x.log\"."
        );
        assert_eq!(
            found_message(0, Path::new("x.log")),
            "Found 0 EDIDs in \"x.log\"."
        );
    }

    #[test]
    fn writes_records_to_explicit_base() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("Xorg.0.log");
        fs::write(&input, LOG).unwrap();
        let base = dir.path().join("crt.bin");

        let options = ExtractOptions::new(input).with_output(Some(base.clone()));
        let mut reporter = MemoryReporter::default();
        let summary = extract_edids_with(&options, &NoHome, &mut reporter).unwrap();

        assert_eq!(summary.format, FileClassification::LogStyle);
        assert_eq!(summary.edids_found, 1);
        assert_eq!(summary.writes[0].status, WriteStatus::Written);
        assert_eq!(fs::read(&base).unwrap(), vec![0, 255, 255, 255, 255, 255, 255, 0]);
        assert_eq!(
            reporter.infos[1],
            format!("  Wrote EDID for \"CRT-0\" to \"{}\" (8 bytes).", base.display())
        );
        assert!(reporter.errors.is_empty());
    }

    #[test]
    fn write_failure_is_reported_and_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("Xorg.0.log");
        fs::write(&input, LOG).unwrap();
        let base = dir.path().join("missing-dir").join("edid.bin");

        let options = ExtractOptions::new(input).with_output(Some(base));
        let mut reporter = MemoryReporter::default();
        let summary = extract_edids_with(&options, &NoHome, &mut reporter).unwrap();

        assert_eq!(summary.failed(), 1);
        assert!(summary.writes[0].error.is_some());
        assert_eq!(reporter.errors.len(), 1);
        assert!(reporter.errors[0].starts_with("Failed to write EDID for \"CRT-0\""));
        assert!(reporter.errors[0].contains("(Unable to open file for writing"));
    }

    #[test]
    fn empty_input_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("empty.log");
        fs::write(&input, b"").unwrap();

        let mut reporter = MemoryReporter::default();
        let err = extract_edids_with(&ExtractOptions::new(input), &NoHome, &mut reporter)
            .unwrap_err();
        assert!(matches!(err, ExtractError::Source(SourceError::Empty { .. })));
        assert!(reporter.infos.is_empty());
    }
}
