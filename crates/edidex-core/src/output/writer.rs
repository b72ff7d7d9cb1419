use std::ffi::OsString;
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};

use memmap2::MmapMut;
use thiserror::Error;
use tracing::debug;

use crate::EdidRecord;

/// Why a single blob could not be persisted.
#[derive(Debug, Error)]
pub enum WriteFailure {
    #[error("Unable to open file for writing: {0}")]
    Open(#[source] io::Error),
    #[error("Unable to set file size: {0}")]
    Size(#[source] io::Error),
    #[error("Unable to map file for copying: {0}")]
    Map(#[source] io::Error),
    #[error("Unable to flush copied bytes: {0}")]
    Copy(#[source] io::Error),
    #[error("Unable to close file: {0}")]
    Close(#[source] io::Error),
}

/// Result of one write attempt, with the uniquified destination.
#[derive(Debug)]
pub struct WriteOutcome {
    pub path: PathBuf,
    pub bytes: usize,
    pub result: Result<(), WriteFailure>,
}

impl WriteOutcome {
    pub fn is_written(&self) -> bool {
        self.result.is_ok()
    }
}

/// Writes records next to a shared base path, one unused name per record.
#[derive(Debug, Clone)]
pub struct BlobWriter {
    base: PathBuf,
}

impl BlobWriter {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Persist `record` under the first unused variant of the base path.
    pub fn write(&self, record: &EdidRecord) -> WriteOutcome {
        let path = unique_path(&self.base);
        let result = write_blob(&path, &record.bytes);
        debug!(path = %path.display(), ok = result.is_ok(), "write attempt");
        WriteOutcome {
            path,
            bytes: record.bytes.len(),
            result,
        }
    }
}

/// First of `base`, `base.0`, `base.1`, … that does not exist yet.
///
/// The check and the later create are separate steps: two writers racing on
/// the same directory may pick the same name, and the last one wins.
///
/// # Examples
/// ```
/// use edidex_core::output::unique_path;
///
/// let dir = tempfile::tempdir()?;
/// let base = dir.path().join("edid.bin");
/// assert_eq!(unique_path(&base), base);
///
/// std::fs::write(&base, [0u8])?;
/// assert_eq!(unique_path(&base), dir.path().join("edid.bin.0"));
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn unique_path(base: &Path) -> PathBuf {
    let mut candidate = base.to_path_buf();
    let mut suffix = 0u64;
    while candidate.exists() {
        candidate = with_suffix(base, suffix);
        suffix += 1;
    }
    candidate
}

fn with_suffix(base: &Path, suffix: u64) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(format!(".{suffix}"));
    PathBuf::from(name)
}

/// Create (or truncate) `path`, size it to `bytes` and copy them in through a
/// writable mapping.
///
/// # Errors
/// Returns the `WriteFailure` for the first step that failed.
pub fn write_blob(path: &Path, bytes: &[u8]) -> Result<(), WriteFailure> {
    let mut options = OpenOptions::new();
    options.read(true).write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }
    let file = options.open(path).map_err(WriteFailure::Open)?;

    file.set_len(bytes.len() as u64)
        .map_err(WriteFailure::Size)?;

    if !bytes.is_empty() {
        // SAFETY: the file was just created by us and is sized to exactly
        // `bytes.len()`; the mapping is dropped before the file is closed.
        let mut map = unsafe { MmapMut::map_mut(&file) }.map_err(WriteFailure::Map)?;
        map.copy_from_slice(bytes);
        map.flush().map_err(WriteFailure::Copy)?;
    }

    file.sync_all().map_err(WriteFailure::Close)
}

#[cfg(test)]
mod tests {
    use super::{BlobWriter, WriteFailure, unique_path, write_blob};
    use crate::EdidRecord;
    use std::fs;

    #[test]
    fn suffixes_count_up_from_zero() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("edid.bin");
        fs::write(&base, b"a").unwrap();
        fs::write(dir.path().join("edid.bin.0"), b"b").unwrap();
        assert_eq!(unique_path(&base), dir.path().join("edid.bin.1"));
    }

    #[test]
    fn write_blob_round_trips_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        let bytes: Vec<u8> = (0..=255).collect();
        write_blob(&path, &bytes).unwrap();
        assert_eq!(fs::read(&path).unwrap(), bytes);
    }

    #[test]
    fn write_blob_into_missing_directory_fails_on_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent").join("edid.bin");
        let err = write_blob(&path, &[1, 2, 3]).unwrap_err();
        assert!(matches!(err, WriteFailure::Open(_)));
        assert!(err.to_string().starts_with("Unable to open file for writing"));
    }

    #[test]
    #[cfg(unix)]
    fn written_files_are_owner_read_write() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edid.bin");
        write_blob(&path, &[0xff]).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o600, 0o600);
        assert_eq!(mode & 0o111, 0);
    }

    #[test]
    fn writer_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let writer = BlobWriter::new(dir.path().join("edid.bin"));
        let first = EdidRecord::new(vec![1, 2], Some("A".to_string()));
        let second = EdidRecord::new(vec![3, 4, 5], Some("B".to_string()));
        let third = EdidRecord::new(vec![6], None);

        let paths: Vec<_> = [&first, &second, &third]
            .into_iter()
            .map(|record| {
                let outcome = writer.write(record);
                assert!(outcome.is_written());
                outcome.path
            })
            .collect();

        assert_eq!(paths[0], dir.path().join("edid.bin"));
        assert_eq!(paths[1], dir.path().join("edid.bin.0"));
        assert_eq!(paths[2], dir.path().join("edid.bin.1"));
        assert_eq!(fs::read(&paths[0]).unwrap(), vec![1, 2]);
        assert_eq!(fs::read(&paths[1]).unwrap(), vec![3, 4, 5]);
        assert_eq!(fs::read(&paths[2]).unwrap(), vec![6]);
    }
}
