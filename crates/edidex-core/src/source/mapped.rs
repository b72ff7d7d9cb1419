use std::fs::File;
use std::path::{Path, PathBuf};

use memmap2::Mmap;

use super::SourceError;
use crate::ByteView;

/// An input file mapped read-only for the duration of a scan.
#[derive(Debug)]
pub struct MappedSource {
    path: PathBuf,
    map: Mmap,
}

impl MappedSource {
    /// Open and map `path`.
    ///
    /// # Errors
    /// Returns `SourceError` when the file cannot be opened, sized or mapped,
    /// or when it is empty.
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path).map_err(|source| SourceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let len = file
            .metadata()
            .map_err(|source| SourceError::Metadata {
                path: path.to_path_buf(),
                source,
            })?
            .len();
        if len == 0 {
            return Err(SourceError::Empty {
                path: path.to_path_buf(),
            });
        }

        // SAFETY: the mapping is read-only and only lives as long as this
        // value; concurrent truncation by another process is outside our
        // control, as with any mapped read.
        let map = unsafe { Mmap::map(&file) }.map_err(|source| SourceError::Map {
            path: path.to_path_buf(),
            source,
        })?;

        #[cfg(unix)]
        {
            let _ = map.advise(memmap2::Advice::Sequential);
        }

        Ok(Self {
            path: path.to_path_buf(),
            map,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> u64 {
        self.map.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.map
    }

    /// A fresh view over the whole file, cursor at the start.
    pub fn view(&self) -> ByteView<'_> {
        ByteView::new(&self.map)
    }
}

#[cfg(test)]
mod tests {
    use super::MappedSource;
    use crate::source::SourceError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn maps_whole_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"Raw EDID bytes:").unwrap();
        file.flush().unwrap();

        let source = MappedSource::open(file.path()).unwrap();
        assert_eq!(source.len(), 15);
        assert_eq!(source.bytes(), b"Raw EDID bytes:");
        assert_eq!(source.view().position(), 0);
        assert_eq!(source.path(), file.path());
    }

    #[test]
    fn empty_file_is_rejected() {
        let file = NamedTempFile::new().unwrap();
        let err = match MappedSource::open(file.path()) {
            Ok(_) => panic!("expected empty file to be rejected"),
            Err(err) => err,
        };
        assert!(matches!(err, SourceError::Empty { .. }));
        assert!(err.to_string().ends_with("is empty."));
    }

    #[test]
    fn missing_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = match MappedSource::open(&dir.path().join("missing.log")) {
            Ok(_) => panic!("expected missing file to be rejected"),
            Err(err) => err,
        };
        assert!(matches!(err, SourceError::Open { .. }));
        assert!(err.to_string().starts_with("Unable to open file"));
    }
}
