//! Read-only access to the input file.
//!
//! The whole file is mapped once and exposed as a [`ByteView`](crate::ByteView); the mapping is
//! released when the [`MappedSource`] is dropped, on every exit path.

mod mapped;

pub use mapped::MappedSource;

use std::path::PathBuf;

use thiserror::Error;

/// Failures acquiring the input file. All of them are fatal to a run.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Unable to open file \"{}\": {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Unable to get length of file \"{}\": {source}", .path.display())]
    Metadata {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("File \"{}\" is empty.", .path.display())]
    Empty { path: PathBuf },
    #[error("Unable to map file \"{}\": {source}", .path.display())]
    Map {
        path: PathBuf,
        source: std::io::Error,
    },
}
