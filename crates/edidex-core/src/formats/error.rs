use thiserror::Error;

use super::common::DecodeError;

/// Errors raised while turning one dump into an [`EdidRecord`](crate::EdidRecord).
///
/// # Examples
/// ```
/// use edidex_core::ScanError;
///
/// let err = ScanError::NameLength { len: 0, max: 512 };
/// assert!(err.to_string().contains("name length 0"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("hex dump decode failed: {0}")]
    Decode(#[from] DecodeError),
    #[error("expected `{expected}` at offset {offset}")]
    MissingFooter {
        expected: &'static str,
        offset: usize,
    },
    #[error("label `{label}` not found after the hex dump")]
    MissingLabel { label: &'static str },
    #[error("device name starting at offset {offset} is not terminated")]
    UnterminatedName { offset: usize },
    #[error("device name length {len} outside 1..={max}")]
    NameLength { len: usize, max: usize },
}
