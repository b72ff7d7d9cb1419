use thiserror::Error;

use super::decoder::ScanState;

/// Errors returned by the hex nibble decoder.
///
/// # Examples
/// ```
/// use edidex_core::DecodeError;
///
/// let err = DecodeError::TooLarge { limit: 4096 };
/// assert!(err.to_string().contains("4096"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("hex dump exceeds {limit} bytes")]
    TooLarge { limit: usize },
    #[error("unexpected byte 0x{byte:02x} at offset {offset} while {state}")]
    UnexpectedByte {
        byte: u8,
        offset: usize,
        state: ScanState,
    },
    #[error("input ended at offset {offset} while {state}")]
    Truncated { offset: usize, state: ScanState },
    #[error("hex dump ended at offset {offset} before any byte was decoded")]
    Empty { offset: usize },
}
