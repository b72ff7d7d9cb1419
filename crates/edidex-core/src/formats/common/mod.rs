//! Pieces shared by both dump dialects: the cursor view, the nibble decoder
//! and the limits both formats enforce.

pub mod decoder;
pub mod error;
pub mod layout;
pub mod view;

pub use decoder::{Dialect, ScanState, decode_hex_dump};
pub use error::DecodeError;
pub use view::ByteView;

use crate::formats::error::ScanError;

/// Validate a captured name slice and convert it to an owned string.
///
/// Names are measured in bytes; invalid UTF-8 is replaced rather than
/// rejected since driver logs are not guaranteed to be clean.
pub(crate) fn owned_name(raw: &[u8]) -> Result<String, ScanError> {
    if raw.is_empty() || raw.len() > layout::MAX_NAME_LEN {
        return Err(ScanError::NameLength {
            len: raw.len(),
            max: layout::MAX_NAME_LEN,
        });
    }
    Ok(String::from_utf8_lossy(raw).into_owned())
}
