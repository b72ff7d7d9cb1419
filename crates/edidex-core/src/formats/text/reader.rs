use crate::formats::common::layout::CRLF;
use crate::formats::common::{ByteView, owned_name};
use crate::formats::error::ScanError;

use super::layout;

/// Find the `Monitor Name : <name>` property after the cursor and return the name.
///
/// The value starts one character past the separator (the padding space) and
/// runs to the next CRLF.
///
/// # Examples
/// ```
/// use edidex_core::formats::text::reader::read_monitor_name;
/// use edidex_core::ByteView;
///
/// let mut view = ByteView::new(b"Monitor Name    : AppleStudio\r\n");
/// assert_eq!(read_monitor_name(&mut view).unwrap(), "AppleStudio");
/// ```
///
/// # Errors
/// Returns `ScanError` when the label or separator is missing, the value is
/// not CRLF-terminated, or the name length is out of range.
pub fn read_monitor_name(view: &mut ByteView<'_>) -> Result<String, ScanError> {
    if !view.seek_past(layout::NAME_LABEL.as_bytes()) {
        return Err(ScanError::MissingLabel {
            label: layout::NAME_LABEL,
        });
    }
    if !view.seek_past(layout::VALUE_SEPARATOR.as_bytes()) {
        return Err(ScanError::MissingLabel {
            label: layout::VALUE_SEPARATOR,
        });
    }
    view.advance(1);

    let start = view.position();
    let raw = view
        .take_until(CRLF)
        .ok_or(ScanError::UnterminatedName { offset: start })?;
    owned_name(raw)
}
