use crate::formats::common::{ByteView, owned_name};
use crate::formats::error::ScanError;

use super::layout;

/// Parse `--- End of EDID for <name> ---` at the cursor and return the name.
///
/// The cursor must sit on the first `-` of the footer, which is where the log
/// dialect of the decoder stops. On success the cursor is left just past the
/// closing ` ---`.
///
/// # Examples
/// ```
/// use edidex_core::formats::log::reader::read_footer_name;
/// use edidex_core::ByteView;
///
/// let mut view = ByteView::new(b"--- End of EDID for DELL U2410 (DFP-0) ---\n");
/// assert_eq!(read_footer_name(&mut view).unwrap(), "DELL U2410 (DFP-0)");
/// ```
///
/// # Errors
/// Returns `ScanError` when the footer prefix is absent, the closing marker
/// never appears, or the name length is out of range.
pub fn read_footer_name(view: &mut ByteView<'_>) -> Result<String, ScanError> {
    if !view.starts_with(layout::FOOTER_PREFIX.as_bytes()) {
        return Err(ScanError::MissingFooter {
            expected: layout::FOOTER_PREFIX,
            offset: view.position(),
        });
    }
    view.advance(layout::FOOTER_PREFIX.len());

    let start = view.position();
    let raw = view
        .take_until(layout::FOOTER_SUFFIX.as_bytes())
        .ok_or(ScanError::UnterminatedName { offset: start })?;
    let name = owned_name(raw)?;
    view.advance(layout::FOOTER_SUFFIX.len());
    Ok(name)
}
