use tracing::debug;

use crate::EdidRecord;
use crate::formats::RecordSource;
use crate::formats::common::{ByteView, Dialect, decode_hex_dump};
use crate::formats::error::ScanError;

use super::reader::read_monitor_name;

/// Scanner for plain text EDID dumps.
///
/// The hex table must start at the top of the file, and a text dump holds a
/// single EDID; after one attempt the scanner is exhausted whatever the
/// outcome.
pub struct TextScanner<'a> {
    view: ByteView<'a>,
    exhausted: bool,
}

impl<'a> TextScanner<'a> {
    pub fn new(view: ByteView<'a>) -> Self {
        Self {
            view,
            exhausted: false,
        }
    }
}

impl RecordSource for TextScanner<'_> {
    fn next_record(&mut self) -> Result<Option<EdidRecord>, ScanError> {
        if self.exhausted {
            return Ok(None);
        }
        self.exhausted = true;
        self.view.rewind();

        let bytes = decode_hex_dump(&mut self.view, Dialect::Text)?;
        let name = read_monitor_name(&mut self.view)?;
        let record = EdidRecord::new(bytes, Some(name));
        debug!(
            bytes = record.bytes.len(),
            name = record.display_name(),
            "decoded text EDID"
        );
        Ok(Some(record))
    }
}
