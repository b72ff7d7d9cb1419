use tracing::debug;

use crate::EdidRecord;
use crate::formats::RecordSource;
use crate::formats::common::{ByteView, Dialect, decode_hex_dump};
use crate::formats::error::ScanError;

use super::layout;
use super::reader::read_footer_name;

/// Scanner for verbose X server / driver logs.
///
/// Each `Raw EDID bytes:` header starts one record. The first record that
/// fails to decode or to name ends the scan: everything after a malformed
/// dump is treated as unparseable.
pub struct LogScanner<'a> {
    view: ByteView<'a>,
    finished: bool,
}

impl<'a> LogScanner<'a> {
    pub fn new(mut view: ByteView<'a>) -> Self {
        view.rewind();
        Self {
            view,
            finished: false,
        }
    }
}

impl RecordSource for LogScanner<'_> {
    fn next_record(&mut self) -> Result<Option<EdidRecord>, ScanError> {
        if self.finished {
            return Ok(None);
        }
        if !self.view.seek_past(layout::HEADER.as_bytes()) {
            self.finished = true;
            return Ok(None);
        }

        let header_end = self.view.position();
        match read_record(&mut self.view) {
            Ok(record) => {
                debug!(
                    offset = header_end,
                    bytes = record.bytes.len(),
                    name = record.display_name(),
                    "decoded log EDID"
                );
                Ok(Some(record))
            }
            Err(err) => {
                self.finished = true;
                Err(err)
            }
        }
    }
}

fn read_record(view: &mut ByteView<'_>) -> Result<EdidRecord, ScanError> {
    let bytes = decode_hex_dump(view, Dialect::Log)?;
    let name = read_footer_name(view)?;
    Ok(EdidRecord::new(bytes, Some(name)))
}
