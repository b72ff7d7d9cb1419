//! Two-phase hex nibble decoder.
//!
//! The decoder walks a [`ByteView`] one byte at a time, pairing a high nibble
//! with a low nibble to produce each output byte. Between byte pairs the
//! active [`Dialect`] decides which bytes are noise (line labels, separators,
//! ASCII side columns) and which byte sequence closes the dump. Noise is never
//! accepted between the two nibbles of a byte.

use std::fmt;

use super::error::DecodeError;
use super::layout::{CRLF, MAX_EDID_SIZE};
use super::view::ByteView;

/// Position of the decoder within the current byte pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    SeekingTopNibble,
    SeekingBottomNibble,
    SeekingEndOfLabel,
}

impl fmt::Display for ScanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ScanState::SeekingTopNibble => "seeking high nibble",
            ScanState::SeekingBottomNibble => "seeking low nibble",
            ScanState::SeekingEndOfLabel => "skipping label",
        };
        f.write_str(label)
    }
}

/// Label and terminator rules for one textual dump encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Driver log lines prefixed with `(--) NVIDIA(0):`, closed by a `---` footer.
    Log,
    /// Dash-separated table with an ASCII side column, closed by a blank CRLF line.
    Text,
}

enum Step {
    Advance,
    Finish,
}

struct HexNibbleDecoder {
    dialect: Dialect,
    state: ScanState,
    high: u8,
    bytes: Vec<u8>,
}

/// Decode a label-interspersed hex dump starting at the view's cursor.
///
/// On success the cursor rests on the first byte of the closing sequence
/// (the `-` of a log footer, or the first `\r` of a text dump's blank line).
///
/// # Examples
/// ```
/// use edidex_core::{ByteView, Dialect, decode_hex_dump};
///
/// let mut view = ByteView::new(b"\n(--) GPU(0):   00 ff 7a\n(--) GPU(0): ---");
/// let bytes = decode_hex_dump(&mut view, Dialect::Log)?;
/// assert_eq!(bytes, vec![0x00, 0xff, 0x7a]);
/// assert!(view.starts_with(b"---"));
/// # Ok::<(), edidex_core::DecodeError>(())
/// ```
///
/// # Errors
/// Returns `DecodeError` when the dump holds an unexpected byte, grows past
/// [`MAX_EDID_SIZE`], ends before its terminator, or terminates empty.
pub fn decode_hex_dump(view: &mut ByteView<'_>, dialect: Dialect) -> Result<Vec<u8>, DecodeError> {
    HexNibbleDecoder::new(dialect).run(view)
}

impl HexNibbleDecoder {
    fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            state: ScanState::SeekingTopNibble,
            high: 0,
            bytes: Vec::new(),
        }
    }

    fn run(mut self, view: &mut ByteView<'_>) -> Result<Vec<u8>, DecodeError> {
        loop {
            let byte = view.peek().ok_or(DecodeError::Truncated {
                offset: view.position(),
                state: self.state,
            })?;
            let step = match self.state {
                ScanState::SeekingTopNibble => self.top_nibble(view, byte)?,
                ScanState::SeekingBottomNibble => self.bottom_nibble(view, byte)?,
                ScanState::SeekingEndOfLabel => self.end_of_label(view, byte),
            };
            match step {
                Step::Advance => view.advance(1),
                Step::Finish => return self.finish(view),
            }
        }
    }

    fn top_nibble(&mut self, view: &ByteView<'_>, byte: u8) -> Result<Step, DecodeError> {
        match self.dialect {
            Dialect::Log => {
                if byte == b'\n' {
                    self.state = ScanState::SeekingEndOfLabel;
                    return Ok(Step::Advance);
                }
                if is_space(byte) {
                    return Ok(Step::Advance);
                }
                if let Some(nibble) = hex_nibble(byte) {
                    self.begin_byte(nibble);
                    return Ok(Step::Advance);
                }
                if byte == b'-' {
                    return Ok(Step::Finish);
                }
            }
            Dialect::Text => {
                if let Some(nibble) = hex_nibble(byte) {
                    self.begin_byte(nibble);
                    return Ok(Step::Advance);
                }
                if byte == b'-' {
                    return Ok(Step::Advance);
                }
                if is_space(byte) {
                    if view.peek_at(1).is_some_and(is_space) {
                        self.state = ScanState::SeekingEndOfLabel;
                    }
                    return Ok(Step::Advance);
                }
            }
        }
        Err(self.unexpected(view, byte))
    }

    fn bottom_nibble(&mut self, view: &ByteView<'_>, byte: u8) -> Result<Step, DecodeError> {
        let nibble = hex_nibble(byte).ok_or_else(|| self.unexpected(view, byte))?;
        if self.bytes.len() >= MAX_EDID_SIZE {
            return Err(DecodeError::TooLarge {
                limit: MAX_EDID_SIZE,
            });
        }
        self.bytes.push(self.high | nibble);
        self.state = ScanState::SeekingTopNibble;
        Ok(Step::Advance)
    }

    fn end_of_label(&mut self, view: &ByteView<'_>, byte: u8) -> Step {
        match self.dialect {
            Dialect::Log => {
                if byte == b':' {
                    self.state = ScanState::SeekingTopNibble;
                }
                Step::Advance
            }
            Dialect::Text => {
                if view.starts_with(CRLF) {
                    let mut after = view.clone();
                    after.advance(CRLF.len());
                    if after.starts_with(CRLF) {
                        return Step::Finish;
                    }
                    self.state = ScanState::SeekingTopNibble;
                }
                Step::Advance
            }
        }
    }

    fn begin_byte(&mut self, nibble: u8) {
        self.high = nibble << 4;
        self.state = ScanState::SeekingBottomNibble;
    }

    fn unexpected(&self, view: &ByteView<'_>, byte: u8) -> DecodeError {
        DecodeError::UnexpectedByte {
            byte,
            offset: view.position(),
            state: self.state,
        }
    }

    fn finish(self, view: &ByteView<'_>) -> Result<Vec<u8>, DecodeError> {
        if self.bytes.is_empty() {
            return Err(DecodeError::Empty {
                offset: view.position(),
            });
        }
        Ok(self.bytes)
    }
}

fn hex_nibble(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

// Matches the C locale `isspace` set, which includes vertical tab.
fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}
