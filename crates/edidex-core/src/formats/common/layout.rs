/// Upper bound on the number of bytes a single hex dump may decode to.
pub const MAX_EDID_SIZE: usize = 4096;

/// Longest device name accepted from a footer or label, in bytes.
pub const MAX_NAME_LEN: usize = 512;

/// Line terminator used by text-style dumps.
pub const CRLF: &[u8; 2] = b"\r\n";
