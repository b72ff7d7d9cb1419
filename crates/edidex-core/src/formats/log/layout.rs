/// Marker that precedes every raw EDID dump in a verbose driver log.
pub const HEADER: &str = "Raw EDID bytes:";

/// Opening of the footer that names the display device.
pub const FOOTER_PREFIX: &str = "--- End of EDID for ";

/// Closing of the footer; the device name sits between prefix and suffix.
pub const FOOTER_SUFFIX: &str = " ---";
