/// Property line present in every text-style dump; used to detect the format.
pub const VERSION_MARKER: &str = "EDID Version";

/// Property line carrying the monitor name.
pub const NAME_LABEL: &str = "Monitor Name";

/// Separator between a property label and its value.
pub const VALUE_SEPARATOR: &str = ":";
