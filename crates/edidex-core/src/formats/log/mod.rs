//! Verbose driver log dialect.
//!
//! A dump starts after `Raw EDID bytes:`, every line carries a repeating
//! prefix label ending in `:`, and the dump is closed by
//! `--- End of EDID for <device> ---`. A log may hold any number of dumps.

pub mod layout;
pub mod parser;
pub mod reader;

pub use parser::LogScanner;
