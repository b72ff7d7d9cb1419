//! Plain text dump dialect.
//!
//! Rows of sixteen hex bytes, split in two halves by `-`, followed by an
//! ASCII side column. The table ends at a blank CRLF line and is followed by
//! `Property : value` lines, one of which is `Monitor Name`.

pub mod layout;
pub mod parser;
pub mod reader;

pub use parser::TextScanner;
