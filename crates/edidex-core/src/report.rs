/// Sink for the user-facing lines produced during an extraction.
///
/// The line formats are stable; anything meant for diagnostics goes through
/// `tracing` instead.
pub trait Reporter {
    fn info(&mut self, message: &str);
    fn error(&mut self, message: &str);
}

/// Prints informational lines to stdout and errors to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter {
    quiet: bool,
}

impl ConsoleReporter {
    /// A reporter that drops informational lines when `quiet` is set.
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl Reporter for ConsoleReporter {
    fn info(&mut self, message: &str) {
        if !self.quiet {
            println!("{message}");
        }
    }

    fn error(&mut self, message: &str) {
        eprintln!("{message}");
    }
}

/// Collects lines in memory.
///
/// # Examples
/// ```
/// use edidex_core::{MemoryReporter, Reporter};
///
/// let mut reporter = MemoryReporter::default();
/// reporter.info("Found 0 EDIDs in \"Xorg.0.log\".");
/// assert_eq!(reporter.infos.len(), 1);
/// assert!(reporter.errors.is_empty());
/// ```
#[derive(Debug, Default, Clone)]
pub struct MemoryReporter {
    pub infos: Vec<String>,
    pub errors: Vec<String>,
}

impl Reporter for MemoryReporter {
    fn info(&mut self, message: &str) {
        self.infos.push(message.to_string());
    }

    fn error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}
