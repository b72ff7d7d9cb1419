use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use edidex_core::{ConsoleReporter, ExtractOptions, ExtractionSummary, extract_edids};
use glob::glob;
use tracing::Level;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("EDIDEX_BUILD_COMMIT"),
    ", ",
    env!("EDIDEX_BUILD_DATE"),
    ")"
);

const EXAMPLES: &str = "Examples:\n  edidex extract nvidia-bug-report.log\n  edidex extract /var/log/Xorg.0.log -o ~/edids/monitor.bin\n  edidex extract dump.txt --summary summary.json";

#[derive(Parser, Debug)]
#[command(name = "edidex")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Extract raw EDID blobs from verbose X/NVIDIA logs and text dumps.",
    long_about = None,
    after_help = EXAMPLES
)]
struct Cli {
    /// Increase diagnostic output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Find every EDID in a log or text dump and write each to its own file.
    #[command(alias = "extract-edids")]
    #[command(after_help = EXAMPLES)]
    Extract {
        /// Path to a verbose X log, nvidia-bug-report.log or EDID .txt dump
        input: PathBuf,

        /// Output file; when it exists, `.0`, `.1`, ... are appended
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Write a JSON summary of the run to this path
        #[arg(long)]
        summary: Option<PathBuf>,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,

        /// Exit with a non-zero code if any EDID could not be written
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Extract {
            input,
            output,
            summary,
            quiet,
            strict,
        } => cmd_extract(input, output, summary, quiet, strict),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

fn cmd_extract(
    input: PathBuf,
    output: Option<PathBuf>,
    summary_path: Option<PathBuf>,
    quiet: bool,
    strict: bool,
) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&input)?;
    validate_input_file(&resolved_input)?;
    if let Some(path) = summary_path.as_ref() {
        ensure_distinct_from_input(path, &resolved_input)?;
    }

    let options = ExtractOptions::new(resolved_input).with_output(output);
    let mut reporter = ConsoleReporter::new(quiet);
    let summary = extract_edids(&options, &mut reporter).map_err(|err| {
        CliError::new(
            err.to_string(),
            Some("the input must be a readable, non-empty log or text file".to_string()),
        )
    })?;

    if let Some(path) = summary_path.as_ref() {
        write_summary(path, &summary)?;
        if !quiet {
            eprintln!("OK: summary written -> {}", path.display());
        }
    }

    if strict && summary.failed() > 0 {
        return Err(CliError::new(
            format!(
                "{} of {} EDIDs could not be written",
                summary.failed(),
                summary.writes.len()
            ),
            Some("check that the output directory exists and is writable".to_string()),
        ));
    }
    Ok(())
}

fn write_summary(path: &Path, summary: &ExtractionSummary) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(summary).context("JSON serialization failed")?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create summary directory: {}", parent.display())
            })?;
        }
    }
    fs::write(path, json)
        .with_context(|| format!("Failed to write summary: {}", path.display()))?;
    Ok(())
}

fn ensure_distinct_from_input(summary: &Path, input: &Path) -> Result<(), CliError> {
    let input_abs = fs::canonicalize(input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
    let summary_dir = match summary.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::canonicalize(parent),
        _ => fs::canonicalize("."),
    };
    // A summary directory that does not exist yet cannot contain the input.
    let Ok(summary_dir) = summary_dir else {
        return Ok(());
    };
    let file_name = summary
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid summary path: {}", summary.display()))?;
    if summary_dir.join(file_name) == input_abs {
        return Err(CliError::new(
            format!(
                "summary path must differ from input: {}",
                summary.display()
            ),
            Some("choose a different summary path".to_string()),
        ));
    }
    Ok(())
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass a verbose X log, nvidia-bug-report.log or EDID .txt dump".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass a verbose X log, nvidia-bug-report.log or EDID .txt dump".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    if matches.len() > 1 {
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let more = if matches.len() > 3 { ", ..." } else { "" };
        return Err(CliError::new(
            format!(
                "multiple files match pattern '{}' ({} matches); matches: {}{}",
                pattern,
                matches.len(),
                listed,
                more
            ),
            Some("pass a single file, or run once per file".to_string()),
        ));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
