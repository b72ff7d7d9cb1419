//! Output destination naming and blob persistence.
//!
//! [`resolve_output_base`] picks one base path per run; [`BlobWriter`] adds a
//! numeric suffix per record so earlier output is never overwritten.

mod writer;

pub use writer::{BlobWriter, WriteFailure, WriteOutcome, unique_path, write_blob};

use std::path::{Path, PathBuf};

/// File name used when no explicit output path is given.
pub const OUTPUT_FILE_NAME: &str = "edid.bin";

/// Directory used when neither the working directory nor home is usable.
pub const FALLBACK_DIR: &str = "/tmp";

/// Filesystem and account facts consulted when choosing a destination.
pub trait Environment {
    /// Home directory of the current user, if one can be resolved.
    fn home_dir(&self) -> Option<PathBuf>;

    /// Whether `dir` exists and is readable, writable and searchable.
    fn is_accessible(&self, dir: &Path) -> bool;
}

/// The real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn home_dir(&self) -> Option<PathBuf> {
        // `$HOME` first, then the passwd entry of the current uid.
        dirs::home_dir()
    }

    #[cfg(unix)]
    fn is_accessible(&self, dir: &Path) -> bool {
        use rustix::fs::{Access, access};

        access(
            dir,
            Access::READ_OK | Access::WRITE_OK | Access::EXEC_OK | Access::EXISTS,
        )
        .is_ok()
    }

    #[cfg(not(unix))]
    fn is_accessible(&self, dir: &Path) -> bool {
        std::fs::metadata(dir)
            .map(|meta| meta.is_dir() && !meta.permissions().readonly())
            .unwrap_or(false)
    }
}

/// Choose the base output path for a run.
///
/// An explicit path wins (after `~` expansion). Otherwise `./edid.bin` when
/// the working directory is usable, then `<home>/edid.bin`, then
/// `/tmp/edid.bin`.
///
/// # Examples
/// ```
/// use std::path::{Path, PathBuf};
///
/// use edidex_core::output::{Environment, resolve_output_base};
///
/// struct ReadOnlyCwd;
///
/// impl Environment for ReadOnlyCwd {
///     fn home_dir(&self) -> Option<PathBuf> {
///         Some(PathBuf::from("/home/ada"))
///     }
///     fn is_accessible(&self, dir: &Path) -> bool {
///         dir == Path::new("/home/ada")
///     }
/// }
///
/// let base = resolve_output_base(None, &ReadOnlyCwd);
/// assert_eq!(base, PathBuf::from("/home/ada/edid.bin"));
/// ```
pub fn resolve_output_base<E: Environment + ?Sized>(explicit: Option<&Path>, env: &E) -> PathBuf {
    if let Some(path) = explicit {
        return expand_tilde(path, env);
    }

    let cwd = Path::new(".");
    if env.is_accessible(cwd) {
        return cwd.join(OUTPUT_FILE_NAME);
    }

    if let Some(home) = env.home_dir() {
        if env.is_accessible(&home) {
            return home.join(OUTPUT_FILE_NAME);
        }
    }

    Path::new(FALLBACK_DIR).join(OUTPUT_FILE_NAME)
}

/// Expand a leading `~` or `~/` to the home directory.
///
/// Other forms (including `~user`) and paths that are not valid UTF-8 are
/// returned unchanged, as is everything when no home directory is known.
pub fn expand_tilde<E: Environment + ?Sized>(path: &Path, env: &E) -> PathBuf {
    let Some(text) = path.to_str() else {
        return path.to_path_buf();
    };
    let rest = if text == "~" {
        ""
    } else if let Some(rest) = text.strip_prefix("~/") {
        rest
    } else {
        return path.to_path_buf();
    };

    match env.home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}
