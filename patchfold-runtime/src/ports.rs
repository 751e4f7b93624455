use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;

/// Byte storage addressed by path.
///
/// Everything that touches the disk goes through this so the domain can be tested
/// against an in-memory implementation.
pub trait Storage {
    fn read(&self, path: &Utf8Path) -> anyhow::Result<Vec<u8>>;

    /// Overwrites; creates parent directories as needed.
    fn write(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;

    fn exists(&self, path: &Utf8Path) -> bool;

    fn remove(&self, path: &Utf8Path) -> anyhow::Result<()>;

    /// Files directly under `dir` with the given extension, sorted by path.
    /// A missing directory yields an empty list.
    fn list(&self, dir: &Utf8Path, extension: &str) -> anyhow::Result<Vec<Utf8PathBuf>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Info,
    Warn,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        })
    }
}

/// Sink for recoverable conditions (ignored order files, broken caches, skipped patches).
pub trait Diagnostics {
    fn report(&self, level: Level, message: &str);

    fn info(&self, message: &str) {
        self.report(Level::Info, message);
    }

    fn warn(&self, message: &str) {
        self.report(Level::Warn, message);
    }

    fn error(&self, message: &str) {
        self.report(Level::Error, message);
    }
}
