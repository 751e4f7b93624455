use crate::ports::{Diagnostics, Level};
use tracing::{error, info, warn};

/// Forwards diagnostics to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&self, level: Level, message: &str) {
        match level {
            Level::Info => info!(target: "patchfold", "{}", message),
            Level::Warn => warn!(target: "patchfold", "{}", message),
            Level::Error => error!(target: "patchfold", "{}", message),
        }
    }
}

#[cfg(feature = "memory")]
pub use recording::{Diagnostic, RecordingDiagnostics};

#[cfg(feature = "memory")]
mod recording {
    use crate::ports::{Diagnostics, Level};
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Diagnostic {
        pub level: Level,
        pub message: String,
    }

    /// Keeps every diagnostic in memory, for tests and for embedders that surface
    /// them in their own UI.
    #[derive(Debug, Default)]
    pub struct RecordingDiagnostics {
        entries: Mutex<Vec<Diagnostic>>,
    }

    impl RecordingDiagnostics {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn entries(&self) -> Vec<Diagnostic> {
            match self.entries.lock() {
                Ok(guard) => guard.clone(),
                Err(poisoned) => poisoned.into_inner().clone(),
            }
        }

        pub fn count(&self, level: Level) -> usize {
            self.entries().iter().filter(|d| d.level == level).count()
        }

        /// True if any entry at `level` contains `needle`.
        pub fn contains(&self, level: Level, needle: &str) -> bool {
            self.entries()
                .iter()
                .any(|d| d.level == level && d.message.contains(needle))
        }
    }

    impl Diagnostics for RecordingDiagnostics {
        fn report(&self, level: Level, message: &str) {
            let entry = Diagnostic {
                level,
                message: message.to_string(),
            };
            match self.entries.lock() {
                Ok(mut guard) => guard.push(entry),
                Err(poisoned) => poisoned.into_inner().push(entry),
            }
        }
    }

}
