//! Port traits and default adapters shared by every patchfold layer.
//!
//! # Ports
//! - [`Storage`]: read/write/list/delete bytes at a path
//! - [`Diagnostics`]: leveled messages for conditions that are reported but not fatal
//!
//! # Adapters
//! - `fs` feature: [`FsStorage`]
//! - `memory` feature: [`InMemoryStorage`], [`RecordingDiagnostics`]
//! - always: [`TracingDiagnostics`]

mod diagnostics;
mod ports;
mod storage;

pub use diagnostics::TracingDiagnostics;
#[cfg(feature = "memory")]
pub use diagnostics::{Diagnostic, RecordingDiagnostics};
pub use ports::{Diagnostics, Level, Storage};
#[cfg(feature = "fs")]
pub use storage::FsStorage;
#[cfg(feature = "memory")]
pub use storage::InMemoryStorage;
