//! Embeddable core library for patchfold.
//!
//! Provides a clap-free, I/O-abstracted entry point suitable for linking
//! into a launcher or other host process.
//!
//! # Port traits
//!
//! All I/O is abstracted behind port traits in [`ports`]:
//! - [`PatchSource`](ports::PatchSource): enumerate and decode patches
//! - [`Storage`](ports::Storage): bytes at a path (order file, caches)
//! - [`Diagnostics`](ports::Diagnostics): recoverable problems
//!
//! The [`adapters`] module provides the profile-directory implementation.
//!
//! # Entry points
//!
//! - [`run_compose`](pipeline::run_compose): load, order and compose a profile
//! - [`write_caches`](pipeline::write_caches): refresh binary caches
//! - [`ProfileSession`](session::ProfileSession): long-lived, reorderable profile

pub mod adapters;
pub mod pipeline;
pub mod ports;
pub mod session;
pub mod settings;

// Re-export the runtime adapters so callers don't need patchfold-runtime directly.
pub use patchfold_runtime::{FsStorage, InMemoryStorage, RecordingDiagnostics, TracingDiagnostics};

// Re-export loader types so embedders don't need patchfold-decode directly.
pub use patchfold_decode::{LoadedPatch, PatchLoadError};
