//! Seams the domain talks through.
//!
//! The traits live in `patchfold-runtime` so the decoder and the core pipeline can
//! share them; they are re-exported here because the domain is where they are
//! consumed.

pub use patchfold_runtime::{Diagnostics, Level, Storage};
