//! Port traits abstracting all I/O away from the pipeline.

use patchfold_decode::LoadedPatch;

pub use patchfold_domain::ports::{Diagnostics, Level, Storage};

/// Source of decoded patches for one profile.
///
/// Per-document failures are returned in their `LoadedPatch` slot; only a failure
/// to enumerate the source at all is an `Err`.
pub trait PatchSource {
    fn load_patches(&self, diagnostics: &dyn Diagnostics) -> anyhow::Result<Vec<LoadedPatch>>;
}
