use crate::error::PatchLoadError;
use crate::text::decode_text_as;
use camino::{Utf8Path, Utf8PathBuf};
use patchfold_runtime::Storage;
use patchfold_types::{Patch, Provenance};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct LoadedPatch {
    pub path: Utf8PathBuf,
    pub patch: Result<Patch, PatchLoadError>,
}

impl LoadedPatch {
    /// File stem, used as a label when the document itself could not be read.
    pub fn stem(&self) -> &str {
        self.path.file_stem().unwrap_or("unknown")
    }
}

/// Decode every `*.json` document directly under `dir`.
///
/// A document that fails to read or decode is reported in its slot; it never
/// aborts the scan. A missing directory yields an empty list.
pub fn load_patches(
    storage: &dyn Storage,
    dir: &Utf8Path,
    require_order: bool,
    provenance: Provenance,
) -> anyhow::Result<Vec<LoadedPatch>> {
    debug!(dir = %dir, require_order, provenance = %provenance, "scanning patch documents");

    let mut out = Vec::new();
    for path in storage.list(dir, "json")? {
        let patch = match storage.read(&path) {
            Ok(bytes) => decode_text_as(&bytes, path.as_str(), require_order, provenance)
                .map_err(PatchLoadError::from),
            Err(e) => Err(PatchLoadError::Io {
                message: format!("{e:#}"),
            }),
        };
        out.push(LoadedPatch { path, patch });
    }

    // Deterministic order matters.
    out.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(out)
}
