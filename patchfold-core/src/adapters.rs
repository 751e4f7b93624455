//! Default storage-backed port implementations.

use crate::ports::{Diagnostics, PatchSource, Storage};
use crate::settings::ProfileLayout;
use anyhow::Context;
use camino::Utf8Path;
use patchfold_decode::{
    LoadedPatch, PatchLoadError, decode_binary, decode_remote_index, decode_text_as, load_patches,
    source_digest,
};
use patchfold_types::{Patch, Provenance};
use tracing::debug;

/// Reads a profile directory through a [`Storage`].
///
/// - `patches/*.json` are `Custom` and must carry `order`
/// - `versions/*.json` are `Local`, served from `cache/<stem>.dat` when it is current
/// - `remote.json` lists `Remote` stubs
pub struct ProfileDirSource<'a> {
    storage: &'a dyn Storage,
    layout: ProfileLayout,
    use_cache: bool,
}

impl<'a> ProfileDirSource<'a> {
    pub fn new(storage: &'a dyn Storage, layout: ProfileLayout) -> Self {
        Self {
            storage,
            layout,
            use_cache: true,
        }
    }

    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.use_cache = enabled;
        self
    }

    fn load_versions(&self, diagnostics: &dyn Diagnostics) -> anyhow::Result<Vec<LoadedPatch>> {
        let dir = self.layout.versions_dir();
        let mut out = Vec::new();
        for path in self.storage.list(&dir, "json")? {
            let patch = match self.storage.read(&path) {
                Ok(text) => self.load_version(&path, &text, diagnostics),
                Err(e) => Err(PatchLoadError::Io {
                    message: format!("{e:#}"),
                }),
            };
            out.push(LoadedPatch { path, patch });
        }
        Ok(out)
    }

    fn load_version(
        &self,
        path: &Utf8Path,
        text: &[u8],
        diagnostics: &dyn Diagnostics,
    ) -> Result<Patch, PatchLoadError> {
        let stem = path.file_stem().unwrap_or_default();
        let cache_path = self.layout.cache_file(stem);

        if self.use_cache
            && self.storage.exists(&cache_path)
            && let Some(patch) = self.read_cache(&cache_path, text, diagnostics)
        {
            debug!(path = %path, cache = %cache_path, "served from binary cache");
            return Ok(patch);
        }

        decode_text_as(text, path.as_str(), false, Provenance::Local).map_err(Into::into)
    }

    /// A cache that is broken or older than its text source is deleted.
    fn read_cache(
        &self,
        cache_path: &Utf8Path,
        text: &[u8],
        diagnostics: &dyn Diagnostics,
    ) -> Option<Patch> {
        let outcome = self
            .storage
            .read(cache_path)
            .map_err(|e| format!("{e:#}"))
            .and_then(|bytes| decode_binary(&bytes, cache_path.as_str()).map_err(|e| e.to_string()));

        match outcome {
            Ok(cached) if cached.source_sha256.as_deref() == Some(source_digest(text).as_str()) => {
                Some(cached.patch)
            }
            Ok(_) => {
                diagnostics.info(&format!("binary cache {} is stale; re-reading text", cache_path));
                self.discard_cache(cache_path, diagnostics);
                None
            }
            Err(message) => {
                diagnostics.error(&format!(
                    "discarding binary cache {}: {}",
                    cache_path, message
                ));
                self.discard_cache(cache_path, diagnostics);
                None
            }
        }
    }

    fn discard_cache(&self, cache_path: &Utf8Path, diagnostics: &dyn Diagnostics) {
        if let Err(e) = self.storage.remove(cache_path) {
            diagnostics.warn(&format!("could not delete {}: {:#}", cache_path, e));
        }
    }

    fn load_remote(&self) -> Vec<LoadedPatch> {
        let path = self.layout.remote_index();
        if !self.storage.exists(&path) {
            return Vec::new();
        }
        let decoded = match self.storage.read(&path) {
            Ok(bytes) => decode_remote_index(&bytes, path.as_str()).map_err(PatchLoadError::from),
            Err(e) => Err(PatchLoadError::Io {
                message: format!("{e:#}"),
            }),
        };
        match decoded {
            Ok(stubs) => stubs
                .into_iter()
                .map(|patch| LoadedPatch {
                    path: path.clone(),
                    patch: Ok(patch),
                })
                .collect(),
            Err(err) => vec![LoadedPatch {
                path,
                patch: Err(err),
            }],
        }
    }
}

impl PatchSource for ProfileDirSource<'_> {
    fn load_patches(&self, diagnostics: &dyn Diagnostics) -> anyhow::Result<Vec<LoadedPatch>> {
        let root = self.layout.root();
        debug!(root = %root, cache = self.use_cache, "loading profile directory");

        let mut out = self.load_remote();
        out.extend(
            self.load_versions(diagnostics)
                .with_context(|| format!("load versions under {}", root))?,
        );
        out.extend(
            load_patches(
                self.storage,
                &self.layout.patches_dir(),
                true,
                Provenance::Custom,
            )
            .with_context(|| format!("load patches under {}", root))?,
        );
        Ok(out)
    }
}

/// In-memory patch source for embedding and testing.
///
/// Sorts by path on construction to match `ProfileDirSource`'s per-directory order.
#[derive(Debug, Clone)]
pub struct InMemoryPatchSource {
    patches: Vec<LoadedPatch>,
}

impl InMemoryPatchSource {
    pub fn new(mut patches: Vec<LoadedPatch>) -> Self {
        patches.sort_by(|a, b| a.path.cmp(&b.path));
        Self { patches }
    }

    /// Wrap already-decoded patches, labelling each with its identifier.
    pub fn from_patches(patches: impl IntoIterator<Item = Patch>) -> Self {
        Self::new(
            patches
                .into_iter()
                .map(|p| LoadedPatch {
                    path: format!("memory/{}.json", p.identifier).into(),
                    patch: Ok(p),
                })
                .collect(),
        )
    }
}

impl PatchSource for InMemoryPatchSource {
    fn load_patches(&self, _diagnostics: &dyn Diagnostics) -> anyhow::Result<Vec<LoadedPatch>> {
        Ok(self.patches.clone())
    }
}
