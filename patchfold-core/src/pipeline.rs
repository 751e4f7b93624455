//! Core load and compose pipelines, extracted from the CLI.
//!
//! These entry points are I/O-agnostic: everything is read and written through
//! the port traits.

use crate::ports::{Diagnostics, PatchSource, Storage};
use crate::settings::{ProfileLayout, ProfileSettings};
use anyhow::Context;
use patchfold_decode::{document_to_patch, encode_binary, parse_text_document, source_digest};
use patchfold_domain::{
    CompositionError, OrderStore, PatchSet, ReorderError, compose_with, filter_patch,
};
use patchfold_types::{PatchOrder, Profile, Provenance};
use tracing::debug;

/// Error type for pipeline results. Exit code 2 = composition refused, 1 = tool error.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error(transparent)]
    Composition(#[from] CompositionError),
    #[error(transparent)]
    Reorder(#[from] ReorderError),
    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

impl ToolError {
    pub fn exit_code(&self) -> u8 {
        match self {
            ToolError::Composition(e) => e.exit_code(),
            ToolError::Reorder(_) | ToolError::Internal(_) => 1,
        }
    }
}

/// Outcome of `run_compose`.
#[derive(Debug, Clone)]
pub struct ComposeOutcome {
    pub patch_set: PatchSet,
    pub order: PatchOrder,
    pub profile: Profile,
}

/// Build the patch set: builtins first, then everything the source yields.
///
/// Documents that failed to load are reported and skipped. Whitelisted libraries
/// are filtered out of every patch when the filter is enabled.
pub fn load_patch_set(
    settings: &ProfileSettings,
    source: &dyn PatchSource,
    diagnostics: &dyn Diagnostics,
) -> anyhow::Result<PatchSet> {
    let whitelist = settings.effective_whitelist();
    let mut set = PatchSet::new();

    for patch in &settings.builtin {
        set.insert(filter_patch(patch, &whitelist));
    }

    let loaded = source.load_patches(diagnostics).context("load patches")?;
    let mut skipped = 0usize;
    for entry in loaded {
        match entry.patch {
            Ok(patch) => set.insert(filter_patch(&patch, &whitelist)),
            Err(err) => {
                skipped += 1;
                diagnostics.error(&format!("skipping {}: {}", entry.path, err));
            }
        }
    }

    debug!(patches = set.len(), skipped, "patch set loaded");
    Ok(set)
}

/// The order in effect: the stored override applied to the set, or natural order.
pub fn resolve_profile_order(
    set: &PatchSet,
    storage: &dyn Storage,
    layout: &ProfileLayout,
    diagnostics: &dyn Diagnostics,
) -> PatchOrder {
    let stored = OrderStore::new(storage, diagnostics)
        .load(&layout.order_file())
        .into_override();
    set.resolve_order(stored.as_ref(), diagnostics)
}

pub fn compose_profile(
    set: &PatchSet,
    order: &PatchOrder,
    settings: &ProfileSettings,
) -> Result<Profile, CompositionError> {
    compose_with(set.ordered(order), settings.supported_launcher_version)
}

/// Load, order and compose one profile.
pub fn run_compose(
    settings: &ProfileSettings,
    source: &dyn PatchSource,
    storage: &dyn Storage,
    diagnostics: &dyn Diagnostics,
) -> Result<ComposeOutcome, ToolError> {
    let patch_set = load_patch_set(settings, source, diagnostics)?;
    let order = resolve_profile_order(&patch_set, storage, &settings.layout(), diagnostics);
    let profile = compose_profile(&patch_set, &order, settings)?;
    Ok(ComposeOutcome {
        patch_set,
        order,
        profile,
    })
}

/// Outcome of `write_caches`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheSummary {
    pub written: usize,
    pub failed: usize,
}

/// (Re)write `cache/<stem>.dat` for every `versions/<stem>.json` that decodes.
///
/// A document is only cached if it would also load as a patch.
pub fn write_caches(
    storage: &dyn Storage,
    layout: &ProfileLayout,
    diagnostics: &dyn Diagnostics,
) -> anyhow::Result<CacheSummary> {
    let mut summary = CacheSummary::default();
    for path in storage.list(&layout.versions_dir(), "json")? {
        let text = storage.read(&path)?;
        let checked = parse_text_document(&text, path.as_str()).and_then(|doc| {
            document_to_patch(doc.clone(), path.as_str(), false, Provenance::Local).map(|_| doc)
        });
        let doc = match checked {
            Ok(doc) => doc,
            Err(e) => {
                summary.failed += 1;
                diagnostics.error(&format!("not caching {}: {}", path, e));
                continue;
            }
        };
        let stem = path.file_stem().unwrap_or_default();
        let cache_path = layout.cache_file(stem);
        let bytes = encode_binary(&doc, Some(source_digest(&text)))
            .with_context(|| format!("encode cache for {}", path))?;
        storage
            .write(&cache_path, &bytes)
            .with_context(|| format!("write cache {}", cache_path))?;
        debug!(source = %path, cache = %cache_path, bytes = bytes.len(), "cache written");
        summary.written += 1;
    }
    Ok(summary)
}
