//! A loaded profile that can be reordered and recomposed.

use crate::pipeline::{ToolError, compose_profile, load_patch_set, resolve_profile_order};
use crate::ports::{Diagnostics, PatchSource, Storage};
use crate::settings::ProfileSettings;
use patchfold_domain::{CompositionError, OrderStore, PatchSet, filter_patch, move_patch};
use patchfold_types::{Direction, Patch, PatchOrder, Profile};
use std::sync::Arc;
use tracing::debug;

/// Owns the patch set, the order in effect and the last composed profile.
///
/// Every mutation takes `&mut self`, bumps [`generation`](Self::generation) and
/// drops the cached profile, so the next [`profile`](Self::profile) call composes
/// from scratch.
pub struct ProfileSession<'a> {
    settings: ProfileSettings,
    storage: &'a dyn Storage,
    diagnostics: &'a dyn Diagnostics,
    patch_set: PatchSet,
    order: PatchOrder,
    generation: u64,
    cached: Option<Arc<Profile>>,
}

impl<'a> ProfileSession<'a> {
    pub fn open(
        settings: ProfileSettings,
        source: &dyn PatchSource,
        storage: &'a dyn Storage,
        diagnostics: &'a dyn Diagnostics,
    ) -> anyhow::Result<Self> {
        let patch_set = load_patch_set(&settings, source, diagnostics)?;
        let order = resolve_profile_order(&patch_set, storage, &settings.layout(), diagnostics);
        Ok(Self {
            settings,
            storage,
            diagnostics,
            patch_set,
            order,
            generation: 0,
            cached: None,
        })
    }

    pub fn patch_set(&self) -> &PatchSet {
        &self.patch_set
    }

    pub fn order(&self) -> &PatchOrder {
        &self.order
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The composed profile for the current order, composed on first use.
    pub fn profile(&mut self) -> Result<Arc<Profile>, CompositionError> {
        if let Some(profile) = &self.cached {
            return Ok(Arc::clone(profile));
        }
        let profile = Arc::new(compose_profile(&self.patch_set, &self.order, &self.settings)?);
        self.cached = Some(Arc::clone(&profile));
        Ok(profile)
    }

    /// Move one patch a step and persist the new order.
    pub fn move_patch(&mut self, identifier: &str, direction: Direction) -> Result<(), ToolError> {
        let order = move_patch(&self.order, identifier, direction)?;
        self.store_order(order)?;
        Ok(())
    }

    /// Replace the order with `requested` (resolved against the set) and persist it.
    pub fn set_order(&mut self, requested: &PatchOrder) -> anyhow::Result<()> {
        let order = self
            .patch_set
            .resolve_order(Some(requested), self.diagnostics);
        self.store_order(order)
    }

    /// Forget the persisted override and fall back to natural order.
    pub fn reset_order(&mut self) -> anyhow::Result<()> {
        OrderStore::new(self.storage, self.diagnostics).reset(&self.settings.layout().order_file())?;
        let order = self.patch_set.natural_order();
        self.replace_order(order);
        Ok(())
    }

    /// Add or replace a candidate (for example after a remote descriptor was fetched).
    pub fn insert_patch(&mut self, patch: Patch) {
        let whitelist = self.settings.effective_whitelist();
        self.patch_set.insert(filter_patch(&patch, &whitelist));
        let order = self
            .patch_set
            .resolve_order(Some(&self.order), self.diagnostics);
        self.replace_order(order);
    }

    fn store_order(&mut self, order: PatchOrder) -> anyhow::Result<()> {
        OrderStore::new(self.storage, self.diagnostics)
            .save(&self.settings.layout().order_file(), &order)?;
        self.replace_order(order);
        Ok(())
    }

    fn replace_order(&mut self, order: PatchOrder) {
        self.order = order;
        self.generation += 1;
        self.cached = None;
        debug!(generation = self.generation, "profile invalidated");
    }
}
