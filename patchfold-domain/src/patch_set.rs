use crate::error::ReorderError;
use crate::ports::Diagnostics;
use patchfold_types::{Direction, Patch, PatchOrder, Provenance};
use std::collections::BTreeSet;
use tracing::debug;

/// All candidates known for one identifier, in insertion order.
#[derive(Debug, Clone)]
struct Slot {
    identifier: String,
    candidates: Vec<Patch>,
}

impl Slot {
    /// Highest provenance rank wins; within a rank, the last inserted.
    fn active(&self) -> Option<&Patch> {
        let mut best: Option<&Patch> = None;
        for candidate in &self.candidates {
            match best {
                Some(b) if candidate.provenance.rank() < b.provenance.rank() => {}
                _ => best = Some(candidate),
            }
        }
        best
    }

    /// Flag local candidates that a newer remote descriptor supersedes.
    fn refresh_upstream_flags(&mut self) {
        let newest_remote = self
            .candidates
            .iter()
            .filter(|p| p.provenance == Provenance::Remote)
            .map(|p| p.update_time.as_ref().map(|t| t.parsed))
            .max();

        let Some(remote_time) = newest_remote else {
            return;
        };

        for local in self
            .candidates
            .iter_mut()
            .filter(|p| p.provenance == Provenance::Local)
        {
            let local_time = local.update_time.as_ref().map(|t| t.parsed);
            local.upstream_update = match (local_time, remote_time) {
                (None, _) => true,
                (Some(l), Some(r)) => r > l,
                (Some(_), None) => false,
            };
        }
    }
}

/// Every patch known for one profile, keyed by identifier.
#[derive(Debug, Clone, Default)]
pub struct PatchSet {
    slots: Vec<Slot>,
}

impl PatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a candidate. Identifiers keep the position of their first insertion.
    pub fn insert(&mut self, patch: Patch) {
        debug!(
            identifier = %patch.identifier,
            provenance = %patch.provenance,
            order_index = patch.order_index,
            "patch candidate"
        );
        let slot = match self
            .slots
            .iter()
            .position(|s| s.identifier == patch.identifier)
        {
            Some(i) => &mut self.slots[i],
            None => {
                self.slots.push(Slot {
                    identifier: patch.identifier.clone(),
                    candidates: Vec::new(),
                });
                let last = self.slots.len() - 1;
                &mut self.slots[last]
            }
        };
        slot.candidates.push(patch);
        slot.refresh_upstream_flags();
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.slot(identifier).is_some()
    }

    /// The candidate that takes part in composition.
    pub fn get(&self, identifier: &str) -> Option<&Patch> {
        self.slot(identifier).and_then(Slot::active)
    }

    pub fn candidates(&self, identifier: &str) -> &[Patch] {
        self.slot(identifier)
            .map(|s| s.candidates.as_slice())
            .unwrap_or_default()
    }

    /// Identifiers in first-insertion order.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|s| s.identifier.as_str())
    }

    /// Active candidates in first-insertion order.
    pub fn active(&self) -> impl Iterator<Item = &Patch> {
        self.slots.iter().filter_map(Slot::active)
    }

    /// Active patches by `order_index`; equal indices keep insertion order.
    pub fn natural_order(&self) -> PatchOrder {
        let mut patches: Vec<&Patch> = self.active().collect();
        patches.sort_by_key(|p| p.order_index);
        patches.into_iter().map(|p| p.identifier.clone()).collect()
    }

    /// Apply an override on top of natural order.
    ///
    /// Known ids from the override come first in override order; unknown ids are
    /// reported and skipped. Patches the override does not mention follow in
    /// natural order.
    pub fn resolve_order(
        &self,
        override_order: Option<&PatchOrder>,
        diagnostics: &dyn Diagnostics,
    ) -> PatchOrder {
        let natural = self.natural_order();
        let Some(override_order) = override_order else {
            return natural;
        };

        let mut seen = BTreeSet::new();
        let mut out = Vec::with_capacity(self.len());
        for id in override_order.iter() {
            if !self.contains(id) {
                diagnostics.warn(&format!(
                    "order override names unknown patch '{}'; skipping it",
                    id
                ));
                continue;
            }
            if seen.insert(id.to_string()) {
                out.push(id.to_string());
            }
        }
        for id in natural.iter() {
            if seen.insert(id.to_string()) {
                out.push(id.to_string());
            }
        }
        PatchOrder::new(out)
    }

    /// Active patches for `order`, skipping ids this set does not know.
    pub fn ordered<'a>(&'a self, order: &'a PatchOrder) -> impl Iterator<Item = &'a Patch> + 'a {
        order.iter().filter_map(|id| self.get(id))
    }

    fn slot(&self, identifier: &str) -> Option<&Slot> {
        self.slots.iter().find(|s| s.identifier == identifier)
    }
}

/// Swap `identifier` with its neighbour in `order`, producing the order to persist.
pub fn move_patch(
    order: &PatchOrder,
    identifier: &str,
    direction: Direction,
) -> Result<PatchOrder, ReorderError> {
    let pos = order
        .position(identifier)
        .ok_or_else(|| ReorderError::UnknownPatch {
            identifier: identifier.to_string(),
        })?;

    let target = match direction {
        Direction::Up => pos.checked_sub(1),
        Direction::Down => Some(pos + 1).filter(|&t| t < order.len()),
    }
    .ok_or_else(|| ReorderError::AtBoundary {
        identifier: identifier.to_string(),
        direction,
    })?;

    let mut ids = order.ids().to_vec();
    ids.swap(pos, target);
    Ok(PatchOrder::new(ids))
}

impl FromIterator<Patch> for PatchSet {
    fn from_iter<I: IntoIterator<Item = Patch>>(iter: I) -> Self {
        let mut set = PatchSet::new();
        for patch in iter {
            set.insert(patch);
        }
        set
    }
}
