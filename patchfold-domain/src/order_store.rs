use crate::ports::{Diagnostics, Storage};
use anyhow::Context;
use camino::Utf8Path;
use patchfold_types::PatchOrder;
use patchfold_types::schema::ORDER_FILE_VERSION;
use patchfold_types::wire::{OrderFileV1, VersionProbe};
use tracing::debug;

/// Result of reading the order override file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderLoad {
    Override(PatchOrder),
    Absent(AbsentReason),
}

impl OrderLoad {
    pub fn into_override(self) -> Option<PatchOrder> {
        match self {
            OrderLoad::Override(order) => Some(order),
            OrderLoad::Absent(_) => None,
        }
    }
}

/// Why no override applies. Every variant falls back to natural order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbsentReason {
    Missing,
    Unreadable,
    Malformed,
    VersionMismatch { found: i64 },
}

/// Persists the user's patch order next to the profile.
pub struct OrderStore<'a> {
    storage: &'a dyn Storage,
    diagnostics: &'a dyn Diagnostics,
}

impl<'a> OrderStore<'a> {
    pub fn new(storage: &'a dyn Storage, diagnostics: &'a dyn Diagnostics) -> Self {
        Self {
            storage,
            diagnostics,
        }
    }

    pub fn save(&self, path: &Utf8Path, order: &PatchOrder) -> anyhow::Result<()> {
        let file = OrderFileV1::from(order);
        let mut bytes = serde_json::to_vec_pretty(&file).context("serialize order file")?;
        bytes.push(b'\n');
        debug!(path = %path, entries = order.len(), "saving patch order");
        self.storage
            .write(path, &bytes)
            .with_context(|| format!("save order {}", path))
    }

    /// Read the override. Problems are reported, never raised, and the file is left in place.
    pub fn load(&self, path: &Utf8Path) -> OrderLoad {
        if !self.storage.exists(path) {
            self.diagnostics
                .warn(&format!("no order file at {}; using natural order", path));
            return OrderLoad::Absent(AbsentReason::Missing);
        }

        let bytes = match self.storage.read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.diagnostics
                    .error(&format!("cannot read order file {}: {:#}", path, e));
                return OrderLoad::Absent(AbsentReason::Unreadable);
            }
        };

        let probe: VersionProbe = match serde_json::from_slice(&bytes) {
            Ok(probe) => probe,
            Err(e) => {
                self.diagnostics
                    .error(&format!("malformed order file {}: {}", path, e));
                return OrderLoad::Absent(AbsentReason::Malformed);
            }
        };

        if probe.version != ORDER_FILE_VERSION {
            self.diagnostics.error(&format!(
                "order file {} has version {}, expected {}; ignoring it",
                path, probe.version, ORDER_FILE_VERSION
            ));
            return OrderLoad::Absent(AbsentReason::VersionMismatch {
                found: probe.version,
            });
        }

        match serde_json::from_slice::<OrderFileV1>(&bytes) {
            Ok(file) => {
                debug!(path = %path, entries = file.order.len(), "loaded patch order");
                OrderLoad::Override(file.into())
            }
            Err(e) => {
                self.diagnostics
                    .error(&format!("malformed order file {}: {}", path, e));
                OrderLoad::Absent(AbsentReason::Malformed)
            }
        }
    }

    /// Drop the override so natural order applies again. Returns whether a file was removed.
    pub fn reset(&self, path: &Utf8Path) -> anyhow::Result<bool> {
        if !self.storage.exists(path) {
            return Ok(false);
        }
        self.storage
            .remove(path)
            .with_context(|| format!("reset order {}", path))?;
        self.diagnostics
            .info(&format!("removed order override {}", path));
        Ok(true)
    }
}
