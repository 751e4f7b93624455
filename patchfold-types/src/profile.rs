use crate::library::Library;
use crate::patch::{JarMod, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Original/effective pair for a user-overridable value.
///
/// Patches set both copies; a user override only touches `effective`, and
/// `reset` restores it from `original`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentSlot {
    pub original: Option<String>,
    pub effective: Option<String>,
}

impl ArgumentSlot {
    pub fn set_from_patch(&mut self, value: &str) {
        self.original = Some(value.to_string());
        self.effective = Some(value.to_string());
    }

    pub fn override_with(&mut self, value: impl Into<String>) {
        self.effective = Some(value.into());
    }

    pub fn reset(&mut self) {
        self.effective = self.original.clone();
    }

    pub fn is_customized(&self) -> bool {
        self.original != self.effective
    }
}

/// Libraries one patch contributed, after later removals were applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryContribution {
    pub patch_id: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub add: Vec<Library>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overwrite: Vec<Library>,
}

/// The composed runtime configuration.
///
/// Never persisted; rebuilt whenever the patch set or its order changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub identifier: Option<String>,
    pub main_class: Option<String>,
    pub applet_class: Option<String>,
    pub process_arguments: ArgumentSlot,
    pub launch_arguments: Option<String>,
    pub release_type: Option<String>,
    pub release_time: Option<Timestamp>,
    pub update_time: Option<Timestamp>,
    pub assets: Option<String>,
    pub traits: BTreeSet<String>,
    pub tweakers: Vec<String>,
    pub jar_mods: Vec<JarMod>,
    pub contributions: Vec<LibraryContribution>,

    /// Patch identifiers in application order.
    pub applied: Vec<String>,
}

impl Profile {
    /// Resolve the per-patch contributions into one library list.
    ///
    /// Entries are keyed by artifact prefix: a later add or overwrite replaces the
    /// earlier entry in place, otherwise it is appended.
    pub fn flattened_libraries(&self) -> Vec<Library> {
        let mut out: Vec<Library> = Vec::new();
        for contribution in &self.contributions {
            for lib in contribution.add.iter().chain(contribution.overwrite.iter()) {
                let prefix = lib.artifact_prefix();
                match out.iter_mut().find(|l| l.artifact_prefix() == prefix) {
                    Some(existing) => *existing = lib.clone(),
                    None => out.push(lib.clone()),
                }
            }
        }
        out
    }

    /// Flattened libraries whose OS rules allow `os_name`.
    pub fn libraries_for_os(&self, os_name: &str) -> Vec<Library> {
        self.flattened_libraries()
            .into_iter()
            .filter(|l| l.is_active_on(os_name))
            .collect()
    }

    pub fn native_libraries(&self) -> Vec<Library> {
        self.flattened_libraries()
            .into_iter()
            .filter(Library::is_native)
            .collect()
    }

    /// Human label for the release `type`; `None` for unknown or missing types.
    pub fn type_label(&self) -> Option<&'static str> {
        match self.release_type.as_deref()? {
            "snapshot" => Some("Snapshot"),
            "release" => Some("Regular release"),
            "old_alpha" => Some("Alpha"),
            "old_beta" => Some("Beta"),
            _ => None,
        }
    }

    pub fn uses_legacy_launcher(&self) -> bool {
        // "aplhaLaunch" is the spelling found in shipped descriptors.
        self.traits.contains("legacyLaunch") || self.traits.contains("aplhaLaunch")
    }
}
