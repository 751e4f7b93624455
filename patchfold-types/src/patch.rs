use crate::library::{Library, LibraryMatcher};
use crate::provenance::Provenance;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A timestamp that remembers the exact text it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    pub raw: String,
    pub parsed: DateTime<FixedOffset>,
}

impl Timestamp {
    pub fn parse(raw: &str) -> Result<Self, chrono::ParseError> {
        let parsed = DateTime::parse_from_rfc3339(raw.trim())?;
        Ok(Self {
            raw: raw.to_string(),
            parsed,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JarMod {
    pub name: String,
}

/// One decoded version descriptor.
///
/// Immutable once decoded. Transformations (library filtering) produce a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patch {
    /// Key within a patch set (`fileId`, else `id`, else the source file stem).
    pub identifier: String,
    pub order_index: i64,
    pub provenance: Provenance,

    /// Set on a local patch when a newer remote descriptor exists.
    #[serde(default)]
    pub upstream_update: bool,

    /// The `id` key of the document; becomes the profile identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applet_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_arguments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launch_arguments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launch_arguments_append: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_time: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_launcher_version: Option<u32>,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub traits: BTreeSet<String>,

    /// `tweakers`: replaces the accumulated list when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tweakers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tweakers_to_add: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tweakers_to_remove: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub libraries_to_add: Vec<Library>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub libraries_to_overwrite: Vec<Library>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub libraries_to_remove: Vec<LibraryMatcher>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub jar_mods: Vec<JarMod>,

    #[serde(default)]
    pub requires_explicit_order: bool,
}

impl Patch {
    /// An empty patch; every optional field unset.
    pub fn new(identifier: impl Into<String>, provenance: Provenance) -> Self {
        Self {
            identifier: identifier.into(),
            order_index: 0,
            provenance,
            upstream_update: false,
            version_id: None,
            name: None,
            version: None,
            main_class: None,
            applet_class: None,
            process_arguments: None,
            launch_arguments: None,
            launch_arguments_append: None,
            release_type: None,
            release_time: None,
            update_time: None,
            assets: None,
            minimum_launcher_version: None,
            traits: BTreeSet::new(),
            tweakers: None,
            tweakers_to_add: Vec::new(),
            tweakers_to_remove: Vec::new(),
            libraries_to_add: Vec::new(),
            libraries_to_overwrite: Vec::new(),
            libraries_to_remove: Vec::new(),
            jar_mods: Vec::new(),
            requires_explicit_order: false,
        }
    }

    /// A reference-only stub: identifier and ordering hint, nothing to apply.
    pub fn remote_stub(identifier: impl Into<String>, order_index: i64) -> Self {
        let mut patch = Self::new(identifier, Provenance::Remote);
        patch.order_index = order_index;
        patch
    }

    pub fn is_applicable(&self) -> bool {
        self.provenance.is_applicable()
    }

    pub fn needs_update(&self) -> bool {
        self.provenance.needs_update(self.upstream_update)
    }

    pub fn has_update(&self) -> bool {
        self.needs_update()
    }

    pub fn is_custom(&self) -> bool {
        self.provenance.is_custom()
    }

    /// Human-facing label: `name`, falling back to the identifier.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.identifier)
    }
}
