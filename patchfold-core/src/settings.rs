//! Clap-free settings for the profile pipeline.

use camino::{Utf8Path, Utf8PathBuf};
use patchfold_domain::Whitelist;
use patchfold_types::Patch;
use patchfold_types::schema::CURRENT_LAUNCHER_VERSION;

/// Where everything lives inside one profile directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileLayout {
    root: Utf8PathBuf,
}

impl ProfileLayout {
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// User-authored patches (`Custom`, explicit `order` required).
    pub fn patches_dir(&self) -> Utf8PathBuf {
        self.root.join("patches")
    }

    /// Materialized descriptors (`Local`).
    pub fn versions_dir(&self) -> Utf8PathBuf {
        self.root.join("versions")
    }

    pub fn cache_dir(&self) -> Utf8PathBuf {
        self.root.join("cache")
    }

    /// Binary cache for `versions/<stem>.json`.
    pub fn cache_file(&self, stem: &str) -> Utf8PathBuf {
        self.cache_dir().join(format!("{stem}.dat"))
    }

    pub fn remote_index(&self) -> Utf8PathBuf {
        self.root.join("remote.json")
    }

    pub fn order_file(&self) -> Utf8PathBuf {
        self.root.join("patches.order")
    }

    pub fn config_file(&self) -> Utf8PathBuf {
        self.root.join("patchfold.toml")
    }
}

/// Settings for loading and composing one profile.
#[derive(Debug, Clone)]
pub struct ProfileSettings {
    pub root: Utf8PathBuf,

    // Library filter
    pub filter_enabled: bool,
    pub whitelist: Whitelist,

    // Binary cache for versions/*.json
    pub cache_enabled: bool,

    /// Patches compiled into the host, inserted before anything read from disk.
    pub builtin: Vec<Patch>,

    pub supported_launcher_version: u32,
}

impl ProfileSettings {
    pub fn layout(&self) -> ProfileLayout {
        ProfileLayout::new(self.root.clone())
    }

    /// The whitelist that actually applies, honoring `filter_enabled`.
    pub fn effective_whitelist(&self) -> Whitelist {
        if self.filter_enabled {
            self.whitelist.clone()
        } else {
            Whitelist::default()
        }
    }
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            root: Utf8PathBuf::from("."),
            filter_enabled: true,
            whitelist: Whitelist::lwjgl(),
            cache_enabled: true,
            builtin: Vec::new(),
            supported_launcher_version: CURRENT_LAUNCHER_VERSION,
        }
    }
}
