//! Configuration file loading for patchfold.
//!
//! Discovers and loads `patchfold.toml` from the profile root.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use patchfold_core::settings::ProfileLayout;
use patchfold_domain::Whitelist;
use serde::Deserialize;
use tracing::debug;

/// Top-level configuration from patchfold.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PatchfoldConfig {
    pub filter: FilterConfig,
    pub cache: CacheConfig,
}

/// Library filter section of the config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub enabled: bool,

    /// Replaces the built-in whitelist when present.
    pub whitelist: Option<Vec<String>>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            whitelist: None,
        }
    }
}

/// Binary cache section of the config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Discover the patchfold.toml config file in the profile root.
pub fn discover_config(profile_root: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = ProfileLayout::new(profile_root).config_file();
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

pub fn load_config(path: &Utf8Path) -> anyhow::Result<PatchfoldConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

pub fn parse_config(contents: &str) -> anyhow::Result<PatchfoldConfig> {
    let config: PatchfoldConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from the profile root, or return default if not found.
pub fn load_or_default(profile_root: &Utf8Path) -> anyhow::Result<PatchfoldConfig> {
    match discover_config(profile_root) {
        Some(path) => load_config(&path),
        None => Ok(PatchfoldConfig::default()),
    }
}

/// Merged configuration combining config file and CLI arguments.
#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub filter_enabled: bool,
    pub whitelist: Whitelist,
    pub cache_enabled: bool,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: PatchfoldConfig,
}

impl ConfigMerger {
    pub fn new(config: PatchfoldConfig) -> Self {
        Self { config }
    }

    /// CLI `--no-filter` and `--no-cache` switch features off regardless of the file.
    /// CLI `--whitelist` entries extend whichever whitelist the file selected.
    pub fn merge(self, no_filter: bool, cli_whitelist: &[String], no_cache: bool) -> MergedConfig {
        let mut prefixes: Vec<String> = match self.config.filter.whitelist {
            Some(list) => list,
            None => Whitelist::lwjgl().iter().map(str::to_string).collect(),
        };
        for prefix in cli_whitelist {
            if !prefixes.contains(prefix) {
                prefixes.push(prefix.clone());
            }
        }

        MergedConfig {
            filter_enabled: self.config.filter.enabled && !no_filter,
            whitelist: Whitelist::new(prefixes),
            cache_enabled: self.config.cache.enabled && !no_cache,
        }
    }
}
