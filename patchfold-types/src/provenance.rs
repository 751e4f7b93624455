use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a patch instance came from.
///
/// Applicability and update checks are all answered by matching on this enum:
/// - builtin: compiled into the host application with complete data
/// - local: fully materialized and cached on disk
/// - remote: a reference-only stub, the body was never fetched
/// - custom: user-authored or user-edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Builtin,
    Local,
    Remote,
    #[default]
    Custom,
}

impl Provenance {
    /// Can a patch of this provenance be applied to a profile as-is?
    pub fn is_applicable(self) -> bool {
        match self {
            Provenance::Builtin | Provenance::Local | Provenance::Custom => true,
            Provenance::Remote => false,
        }
    }

    /// `upstream_update` is only meaningful for local patches.
    pub fn needs_update(self, upstream_update: bool) -> bool {
        match self {
            Provenance::Remote => true,
            Provenance::Local => upstream_update,
            Provenance::Builtin | Provenance::Custom => false,
        }
    }

    pub fn is_custom(self) -> bool {
        matches!(self, Provenance::Custom)
    }

    /// Preference when several candidates exist for one identifier. Higher wins.
    pub fn rank(self) -> u8 {
        match self {
            Provenance::Custom => 3,
            Provenance::Local => 2,
            Provenance::Builtin => 1,
            Provenance::Remote => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Provenance::Builtin => "builtin",
            Provenance::Local => "local",
            Provenance::Remote => "remote",
            Provenance::Custom => "custom",
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
