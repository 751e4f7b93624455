//! Error types for patchfold-domain.
//!
//! Composition errors abort the current composition only (exit code 2 at the CLI).
//! Reorder errors reject a single user action and leave the stored order untouched.

use patchfold_types::Direction;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompositionError {
    /// A patch in the sequence is only a reference; its body was never fetched.
    #[error("patch '{identifier}' is incomplete and must be fetched before it can be applied")]
    VersionIncomplete { identifier: String },

    /// A patch demands a newer launcher than this engine implements.
    #[error(
        "patch '{identifier}' requires launcher version {required}, this launcher supports {supported}"
    )]
    LauncherTooOld {
        identifier: String,
        required: u32,
        supported: u32,
    },
}

impl CompositionError {
    /// Identifier of the patch that stopped composition.
    pub fn identifier(&self) -> &str {
        match self {
            CompositionError::VersionIncomplete { identifier }
            | CompositionError::LauncherTooOld { identifier, .. } => identifier,
        }
    }

    /// Returns the recommended exit code for this error.
    pub fn exit_code(&self) -> u8 {
        2
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReorderError {
    #[error("patch '{identifier}' is not part of the current order")]
    UnknownPatch { identifier: String },

    #[error("patch '{identifier}' cannot move {direction:?}: already at the boundary")]
    AtBoundary {
        identifier: String,
        direction: Direction,
    },
}
