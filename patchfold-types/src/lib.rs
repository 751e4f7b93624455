//! Shared DTOs (schemas-as-code) for the patchfold workspace.
//!
//! # Design constraints
//! - Domain types (`Patch`, `Profile`, ...) are what the engine works with.
//! - Wire types under [`wire`] are what lands on disk. Be conservative with
//!   breaking changes there and prefer adding optional fields.

pub mod library;
pub mod order;
pub mod patch;
pub mod profile;
pub mod provenance;
pub mod wire;

pub use library::{GradleSpecifier, Library, LibraryMatcher, OsConstraint, OsRule, RuleAction};
pub use order::{Direction, PatchOrder};
pub use patch::{JarMod, Patch, Timestamp};
pub use profile::{ArgumentSlot, LibraryContribution, Profile};
pub use provenance::Provenance;

/// Schema identifiers and on-disk format constants.
pub mod schema {
    /// Expected `version` tag of an order override file.
    pub const ORDER_FILE_VERSION: i64 = 1;

    /// Leading bytes of a binary patch cache file.
    pub const BINARY_CACHE_MAGIC: &[u8; 4] = b"PFBC";

    /// Format version written after the magic, little-endian `u32`.
    pub const BINARY_CACHE_VERSION: u32 = 1;

    /// Highest `minimumLauncherVersion` this engine can satisfy.
    pub const CURRENT_LAUNCHER_VERSION: u32 = 14;
}
