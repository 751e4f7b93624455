//! Schema-exact on-disk representations.
//!
//! Domain types never touch serde_json or CBOR directly; they go through these.

use serde::{Deserialize, Serialize};

pub mod cache_v1;
pub mod order_v1;
pub mod patch_v1;
pub mod remote_v1;

pub use cache_v1::PatchCacheV1;
pub use order_v1::OrderFileV1;
pub use patch_v1::{JarModV1, LibraryRefV1, LibraryV1, PatchDocumentV1};
pub use remote_v1::RemoteStubV1;

/// Minimal view of any versioned document: just enough to check the tag
/// before committing to a full parse.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VersionProbe {
    pub version: i64,
}
