use serde::{Deserialize, Serialize};

use crate::wire::PatchDocumentV1;

/// Body of a binary patch cache, stored after the magic/version header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchCacheV1 {
    /// Hex sha256 of the textual document this cache was derived from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_sha256: Option<String>,

    pub document: PatchDocumentV1,
}
