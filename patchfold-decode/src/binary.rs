use crate::convert::document_to_patch;
use crate::error::FormatError;
use patchfold_types::schema::{BINARY_CACHE_MAGIC, BINARY_CACHE_VERSION};
use patchfold_types::wire::{PatchCacheV1, PatchDocumentV1};
use patchfold_types::{Patch, Provenance};
use sha2::{Digest, Sha256};

const HEADER_LEN: usize = 8;

/// A patch recovered from the binary cache, plus the digest of the text it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedPatch {
    pub patch: Patch,
    pub source_sha256: Option<String>,
}

/// Lowercase hex sha256 of a text document.
pub fn source_digest(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Serialize a document into the cache layout: magic, LE `u32` version, CBOR body.
pub fn encode_binary(
    document: &PatchDocumentV1,
    source_sha256: Option<String>,
) -> anyhow::Result<Vec<u8>> {
    let body = PatchCacheV1 {
        source_sha256,
        document: document.clone(),
    };

    let mut out = Vec::with_capacity(256);
    out.extend_from_slice(BINARY_CACHE_MAGIC);
    out.extend_from_slice(&BINARY_CACHE_VERSION.to_le_bytes());
    ciborium::ser::into_writer(&body, &mut out)
        .map_err(|e| anyhow::anyhow!("encode binary cache: {e}"))?;
    Ok(out)
}

/// Decode a binary cache file. Cached patches are always `Local` and never
/// require an explicit order.
pub fn decode_binary(bytes: &[u8], source_name: &str) -> Result<CachedPatch, FormatError> {
    if bytes.len() < HEADER_LEN {
        return Err(FormatError::new(source_name, "truncated binary header").at(Some(bytes.len())));
    }
    if &bytes[..4] != BINARY_CACHE_MAGIC {
        return Err(FormatError::new(source_name, "bad magic in binary cache").at(Some(0)));
    }

    let mut version = [0u8; 4];
    version.copy_from_slice(&bytes[4..HEADER_LEN]);
    let version = u32::from_le_bytes(version);
    if version != BINARY_CACHE_VERSION {
        return Err(FormatError::new(
            source_name,
            format!(
                "unsupported binary cache version {} (expected {})",
                version, BINARY_CACHE_VERSION
            ),
        )
        .at(Some(4)));
    }

    let body: PatchCacheV1 = ciborium::de::from_reader(&bytes[HEADER_LEN..]).map_err(|e| {
        FormatError::new(source_name, format!("corrupt binary cache body: {e}"))
            .at(Some(HEADER_LEN))
    })?;

    let patch = document_to_patch(body.document, source_name, false, Provenance::Local)?;
    Ok(CachedPatch {
        patch,
        source_sha256: body.source_sha256,
    })
}
