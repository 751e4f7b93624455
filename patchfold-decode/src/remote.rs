use crate::error::FormatError;
use patchfold_types::wire::RemoteStubV1;
use patchfold_types::{Patch, Timestamp};

/// Decode a remote index (`[{"id", "order", "time"?}, ...]`) into reference-only stubs.
pub fn decode_remote_index(bytes: &[u8], source_name: &str) -> Result<Vec<Patch>, FormatError> {
    let stubs: Vec<RemoteStubV1> = serde_json::from_slice(bytes)
        .map_err(|e| FormatError::new(source_name, format!("invalid remote index: {e}")))?;

    stubs
        .into_iter()
        .map(|stub| {
            if stub.id.trim().is_empty() {
                return Err(FormatError::new(source_name, "remote entry with empty id"));
            }
            let mut patch = Patch::remote_stub(stub.id, stub.order);
            patch.update_time = stub
                .time
                .map(|raw| {
                    Timestamp::parse(&raw).map_err(|e| {
                        FormatError::new(
                            source_name,
                            format!("invalid 'time' for remote '{}': {}", patch.identifier, e),
                        )
                    })
                })
                .transpose()?;
            Ok(patch)
        })
        .collect()
}
