use crate::convert::document_to_patch;
use crate::error::FormatError;
use patchfold_types::wire::PatchDocumentV1;
use patchfold_types::{Patch, Provenance};
use serde::Deserialize;

/// Parse the JSON text form into its wire document, without domain validation.
pub fn parse_text_document(bytes: &[u8], source_name: &str) -> Result<PatchDocumentV1, FormatError> {
    let value: serde_json::Value = serde_json::from_slice(bytes).map_err(|e| {
        FormatError::new(source_name, e.to_string()).at(byte_offset(bytes, e.line(), e.column()))
    })?;

    if !value.is_object() {
        return Err(FormatError::new(
            source_name,
            "top-level value is not an object",
        ));
    }

    PatchDocumentV1::deserialize(value).map_err(|e| FormatError::new(source_name, e.to_string()))
}

/// Decode a user-authored text document (provenance `Custom`).
pub fn decode_text(bytes: &[u8], source_name: &str, require_order: bool) -> Result<Patch, FormatError> {
    decode_text_as(bytes, source_name, require_order, Provenance::Custom)
}

pub fn decode_text_as(
    bytes: &[u8],
    source_name: &str,
    require_order: bool,
    provenance: Provenance,
) -> Result<Patch, FormatError> {
    let doc = parse_text_document(bytes, source_name)?;
    document_to_patch(doc, source_name, require_order, provenance)
}

/// serde_json reports 1-based line/column; turn that into a byte offset.
fn byte_offset(bytes: &[u8], line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let mut line_start = 0usize;
    if line > 1 {
        let mut seen = 1usize;
        let newline = bytes.iter().enumerate().find_map(|(i, b)| {
            if *b == b'\n' {
                seen += 1;
                if seen == line {
                    return Some(i + 1);
                }
            }
            None
        })?;
        line_start = newline;
    }
    Some((line_start + column.saturating_sub(1)).min(bytes.len()))
}
