//! Patch document decoding.
//!
//! Two encodings carry the same logical document:
//! - text: the JSON version descriptor authors write and tools publish
//! - binary: an opportunistic cache (magic + version + CBOR) of a previously
//!   decoded text document
//!
//! Decoding is tolerant of unknown keys but strict about the keys it understands:
//! a malformed coordinate, timestamp or (when required) a missing `order` is a
//! [`FormatError`], never a silent default.

mod binary;
mod convert;
mod error;
mod load;
mod remote;
mod text;

pub use binary::{CachedPatch, decode_binary, encode_binary, source_digest};
pub use convert::document_to_patch;
pub use error::{FormatError, PatchLoadError};
pub use load::{LoadedPatch, load_patches};
pub use remote::decode_remote_index;
pub use text::{decode_text, decode_text_as, parse_text_document};
