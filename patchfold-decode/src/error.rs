use thiserror::Error;

/// A malformed or structurally invalid patch document.
///
/// Always recoverable: the caller skips the patch (or re-derives it from source)
/// and carries on with the rest of the set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unable to process {source_name}: {message}{}", offset_suffix(.offset))]
pub struct FormatError {
    /// File name or other label identifying the document.
    pub source_name: String,
    pub message: String,
    /// Byte offset into the input, when the parser could locate the problem.
    pub offset: Option<usize>,
}

impl FormatError {
    pub fn new(source_name: &str, message: impl Into<String>) -> Self {
        Self {
            source_name: source_name.to_string(),
            message: message.into(),
            offset: None,
        }
    }

    pub fn at(mut self, offset: Option<usize>) -> Self {
        self.offset = offset;
        self
    }
}

fn offset_suffix(offset: &Option<usize>) -> String {
    match offset {
        Some(offset) => format!(" at byte {offset}"),
        None => String::new(),
    }
}

/// Why a patch file could not be turned into a patch.
#[derive(Debug, Clone, Error)]
pub enum PatchLoadError {
    #[error("io error: {message}")]
    Io { message: String },

    #[error(transparent)]
    Format(#[from] FormatError),
}
