use std::io;
use std::path::PathBuf;

/// Everything that can stop a paste from becoming a file on disk.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Nothing left after stripping whitespace and line breaks.
    #[error("no Base64 input, paste a string first")]
    EmptyInput,

    #[error("Base64 decoding failed: {0}")]
    Decode(#[from] base64::DecodeError),

    /// Decoded bytes are neither PNG nor PDF.
    #[error("decoded data is neither PNG nor PDF")]
    UnsupportedFormat,

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ConvertError {
    /// Empty input is a user slip, not a failure.
    pub fn is_warning(&self) -> bool {
        matches!(self, ConvertError::EmptyInput)
    }
}
