//! Error types for mermaid block rendering.

use std::str::Utf8Error;

/// Error returned by the fallible rendering entry points.
///
/// Malformed fences are never errors: a block without a matching closing
/// fence is simply left in the document as-is.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Input bytes are not a valid UTF-8 string.
    #[error("input is not a valid UTF-8 string: {0}")]
    InvalidInput(#[from] Utf8Error),

    /// Wrapper tag is not a usable HTML element name.
    #[error("invalid wrapper tag {0:?} (expected an ASCII letter followed by letters, digits or '-')")]
    InvalidTagName(String),

    /// Fence marker is empty or contains whitespace or backticks.
    #[error("invalid fence marker {0:?}")]
    InvalidMarker(String),
}
