//! Error types for dxf-flatten

use std::io;
use thiserror::Error;

use crate::document::DocumentPhase;

/// Main error type for reading and flattening operations
#[derive(Debug, Error)]
pub enum DxfError {
    /// IO error occurred while reading the stream
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A group code line could not be parsed as an integer
    #[error("Invalid DXF file: DXF code is not an integer at line {line}")]
    MalformedStream {
        /// 1-based line number of the offending code line
        line: usize,
    },

    /// Fatal failure while building the document, carrying the cause's message
    #[error("Error in DXF file: {0}")]
    Reader(String),

    /// The document was cleared and can no longer be used
    #[error("Document has been cleared")]
    DocumentCleared,

    /// Operation attempted in the wrong lifecycle phase
    #[error("Document is in the {actual:?} phase, expected {expected:?}")]
    InvalidPhase {
        expected: DocumentPhase,
        actual: DocumentPhase,
    },

    /// Requested root block does not exist
    #[error("Unknown block: {0}")]
    UnknownBlock(String),

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),
}

impl DxfError {
    /// Wrap a fatal cause into the reader-level error.
    ///
    /// Stream-structure errors pass through untouched so callers can still
    /// match on the line number.
    pub fn into_reader_error(self) -> Self {
        match self {
            err @ (DxfError::MalformedStream { .. } | DxfError::Reader(_)) => err,
            other => DxfError::Reader(other.to_string()),
        }
    }
}

/// Result type alias for dxf-flatten operations
pub type Result<T> = std::result::Result<T, DxfError>;

impl From<String> for DxfError {
    fn from(s: String) -> Self {
        DxfError::Custom(s)
    }
}

impl From<&str> for DxfError {
    fn from(s: &str) -> Self {
        DxfError::Custom(s.to_string())
    }
}
