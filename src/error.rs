//! Error taxonomy shared by every stage of the codec.

use std::io;
use std::path::PathBuf;

use crate::min_heap::HeapErr;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, HuffError>;

#[derive(Debug, thiserror::Error)]
pub enum HuffError {
    /// No bytes to build a tree from. Callers turn this into empty artifacts.
    #[error("input buffer is empty")]
    EmptyInput,

    /// The sidecar code table is absent or yielded zero entries.
    #[error("code table not found or empty: {}", .path.display())]
    TableNotFound { path: PathBuf },

    /// A sidecar line does not follow the `NNN:bits` layout.
    #[error("malformed code table at line {line}: {reason}")]
    MalformedTable { line: usize, reason: String },

    /// Decoding produced fewer bytes than `width * height`.
    #[error("decoded {actual} bytes, expected at least {expected}")]
    TruncatedOutput { expected: usize, actual: usize },

    /// A byte has no code in the table used to encode it.
    #[error("byte {0} not in code table")]
    UnknownSymbol(u8),

    /// Strict decoding met a token span that matches no code.
    #[error("unmatched bit span ending at payload offset {offset}")]
    CorruptPayload { offset: usize },

    #[error("malformed frame header: {0}")]
    MalformedHeader(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("heap error: {0}")]
    Heap(#[from] HeapErr),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl HuffError {
    pub fn malformed_table<S: Into<String>>(line: usize, reason: S) -> Self {
        HuffError::MalformedTable { line, reason: reason.into() }
    }

    pub fn table_not_found<P: Into<PathBuf>>(path: P) -> Self {
        HuffError::TableNotFound { path: path.into() }
    }

    /// True for outcomes the caller may surface without aborting a batch.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, HuffError::EmptyInput | HuffError::TruncatedOutput { .. })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_io_conversion() {
        let err: HuffError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, HuffError::Io(_)));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_messages() {
        let err = HuffError::TruncatedOutput { expected: 4, actual: 3 };
        assert_eq!(err.to_string(), "decoded 3 bytes, expected at least 4");
        assert!(err.is_recoverable());

        let err = HuffError::malformed_table(7, "missing delimiter");
        assert_eq!(err.to_string(), "malformed code table at line 7: missing delimiter");
    }
}
