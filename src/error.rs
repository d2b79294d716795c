//! Error types for dxfdoc

use thiserror::Error;

/// Main error type for parsing operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DxfError {
    /// A code/value pair could not be tokenized
    #[error("Malformed record at line {line}: {message}")]
    MalformedRecord { line: usize, message: String },

    /// SECTION without a matching ENDSEC
    #[error("Unterminated {name} section opened at line {line}")]
    UnterminatedSection { name: String, line: usize },

    /// BLOCK without a matching ENDBLK
    #[error("Unterminated block '{name}' opened at line {line}")]
    UnterminatedBlock { name: String, line: usize },

    /// TABLE without a matching ENDTAB
    #[error("Unterminated {name} table opened at line {line}")]
    UnterminatedTable { name: String, line: usize },

    /// Input does not look like an ASCII DXF stream
    #[error("Not a DXF document (line {line}): {message}")]
    NotDxf { line: usize, message: String },

    /// Malformed records kept occurring after resynchronization
    #[error("Too many malformed records ({count}), last at line {line}")]
    TooManyMalformedRecords { count: usize, line: usize },

    /// Byte input could not be decoded to text
    #[error("Encoding error: {0}")]
    Encoding(String),
}

impl DxfError {
    /// Line number the error refers to, when there is one
    pub fn line(&self) -> Option<usize> {
        match self {
            DxfError::MalformedRecord { line, .. }
            | DxfError::UnterminatedSection { line, .. }
            | DxfError::UnterminatedBlock { line, .. }
            | DxfError::UnterminatedTable { line, .. }
            | DxfError::NotDxf { line, .. }
            | DxfError::TooManyMalformedRecords { line, .. } => Some(*line),
            DxfError::Encoding(_) => None,
        }
    }

    /// Whether the failure is confined to one record range
    pub fn is_recoverable(&self) -> bool {
        matches!(self, DxfError::MalformedRecord { .. })
    }
}

/// Result type alias for dxfdoc operations
pub type Result<T> = std::result::Result<T, DxfError>;
