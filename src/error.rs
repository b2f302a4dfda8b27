//! Error types for SnapKV
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using SnapError
pub type Result<T> = std::result::Result<T, SnapError>;

/// Unified error type for SnapKV operations
#[derive(Debug, Error)]
pub enum SnapError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Snapshot Errors
    // -------------------------------------------------------------------------
    /// Snapshot content could not be decoded (load failure)
    #[error("Snapshot corrupted: {0}")]
    SnapshotCorrupted(String),

    /// A key or value does not fit in an int32 length prefix (flush failure)
    #[error("Record field of {len} bytes exceeds the snapshot length limit")]
    RecordTooLarge { len: usize },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
