//! # Storage Error Types
//!
//! ## Error Flow
//! ```text
//! std::io::Error / serde_json::Error
//!      │
//!      ▼
//! StoreError (this module) ← adds the key and operation
//!      │
//!      ▼
//! Mutation path logs at `warn` and continues — persistence is
//! best-effort and must never take the draft down with it.
//! ```

use thiserror::Error;

/// Local storage operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage location could not be prepared.
    ///
    /// ## When This Occurs
    /// - Data directory cannot be created
    /// - File permissions issue
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Reading an entry failed (distinct from the entry being absent).
    #[error("Read failed for key '{key}': {reason}")]
    ReadFailed { key: String, reason: String },

    /// Writing an entry failed.
    ///
    /// ## When This Occurs
    /// - Disk full / storage quota
    /// - File removed out from under us
    #[error("Write failed for key '{key}': {reason}")]
    WriteFailed { key: String, reason: String },

    /// A value could not be serialized for storage.
    #[error("Serialization failed: {0}")]
    Serialize(String),
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
