//! Aegis Store Error Types
//!
//! Errors surfaced by backing store clients. Conflicts on explicit collection
//! creation are always reported as [`StoreError::AlreadyExists`], never as an
//! opaque driver code.
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use thiserror::Error;

// =============================================================================
// Store Error
// =============================================================================

/// Errors that can occur while talking to a backing store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("invalid store URL: {0}")]
    InvalidUrl(String),

    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    #[error("connection closed")]
    ConnectionClosed,

    #[error("collection already exists: {0}")]
    AlreadyExists(String),

    #[error("collection not found: {0}")]
    CollectionNotFound(String),

    #[error("document not found: {0}")]
    DocumentNotFound(String),

    #[error("document with ID {0} already exists")]
    DuplicateDocument(String),

    #[error("invalid document: {0}")]
    InvalidDocument(String),

    #[error("document exceeds maximum size of {limit} bytes")]
    DocumentTooLarge { limit: usize },

    #[error("maximum number of collections reached")]
    TooManyCollections,
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    /// Returns true if the error concerns reaching or keeping the connection.
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidUrl(_) | Self::ConnectionFailed(_) | Self::ConnectionClosed
        )
    }

    /// Returns true if the error is a name or identity conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::AlreadyExists(_) | Self::DuplicateDocument(_))
    }
}

// =============================================================================
// Tests
// =============================================================================
