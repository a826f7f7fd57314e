//! Aegis Namespace Error Types
//!
//! Every failure of the namespace layer is one of these kinds. Backing store
//! errors are mapped once, here, so callers never match on driver codes.
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use aegis_store::StoreError;
use thiserror::Error;

// =============================================================================
// Namespace Error
// =============================================================================

/// Errors that can occur in namespace operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NamespaceError {
    #[error("connection manager is already initialized")]
    AlreadyInitialized,

    #[error("connection failure: {0}")]
    ConnectionFailure(#[source] StoreError),

    #[error("invalid namespace segment '{0}': must match [A-Za-z0-9_-]+")]
    InvalidNamespaceSegment(String),

    #[error("invalid scope '{0}': expected \"delegate\" or \"collectionsOnly\"")]
    InvalidScope(String),

    #[error("invalid collection name '{0}': must be non-empty and contain no '.'")]
    InvalidCollectionName(String),

    #[error("collection already exists: {0}")]
    CollectionExists(String),

    #[error("store unavailable: connection was never initialized or has been discarded")]
    StoreUnavailable,

    #[error("store error: {0}")]
    Store(#[source] StoreError),
}

/// Result type alias for namespace operations.
pub type Result<T> = std::result::Result<T, NamespaceError>;

impl From<StoreError> for NamespaceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AlreadyExists(name) => Self::CollectionExists(name),
            StoreError::ConnectionClosed => Self::StoreUnavailable,
            other => Self::Store(other),
        }
    }
}

impl NamespaceError {
    /// Returns true if the caller passed a bad argument.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidNamespaceSegment(_)
                | Self::InvalidScope(_)
                | Self::InvalidCollectionName(_)
                | Self::CollectionExists(_)
        )
    }

    /// Returns true if the error comes from the connection lifecycle.
    pub fn is_lifecycle_error(&self) -> bool {
        matches!(
            self,
            Self::AlreadyInitialized | Self::ConnectionFailure(_) | Self::StoreUnavailable
        )
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_mapping() {
        let err: NamespaceError = StoreError::AlreadyExists("global.a".to_string()).into();
        assert_eq!(err, NamespaceError::CollectionExists("global.a".to_string()));

        let err: NamespaceError = StoreError::ConnectionClosed.into();
        assert_eq!(err, NamespaceError::StoreUnavailable);

        let err: NamespaceError = StoreError::TooManyCollections.into();
        assert_eq!(err, NamespaceError::Store(StoreError::TooManyCollections));
    }

    #[test]
    fn test_error_display() {
        let err = NamespaceError::InvalidScope("admin".to_string());
        assert_eq!(
            err.to_string(),
            "invalid scope 'admin': expected \"delegate\" or \"collectionsOnly\""
        );

        let err = NamespaceError::ConnectionFailure(StoreError::ConnectionFailed("refused".to_string()));
        assert_eq!(err.to_string(), "connection failure: connection failed: refused");
    }

    #[test]
    fn test_classification() {
        assert!(NamespaceError::InvalidNamespaceSegment("a b".to_string()).is_user_error());
        assert!(NamespaceError::InvalidCollectionName(String::new()).is_user_error());
        assert!(!NamespaceError::StoreUnavailable.is_user_error());
        assert!(NamespaceError::AlreadyInitialized.is_lifecycle_error());
        assert!(!NamespaceError::CollectionExists("x".to_string()).is_lifecycle_error());
    }
}
