//! Aegis Store Client Contract
//!
//! Pluggable backing store interface. The namespace layer only ever talks to
//! a store through these traits and only ever sends fully-qualified
//! collection names across them.
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use crate::config::CollectionSpec;
use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Shared handle to a collection in the backing store.
pub type CollectionHandle = Arc<dyn DocumentCollection>;

// =============================================================================
// Client and Connection
// =============================================================================

/// Entry point of a backing store driver.
#[async_trait]
pub trait StoreClient: Send + Sync {
    /// Open one connection to the store addressed by `uri`.
    async fn connect(&self, uri: &str) -> Result<Arc<dyn StoreConnection>>;
}

/// A live connection to a backing store.
#[async_trait]
pub trait StoreConnection: Send + Sync {
    /// Resolve a database handle. Databases are created lazily on first use.
    fn database(&self, name: &str) -> Arc<dyn DatabaseHandle>;

    /// Check if the connection is still open.
    fn is_connected(&self) -> bool;

    /// Close the connection. Handles obtained from it stop working.
    async fn close(&self) -> Result<()>;
}

// =============================================================================
// Database
// =============================================================================

/// A database within a backing store.
#[async_trait]
pub trait DatabaseHandle: Send + Sync {
    /// Get the database name.
    fn name(&self) -> &str;

    /// Get a collection, creating it with default options if missing.
    async fn collection(&self, name: &str) -> Result<CollectionHandle>;

    /// Create a collection. Fails with `StoreError::AlreadyExists` if the
    /// name is taken; concurrent creators of one name see exactly one success.
    async fn create_collection(&self, name: &str, spec: CollectionSpec) -> Result<CollectionHandle>;

    /// List the names of all collections in the database.
    async fn list_collections(&self) -> Result<Vec<String>>;

    /// Drop a collection. Returns false if it did not exist.
    async fn drop_collection(&self, name: &str) -> Result<bool>;

    /// Drop the whole database.
    async fn drop_database(&self) -> Result<()>;
}

// =============================================================================
// Collection
// =============================================================================

/// A named collection of JSON documents keyed by their `_id` field.
#[async_trait]
pub trait DocumentCollection: Send + Sync {
    /// Get the fully-qualified collection name.
    fn name(&self) -> &str;

    /// Get the options the collection was created with.
    fn spec(&self) -> &CollectionSpec;

    /// Insert a document, assigning an `_id` when it has none.
    async fn insert_one(&self, doc: Value) -> Result<String>;

    /// Find a document by `_id`.
    async fn find_by_id(&self, id: &str) -> Result<Option<Value>>;

    /// Count the documents in the collection.
    async fn count(&self) -> Result<usize>;
}
