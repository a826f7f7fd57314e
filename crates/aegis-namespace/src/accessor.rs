//! Aegis Namespace Collection Accessor
//!
//! Collection access shared by every data store, whatever its scope. Local
//! collection names are qualified with the store's namespace path here and
//! nowhere else.
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use crate::connection::StoreContext;
use crate::error::Result;
use crate::path::NamespacePath;
use aegis_store::{CollectionHandle, CollectionSpec};
use async_trait::async_trait;

/// Access to the collections inside one namespace.
#[async_trait]
pub trait CollectionAccess: Send + Sync {
    /// The namespace path of this store.
    fn path(&self) -> &NamespacePath;

    /// The connection this store delegates to.
    fn context(&self) -> &StoreContext;

    /// The dotted namespace, e.g. `global.billing`.
    fn namespace(&self) -> String {
        self.path().dotted()
    }

    /// The fully-qualified name of a local collection. Fails with
    /// `InvalidCollectionName` for empty names or names containing '.'.
    fn qualified_name(&self, local: &str) -> Result<String> {
        self.path().qualify(local)
    }

    /// Get a collection, creating it on first use.
    ///
    /// Fails with `StoreUnavailable` when the connection was never
    /// initialized or has been discarded.
    async fn collection(&self, local: &str) -> Result<CollectionHandle> {
        let name = self.qualified_name(local)?;
        let database = self.context().database()?;
        tracing::debug!("Resolving collection '{}'", name);
        Ok(database.collection(&name).await?)
    }

    /// Create a collection with default options.
    ///
    /// Fails with `CollectionExists` if the collection is already present.
    async fn create_collection(&self, local: &str) -> Result<CollectionHandle> {
        self.create_collection_with(local, CollectionSpec::default()).await
    }

    /// Create a collection with explicit options.
    async fn create_collection_with(&self, local: &str, spec: CollectionSpec) -> Result<CollectionHandle> {
        let name = self.qualified_name(local)?;
        let database = self.context().database()?;
        tracing::debug!("Creating collection '{}'", name);
        Ok(database.create_collection(&name, spec).await?)
    }

    /// List the local names of collections directly in this namespace.
    async fn list_collections(&self) -> Result<Vec<String>> {
        let database = self.context().database()?;
        let path = self.path();
        Ok(database
            .list_collections()
            .await?
            .iter()
            .filter_map(|qualified| path.local_name(qualified))
            .map(str::to_string)
            .collect())
    }

    /// Drop a collection. Returns false if it did not exist.
    async fn drop_collection(&self, local: &str) -> Result<bool> {
        let name = self.qualified_name(local)?;
        let database = self.context().database()?;
        tracing::debug!("Dropping collection '{}'", name);
        Ok(database.drop_collection(&name).await?)
    }
}
