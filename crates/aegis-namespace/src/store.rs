//! Aegis Namespace Data Stores
//!
//! A data store is an immutable handle on one namespace. Its scope decides
//! its type: [`DelegateStore`] can mint child stores, [`CollectionStore`]
//! cannot, and [`DataStore`] is the sum of the two for callers that choose
//! the scope at runtime. [`RootStore`] is the delegate store for `global`
//! that also controls the connection's lifetime.
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use crate::accessor::CollectionAccess;
use crate::config::DiscardOptions;
use crate::connection::{ConnectionManager, ManagerInner, StoreContext};
use crate::error::Result;
use crate::path::{NamespacePath, Segment};
use crate::scope::ScopePolicy;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

// =============================================================================
// Delegate Store
// =============================================================================

/// A data store that may mint child data stores.
#[derive(Debug, Clone)]
pub struct DelegateStore {
    path: NamespacePath,
    context: StoreContext,
}

impl DelegateStore {
    pub(crate) fn new(path: NamespacePath, context: StoreContext) -> Self {
        Self { path, context }
    }

    /// Mint a collections-only child store one segment below this one.
    pub fn data_store(&self, segment: &str) -> Result<DataStore> {
        self.data_store_with_scope(segment, ScopePolicy::default())
    }

    /// Mint a child store with the given scope.
    ///
    /// Minting the same segment twice yields two stores aliasing one
    /// namespace.
    pub fn data_store_with_scope(&self, segment: &str, scope: ScopePolicy) -> Result<DataStore> {
        let path = self.child_path(segment)?;
        Ok(self.mint(path, scope))
    }

    /// Mint a child store from a scope identifier (`"delegate"` or
    /// `"collectionsOnly"`). The segment is validated before the scope.
    pub fn data_store_named(&self, segment: &str, scope: &str) -> Result<DataStore> {
        let path = self.child_path(segment)?;
        let scope: ScopePolicy = scope.parse()?;
        Ok(self.mint(path, scope))
    }

    /// Mint a child store that may itself delegate.
    pub fn delegate_store(&self, segment: &str) -> Result<DelegateStore> {
        let path = self.child_path(segment)?;
        Ok(DelegateStore::new(path, self.context.clone()))
    }

    /// Mint a child store limited to collection access.
    pub fn collection_store(&self, segment: &str) -> Result<CollectionStore> {
        let path = self.child_path(segment)?;
        Ok(CollectionStore::new(path, self.context.clone()))
    }

    fn child_path(&self, segment: &str) -> Result<NamespacePath> {
        Ok(self.path.child(Segment::new(segment)?))
    }

    fn mint(&self, path: NamespacePath, scope: ScopePolicy) -> DataStore {
        tracing::debug!("Minted {} data store '{}'", scope, path);
        let context = self.context.clone();
        match scope {
            ScopePolicy::Delegate => DataStore::Delegate(DelegateStore::new(path, context)),
            ScopePolicy::CollectionsOnly => DataStore::CollectionsOnly(CollectionStore::new(path, context)),
        }
    }
}

impl CollectionAccess for DelegateStore {
    fn path(&self) -> &NamespacePath {
        &self.path
    }

    fn context(&self) -> &StoreContext {
        &self.context
    }
}

impl fmt::Display for DelegateStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.path, ScopePolicy::Delegate)
    }
}

// =============================================================================
// Collection Store
// =============================================================================

/// A data store limited to the collections of its own namespace.
#[derive(Debug, Clone)]
pub struct CollectionStore {
    path: NamespacePath,
    context: StoreContext,
}

impl CollectionStore {
    pub(crate) fn new(path: NamespacePath, context: StoreContext) -> Self {
        Self { path, context }
    }
}

impl CollectionAccess for CollectionStore {
    fn path(&self) -> &NamespacePath {
        &self.path
    }

    fn context(&self) -> &StoreContext {
        &self.context
    }
}

impl fmt::Display for CollectionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.path, ScopePolicy::CollectionsOnly)
    }
}

// =============================================================================
// Data Store
// =============================================================================

/// A data store of either scope.
#[derive(Debug, Clone)]
pub enum DataStore {
    Delegate(DelegateStore),
    CollectionsOnly(CollectionStore),
}

impl DataStore {
    pub fn scope(&self) -> ScopePolicy {
        match self {
            Self::Delegate(_) => ScopePolicy::Delegate,
            Self::CollectionsOnly(_) => ScopePolicy::CollectionsOnly,
        }
    }

    /// Borrow the store's delegation capability, if it has one.
    pub fn as_delegate(&self) -> Option<&DelegateStore> {
        match self {
            Self::Delegate(store) => Some(store),
            Self::CollectionsOnly(_) => None,
        }
    }

    pub fn into_delegate(self) -> Option<DelegateStore> {
        match self {
            Self::Delegate(store) => Some(store),
            Self::CollectionsOnly(_) => None,
        }
    }
}

impl CollectionAccess for DataStore {
    fn path(&self) -> &NamespacePath {
        match self {
            Self::Delegate(store) => store.path(),
            Self::CollectionsOnly(store) => store.path(),
        }
    }

    fn context(&self) -> &StoreContext {
        match self {
            Self::Delegate(store) => store.context(),
            Self::CollectionsOnly(store) => store.context(),
        }
    }
}

impl From<DelegateStore> for DataStore {
    fn from(store: DelegateStore) -> Self {
        Self::Delegate(store)
    }
}

impl From<CollectionStore> for DataStore {
    fn from(store: CollectionStore) -> Self {
        Self::CollectionsOnly(store)
    }
}

impl fmt::Display for DataStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delegate(store) => fmt::Display::fmt(store, f),
            Self::CollectionsOnly(store) => fmt::Display::fmt(store, f),
        }
    }
}

// =============================================================================
// Root Store
// =============================================================================

/// The `global` data store returned by
/// [`ConnectionManager::initialize`]. Keeps the manager alive and can
/// discard the connection.
pub struct RootStore {
    store: DelegateStore,
    manager: Arc<ManagerInner>,
}

impl RootStore {
    pub(crate) fn new(store: DelegateStore, manager: Arc<ManagerInner>) -> Self {
        Self { store, manager }
    }

    /// The manager owning this root's connection.
    pub fn manager(&self) -> ConnectionManager {
        ConnectionManager::from_inner(Arc::clone(&self.manager))
    }

    /// Discard the connection. See [`ConnectionManager::discard`].
    pub async fn discard(self, options: DiscardOptions) {
        self.manager().discard(options).await;
    }
}

impl Deref for RootStore {
    type Target = DelegateStore;

    fn deref(&self) -> &DelegateStore {
        &self.store
    }
}

impl fmt::Debug for RootStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RootStore")
            .field("store", &self.store)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
