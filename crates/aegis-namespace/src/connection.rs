//! Aegis Namespace Connection Manager
//!
//! Owns the single backing-store connection shared by every data store minted
//! from it. The manager moves between two states, uninitialized and
//! initialized, only through [`ConnectionManager::initialize`] and
//! [`ConnectionManager::discard`]. Data stores reach the connection through a
//! weak [`StoreContext`] and never own it.
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use crate::config::{DiscardOptions, InitOptions};
use crate::error::{NamespaceError, Result};
use crate::path::NamespacePath;
use crate::store::{DelegateStore, RootStore};
use aegis_store::{DatabaseHandle, StoreClient, StoreConnection};
use parking_lot::RwLock;
use std::fmt;
use std::sync::{Arc, Weak};

// =============================================================================
// Connection State
// =============================================================================

struct LiveConnection {
    connection: Arc<dyn StoreConnection>,
    database: Arc<dyn DatabaseHandle>,
}

pub(crate) struct ManagerInner {
    client: Arc<dyn StoreClient>,
    state: RwLock<Option<LiveConnection>>,
}

impl ManagerInner {
    fn database(&self) -> Option<Arc<dyn DatabaseHandle>> {
        self.state
            .read()
            .as_ref()
            .map(|live| Arc::clone(&live.database))
    }
}

// =============================================================================
// Connection Manager
// =============================================================================

/// Guards the one live backing-store connection of a namespace hierarchy.
///
/// Cloning the manager shares the same connection state.
#[derive(Clone)]
pub struct ConnectionManager {
    inner: Arc<ManagerInner>,
}

impl ConnectionManager {
    /// Create an uninitialized manager over a backing store client.
    pub fn new(client: impl StoreClient + 'static) -> Self {
        Self::with_client(Arc::new(client))
    }

    /// Create an uninitialized manager over a shared backing store client.
    pub fn with_client(client: Arc<dyn StoreClient>) -> Self {
        Self {
            inner: Arc::new(ManagerInner {
                client,
                state: RwLock::new(None),
            }),
        }
    }

    pub(crate) fn from_inner(inner: Arc<ManagerInner>) -> Self {
        Self { inner }
    }

    /// Open the connection and return the root data store.
    ///
    /// Fails with [`NamespaceError::AlreadyInitialized`] while a connection
    /// is live, and with [`NamespaceError::ConnectionFailure`] if the store
    /// cannot be reached.
    pub async fn initialize(&self, connection_string: &str, options: InitOptions) -> Result<RootStore> {
        if self.is_initialized() {
            return Err(NamespaceError::AlreadyInitialized);
        }

        let connection = self
            .inner
            .client
            .connect(connection_string)
            .await
            .map_err(NamespaceError::ConnectionFailure)?;

        let db_name = options.database_name();
        let database = connection.database(db_name);

        {
            let mut state = self.inner.state.write();
            if state.is_none() {
                *state = Some(LiveConnection {
                    connection,
                    database,
                });
                tracing::info!("Namespace store initialized on database '{}'", db_name);
                return Ok(self.root());
            }
        }

        // Lost a race with a concurrent initialize.
        if let Err(e) = connection.close().await {
            tracing::warn!("Failed to close surplus connection: {}", e);
        }
        Err(NamespaceError::AlreadyInitialized)
    }

    /// Tear down the connection, optionally dropping the database first.
    ///
    /// The manager is uninitialized afterwards even if the drop or the close
    /// fails; those failures are logged, not returned.
    pub async fn discard(&self, options: DiscardOptions) {
        let live = self.inner.state.write().take();
        let Some(live) = live else {
            tracing::debug!("Discard called on an uninitialized namespace store");
            return;
        };

        if options.drop_db {
            match live.database.drop_database().await {
                Ok(()) => tracing::info!("Dropped database '{}'", live.database.name()),
                Err(e) => tracing::warn!(
                    "Failed to drop database '{}': {}",
                    live.database.name(),
                    e
                ),
            }
        }

        if let Err(e) = live.connection.close().await {
            tracing::warn!("Failed to close store connection: {}", e);
        }

        tracing::info!("Namespace store discarded");
    }

    /// Check if a connection is live.
    pub fn is_initialized(&self) -> bool {
        self.inner.state.read().is_some()
    }

    /// Name of the database in use, if initialized.
    pub fn database_name(&self) -> Option<String> {
        self.inner.database().map(|db| db.name().to_string())
    }

    fn root(&self) -> RootStore {
        let store = DelegateStore::new(NamespacePath::root(), self.context());
        RootStore::new(store, Arc::clone(&self.inner))
    }

    pub(crate) fn context(&self) -> StoreContext {
        StoreContext {
            manager: Arc::downgrade(&self.inner),
        }
    }
}

impl fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("initialized", &self.is_initialized())
            .field("database", &self.database_name())
            .finish()
    }
}

// =============================================================================
// Store Context
// =============================================================================

/// Weak back reference from a data store to its connection manager.
#[derive(Clone)]
pub struct StoreContext {
    manager: Weak<ManagerInner>,
}

impl StoreContext {
    /// Resolve the live database handle.
    pub(crate) fn database(&self) -> Result<Arc<dyn DatabaseHandle>> {
        self.manager
            .upgrade()
            .and_then(|inner| inner.database())
            .ok_or(NamespaceError::StoreUnavailable)
    }

    /// Check if the owning manager currently has a live connection.
    pub fn is_available(&self) -> bool {
        self.database().is_ok()
    }
}

impl fmt::Debug for StoreContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreContext")
            .field("available", &self.is_available())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
