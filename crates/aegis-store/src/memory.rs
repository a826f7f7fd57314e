//! Aegis Memory Store
//!
//! In-memory backing store for tests and embedding. Data lives in a server
//! object shared by every connection of a [`MemoryClient`], so it survives a
//! connection being closed and reopened, as it would on a remote store.
//! Collection handles pair that shared state with the connection they were
//! obtained through and stop working once it closes.
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use crate::client::{CollectionHandle, DatabaseHandle, DocumentCollection, StoreClient, StoreConnection};
use crate::config::{CollectionSpec, MemoryConfig, StoreUrl};
use crate::error::{Result, StoreError};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// URL scheme accepted by [`MemoryClient`].
pub const MEMORY_SCHEME: &str = "memory";

const ID_FIELD: &str = "_id";

// =============================================================================
// Shared State
// =============================================================================

#[derive(Default)]
struct MemoryServer {
    databases: RwLock<HashMap<String, Arc<DatabaseState>>>,
    connections_opened: AtomicU64,
}

impl MemoryServer {
    fn materialize(&self, name: &str) -> Arc<DatabaseState> {
        if let Some(db) = self.databases.read().get(name) {
            return Arc::clone(db);
        }
        let mut databases = self.databases.write();
        Arc::clone(databases.entry(name.to_string()).or_default())
    }

    fn lookup(&self, name: &str) -> Option<Arc<DatabaseState>> {
        self.databases.read().get(name).cloned()
    }
}

#[derive(Default)]
struct DatabaseState {
    collections: RwLock<HashMap<String, Arc<CollectionState>>>,
}

enum Inserted {
    Created(Arc<CollectionState>),
    Existing(Arc<CollectionState>),
}

struct CollectionState {
    name: String,
    spec: CollectionSpec,
    max_document_size: usize,
    next_id: AtomicU64,
    documents: RwLock<HashMap<String, Value>>,
}

// =============================================================================
// Memory Client
// =============================================================================

/// Client for the in-memory backing store.
#[derive(Clone)]
pub struct MemoryClient {
    config: MemoryConfig,
    server: Arc<MemoryServer>,
    refuse_connections: bool,
}

impl MemoryClient {
    /// Create a client backed by a fresh, empty store.
    pub fn new() -> Self {
        Self::with_config(MemoryConfig::default())
    }

    /// Create a client with custom limits.
    pub fn with_config(config: MemoryConfig) -> Self {
        Self {
            config,
            server: Arc::new(MemoryServer::default()),
            refuse_connections: false,
        }
    }

    /// Create a client whose store is unreachable; every connect fails.
    pub fn refusing() -> Self {
        Self {
            refuse_connections: true,
            ..Self::new()
        }
    }

    /// Check if a database currently holds data.
    pub fn database_exists(&self, name: &str) -> bool {
        self.server.databases.read().contains_key(name)
    }

    /// Number of connections opened against this store so far.
    pub fn connections_opened(&self) -> u64 {
        self.server.connections_opened.load(Ordering::SeqCst)
    }
}

impl Default for MemoryClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StoreClient for MemoryClient {
    async fn connect(&self, uri: &str) -> Result<Arc<dyn StoreConnection>> {
        let url = StoreUrl::parse(uri)?;

        if url.scheme != MEMORY_SCHEME {
            return Err(StoreError::ConnectionFailed(format!(
                "unsupported scheme '{}'",
                url.scheme
            )));
        }

        if self.refuse_connections {
            return Err(StoreError::ConnectionFailed(format!(
                "store at '{}' is unreachable",
                url.address()
            )));
        }

        self.server.connections_opened.fetch_add(1, Ordering::SeqCst);
        tracing::debug!("Opened memory store connection to '{}'", url.address());

        Ok(Arc::new(MemoryConnection {
            config: self.config.clone(),
            server: Arc::clone(&self.server),
            connected: Arc::new(AtomicBool::new(true)),
        }))
    }
}

fn ensure_connected(connected: &AtomicBool) -> Result<()> {
    if connected.load(Ordering::SeqCst) {
        Ok(())
    } else {
        Err(StoreError::ConnectionClosed)
    }
}

// =============================================================================
// Memory Connection
// =============================================================================

struct MemoryConnection {
    config: MemoryConfig,
    server: Arc<MemoryServer>,
    connected: Arc<AtomicBool>,
}

#[async_trait]
impl StoreConnection for MemoryConnection {
    fn database(&self, name: &str) -> Arc<dyn DatabaseHandle> {
        Arc::new(MemoryDatabase {
            name: name.to_string(),
            config: self.config.clone(),
            server: Arc::clone(&self.server),
            connected: Arc::clone(&self.connected),
        })
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    async fn close(&self) -> Result<()> {
        if !self.connected.swap(false, Ordering::SeqCst) {
            return Err(StoreError::ConnectionClosed);
        }
        Ok(())
    }
}

// =============================================================================
// Memory Database
// =============================================================================

struct MemoryDatabase {
    name: String,
    config: MemoryConfig,
    server: Arc<MemoryServer>,
    connected: Arc<AtomicBool>,
}

impl MemoryDatabase {
    fn handle(&self, state: Arc<CollectionState>) -> CollectionHandle {
        Arc::new(MemoryCollection {
            state,
            connected: Arc::clone(&self.connected),
        })
    }

    /// Insert a new collection, or report the existing one.
    fn insert_collection(
        &self,
        name: &str,
        spec: CollectionSpec,
    ) -> Result<Inserted> {
        ensure_connected(&self.connected)?;
        let db = self.server.materialize(&self.name);
        let mut collections = db.collections.write();

        if let Some(existing) = collections.get(name) {
            return Ok(Inserted::Existing(Arc::clone(existing)));
        }

        if collections.len() >= self.config.max_collections {
            return Err(StoreError::TooManyCollections);
        }

        let max_document_size = spec
            .max_document_size
            .unwrap_or(self.config.max_document_size)
            .min(self.config.max_document_size);

        let state = Arc::new(CollectionState {
            name: name.to_string(),
            spec,
            max_document_size,
            next_id: AtomicU64::new(1),
            documents: RwLock::new(HashMap::new()),
        });
        collections.insert(name.to_string(), Arc::clone(&state));
        tracing::debug!("Created collection '{}' in '{}'", name, self.name);

        Ok(Inserted::Created(state))
    }
}

#[async_trait]
impl DatabaseHandle for MemoryDatabase {
    fn name(&self) -> &str {
        &self.name
    }

    async fn collection(&self, name: &str) -> Result<CollectionHandle> {
        let state = match self.insert_collection(name, CollectionSpec::default())? {
            Inserted::Created(state) | Inserted::Existing(state) => state,
        };
        Ok(self.handle(state))
    }

    async fn create_collection(&self, name: &str, spec: CollectionSpec) -> Result<CollectionHandle> {
        match self.insert_collection(name, spec)? {
            Inserted::Created(state) => Ok(self.handle(state)),
            Inserted::Existing(_) => Err(StoreError::AlreadyExists(name.to_string())),
        }
    }

    async fn list_collections(&self) -> Result<Vec<String>> {
        ensure_connected(&self.connected)?;
        let Some(db) = self.server.lookup(&self.name) else {
            return Ok(Vec::new());
        };

        let mut names: Vec<String> = db.collections.read().keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    async fn drop_collection(&self, name: &str) -> Result<bool> {
        ensure_connected(&self.connected)?;
        let Some(db) = self.server.lookup(&self.name) else {
            return Ok(false);
        };
        let removed = db.collections.write().remove(name).is_some();
        Ok(removed)
    }

    async fn drop_database(&self) -> Result<()> {
        ensure_connected(&self.connected)?;
        self.server.databases.write().remove(&self.name);
        tracing::debug!("Dropped database '{}'", self.name);
        Ok(())
    }
}

// =============================================================================
// Memory Collection
// =============================================================================

struct MemoryCollection {
    state: Arc<CollectionState>,
    connected: Arc<AtomicBool>,
}

#[async_trait]
impl DocumentCollection for MemoryCollection {
    fn name(&self) -> &str {
        &self.state.name
    }

    fn spec(&self) -> &CollectionSpec {
        &self.state.spec
    }

    async fn insert_one(&self, mut doc: Value) -> Result<String> {
        ensure_connected(&self.connected)?;
        let Some(fields) = doc.as_object_mut() else {
            return Err(StoreError::InvalidDocument(
                "document must be a JSON object".to_string(),
            ));
        };

        let id = match fields.get(ID_FIELD) {
            Some(Value::String(id)) => id.clone(),
            Some(other) => {
                return Err(StoreError::InvalidDocument(format!(
                    "'{}' must be a string, got {}",
                    ID_FIELD, other
                )))
            }
            None => {
                let id = format!("{:016x}", self.state.next_id.fetch_add(1, Ordering::SeqCst));
                fields.insert(ID_FIELD.to_string(), Value::String(id.clone()));
                id
            }
        };

        let size = serde_json::to_vec(&doc)
            .map_err(|e| StoreError::InvalidDocument(e.to_string()))?
            .len();
        if size > self.state.max_document_size {
            return Err(StoreError::DocumentTooLarge {
                limit: self.state.max_document_size,
            });
        }

        let mut docs = self.state.documents.write();
        if docs.contains_key(&id) {
            return Err(StoreError::DuplicateDocument(id));
        }
        docs.insert(id.clone(), doc);
        Ok(id)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Value>> {
        ensure_connected(&self.connected)?;
        Ok(self.state.documents.read().get(id).cloned())
    }

    async fn count(&self) -> Result<usize> {
        ensure_connected(&self.connected)?;
        Ok(self.state.documents.read().len())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn connect(client: &MemoryClient) -> Arc<dyn StoreConnection> {
        client
            .connect("memory://localhost")
            .await
            .expect("connect should succeed")
    }

    #[tokio::test]
    async fn test_connect_failures() {
        let client = MemoryClient::new();
        let result = client.connect("mongodb://localhost:27017").await;
        assert!(matches!(result, Err(StoreError::ConnectionFailed(_))));

        let result = client.connect("not a url").await;
        assert!(matches!(result, Err(StoreError::InvalidUrl(_))));

        let result = MemoryClient::refusing().connect("memory://localhost").await;
        assert!(matches!(result, Err(StoreError::ConnectionFailed(_))));
        assert_eq!(client.connections_opened(), 0);
    }

    #[tokio::test]
    async fn test_get_or_create_and_conflict() {
        let client = MemoryClient::new();
        let db = connect(&client).await.database("app");
        assert!(!client.database_exists("app"));

        let first = db.collection("users").await.expect("collection should succeed");
        first.insert_one(json!({"_id": "u1"})).await.expect("insert should succeed");
        assert!(client.database_exists("app"));

        let second = db.collection("users").await.expect("collection should succeed");
        assert_eq!(second.count().await.expect("count should succeed"), 1);

        let result = db.create_collection("users", CollectionSpec::default()).await;
        assert!(matches!(result, Err(StoreError::AlreadyExists(name)) if name == "users"));
    }

    #[tokio::test]
    async fn test_concurrent_create_single_winner() {
        let client = MemoryClient::new();
        let db = connect(&client).await.database("app");

        let mut tasks = Vec::new();
        for _ in 0..8 {
            let db = Arc::clone(&db);
            tasks.push(tokio::spawn(async move {
                db.create_collection("race", CollectionSpec::default()).await.is_ok()
            }));
        }

        let mut winners = 0;
        for task in tasks {
            if task.await.expect("task should join") {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
    }

    #[tokio::test]
    async fn test_max_collections() {
        let client = MemoryClient::with_config(MemoryConfig {
            max_collections: 1,
            ..Default::default()
        });
        let db = connect(&client).await.database("app");

        db.collection("a").await.expect("collection should succeed");
        assert!(matches!(db.collection("b").await, Err(StoreError::TooManyCollections)));
    }

    #[tokio::test]
    async fn test_drop_collection_and_database() {
        let client = MemoryClient::new();
        let db = connect(&client).await.database("app");
        db.collection("a").await.expect("collection should succeed");
        db.collection("b").await.expect("collection should succeed");

        assert!(db.drop_collection("a").await.expect("drop should succeed"));
        assert!(!db.drop_collection("a").await.expect("drop should succeed"));
        assert_eq!(
            db.list_collections().await.expect("list should succeed"),
            vec!["b".to_string()]
        );

        db.drop_database().await.expect("drop_database should succeed");
        assert!(!client.database_exists("app"));
    }

    #[tokio::test]
    async fn test_collections_usable_after_reconnect() {
        let client = MemoryClient::new();
        let conn = connect(&client).await;
        let old = conn
            .database("app")
            .collection("users")
            .await
            .expect("collection should succeed");
        old.insert_one(json!({"_id": "u1"})).await.expect("insert should succeed");
        conn.close().await.expect("close should succeed");
        assert!(matches!(old.count().await, Err(StoreError::ConnectionClosed)));

        let db = connect(&client).await.database("app");
        let coll = db.collection("users").await.expect("collection should succeed");
        assert!(coll.find_by_id("u1").await.expect("find should succeed").is_some());
        coll.insert_one(json!({"_id": "u2"})).await.expect("insert should succeed");
        assert_eq!(coll.count().await.expect("count should succeed"), 2);

        let result = db.create_collection("users", CollectionSpec::default()).await;
        assert!(matches!(result, Err(StoreError::AlreadyExists(_))));
        assert_eq!(client.connections_opened(), 2);
    }

    #[tokio::test]
    async fn test_closed_connection() {
        let client = MemoryClient::new();
        let conn = connect(&client).await;
        let db = conn.database("app");

        conn.close().await.expect("close should succeed");
        assert!(!conn.is_connected());
        assert!(matches!(db.collection("users").await, Err(StoreError::ConnectionClosed)));
        assert!(matches!(conn.close().await, Err(StoreError::ConnectionClosed)));
    }

    #[tokio::test]
    async fn test_document_operations() {
        let client = MemoryClient::new();
        let coll = connect(&client)
            .await
            .database("app")
            .collection("items")
            .await
            .expect("collection should succeed");

        let id = coll
            .insert_one(json!({"name": "widget"}))
            .await
            .expect("insert should succeed");
        let doc = coll
            .find_by_id(&id)
            .await
            .expect("find should succeed")
            .expect("document should exist");
        assert_eq!(doc["name"], "widget");
        assert_eq!(doc["_id"], id.as_str());

        coll.insert_one(json!({"_id": "fixed"})).await.expect("insert should succeed");
        let result = coll.insert_one(json!({"_id": "fixed"})).await;
        assert!(matches!(result, Err(StoreError::DuplicateDocument(_))));

        assert!(matches!(
            coll.insert_one(json!([1, 2, 3])).await,
            Err(StoreError::InvalidDocument(_))
        ));
        assert!(matches!(
            coll.insert_one(json!({"_id": 7})).await,
            Err(StoreError::InvalidDocument(_))
        ));
    }

    #[tokio::test]
    async fn test_spec_is_kept_and_size_enforced() {
        let client = MemoryClient::new();
        let db = connect(&client).await.database("app");
        let spec = CollectionSpec::new()
            .with_max_document_size(64)
            .with_validator(json!({"required": ["name"]}));
        let coll = db
            .create_collection("small", spec.clone())
            .await
            .expect("create should succeed");
        assert_eq!(coll.spec(), &spec);

        coll.insert_one(json!({"a": 1})).await.expect("insert should succeed");
        let result = coll.insert_one(json!({"payload": "x".repeat(128)})).await;
        assert!(matches!(result, Err(StoreError::DocumentTooLarge { limit: 64 })));

        let again = db.collection("small").await.expect("collection should succeed");
        assert_eq!(again.spec().validator, Some(json!({"required": ["name"]})));
    }
}
