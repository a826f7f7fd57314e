//! Aegis Namespace - Scoped Access to a Shared Document Store
//!
//! Lets independent components of one application share a single physical
//! database. Each component holds a data store whose visible collections are
//! confined to a private dotted namespace such as `global.billing.invoices`,
//! and whose right to hand out sub-namespaces is fixed by its scope.
//!
//! Key Features:
//! - One live backing-store connection per [`ConnectionManager`]
//! - Namespace hierarchy of validated path segments rooted at `global`
//! - Delegate and collections-only scopes enforced by the type system
//! - Collection access resolved to fully-qualified names at the store boundary
//!
//! ```no_run
//! use aegis_namespace::{CollectionAccess, ConnectionManager, InitOptions, ScopePolicy};
//! use aegis_store::MemoryClient;
//!
//! # async fn example() -> aegis_namespace::Result<()> {
//! let manager = ConnectionManager::new(MemoryClient::new());
//! let root = manager.initialize("memory://localhost", InitOptions::default()).await?;
//!
//! let billing = root.data_store_with_scope("billing", ScopePolicy::Delegate)?;
//! let invoices = billing.collection("invoices").await?;
//! assert_eq!(invoices.name(), "global.billing.invoices");
//! # Ok(())
//! # }
//! ```
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

pub mod accessor;
pub mod config;
pub mod connection;
pub mod error;
pub mod path;
pub mod scope;
pub mod store;

pub use accessor::CollectionAccess;
pub use config::{DiscardOptions, InitOptions, DEFAULT_DB_NAME};
pub use connection::{ConnectionManager, StoreContext};
pub use error::{NamespaceError, Result};
pub use path::{is_valid_collection_name, NamespacePath, Segment, ROOT_SEGMENT, SEGMENT_PATTERN};
pub use scope::{ScopePolicy, SCOPE_COLLECTIONS_ONLY, SCOPE_DELEGATE};
pub use store::{CollectionStore, DataStore, DelegateStore, RootStore};

pub use aegis_store::{CollectionHandle, CollectionSpec};
