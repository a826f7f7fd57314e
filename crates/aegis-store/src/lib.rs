//! Aegis Store - Backing Store Client
//!
//! The document-store contract consumed by the namespace layer, together with
//! an in-memory implementation of it. The contract mirrors a conventional
//! document database driver: one connection per client, lazily resolved
//! database handles, and named collections that can be fetched, explicitly
//! created, or dropped with their database.
//!
//! Key Features:
//! - Async client, connection, database and collection traits
//! - Typed store errors with an explicit "already exists" conflict signal
//! - URL parsing for store connection strings
//! - In-memory store with collection and document size limits
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

pub mod client;
pub mod config;
pub mod error;
pub mod memory;

pub use client::{CollectionHandle, DatabaseHandle, DocumentCollection, StoreClient, StoreConnection};
pub use config::{CollectionSpec, MemoryConfig, StoreUrl};
pub use error::{Result, StoreError};
pub use memory::MemoryClient;
