//! Aegis Store Configuration
//!
//! Connection string parsing and creation options for backing stores.
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Store URL
// =============================================================================

/// A parsed backing store connection string.
///
/// Format: `scheme://[user[:password]@][host][:port][/database][?key=value&...]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreUrl {
    pub scheme: String,
    pub host: String,
    pub port: Option<u16>,
    pub database: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub options: Vec<(String, String)>,
}

impl StoreUrl {
    /// Parse a connection string.
    pub fn parse(url: &str) -> Result<Self, StoreError> {
        let (scheme, rest) = url
            .split_once("://")
            .ok_or_else(|| StoreError::InvalidUrl(format!("missing scheme in '{}'", url)))?;

        if scheme.is_empty() {
            return Err(StoreError::InvalidUrl("empty scheme".to_string()));
        }

        let (rest, query) = rest.split_once('?').unwrap_or((rest, ""));
        let (authority, path) = rest.split_once('/').unwrap_or((rest, ""));

        let (auth, host_port) = match authority.rsplit_once('@') {
            Some((auth, host_port)) => (Some(auth), host_port),
            None => (None, authority),
        };

        let (host, port) = match host_port.split_once(':') {
            Some((host, port)) => {
                let port: u16 = port
                    .parse()
                    .map_err(|_| StoreError::InvalidUrl(format!("invalid port '{}'", port)))?;
                (host.to_string(), Some(port))
            }
            None => (host_port.to_string(), None),
        };

        let (username, password) = match auth {
            Some(auth) => match auth.split_once(':') {
                Some((user, pass)) => (Some(user.to_string()), Some(pass.to_string())),
                None => (Some(auth.to_string()), None),
            },
            None => (None, None),
        };

        let database = if path.is_empty() {
            None
        } else {
            Some(path.to_string())
        };

        let options = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((k, v)) => (k.to_string(), v.to_string()),
                None => (pair.to_string(), String::new()),
            })
            .collect();

        Ok(Self {
            scheme: scheme.to_string(),
            host,
            port,
            database,
            username,
            password,
            options,
        })
    }

    /// Look up a query option by key.
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Get the host:port address, if a port was given.
    pub fn address(&self) -> String {
        match self.port {
            Some(port) => format!("{}:{}", self.host, port),
            None => self.host.clone(),
        }
    }
}

// =============================================================================
// Collection Specification
// =============================================================================

/// Options for explicit collection creation.
///
/// Options are kept with the collection and handed back by
/// `DocumentCollection::spec`; enforcing them is up to the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionSpec {
    /// Keep at most `max_documents`.
    pub capped: bool,
    pub max_documents: Option<usize>,
    pub max_document_size: Option<usize>,
    /// Store-specific document validator, e.g. a JSON schema.
    pub validator: Option<Value>,
}

impl CollectionSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the collection capped at the given number of documents.
    pub fn capped(mut self, max_documents: usize) -> Self {
        self.capped = true;
        self.max_documents = Some(max_documents);
        self
    }

    /// Limit the serialized size of each document.
    pub fn with_max_document_size(mut self, bytes: usize) -> Self {
        self.max_document_size = Some(bytes);
        self
    }

    /// Attach a document validator.
    pub fn with_validator(mut self, validator: Value) -> Self {
        self.validator = Some(validator);
        self
    }
}

// =============================================================================
// Memory Store Configuration
// =============================================================================

/// Configuration for the in-memory backing store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    pub max_collections: usize,
    pub max_document_size: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            max_collections: 1000,
            max_document_size: 16 * 1024 * 1024, // 16MB
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
