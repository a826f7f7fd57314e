//! Aegis Namespace Configuration
//!
//! Options for initializing and discarding a connection manager.
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use serde::{Deserialize, Serialize};

/// Database selected when no name is given at initialization.
pub const DEFAULT_DB_NAME: &str = "aegis";

// =============================================================================
// Initialization Options
// =============================================================================

/// Options for [`ConnectionManager::initialize`](crate::ConnectionManager::initialize).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InitOptions {
    pub db_name: Option<String>,
}

impl InitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the database to use.
    pub fn with_db_name(mut self, name: impl Into<String>) -> Self {
        self.db_name = Some(name.into());
        self
    }

    /// The database name to use. Empty names fall back to [`DEFAULT_DB_NAME`].
    pub fn database_name(&self) -> &str {
        match self.db_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => DEFAULT_DB_NAME,
        }
    }
}

// =============================================================================
// Discard Options
// =============================================================================

/// Options for [`ConnectionManager::discard`](crate::ConnectionManager::discard).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DiscardOptions {
    /// Drop the whole database before closing the connection.
    pub drop_db: bool,
}

impl DiscardOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_drop_db(mut self, drop_db: bool) -> Self {
        self.drop_db = drop_db;
        self
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_name_defaults() {
        assert_eq!(InitOptions::default().database_name(), DEFAULT_DB_NAME);
        assert_eq!(InitOptions::new().with_db_name("").database_name(), DEFAULT_DB_NAME);
        assert_eq!(InitOptions::new().with_db_name("custom").database_name(), "custom");
    }

    #[test]
    fn test_options_deserialize() {
        let opts: InitOptions = serde_json::from_str(r#"{"dbName": "custom"}"#)
            .expect("InitOptions should deserialize");
        assert_eq!(opts.database_name(), "custom");

        let opts: DiscardOptions = serde_json::from_str(r#"{"dropDb": true}"#)
            .expect("DiscardOptions should deserialize");
        assert!(opts.drop_db);
        assert!(!DiscardOptions::default().drop_db);
    }
}
