//! Aegis Namespace Scopes
//!
//! The capability tag of a data store. A scope only decides which store type
//! gets constructed; it is never consulted again afterwards.
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use crate::error::NamespaceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of [`ScopePolicy::Delegate`].
pub const SCOPE_DELEGATE: &str = "delegate";

/// Identifier of [`ScopePolicy::CollectionsOnly`].
pub const SCOPE_COLLECTIONS_ONLY: &str = "collectionsOnly";

/// What a data store may do beyond accessing its own collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScopePolicy {
    /// May mint child data stores.
    Delegate,
    /// May only access collections in its own namespace.
    #[default]
    CollectionsOnly,
}

impl ScopePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delegate => SCOPE_DELEGATE,
            Self::CollectionsOnly => SCOPE_COLLECTIONS_ONLY,
        }
    }

    pub fn can_delegate(&self) -> bool {
        matches!(self, Self::Delegate)
    }
}

impl fmt::Display for ScopePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScopePolicy {
    type Err = NamespaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            SCOPE_DELEGATE => Ok(Self::Delegate),
            SCOPE_COLLECTIONS_ONLY => Ok(Self::CollectionsOnly),
            other => Err(NamespaceError::InvalidScope(other.to_string())),
        }
    }
}
