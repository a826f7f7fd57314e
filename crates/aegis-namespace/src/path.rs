//! Aegis Namespace Paths
//!
//! A namespace path is a non-empty list of segments starting at the root
//! segment `global`. Segments are validated once, when they are created; the
//! dotted form only exists at the backing store boundary.
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use crate::error::{NamespaceError, Result};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// The only segment exempt from validation; first in every path.
pub const ROOT_SEGMENT: &str = "global";

/// Pattern every non-root segment must match.
pub const SEGMENT_PATTERN: &str = "[A-Za-z0-9_-]+";

const SEPARATOR: char = '.';

static SEGMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^{}$", SEGMENT_PATTERN)).expect("Invalid segment pattern")
});

// =============================================================================
// Segment
// =============================================================================

/// One validated component of a namespace path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Segment(String);

impl Segment {
    /// Validate a segment against [`SEGMENT_PATTERN`].
    pub fn new(segment: impl Into<String>) -> Result<Self> {
        let segment = segment.into();
        if is_valid_segment(&segment) {
            Ok(Self(segment))
        } else {
            Err(NamespaceError::InvalidNamespaceSegment(segment))
        }
    }

    fn root() -> Self {
        Self(ROOT_SEGMENT.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Check a segment against [`SEGMENT_PATTERN`].
pub fn is_valid_segment(segment: &str) -> bool {
    SEGMENT_REGEX.is_match(segment)
}

/// Check a local collection name: non-empty, no separator.
pub fn is_valid_collection_name(local: &str) -> bool {
    !local.is_empty() && !local.contains(SEPARATOR)
}

// =============================================================================
// Namespace Path
// =============================================================================

/// Position of a data store in the namespace hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamespacePath {
    segments: Vec<Segment>,
}

impl NamespacePath {
    /// The root path, `global`.
    pub fn root() -> Self {
        Self {
            segments: vec![Segment::root()],
        }
    }

    /// The path one segment below this one.
    pub fn child(&self, segment: Segment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(segment);
        Self { segments }
    }

    /// The path one segment above this one, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn is_root(&self) -> bool {
        self.segments.len() == 1
    }

    /// Check whether `other` is this path or lies below it.
    pub fn contains(&self, other: &NamespacePath) -> bool {
        other.segments.starts_with(&self.segments)
    }

    /// The dotted external form, e.g. `global.billing`.
    pub fn dotted(&self) -> String {
        let mut out = String::new();
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                out.push(SEPARATOR);
            }
            out.push_str(segment.as_str());
        }
        out
    }

    /// The fully-qualified collection name for a local collection name.
    ///
    /// Local names must be non-empty and free of the separator, so a
    /// collection never aliases one of a child namespace.
    pub fn qualify(&self, local: &str) -> Result<String> {
        if !is_valid_collection_name(local) {
            return Err(NamespaceError::InvalidCollectionName(local.to_string()));
        }
        Ok(format!("{}{}{}", self.dotted(), SEPARATOR, local))
    }

    /// Recover the local name from the fully-qualified name of a collection
    /// directly in this namespace.
    pub fn local_name<'a>(&self, qualified: &'a str) -> Option<&'a str> {
        let prefix = self.dotted();
        qualified
            .strip_prefix(prefix.as_str())
            .and_then(|rest| rest.strip_prefix(SEPARATOR))
            .filter(|local| is_valid_collection_name(local))
    }
}

impl fmt::Display for NamespacePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(s: &str) -> Segment {
        Segment::new(s).expect("segment should be valid")
    }

    #[test]
    fn test_segment_validation() {
        for valid in ["A", "items", "user_42", "multi-word", "_", "-"] {
            assert!(Segment::new(valid).is_ok(), "{} should be valid", valid);
        }

        for invalid in ["", "bad name", "bad.name", "ünïcode", "a/b", "tab\t", "trailing\n"] {
            assert_eq!(
                Segment::new(invalid),
                Err(NamespaceError::InvalidNamespaceSegment(invalid.to_string())),
            );
        }
    }

    #[test]
    fn test_root_path() {
        let root = NamespacePath::root();
        assert!(root.is_root());
        assert_eq!(root.depth(), 1);
        assert_eq!(root.dotted(), "global");
        assert_eq!(root.parent(), None);
    }

    #[test]
    fn test_child_path() {
        let root = NamespacePath::root();
        let child = root.child(seg("A"));
        let grandchild = child.child(seg("b-2"));

        assert_eq!(child.to_string(), "global.A");
        assert_eq!(grandchild.to_string(), "global.A.b-2");
        assert_eq!(grandchild.parent(), Some(child.clone()));
        assert_eq!(root.dotted(), "global");

        assert!(root.contains(&grandchild));
        assert!(child.contains(&child));
        assert!(!grandchild.contains(&child));
    }

    #[test]
    fn test_qualify_and_local_name() {
        let path = NamespacePath::root().child(seg("A"));
        assert_eq!(path.qualify("items"), Ok("global.A.items".to_string()));
        assert_eq!(path.qualify("my items"), Ok("global.A.my items".to_string()));
        assert_eq!(path.local_name("global.A.items"), Some("items"));
        assert_eq!(path.local_name("global.A.sub.items"), None);
        assert_eq!(path.local_name("global.AB.items"), None);
        assert_eq!(path.local_name("global.A."), None);
        assert_eq!(path.local_name("global.A"), None);
    }

    #[test]
    fn test_qualify_rejects_ambiguous_names() {
        let path = NamespacePath::root().child(seg("A"));
        for local in ["", "x.items", ".items", "items."] {
            assert_eq!(
                path.qualify(local),
                Err(NamespaceError::InvalidCollectionName(local.to_string())),
            );
        }
    }
}
