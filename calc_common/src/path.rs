//! Hierarchical node path representation.
//!
//! Paths are absolute, `/`-separated and normalized to forward slashes so
//! that two paths built on different platforms (or by string concatenation
//! vs. segment-by-segment construction) still compare equal.

use std::fmt;

use tracing::trace;

/// An absolute path to a node in the calculation graph.
///
/// The root node's path is always `"/"`. A child named `c` of a node at
/// `/a/b` is at `/a/b/c`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodePath(String);

impl NodePath {
    /// The path of the root node.
    #[must_use]
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// Builds a path from an arbitrary string, normalizing backslashes to
    /// forward slashes and collapsing a trailing slash (other than the
    /// root path itself).
    #[must_use]
    pub fn new(raw: impl AsRef<str>) -> Self {
        let normalized = raw.as_ref().replace('\\', "/");
        let trimmed = if normalized.len() > 1 {
            normalized.trim_end_matches('/')
        } else {
            normalized.as_str()
        };
        let with_root = if trimmed.is_empty() {
            "/".to_string()
        } else if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{trimmed}")
        };
        Self(with_root)
    }

    /// Returns the path of a child of `self` named `name`.
    #[must_use]
    #[contracts::debug_requires(!name.is_empty(), "child name must not be empty")]
    #[contracts::debug_requires(!name.contains('/'), "child name must not itself be a path")]
    pub fn child(&self, name: &str) -> Self {
        let child = if self.0 == "/" {
            Self(format!("/{name}"))
        } else {
            Self(format!("{}/{name}", self.0))
        };
        trace!(parent = %self, %name, path = %child, "built child path");
        child
    }

    /// The path of the group containing this node, or `None` if `self` is
    /// the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.0 == "/" {
            return None;
        }
        match self.0.rfind('/') {
            Some(0) => Some(Self::root()),
            Some(idx) => Some(Self(self.0[..idx].to_string())),
            None => None,
        }
    }

    /// Returns true if `self` is the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Returns the path as a normalized, forward-slash string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if `self` lies within (is equal to, or nested under)
    /// `ancestor`.
    #[must_use]
    pub fn is_within(&self, ancestor: &Self) -> bool {
        if ancestor.is_root() {
            return true;
        }
        self.0 == ancestor.0 || self.0.starts_with(&format!("{}/", ancestor.0))
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodePath {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for NodePath {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
