//! Resource identifiers and connection points.

use std::fmt;

use crate::path::NodePath;

/// A typed handle for a value flowing through the calculation graph.
///
/// Two RIDs are equal if and only if they carry the same type tag and the
/// same identity fields. The engine never interprets `type_tag` or
/// `identity` beyond equality and hashing; their meaning belongs entirely to
/// the external leaf computations that declare inputs and outputs in terms
/// of RIDs.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rid {
    /// Discriminates families of resources (e.g. `"Ask"`, `"Mid"`) so that a
    /// flywire between two differently-typed RIDs can be rejected at
    /// construction.
    type_tag: String,
    /// Identity fields beyond the type tag, e.g. an instrument symbol or a
    /// source name. Two RIDs with the same `type_tag` but different
    /// `identity` are distinct resources.
    identity: Vec<String>,
}

impl Rid {
    /// Builds an RID from a type tag and an ordered list of identity
    /// fields.
    #[must_use]
    pub fn new(type_tag: impl Into<String>, identity: impl Into<Vec<String>>) -> Self {
        Self {
            type_tag: type_tag.into(),
            identity: identity.into(),
        }
    }

    /// Builds an RID carrying only a type tag and no further identity
    /// fields. Convenient for the common case where the type tag alone
    /// disambiguates the resource within its scope.
    #[must_use]
    pub fn of_type(type_tag: impl Into<String>) -> Self {
        Self::new(type_tag, Vec::new())
    }

    /// The type tag used to reject ill-typed flywires.
    #[must_use]
    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    /// The identity fields beyond the type tag.
    #[must_use]
    pub fn identity(&self) -> &[String] {
        &self.identity
    }
}

impl fmt::Display for Rid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.identity.is_empty() {
            write!(f, "{}", self.type_tag)
        } else {
            write!(f, "{}({})", self.type_tag, self.identity.join(","))
        }
    }
}

/// A specific input/output slot on a specific node: `(node path, RID)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConnectionPoint {
    /// The node this slot belongs to.
    pub path: NodePath,
    /// The resource identified at that node.
    pub rid: Rid,
}

impl ConnectionPoint {
    /// Builds a connection point from a path and an RID.
    #[must_use]
    pub fn new(path: NodePath, rid: Rid) -> Self {
        Self { path, rid }
    }
}

impl fmt::Display for ConnectionPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path, self.rid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rids_with_same_identity_are_equal() {
        let a = Rid::new("Ask", vec!["X".to_string(), "S".to_string()]);
        let b = Rid::new("Ask", vec!["X".to_string(), "S".to_string()]);
        assert_eq!(a, b);
    }

    #[test]
    fn rids_with_different_identity_are_not_equal() {
        let a = Rid::new("Ask", vec!["X".to_string()]);
        let b = Rid::new("Ask", vec!["Y".to_string()]);
        assert_ne!(a, b);
    }

    #[test]
    fn rids_with_different_type_tag_are_not_equal() {
        let a = Rid::of_type("Ask");
        let b = Rid::of_type("Bid");
        assert_ne!(a, b);
    }

    #[test]
    fn connection_points_compare_by_path_and_rid() {
        let p1 = ConnectionPoint::new(NodePath::new("/g/MidCalc"), Rid::of_type("Mid"));
        let p2 = ConnectionPoint::new(NodePath::new("/g/MidCalc"), Rid::of_type("Mid"));
        assert_eq!(p1, p2);

        let p3 = ConnectionPoint::new(NodePath::new("/g/Other"), Rid::of_type("Mid"));
        assert_ne!(p1, p3);
    }
}
