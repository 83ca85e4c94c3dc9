//! The node hierarchy: atomic leaves and groups.

mod atomic;
mod group;

pub use atomic::{AtomicNode, Compute};
pub use group::Group;

use std::fmt;

/// A node in the calculation graph: either a leaf [`AtomicNode`] backed by
/// an external [`Compute`] implementation, or a [`Group`] of children.
pub enum Node {
    /// A leaf computation.
    Atomic(AtomicNode),
    /// A container of children with its own flywires and visibility scope.
    Group(Group),
}

impl Node {
    /// The node's name, unique among its siblings.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Atomic(a) => a.name(),
            Self::Group(g) => g.name(),
        }
    }

    /// Whether this node is a group.
    #[must_use]
    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }

    /// The atomic node, if this is one.
    #[must_use]
    pub fn as_atomic(&self) -> Option<&AtomicNode> {
        match self {
            Self::Atomic(a) => Some(a),
            Self::Group(_) => None,
        }
    }

    /// The group, if this is one.
    #[must_use]
    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Self::Group(g) => Some(g),
            Self::Atomic(_) => None,
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atomic(a) => f.debug_tuple("Atomic").field(a).finish(),
            Self::Group(g) => f.debug_tuple("Group").field(g).finish(),
        }
    }
}
