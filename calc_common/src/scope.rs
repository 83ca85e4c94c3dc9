//! Scope: controls which of a group's descendant outputs are visible
//! outside the group.

use std::collections::HashSet;
use std::hash::Hash;

/// `Include(S)` is in scope iff the element is a member of `S`; `Exclude(S)`
/// is in scope iff the element is *not* a member of `S`.
///
/// Scope filters what a group's *parent* sees. It never hides a resource
/// from resolution happening inside the group itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Scope<T: Eq + Hash> {
    /// Only members of the set are in scope.
    Include(HashSet<T>),
    /// Everything except members of the set is in scope.
    Exclude(HashSet<T>),
}

impl<T: Eq + Hash> Scope<T> {
    /// An empty `Include` scope: nothing is exposed.
    #[must_use]
    pub fn none() -> Self {
        Self::Include(HashSet::new())
    }

    /// An empty `Exclude` scope: everything is exposed.
    #[must_use]
    pub fn all() -> Self {
        Self::Exclude(HashSet::new())
    }

    /// Whether `x` is in scope under this filter.
    #[must_use]
    pub fn in_scope(&self, x: &T) -> bool {
        match self {
            Self::Include(set) => set.contains(x),
            Self::Exclude(set) => !set.contains(x),
        }
    }
}
