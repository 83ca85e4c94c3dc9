//! Groups: containers of named children with flywires and a visibility
//! scope controlling what their parent sees.

use super::Node;
use calc_common::{ConnectionPoint, Flywire, Scope};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// A container node. Its children are evaluated as siblings of one
/// another; its `flywires` rewire specific input connection points to pull
/// from elsewhere in the tree; its `visibility` scope filters which of its
/// descendants' outputs are exposed to its own parent.
pub struct Group {
    name: String,
    children: Vec<Arc<Node>>,
    flywires: HashSet<Flywire>,
    visibility: Scope<ConnectionPoint>,
}

impl Group {
    /// Build a group from its children, flywires and visibility scope.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if two children share a name: sibling names
    /// must be unique for the provider index to be well-defined. Release
    /// builds leave this unchecked here; [`crate::index::build`] performs
    /// the authoritative, recoverable check and returns
    /// `CalcError::NameCollision` instead of panicking.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        children: Vec<Node>,
        flywires: HashSet<Flywire>,
        visibility: Scope<ConnectionPoint>,
    ) -> Self {
        debug_assert!(
            {
                let mut seen = HashMap::new();
                children.iter().all(|c| seen.insert(c.name().to_string(), ()).is_none())
            },
            "sibling names within a group must be unique"
        );
        Self {
            name: name.into(),
            children: children.into_iter().map(Arc::new).collect(),
            flywires,
            visibility,
        }
    }

    /// This group's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// This group's children, in declaration order.
    #[must_use]
    pub fn children(&self) -> &[Arc<Node>] {
        &self.children
    }

    /// This group's flywires.
    #[must_use]
    pub fn flywires(&self) -> &HashSet<Flywire> {
        &self.flywires
    }

    /// This group's visibility scope.
    #[must_use]
    pub fn visibility(&self) -> &Scope<ConnectionPoint> {
        &self.visibility
    }
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("name", &self.name)
            .field("children", &self.children.iter().map(|c| c.name()).collect::<Vec<_>>())
            .field("flywires", &self.flywires)
            .field("visibility", &self.visibility)
            .finish()
    }
}
