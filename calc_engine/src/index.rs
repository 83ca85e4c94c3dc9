//! The three immutable indexes built once, at `Engine::build` time, over a
//! rooted node tree: path -> node, scoped providers, and scoped flywires.

use crate::node::Node;
use calc_common::{CalcError, ConnectionPoint, NodePath, Rid};
use indexmap::IndexMap;
use itertools::Itertools;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, trace};

/// Path -> node, scoped-provider and scoped-flywire indexes over a rooted
/// tree. Built once by [`build`] and never mutated afterwards.
#[derive(Debug, Default)]
pub(crate) struct GraphIndex {
    nodes: HashMap<NodePath, Arc<Node>>,
    providers: HashMap<NodePath, IndexMap<Rid, NodePath>>,
    flywires: HashMap<NodePath, HashMap<ConnectionPoint, ConnectionPoint>>,
}

impl GraphIndex {
    pub(crate) fn node(&self, path: &NodePath) -> Option<&Arc<Node>> {
        self.nodes.get(path)
    }

    pub(crate) fn is_group(&self, path: &NodePath) -> bool {
        self.nodes.get(path).is_some_and(|n| n.is_group())
    }

    pub(crate) fn providers(&self, group: &NodePath) -> Option<&IndexMap<Rid, NodePath>> {
        self.providers.get(group)
    }

    pub(crate) fn flywire_source(
        &self,
        group: &NodePath,
        target: &ConnectionPoint,
    ) -> Option<&ConnectionPoint> {
        self.flywires.get(group).and_then(|m| m.get(target))
    }
}

/// Build the three indexes over `root`, validating every construction-time
/// invariant along the way (sibling name uniqueness, provider uniqueness
/// per RID, flywire type agreement and subtree containment).
pub(crate) fn build(root: &Arc<Node>) -> Result<GraphIndex, CalcError> {
    debug!("building graph index from root");
    let mut index = GraphIndex::default();
    build_node(root, NodePath::root(), &mut index)?;
    trace!(nodes = index.nodes.len(), "graph index built");
    Ok(index)
}

/// Index `node` (registered at `path`) and everything beneath it, returning
/// the set of RIDs it exposes to its parent's provider map: the node's own
/// declared outputs if atomic, or its scope-filtered exposed RIDs if a
/// group.
fn build_node(
    node: &Arc<Node>,
    path: NodePath,
    index: &mut GraphIndex,
) -> Result<HashSet<Rid>, CalcError> {
    index.nodes.insert(path.clone(), Arc::clone(node));

    match node.as_ref() {
        Node::Atomic(atomic) => {
            let outputs = atomic.declared_outputs();
            trace!(%path, outputs = outputs.len(), "indexed atomic node");
            Ok(outputs)
        }
        Node::Group(group) => {
            let mut seen_names: HashSet<String> = HashSet::new();
            let mut providers: IndexMap<Rid, NodePath> = IndexMap::new();

            for child in group.children() {
                if !seen_names.insert(child.name().to_string()) {
                    return Err(CalcError::NameCollision {
                        group: path.clone(),
                        name: child.name().to_string(),
                    });
                }
                let child_path = path.child(child.name());
                let exposed = build_node(child, child_path.clone(), index)?;
                for rid in exposed {
                    if let Some(first) = providers.get(&rid) {
                        return Err(CalcError::DuplicateProvider {
                            group: path.clone(),
                            rid,
                            first: first.clone(),
                            second: child_path,
                        });
                    }
                    providers.insert(rid, child_path.clone());
                }
            }

            let mut flywire_map = HashMap::new();
            for flywire in group.flywires() {
                if !flywire.source.path.is_within(&path) || !flywire.target.path.is_within(&path) {
                    return Err(CalcError::FlywireOutOfScope {
                        group: path.clone(),
                        source: flywire.source.clone(),
                        target: flywire.target.clone(),
                    });
                }
                flywire_map.insert(flywire.target.clone(), flywire.source.clone());
            }

            let exposed: HashSet<Rid> = providers
                .keys()
                .filter(|rid| {
                    group
                        .visibility()
                        .in_scope(&ConnectionPoint::new(path.clone(), (*rid).clone()))
                })
                .cloned()
                .collect();

            index.providers.insert(path.clone(), providers);
            index.flywires.insert(path.clone(), flywire_map);

            debug!(
                %path,
                exposed = %exposed.iter().map(ToString::to_string).sorted().join(", "),
                "indexed group node"
            );

            Ok(exposed)
        }
    }
}
