//! Atomic (leaf) nodes and the `Compute` contract external collaborators
//! implement to plug a concrete calculation into the graph.

use calc_common::{CalcResult, CalcValue, Rid, Snapshot};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// The contract an external leaf computation implements.
///
/// `resolve_deps` is called repeatedly with the inputs resolved so far until
/// it stops requesting anything new (see `calc_engine::evaluate`); this lets
/// a node's required inputs depend on the values of inputs it has already
/// seen. `compute` is called exactly once, after `resolve_deps` stabilizes,
/// with the full resolved input map.
pub trait Compute: fmt::Debug + Send + Sync {
    /// The RIDs this node may ever need as input.
    fn declared_inputs(&self) -> HashSet<Rid>;

    /// The RIDs this node may ever produce as output.
    fn declared_outputs(&self) -> HashSet<Rid>;

    /// Given the inputs resolved so far, which additional RIDs (a subset of
    /// [`Self::declared_inputs`]) are still needed? Return an empty set to
    /// signal that enough inputs have been resolved to call `compute`.
    fn resolve_deps(
        &self,
        snapshot: &Snapshot,
        already_resolved: &HashMap<Rid, CalcResult<CalcValue>>,
    ) -> HashSet<Rid>;

    /// Produce this node's outputs from its resolved inputs.
    ///
    /// Only called once `resolve_deps` has stabilized. Implementations may
    /// assume every RID it last requested is present in `inputs`, though a
    /// given entry may itself be a `Failure` when [`Self::failure_aware`]
    /// returns `true`.
    fn compute(
        &self,
        snapshot: &Snapshot,
        inputs: &HashMap<Rid, CalcResult<CalcValue>>,
    ) -> HashMap<Rid, CalcResult<CalcValue>>;

    /// Whether this node wants to see failed inputs rather than have the
    /// engine short-circuit straight to an `UpstreamFailure` output. Most
    /// nodes should leave this at the default of `false`.
    fn failure_aware(&self) -> bool {
        false
    }
}

/// A leaf node: a name, unique among its siblings, and the [`Compute`]
/// implementation backing it.
pub struct AtomicNode {
    name: String,
    compute: Arc<dyn Compute>,
}

impl AtomicNode {
    /// Wrap a [`Compute`] implementation as a named atomic node.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `compute.declared_outputs()` is empty: an
    /// atomic node that produces nothing can never be a useful provider.
    #[must_use]
    #[contracts::debug_requires(!compute.declared_outputs().is_empty(), "an atomic node must declare at least one output")]
    pub fn new(name: impl Into<String>, compute: Arc<dyn Compute>) -> Self {
        Self {
            name: name.into(),
            compute,
        }
    }

    /// This node's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The RIDs this node may need as input.
    #[must_use]
    pub fn declared_inputs(&self) -> HashSet<Rid> {
        self.compute.declared_inputs()
    }

    /// The RIDs this node may produce as output.
    #[must_use]
    pub fn declared_outputs(&self) -> HashSet<Rid> {
        self.compute.declared_outputs()
    }

    /// Whether this node wants to see failed inputs directly.
    #[must_use]
    pub fn failure_aware(&self) -> bool {
        self.compute.failure_aware()
    }

    pub(crate) fn resolve_deps(
        &self,
        snapshot: &Snapshot,
        already_resolved: &HashMap<Rid, CalcResult<CalcValue>>,
    ) -> HashSet<Rid> {
        self.compute.resolve_deps(snapshot, already_resolved)
    }

    pub(crate) fn compute(
        &self,
        snapshot: &Snapshot,
        inputs: &HashMap<Rid, CalcResult<CalcValue>>,
    ) -> HashMap<Rid, CalcResult<CalcValue>> {
        self.compute.compute(snapshot, inputs)
    }
}

impl fmt::Debug for AtomicNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AtomicNode")
            .field("name", &self.name)
            .field("compute", &self.compute)
            .finish()
    }
}
