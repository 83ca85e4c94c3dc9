//! The result of a single `Engine::evaluate` call.

use crate::node::Node;
use crate::override_::AdhocOverride;
use crate::trace::NodeEvaluation;
use calc_common::{CalcResult, CalcValue, NodePath, Rid, Snapshot};
use std::collections::HashMap;
use std::sync::Arc;

/// A final value per requested RID, plus the full per-node trace of inputs
/// resolved and outputs produced while getting there.
#[derive(Debug)]
pub struct EvaluationResult {
    /// The snapshot the request was evaluated against.
    pub snapshot: Snapshot,
    /// The node path the request was made against.
    pub requested_path: NodePath,
    /// The overrides supplied for this request.
    pub overrides: AdhocOverride,
    /// The resolved value for each requested RID.
    pub results: HashMap<Rid, CalcResult<CalcValue>>,
    /// Every node touched during evaluation, with its resolved inputs and
    /// produced outputs.
    pub node_evaluations: HashMap<NodePath, NodeEvaluation>,
    /// The graph this result was computed against.
    pub root: Arc<Node>,
}

impl EvaluationResult {
    /// Structural equality over the parts of a result that are expected to
    /// be deterministic across repeated evaluations of the same request:
    /// the snapshot, requested path, final results and full trace. The
    /// underlying graph (`root`) is excluded since `Node` does not
    /// implement `PartialEq`.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        self.snapshot == other.snapshot
            && self.requested_path == other.requested_path
            && self.results == other.results
            && self.node_evaluations == other.node_evaluations
    }
}
