//! The per-request evaluation context: resolved overrides, the memoization
//! cache, the in-flight stack used for cycle detection, and the
//! accumulating trace.

use crate::override_::{AdhocOverride, ResolvedOverrides};
use crate::trace::{InputResult, NodeEvaluation, OutputResult};
use calc_common::{CalcError, CalcResult, CalcValue, NodePath, Rid, Snapshot};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

/// State threaded through a single `Engine::evaluate` call.
///
/// Caches, the in-flight stack and the trace all live behind `RefCell`
/// because evaluation recurses through shared `&EvaluationContext`
/// references rather than passing `&mut` down the call tree: the resolution
/// algorithm calls back into the evaluator, which calls back into
/// resolution, for every sibling dependency.
pub(crate) struct EvaluationContext {
    snapshot: Snapshot,
    overrides: ResolvedOverrides,
    max_iterations: usize,
    cache: RefCell<HashMap<NodePath, HashMap<Rid, CalcResult<CalcValue>>>>,
    trace: RefCell<HashMap<NodePath, NodeEvaluation>>,
    in_flight: RefCell<HashSet<(NodePath, Rid)>>,
}

impl EvaluationContext {
    pub(crate) fn new(
        snapshot: Snapshot,
        overrides: &AdhocOverride,
        max_iterations: usize,
    ) -> Result<Self, CalcError> {
        Ok(Self {
            snapshot,
            overrides: ResolvedOverrides::build(overrides)?,
            max_iterations,
            cache: RefCell::new(HashMap::new()),
            trace: RefCell::new(HashMap::new()),
            in_flight: RefCell::new(HashSet::new()),
        })
    }

    pub(crate) fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub(crate) fn overrides(&self) -> &ResolvedOverrides {
        &self.overrides
    }

    pub(crate) fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub(crate) fn in_flight_contains(&self, key: &(NodePath, Rid)) -> bool {
        self.in_flight.borrow().contains(key)
    }

    pub(crate) fn push_in_flight(&self, key: (NodePath, Rid)) {
        self.in_flight.borrow_mut().insert(key);
    }

    pub(crate) fn pop_in_flight(&self, key: &(NodePath, Rid)) {
        self.in_flight.borrow_mut().remove(key);
    }

    pub(crate) fn cache_get(&self, path: &NodePath, rid: &Rid) -> Option<CalcResult<CalcValue>> {
        self.cache
            .borrow()
            .get(path)
            .and_then(|outputs| outputs.get(rid))
            .cloned()
    }

    /// Insert `value` for `(path, rid)` unless a value is already cached.
    pub(crate) fn cache_insert_once(&self, path: &NodePath, rid: Rid, value: CalcResult<CalcValue>) {
        self.cache
            .borrow_mut()
            .entry(path.clone())
            .or_default()
            .entry(rid)
            .or_insert(value);
    }

    pub(crate) fn record_input_once(&self, path: &NodePath, rid: Rid, result: InputResult) {
        self.trace
            .borrow_mut()
            .entry(path.clone())
            .or_default()
            .record_input_once(rid, result);
    }

    pub(crate) fn record_output_once(&self, path: &NodePath, rid: Rid, result: OutputResult) {
        self.trace
            .borrow_mut()
            .entry(path.clone())
            .or_default()
            .record_output_once(rid, result);
    }

    pub(crate) fn into_trace(self) -> HashMap<NodePath, NodeEvaluation> {
        self.trace.into_inner()
    }
}
