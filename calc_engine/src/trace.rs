//! The evaluation trace: a per-node record of every input resolved and
//! output produced during a single `Engine::evaluate` call.

use calc_common::{CalcResult, CalcValue, Rid};
use std::collections::HashMap;

/// How an input's value was obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceType {
    /// Supplied directly by an ad-hoc input override for this request.
    AdhocInput,
    /// Obtained by following a flywire rewrite to another connection point.
    Flywire,
    /// Obtained by evaluating a sibling (or descendant-of-sibling) provider.
    Sibling,
}

/// A single resolved input, with provenance.
#[derive(Clone, Debug, PartialEq)]
pub struct InputResult {
    /// The resolved value.
    pub value: CalcResult<CalcValue>,
    /// How it was obtained.
    pub source_type: SourceType,
    /// `true` for `AdhocInput` and `Sibling` resolutions; `false` when a
    /// flywire rewrite was followed to get here.
    pub is_direct: bool,
}

/// A single produced output.
#[derive(Clone, Debug, PartialEq)]
pub struct OutputResult {
    /// The produced value.
    pub value: CalcResult<CalcValue>,
}

/// The inputs resolved and outputs produced for one node during an
/// evaluation. Entries are record-once: the first value written for a given
/// RID wins, even if later resolution would (incorrectly) attempt to
/// overwrite it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeEvaluation {
    /// Inputs resolved for this node, keyed by RID.
    pub inputs: HashMap<Rid, InputResult>,
    /// Outputs produced for this node, keyed by RID.
    pub outputs: HashMap<Rid, OutputResult>,
}

impl NodeEvaluation {
    /// Record an input's resolution, unless one was already recorded for
    /// this RID.
    pub(crate) fn record_input_once(&mut self, rid: Rid, result: InputResult) {
        self.inputs.entry(rid).or_insert(result);
    }

    /// Record an output's value, unless one was already recorded for this
    /// RID.
    pub(crate) fn record_output_once(&mut self, rid: Rid, result: OutputResult) {
        self.outputs.entry(rid).or_insert(result);
    }
}
