//! Ad-hoc, per-request overrides: values injected directly at specific
//! connection points, and extra flywires that exist only for one
//! evaluation.

use calc_common::{CalcError, CalcResult, CalcValue, ConnectionPoint, Flywire};
use std::collections::HashMap;

/// Per-request overrides supplied to [`crate::Engine::evaluate`].
///
/// `inputs` short-circuits resolution for the given connection points
/// entirely (checked before any flywire or sibling lookup). `outputs`
/// substitutes for what would otherwise be a provider's computed value,
/// once resolution has determined which provider would have been asked.
/// `flywires` are consulted ahead of the graph's own flywires, with the
/// same target-indexed lookup.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AdhocOverride {
    inputs: HashMap<ConnectionPoint, CalcResult<CalcValue>>,
    outputs: HashMap<ConnectionPoint, CalcResult<CalcValue>>,
    flywires: Vec<Flywire>,
}

impl AdhocOverride {
    /// An override with nothing in it.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a direct input override at `cp`.
    #[must_use]
    pub fn with_input(mut self, cp: ConnectionPoint, value: CalcResult<CalcValue>) -> Self {
        self.inputs.insert(cp, value);
        self
    }

    /// Add an output override for the provider at `cp`.
    #[must_use]
    pub fn with_output(mut self, cp: ConnectionPoint, value: CalcResult<CalcValue>) -> Self {
        self.outputs.insert(cp, value);
        self
    }

    /// Add an ad-hoc flywire, valid only for this request.
    #[must_use]
    pub fn with_flywire(mut self, flywire: Flywire) -> Self {
        self.flywires.push(flywire);
        self
    }

    pub(crate) fn inputs(&self) -> &HashMap<ConnectionPoint, CalcResult<CalcValue>> {
        &self.inputs
    }

    pub(crate) fn outputs(&self) -> &HashMap<ConnectionPoint, CalcResult<CalcValue>> {
        &self.outputs
    }

    pub(crate) fn flywires(&self) -> &[Flywire] {
        &self.flywires
    }
}

/// The validated, index-ready form of an [`AdhocOverride`].
pub(crate) struct ResolvedOverrides {
    inputs: HashMap<ConnectionPoint, CalcResult<CalcValue>>,
    outputs: HashMap<ConnectionPoint, CalcResult<CalcValue>>,
    flywires_by_target: HashMap<ConnectionPoint, ConnectionPoint>,
}

impl ResolvedOverrides {
    pub(crate) fn build(overrides: &AdhocOverride) -> Result<Self, CalcError> {
        for cp in overrides.inputs().keys() {
            if overrides.outputs().contains_key(cp) {
                return Err(CalcError::OverrideConflict(cp.clone()));
            }
        }
        let flywires_by_target = overrides
            .flywires()
            .iter()
            .map(|fw| (fw.target.clone(), fw.source.clone()))
            .collect();
        Ok(Self {
            inputs: overrides.inputs().clone(),
            outputs: overrides.outputs().clone(),
            flywires_by_target,
        })
    }

    pub(crate) fn input(&self, cp: &ConnectionPoint) -> Option<&CalcResult<CalcValue>> {
        self.inputs.get(cp)
    }

    pub(crate) fn output(&self, cp: &ConnectionPoint) -> Option<&CalcResult<CalcValue>> {
        self.outputs.get(cp)
    }

    pub(crate) fn flywire_source(&self, target: &ConnectionPoint) -> Option<&ConnectionPoint> {
        self.flywires_by_target.get(target)
    }
}
