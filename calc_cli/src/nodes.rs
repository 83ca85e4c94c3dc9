//! Demo `Compute` implementations wiring a tiny ask/bid/mid graph for the
//! CLI to evaluate.

use calc_engine::{CalcResult, CalcValue, Compute, Rid, Snapshot};
use std::collections::{HashMap, HashSet};

/// A provider that always returns the same number for one RID.
#[derive(Debug)]
pub struct ConstantProvider {
    pub output: Rid,
    pub value: f64,
}

impl Compute for ConstantProvider {
    fn declared_inputs(&self) -> HashSet<Rid> {
        HashSet::new()
    }

    fn declared_outputs(&self) -> HashSet<Rid> {
        HashSet::from([self.output.clone()])
    }

    fn resolve_deps(
        &self,
        _snapshot: &Snapshot,
        _already_resolved: &HashMap<Rid, CalcResult<CalcValue>>,
    ) -> HashSet<Rid> {
        HashSet::new()
    }

    fn compute(
        &self,
        _snapshot: &Snapshot,
        _inputs: &HashMap<Rid, CalcResult<CalcValue>>,
    ) -> HashMap<Rid, CalcResult<CalcValue>> {
        HashMap::from([(
            self.output.clone(),
            CalcResult::Success(CalcValue::Number(self.value)),
        )])
    }
}

/// `mid = (ask + bid) / 2`.
#[derive(Debug)]
pub struct MidPrice {
    pub ask: Rid,
    pub bid: Rid,
    pub mid: Rid,
}

impl Compute for MidPrice {
    fn declared_inputs(&self) -> HashSet<Rid> {
        HashSet::from([self.ask.clone(), self.bid.clone()])
    }

    fn declared_outputs(&self) -> HashSet<Rid> {
        HashSet::from([self.mid.clone()])
    }

    fn resolve_deps(
        &self,
        _snapshot: &Snapshot,
        already_resolved: &HashMap<Rid, CalcResult<CalcValue>>,
    ) -> HashSet<Rid> {
        [&self.ask, &self.bid]
            .into_iter()
            .filter(|rid| !already_resolved.contains_key(*rid))
            .cloned()
            .collect()
    }

    fn compute(
        &self,
        _snapshot: &Snapshot,
        inputs: &HashMap<Rid, CalcResult<CalcValue>>,
    ) -> HashMap<Rid, CalcResult<CalcValue>> {
        let ask = inputs.get(&self.ask).and_then(CalcResult::success).and_then(CalcValue::as_number);
        let bid = inputs.get(&self.bid).and_then(CalcResult::success).and_then(CalcValue::as_number);
        let value = match (ask, bid) {
            (Some(a), Some(b)) => CalcResult::Success(CalcValue::Number((a + b) / 2.0)),
            _ => CalcResult::Failure(calc_engine::CalcError::ComputeException(
                "ask/bid not numeric".to_string(),
            )),
        };
        HashMap::from([(self.mid.clone(), value)])
    }
}
