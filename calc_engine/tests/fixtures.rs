#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

//! Demo `Compute` implementations shared by the scenario and property
//! tests: fixed-value providers and a simple mid-price calculator.

use calc_engine::{CalcResult, CalcValue, Compute, Rid, Snapshot};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Once;

static INIT: Once = Once::new();

/// Configures logging for the test runner, once, so the `debug!`/`trace!`
/// calls in `index::build` and `resolve::resolve_point` have somewhere to
/// go when a test is run with `RUST_LOG` set.
pub fn setup_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A provider that always yields the same value for a single RID, counting
/// how many times `compute` actually ran (used to verify overrides and
/// caching prevent redundant invocation).
#[derive(Debug)]
pub struct FixedProvider {
    pub output: Rid,
    pub value: f64,
    pub invocations: AtomicUsize,
}

impl FixedProvider {
    pub fn new(output: Rid, value: f64) -> Self {
        Self {
            output,
            value,
            invocations: AtomicUsize::new(0),
        }
    }

    pub fn invocation_count(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }
}

impl Compute for FixedProvider {
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
        self.invocations.fetch_add(1, Ordering::SeqCst);
        HashMap::from([(self.output.clone(), CalcResult::Success(CalcValue::Number(self.value)))])
    }
}

/// `mid = (ask + bid) / 2`, requiring both inputs before it will compute.
#[derive(Debug)]
pub struct MidCalc {
    pub ask: Rid,
    pub bid: Rid,
    pub mid: Rid,
}

impl Compute for MidCalc {
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

/// `A` produces `y` from `x`; pairing it with a symmetrical `B` produces a
/// dependency cycle.
#[derive(Debug)]
pub struct Passthrough {
    pub input: Rid,
    pub output: Rid,
}

impl Compute for Passthrough {
    fn declared_inputs(&self) -> HashSet<Rid> {
        HashSet::from([self.input.clone()])
    }

    fn declared_outputs(&self) -> HashSet<Rid> {
        HashSet::from([self.output.clone()])
    }

    fn resolve_deps(
        &self,
        _snapshot: &Snapshot,
        already_resolved: &HashMap<Rid, CalcResult<CalcValue>>,
    ) -> HashSet<Rid> {
        if already_resolved.contains_key(&self.input) {
            HashSet::new()
        } else {
            HashSet::from([self.input.clone()])
        }
    }

    fn compute(
        &self,
        _snapshot: &Snapshot,
        inputs: &HashMap<Rid, CalcResult<CalcValue>>,
    ) -> HashMap<Rid, CalcResult<CalcValue>> {
        let value = inputs
            .get(&self.input)
            .cloned()
            .unwrap_or(CalcResult::Failure(calc_engine::CalcError::ComputeException(
                "missing input".to_string(),
            )));
        HashMap::from([(self.output.clone(), value)])
    }
}
