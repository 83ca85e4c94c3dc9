//! Evaluating a node for a set of requested RIDs: cycle detection, the
//! memoization cache, the multi-stage `resolve_deps` loop, failure
//! short-circuiting, panic containment and trace recording.

use crate::context::EvaluationContext;
use crate::index::GraphIndex;
use crate::node::{AtomicNode, Node};
use crate::resolve::resolve_point;
use crate::trace::{InputResult, OutputResult};
use calc_common::{CalcError, CalcResult, CalcValue, ConnectionPoint, NodePath, Rid};
use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Evaluate `path` for `requested`, dispatching to atomic evaluation or, for
/// a group, recursively evaluating each requested RID's in-scope provider.
///
/// This is the single entry point used both by `Engine::evaluate` (a
/// top-level request against any node) and by sibling resolution (which may
/// land on either an atomic node or a nested group).
pub(crate) fn evaluate_requested(
    ctx: &EvaluationContext,
    index: &GraphIndex,
    path: &NodePath,
    requested: &HashSet<Rid>,
) -> HashMap<Rid, CalcResult<CalcValue>> {
    let Some(node) = index.node(path) else {
        return requested
            .iter()
            .map(|rid| {
                (
                    rid.clone(),
                    CalcResult::Failure(CalcError::UnknownNode(path.clone())),
                )
            })
            .collect();
    };

    match node.as_ref() {
        Node::Atomic(atomic) => evaluate_atomic(ctx, index, path, atomic, requested),
        Node::Group(_) => evaluate_group(ctx, index, path, requested),
    }
}

/// Evaluating a group directly means evaluating, for each requested RID,
/// the provider the group's own scoped provider index names for it.
fn evaluate_group(
    ctx: &EvaluationContext,
    index: &GraphIndex,
    path: &NodePath,
    requested: &HashSet<Rid>,
) -> HashMap<Rid, CalcResult<CalcValue>> {
    let mut out = HashMap::new();
    for rid in requested {
        let key = (path.clone(), rid.clone());
        if ctx.in_flight_contains(&key) {
            out.insert(
                rid.clone(),
                CalcResult::Failure(CalcError::CycleDetected(ConnectionPoint::new(
                    path.clone(),
                    rid.clone(),
                ))),
            );
            continue;
        }

        let Some(provider_path) = index.providers(path).and_then(|m| m.get(rid)) else {
            out.insert(
                rid.clone(),
                CalcResult::Failure(CalcError::UnresolvedDependency(ConnectionPoint::new(
                    path.clone(),
                    rid.clone(),
                ))),
            );
            continue;
        };

        ctx.push_in_flight(key.clone());
        let mut single = HashSet::new();
        single.insert(rid.clone());
        let mut result = evaluate_requested(ctx, index, provider_path, &single);
        ctx.pop_in_flight(&key);

        if let Some(value) = result.remove(rid) {
            out.insert(rid.clone(), value);
        }
    }
    out
}

/// Evaluate an atomic node for `requested`, per the full evaluation
/// procedure: cycle check, cache check, multi-stage dependency resolution,
/// failure short-circuit, panic-contained compute, then cache and trace the
/// results before returning.
fn evaluate_atomic(
    ctx: &EvaluationContext,
    index: &GraphIndex,
    path: &NodePath,
    atomic: &AtomicNode,
    requested: &HashSet<Rid>,
) -> HashMap<Rid, CalcResult<CalcValue>> {
    let mut result = HashMap::new();
    let mut needed = HashSet::new();

    for rid in requested {
        let key = (path.clone(), rid.clone());
        if ctx.in_flight_contains(&key) {
            result.insert(
                rid.clone(),
                CalcResult::Failure(CalcError::CycleDetected(ConnectionPoint::new(
                    path.clone(),
                    rid.clone(),
                ))),
            );
        } else {
            needed.insert(rid.clone());
        }
    }
    if needed.is_empty() {
        return result;
    }

    let mut still_needed = HashSet::new();
    for rid in needed {
        match ctx.cache_get(path, &rid) {
            Some(value) => {
                result.insert(rid, value);
            }
            None => {
                still_needed.insert(rid);
            }
        }
    }
    if still_needed.is_empty() {
        return result;
    }

    for rid in &still_needed {
        ctx.push_in_flight((path.clone(), rid.clone()));
    }

    let mut resolved_inputs: HashMap<Rid, CalcResult<CalcValue>> = HashMap::new();
    let mut stabilized = false;
    for _ in 0..ctx.max_iterations() {
        let wanted = atomic.resolve_deps(ctx.snapshot(), &resolved_inputs);
        let new_rids: Vec<Rid> = wanted
            .into_iter()
            .filter(|rid| !resolved_inputs.contains_key(rid))
            .collect();
        if new_rids.is_empty() {
            stabilized = true;
            break;
        }
        for input_rid in new_rids {
            let cp = ConnectionPoint::new(path.clone(), input_rid.clone());
            let (value, source_type, is_direct) = resolve_point(ctx, index, &cp);
            ctx.record_input_once(
                path,
                input_rid.clone(),
                InputResult {
                    value: value.clone(),
                    source_type,
                    is_direct,
                },
            );
            resolved_inputs.insert(input_rid, value);
        }
    }

    let outputs: HashMap<Rid, CalcResult<CalcValue>> = if !stabilized {
        atomic
            .declared_outputs()
            .into_iter()
            .map(|rid| {
                (
                    rid,
                    CalcResult::Failure(CalcError::ResolveDepsDidNotStabilize(
                        ctx.max_iterations(),
                    )),
                )
            })
            .collect()
    } else {
        let failed = resolved_inputs
            .iter()
            .find(|(_, v)| v.is_failure())
            .map(|(rid, v)| (rid.clone(), v.failure().expect("checked is_failure").clone()));

        match failed {
            Some((rid, cause)) if !atomic.failure_aware() => atomic
                .declared_outputs()
                .into_iter()
                .map(|out_rid| {
                    (
                        out_rid,
                        CalcResult::Failure(CalcError::UpstreamFailure {
                            rid: rid.clone(),
                            cause: Box::new(cause.clone()),
                        }),
                    )
                })
                .collect(),
            _ => match catch_unwind(AssertUnwindSafe(|| {
                atomic.compute(ctx.snapshot(), &resolved_inputs)
            })) {
                Ok(outputs) => outputs,
                Err(payload) => atomic
                    .declared_outputs()
                    .into_iter()
                    .map(|rid| {
                        (
                            rid,
                            CalcResult::Failure(CalcError::ComputeException(panic_message(
                                &payload,
                            ))),
                        )
                    })
                    .collect(),
            },
        }
    };

    for (rid, value) in &outputs {
        ctx.cache_insert_once(path, rid.clone(), value.clone());
        ctx.record_output_once(
            path,
            rid.clone(),
            OutputResult {
                value: value.clone(),
            },
        );
    }

    for rid in &still_needed {
        ctx.pop_in_flight(&(path.clone(), rid.clone()));
    }

    for rid in still_needed {
        if let Some(value) = ctx.cache_get(path, &rid) {
            result.insert(rid, value);
        }
    }
    result
}

/// Extract a human-readable message from a caught panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "compute panicked with a non-string payload".to_string()
    }
}
