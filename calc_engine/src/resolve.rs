//! The scope-aware resolution algorithm: turns a single connection point
//! that needs a value into a `(value, source_type, is_direct)` triple.
//!
//! Order of precedence, checked at each enclosing group from innermost to
//! the root:
//!
//! 1. An ad-hoc input override for the exact connection point currently
//!    being resolved — re-checked every time resolution restarts at a new
//!    point, including points reached by following a flywire.
//! 2. An ad-hoc flywire whose target is the current connection point.
//! 3. A graph-defined flywire, declared by the current group, whose target
//!    is the current connection point.
//! 4. A sibling provider of the current connection point's RID, within the
//!    current group (an ad-hoc output override for that provider takes
//!    precedence over actually evaluating it).
//!
//! If step 4 finds nothing, resolution escalates to the parent group and
//! repeats steps 2-4 there. Escalating past the root without a match is an
//! `UnresolvedDependency` failure.

use crate::context::EvaluationContext;
use crate::evaluate::evaluate_requested;
use crate::index::GraphIndex;
use crate::trace::SourceType;
use calc_common::{CalcError, CalcResult, CalcValue, ConnectionPoint, NodePath};
use std::collections::HashSet;
use tracing::{debug, trace};

/// The group a connection point's resolution begins in: the point's own
/// path if that path names a group (a top-level request against a group),
/// otherwise that path's parent.
fn start_group(path: &NodePath, index: &GraphIndex) -> Option<NodePath> {
    if index.is_group(path) {
        Some(path.clone())
    } else {
        path.parent()
    }
}

/// Resolve a single connection point, returning its value together with
/// how it was obtained.
pub(crate) fn resolve_point(
    ctx: &EvaluationContext,
    index: &GraphIndex,
    original: &ConnectionPoint,
) -> (CalcResult<CalcValue>, SourceType, bool) {
    let mut current = original.clone();
    let mut via_flywire = false;
    let Some(mut group) = start_group(&current.path, index) else {
        // The root itself is atomic and has no parent group to supply
        // siblings; nothing can resolve its inputs but ad-hoc overrides.
        if let Some(value) = ctx.overrides().input(original) {
            trace!(point = %original, "resolved via ad-hoc input override at root");
            return (value.clone(), SourceType::AdhocInput, true);
        }
        debug!(point = %original, "unresolved dependency: no parent group to escalate to");
        return (
            CalcResult::Failure(CalcError::UnresolvedDependency(original.clone())),
            SourceType::Sibling,
            true,
        );
    };

    for _ in 0..=ctx.max_iterations() {
        // Re-checked at every connection point resolution restarts at
        // (not just `original`): a flywire can redirect resolution onto a
        // point that itself carries an ad-hoc input override.
        if let Some(value) = ctx.overrides().input(&current) {
            trace!(point = %current, "resolved via ad-hoc input override");
            return (value.clone(), SourceType::AdhocInput, true);
        }

        if let Some(source) = ctx.overrides().flywire_source(&current) {
            trace!(from = %current, to = %source, "rewired via ad-hoc flywire");
            current = source.clone();
            via_flywire = true;
            match start_group(&current.path, index) {
                Some(g) => group = g,
                None => break,
            }
            continue;
        }

        if let Some(source) = index.flywire_source(&group, &current) {
            trace!(from = %current, to = %source, group = %group, "rewired via graph-defined flywire");
            current = source.clone();
            via_flywire = true;
            match start_group(&current.path, index) {
                Some(g) => group = g,
                None => break,
            }
            continue;
        }

        if let Some(provider_path) = index.providers(&group).and_then(|m| m.get(&current.rid)) {
            if provider_path != &current.path {
                let provider_path = provider_path.clone();
                let provider_cp = ConnectionPoint::new(provider_path.clone(), current.rid.clone());
                let source_type = if via_flywire {
                    SourceType::Flywire
                } else {
                    SourceType::Sibling
                };
                let is_direct = !via_flywire;

                trace!(point = %current, provider = %provider_path, "found sibling provider");

                if let Some(value) = ctx.overrides().output(&provider_cp) {
                    trace!(provider = %provider_cp, "resolved via ad-hoc output override");
                    return (value.clone(), source_type, is_direct);
                }

                let mut requested = HashSet::new();
                requested.insert(current.rid.clone());
                let mut results = evaluate_requested(ctx, index, &provider_path, &requested);
                let value = results
                    .remove(&current.rid)
                    .unwrap_or(CalcResult::Failure(CalcError::UnresolvedDependency(provider_cp)));
                return (value, source_type, is_direct);
            }
        }

        match group.parent() {
            Some(parent) => {
                trace!(from = %group, to = %parent, "escalating to parent group");
                group = parent;
            }
            None => break,
        }
    }

    debug!(point = %original, "unresolved dependency");
    (
        CalcResult::Failure(CalcError::UnresolvedDependency(original.clone())),
        SourceType::Sibling,
        true,
    )
}
