//! The engine: builds the indexes once, then serves repeated `evaluate`
//! calls against the same graph.

use crate::config::EngineConfig;
use crate::context::EvaluationContext;
use crate::evaluate::evaluate_requested;
use crate::evaluation_result::EvaluationResult;
use crate::index::{self, GraphIndex};
use crate::node::Node;
use crate::override_::AdhocOverride;
use calc_common::{CalcError, CalcResult, NodePath, Rid, Snapshot};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{info, instrument};

/// An indexed, immutable calculation graph, ready to be evaluated
/// repeatedly (and, since evaluation only borrows `self`, concurrently)
/// against different snapshots and overrides.
pub struct Engine {
    root: Arc<Node>,
    index: GraphIndex,
    config: EngineConfig,
}

impl Engine {
    /// Build an engine from a root node and configuration, running the
    /// indexing pass that validates every construction-time invariant.
    ///
    /// # Errors
    ///
    /// Returns `CalcError::NameCollision`, `CalcError::DuplicateProvider` or
    /// `CalcError::FlywireOutOfScope` if the graph violates one of the
    /// invariants those variants describe.
    #[instrument(skip(root, config))]
    pub fn build(root: Node, config: EngineConfig) -> Result<Self, CalcError> {
        let root = Arc::new(root);
        let index = index::build(&root)?;
        info!("engine built");
        Ok(Self {
            root,
            index,
            config,
        })
    }

    /// Build an engine with default configuration.
    ///
    /// # Errors
    ///
    /// See [`Self::build`].
    pub fn build_default(root: Node) -> Result<Self, CalcError> {
        Self::build(root, EngineConfig::default())
    }

    /// The root of the indexed graph.
    #[must_use]
    pub fn root(&self) -> &Arc<Node> {
        &self.root
    }

    /// Evaluate `requested_rids` at `requested_path` under `snapshot`, with
    /// `overrides` applied for this request only.
    #[instrument(skip(self, overrides), fields(path = %requested_path))]
    pub fn evaluate(
        &self,
        snapshot: Snapshot,
        requested_path: &NodePath,
        requested_rids: HashSet<Rid>,
        overrides: AdhocOverride,
    ) -> EvaluationResult {
        let ctx = match EvaluationContext::new(
            snapshot.clone(),
            &overrides,
            self.config.max_resolve_iterations,
        ) {
            Ok(ctx) => ctx,
            Err(err) => {
                let results = requested_rids
                    .into_iter()
                    .map(|rid| (rid, CalcResult::Failure(err.clone())))
                    .collect();
                return EvaluationResult {
                    snapshot,
                    requested_path: requested_path.clone(),
                    overrides,
                    results,
                    node_evaluations: HashMap::new(),
                    root: Arc::clone(&self.root),
                };
            }
        };

        let results = if self.index.node(requested_path).is_none() {
            requested_rids
                .into_iter()
                .map(|rid| {
                    (
                        rid,
                        CalcResult::Failure(CalcError::UnknownNode(requested_path.clone())),
                    )
                })
                .collect()
        } else {
            evaluate_requested(&ctx, &self.index, requested_path, &requested_rids)
        };

        EvaluationResult {
            snapshot: ctx.snapshot().clone(),
            requested_path: requested_path.clone(),
            overrides,
            results,
            node_evaluations: ctx.into_trace(),
            root: Arc::clone(&self.root),
        }
    }
}

/// Run the indexing pass over `root`, discarding the resulting [`Engine`].
/// Useful for validating a graph (in a test, or a CI check) without
/// needing to drive an evaluation afterwards.
///
/// # Errors
///
/// See [`Engine::build`].
pub fn validate_graph(root: Node) -> Result<(), CalcError> {
    Engine::build(root, EngineConfig::default()).map(|_| ())
}
