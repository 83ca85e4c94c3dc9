//! The error kinds carried by `Failure` (and, for the construction-time
//! variants, returned directly from `build_engine`).

use thiserror::Error;

use crate::path::NodePath;
use crate::rid::{ConnectionPoint, Rid};

/// Every failure mode the calculation engine can produce.
///
/// `DuplicateProvider`, `FlywireTypeMismatch` and `NameCollision` are raised
/// only at construction time, before any evaluation happens. The remaining
/// variants are evaluation-time values that travel inside
/// [`crate::result::CalcResult::Failure`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CalcError {
    /// No provider, ad-hoc override or flywire satisfied the connection
    /// point.
    #[error("no provider satisfies {0}")]
    UnresolvedDependency(ConnectionPoint),

    /// The requested node path is not present in the graph.
    #[error("no node at path {0}")]
    UnknownNode(NodePath),

    /// Resolution re-entered a `(path, rid)` pair that is already in
    /// flight.
    #[error("cycle detected while resolving {0}")]
    CycleDetected(ConnectionPoint),

    /// A required input failed; the failure is propagated rather than
    /// computed over.
    #[error("upstream input {rid} failed: {cause}")]
    UpstreamFailure {
        /// The RID of the input that failed.
        rid: Rid,
        /// The failure that caused the propagation, boxed to keep
        /// `CalcError` from being infinitely recursive in size.
        cause: Box<CalcError>,
    },

    /// A node's `compute` panicked; the panic payload (or as much of it as
    /// could be extracted) is captured here instead of unwinding into the
    /// engine.
    #[error("compute panicked: {0}")]
    ComputeException(String),

    /// `resolve_deps` failed to reach a fixed point within the configured
    /// iteration cap.
    #[error("resolve_deps did not stabilize within {0} iterations")]
    ResolveDepsDidNotStabilize(usize),

    /// Two children of the same group exposed the same RID.
    #[error("duplicate provider for {rid} in group {group}: {first} and {second}")]
    DuplicateProvider {
        /// The group in which both children expose `rid`.
        group: NodePath,
        /// The RID both children expose.
        rid: Rid,
        /// The path of the first child found to expose `rid`.
        first: NodePath,
        /// The path of the second child found to expose `rid`.
        second: NodePath,
    },

    /// A flywire's endpoints carry RIDs with different type tags.
    #[error("flywire type mismatch: {source} (type {source_type}) -> {target} (type {target_type})", source_type = source.rid.type_tag(), target_type = target.rid.type_tag())]
    FlywireTypeMismatch {
        /// The flywire's source endpoint.
        source: ConnectionPoint,
        /// The flywire's target endpoint.
        target: ConnectionPoint,
    },

    /// Two siblings (atomic nodes or groups) share a name.
    #[error("duplicate child name {name} in group {group}")]
    NameCollision {
        /// The group containing the name collision.
        group: NodePath,
        /// The name shared by two or more children.
        name: String,
    },

    /// The same connection point appears in both the ad-hoc input overrides
    /// and the ad-hoc output overrides of a single request.
    #[error("connection point {0} is overridden as both an input and an output")]
    OverrideConflict(ConnectionPoint),

    /// A flywire's source or target endpoint lies outside the subtree of
    /// the group that declares it.
    #[error("flywire {source} -> {target} declared in group {group} has an endpoint outside that group's subtree")]
    FlywireOutOfScope {
        /// The group that declared the offending flywire.
        group: NodePath,
        /// The flywire's source endpoint.
        source: ConnectionPoint,
        /// The flywire's target endpoint.
        target: ConnectionPoint,
    },
}
