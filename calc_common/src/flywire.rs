//! Flywires: directed, type-checked rewiring edges between connection
//! points.

use crate::error::CalcError;
use crate::rid::ConnectionPoint;
use tracing::{debug, trace};

/// A directed edge `source ConnectionPoint -> target ConnectionPoint`.
///
/// Constructing a flywire whose endpoints carry different RID type tags is
/// rejected: a flywire only rewires resolution, it never changes the type
/// of resource being resolved.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Flywire {
    /// The connection point resolution starts at.
    pub source: ConnectionPoint,
    /// The connection point resolution is redirected to.
    pub target: ConnectionPoint,
}

impl Flywire {
    /// Builds a flywire, rejecting a type mismatch between endpoints.
    ///
    /// # Errors
    ///
    /// Returns `CalcError::FlywireTypeMismatch` if `source.rid.type_tag()`
    /// differs from `target.rid.type_tag()`.
    pub fn new(source: ConnectionPoint, target: ConnectionPoint) -> Result<Self, CalcError> {
        if source.rid.type_tag() != target.rid.type_tag() {
            debug!(%source, %target, "rejecting flywire with mismatched RID types");
            return Err(CalcError::FlywireTypeMismatch {
                source: source.clone(),
                target: target.clone(),
            });
        }
        trace!(%source, %target, "flywire constructed");
        Ok(Self { source, target })
    }
}
