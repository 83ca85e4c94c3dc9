//! Shared value types for the calculation engine.
//!
//! These types have no knowledge of the node hierarchy or the resolution
//! algorithm that consumes them (that lives in `calc_engine`). They are the
//! vocabulary every layer of the engine speaks: resource identifiers,
//! connection points that locate a slot on a node, flywires that rewire one
//! connection point to another, scopes that filter a group's exposed
//! outputs, snapshots that pin "when" an evaluation happened, and the
//! `CalcResult` sum type that replaces exceptions at every boundary.

pub mod error;
pub mod flywire;
pub mod path;
pub mod result;
pub mod rid;
pub mod scope;
pub mod snapshot;
pub mod value;

pub use error::CalcError;
pub use flywire::Flywire;
pub use path::NodePath;
pub use result::CalcResult;
pub use rid::{ConnectionPoint, Rid};
pub use scope::Scope;
pub use snapshot::Snapshot;
pub use value::CalcValue;
