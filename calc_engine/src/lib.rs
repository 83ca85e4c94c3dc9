//! The calculation engine.
//!
//! Builds three immutable indexes over a root [`Node`] (path -> node, scoped
//! providers, scoped flywires), then drives the scope-aware resolution
//! algorithm that turns a requested node path and a set of requested
//! resource identifiers into an [`EvaluationResult`]: a final value per
//! requested RID plus a per-node trace of every input and output touched
//! along the way.
//!
//! Concrete leaf computations are an external collaborator: this crate only
//! requires each atomic node to implement [`node::Compute`].

pub mod config;
pub mod context;
pub mod engine;
pub mod evaluate;
pub mod evaluation_result;
pub mod index;
pub mod node;
pub mod override_;
pub mod resolve;
pub mod trace;

pub use calc_common::{
    CalcError, CalcResult, CalcValue, ConnectionPoint, Flywire, NodePath, Rid, Scope, Snapshot,
};
pub use config::EngineConfig;
pub use engine::Engine;
pub use evaluation_result::EvaluationResult;
pub use node::{AtomicNode, Compute, Group, Node};
pub use override_::AdhocOverride;
pub use trace::{InputResult, NodeEvaluation, OutputResult, SourceType};
