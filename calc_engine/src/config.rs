//! Engine-wide configuration.

/// Tunables for [`crate::Engine`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Upper bound on the number of rounds the multi-stage `resolve_deps`
    /// loop (and the flywire-chase loop) may run before giving up. Guards
    /// against a misbehaving `Compute::resolve_deps` implementation, or a
    /// flywire chain, that never stabilizes.
    pub max_resolve_iterations: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_resolve_iterations: 32,
        }
    }
}
