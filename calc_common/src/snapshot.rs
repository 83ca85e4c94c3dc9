//! Point-in-time identifiers passed unchanged to atomic nodes.

/// An optional logical and an optional physical timestamp identifying the
/// "when" of an evaluation. Both may be absent, meaning "now".
///
/// The engine never inspects these fields; it threads the snapshot through
/// to `resolve_deps` and `compute` verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Snapshot {
    logical: Option<i64>,
    physical: Option<i64>,
}

impl Snapshot {
    /// A snapshot with both fields absent, meaning "now".
    #[must_use]
    pub fn now() -> Self {
        Self::default()
    }

    /// A snapshot pinned to explicit logical and/or physical timestamps.
    #[must_use]
    pub fn at(logical: Option<i64>, physical: Option<i64>) -> Self {
        Self { logical, physical }
    }

    /// The logical timestamp, if pinned.
    #[must_use]
    pub fn logical(&self) -> Option<i64> {
        self.logical
    }

    /// The physical timestamp, if pinned.
    #[must_use]
    pub fn physical(&self) -> Option<i64> {
        self.physical
    }
}
