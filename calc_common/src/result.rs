//! `CalcResult<T>`: a sealed `Success(T) | Failure(error)` sum type.
//!
//! This is deliberately not `std::result::Result` reused by type alias:
//! `CalcResult` is a value, never used for control flow via
//! `?`-propagation out of the engine's public API. Internals do use
//! `std::result::Result` with `?` for construction-time failures, but a
//! `CalcResult` that reaches a caller is always returned, never raised.

use crate::error::CalcError;

/// `Success(T)` or `Failure(error)`.
#[derive(Clone, Debug, PartialEq)]
pub enum CalcResult<T> {
    /// The computation succeeded, producing `T`.
    Success(T),
    /// The computation failed with `CalcError`.
    Failure(CalcError),
}

impl<T> CalcResult<T> {
    /// True if this is a `Success`.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// True if this is a `Failure`.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Returns the success value, or `None` if this is a `Failure`.
    #[must_use]
    pub fn success(&self) -> Option<&T> {
        match self {
            Self::Success(v) => Some(v),
            Self::Failure(_) => None,
        }
    }

    /// Returns the failure, or `None` if this is a `Success`.
    #[must_use]
    pub fn failure(&self) -> Option<&CalcError> {
        match self {
            Self::Success(_) => None,
            Self::Failure(e) => Some(e),
        }
    }

    /// Applies `f` to the success value, leaving a `Failure` untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> CalcResult<U> {
        match self {
            Self::Success(v) => CalcResult::Success(f(v)),
            Self::Failure(e) => CalcResult::Failure(e),
        }
    }

    /// Chains a `CalcResult`-returning computation onto a success value,
    /// leaving a `Failure` untouched (and never invoking `f`).
    pub fn and_then<U>(self, f: impl FnOnce(T) -> CalcResult<U>) -> CalcResult<U> {
        match self {
            Self::Success(v) => f(v),
            Self::Failure(e) => CalcResult::Failure(e),
        }
    }
}

impl<T> From<Result<T, CalcError>> for CalcResult<T> {
    fn from(value: Result<T, CalcError>) -> Self {
        match value {
            Ok(v) => Self::Success(v),
            Err(e) => Self::Failure(e),
        }
    }
}
