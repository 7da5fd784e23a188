//! Invariant validation shared by skyline representations, closures and the
//! lattice arena.
//!
//! Checks are cheap enough for tests but not for hot loops, so traversals only
//! run them on finalized nodes and only when `debug_assertions` or the
//! `check-invariants` feature is on.

use crate::skycube_error::SkycubeError;

/// Trait for validating data structure invariants.
pub trait DebugInvariants {
    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), SkycubeError>;

    /// Assert invariants in debug builds or when `check-invariants` is enabled.
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "debug_assert_invariants");
    }
}

/// Turn a failed condition into [`SkycubeError::InvariantViolation`].
#[inline]
pub(crate) fn ensure(cond: bool, what: impl FnOnce() -> String) -> Result<(), SkycubeError> {
    if cond {
        Ok(())
    } else {
        Err(SkycubeError::InvariantViolation(what()))
    }
}

/// Helper macro to run a fallible check and panic on error when invariant
/// checking is enabled.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[skycube invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}
