//! Consistency validation for graph storage.
//!
//! The adjacency store maintains redundant state (edge list plus two
//! per-vertex mirrors, a cached degree table) whose agreement is easy to
//! break and expensive to notice late. Structures with such internal
//! consistency rules implement [`DebugInvariants`]; mutators re-check after
//! every structural change via [`debug_invariants!`], which compiles to
//! nothing in release builds unless a checking feature is enabled.

use crate::lease_error::GraphLeaseError;

/// Trait for validating data structure invariants.
pub trait DebugInvariants {
    /// Validate invariants and return the first violation encountered.
    fn validate_invariants(&self) -> Result<(), GraphLeaseError>;

    /// Assert invariants in debug builds or when invariant checking is
    /// enabled.
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self, core::any::type_name::<Self>());
    }
}

/// Validates the receiver's invariants and panics on violation when
/// invariant checking is enabled. The context expression is only evaluated
/// on failure paths of enabled builds.
#[macro_export]
macro_rules! debug_invariants {
    ($target:expr, $ctx:expr) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $crate::debug_invariants::DebugInvariants::validate_invariants($target) {
            panic!("[invariants] {}: {}", $ctx, e);
        }
    };
}
