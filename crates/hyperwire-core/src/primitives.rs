//! # Innate Primitives
//!
//! Hardcoded runtime constants for the Hyperwire CORE.
//!
//! ## Primitives
//!
//! 1. **Dispatch Bound**: Caps the number of messages one network call may deliver.
//! 2. **Triplet Shape**: Fixed positions inside `High(predicate, Low(arg1, arg2))`.

/// Default maximum number of messages delivered by a single network call.
///
/// - Every `present`, `withdraw`, `connect` and `disconnect` runs the queue
///   to quiescence.
/// - A wiring cycle between symmetric devices would never settle; the bound
///   turns it into `HyperwireError::DispatchLimit`.
pub const DEFAULT_MAX_DISPATCH_STEPS: usize = 100_000;

/// Position of the predicate inside the high-level wrapper link.
pub const PREDICATE_POSITION: usize = 0;

/// Position of the argument list inside the high-level wrapper link.
pub const ARGUMENTS_POSITION: usize = 1;

/// Position of the first argument inside the argument list.
pub const FIRST_ARGUMENT: usize = 0;

/// Position of the second argument inside the argument list.
pub const SECOND_ARGUMENT: usize = 1;

/// Default high-level wrapper type used by the triplet decomposition.
pub const DEFAULT_HIGH_TYPE: &str = "EvaluationLink";

/// Default argument-list type used by the triplet decomposition.
pub const DEFAULT_LOW_TYPE: &str = "ListLink";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triplet_positions_are_distinct() {
        assert_ne!(PREDICATE_POSITION, ARGUMENTS_POSITION);
        assert_ne!(FIRST_ARGUMENT, SECOND_ARGUMENT);
    }

    #[test]
    fn dispatch_bound_is_positive() {
        assert!(DEFAULT_MAX_DISPATCH_STEPS > 0);
    }
}
