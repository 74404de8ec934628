//! Testing utilities for code that builds chains
//!
//! Assertion macros for [`Evaluator`](crate::Evaluator) results, and
//! property-based testing support behind the `proptest` feature.
//!
//! # Assertion Macros
//!
//! ```rust
//! use tidemark::prelude::*;
//! use tidemark::{assert_fails, assert_fails_with, assert_ok};
//!
//! let positive = Builder::<i32>::new().is_positive();
//!
//! assert_ok!(positive.that(4));
//! assert_fails!(positive.that(-4));
//! assert_fails_with!(positive.that(-4), "the number '-4' should be positive");
//! ```
//!
//! Messages compared by [`assert_fails_with!`](crate::assert_fails_with) are
//! rendered with the root locale, so the assertion does not depend on the
//! machine's language settings.

/// Assert that an evaluation passed.
///
/// Panics with the rendered failure message otherwise.
///
/// # Example
///
/// ```rust
/// use tidemark::prelude::*;
/// use tidemark::assert_ok;
///
/// assert_ok!(Builder::<&str>::new().starts_with("ti").that("tidemark"));
/// ```
#[macro_export]
macro_rules! assert_ok {
    ($evaluator:expr) => {
        match $evaluator.failure_in(&$crate::locale::Locale::root()) {
            None => {}
            Some(failure) => {
                panic!("Expected Ok, got {}: {}", failure.kind, failure.message);
            }
        }
    };
}

/// Assert that an evaluation failed.
///
/// # Example
///
/// ```rust
/// use tidemark::prelude::*;
/// use tidemark::assert_fails;
///
/// assert_fails!(Builder::<bool>::new().is_true().that(false));
/// ```
#[macro_export]
macro_rules! assert_fails {
    ($evaluator:expr) => {
        let evaluator = $evaluator;
        if evaluator.is_ok() {
            panic!("Expected failure, got Ok for chain {:?}", evaluator.chain());
        }
    };
}

/// Assert that an evaluation failed with a specific message.
///
/// # Example
///
/// ```rust
/// use tidemark::prelude::*;
/// use tidemark::assert_fails_with;
///
/// assert_fails_with!(
///     Builder::<Vec<i32>>::new().is_empty().that(vec![1]),
///     "the array '[1]' should be empty"
/// );
/// ```
#[macro_export]
macro_rules! assert_fails_with {
    ($evaluator:expr, $expected:expr) => {
        match $evaluator.failure_in(&$crate::locale::Locale::root()) {
            Some(failure) => {
                assert_eq!(failure.message, $expected);
            }
            None => {
                panic!("Expected failure with message {:?}, got Ok", $expected);
            }
        }
    };
}

#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
use crate::{AnalysisMode, Operator};

#[cfg(feature = "proptest")]
impl Arbitrary for AnalysisMode {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            Just(AnalysisMode::Standard),
            Just(AnalysisMode::Stream),
            Just(AnalysisMode::Parallel),
        ]
        .boxed()
    }
}

/// Generates only the binary operators; `Operator::None` joins nothing and
/// is never produced.
#[cfg(feature = "proptest")]
impl Arbitrary for Operator {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        proptest::sample::select(Operator::BINARY.to_vec()).boxed()
    }
}
