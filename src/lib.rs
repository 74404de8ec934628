//! # Tidemark
//!
//! Fluent assertion chains: typed checks joined by boolean operators,
//! evaluated against a subject, reported as one locale-aware message.
//!
//! ## Philosophy
//!
//! A chain is a **value**. Every step is immutable and shared, so a chain
//! can be built once, extended in several directions and evaluated from any
//! number of threads. Evaluation never panics on a failed check; the caller
//! decides whether a failure becomes a `bool`, a message, an
//! [`AssertionError`] or an error of their own.
//!
//! ## Quick Example
//!
//! ```rust
//! use tidemark::prelude::*;
//!
//! // 0 < port < 65536 AND port is not one of the reserved ports
//! let port = Builder::<u32>::new()
//!     .is_between(1, 65535)
//!     .and()
//!     .not()
//!     .is_one_of(vec![22, 25]);
//!
//! assert!(port.test(&8080));
//! assert_eq!(
//!     port.that(22).errors(),
//!     Some("the number '22' should NOT be one of: '[22, 25]'")
//! );
//!
//! let error = port.that(0).or_fail().unwrap_err();
//! assert_eq!(error.kind(), FailureKind::Assertion);
//! ```
//!
//! ## Combining
//!
//! Steps are folded left to right, with no precedence between operators.
//! Grouping is done with sub-chains:
//!
//! ```rust
//! use tidemark::prelude::*;
//!
//! let small = Builder::<i32>::new().is_gt(0).and().is_lt(10);
//! let large = Builder::<i32>::new().is_gt(100).and().is_lt(200);
//!
//! // zero OR (small) OR (large)
//! let chain = Builder::<i32>::new().is_zero().or_chain(&small).or_chain(&large);
//!
//! assert!(chain.test(&0));
//! assert!(chain.test(&150));
//! assert!(!chain.test(&50));
//! ```
//!
//! ## Messages
//!
//! Failure messages come from a catalog of default templates, or from a
//! template attached to a step with [`Step::with_message`]. Templates mix two
//! placeholder namespaces: plain `%s` and `%1$s` refer to the caller's own
//! arguments, starred `%s*` and `%1$s*` to the engine's (the subject, then
//! the step's parameters). See [`message::format`].

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod analysis;
pub mod assertions;
pub mod error;
pub mod evaluator;
pub mod locale;
pub mod message;
pub mod parameter;
pub mod predicate;
pub mod step;
pub mod testing;

#[cfg(feature = "serde")]
mod serde_impl;

// Re-exports
pub use analysis::AnalysisMode;
pub use error::{
    AssertionError, ChainError, Failure, FailureKind, FormatError, Namespace, ParseLocaleError,
};
pub use evaluator::Evaluator;
pub use message::catalog::MessageKey;
pub use message::CustomMessage;
pub use parameter::{ParamValue, ParameterRecord, SemanticType, Subject, SubjectKind};
pub use predicate::Predicate;
pub use step::{Builder, Checker, Leaf, Operator, Precondition, Step, StepSpec};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::analysis::AnalysisMode;
    pub use crate::assertions::{
        ArrayAssertions, BooleanAssertions, CalendarField, CharSequenceAssertions,
        DateAssertions, IterableAssertions, MapAssertions, NumberAssertions, ObjectAssertions,
        OptionAssertions, ThrowableAssertions,
    };
    pub use crate::error::{AssertionError, FailureKind};
    pub use crate::evaluator::Evaluator;
    pub use crate::predicate::Predicate;
    pub use crate::step::{Builder, Operator, Step};
}
