//! Predicate trait
//!
//! [`Predicate`] is the seam between chains and plain boolean functions.
//! Closures implement it, so they can be passed to
//! [`ObjectAssertions::matches`](crate::assertions::object::ObjectAssertions::matches)
//! and the collection `all_match`/`any_match` assertions, and every [`Step`]
//! implements it, so a chain can be used wherever a predicate is expected.
//!
//! # Example
//!
//! ```rust
//! use tidemark::predicate::*;
//! use tidemark::prelude::*;
//!
//! let small = Builder::<i32>::new().is_lt(10);
//! assert!(small.check(&4));
//! assert!(!small.check(&12));
//!
//! let elements = Builder::<Vec<i32>>::new().all_match(small);
//! assert!(elements.test(&vec![1, 2, 3]));
//! ```

use crate::parameter::Subject;
use crate::step::Step;

/// A predicate over values of type `T`.
pub trait Predicate<T: ?Sized>: Send + Sync {
    /// Check if the value satisfies this predicate.
    fn check(&self, value: &T) -> bool;
}

impl<T: ?Sized, F> Predicate<T> for F
where
    F: Fn(&T) -> bool + Send + Sync,
{
    #[inline]
    fn check(&self, value: &T) -> bool {
        self(value)
    }
}

impl<T: Subject> Predicate<T> for Step<T> {
    fn check(&self, value: &T) -> bool {
        self.test(value)
    }
}
