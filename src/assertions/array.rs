//! Array assertions
//!
//! `Vec<E>` subjects. Counted checks run with the chain's
//! [`AnalysisMode`](crate::AnalysisMode):
//!
//! ```rust
//! use tidemark::prelude::*;
//!
//! let chain = Builder::<Vec<&str>>::with_analysis(AnalysisMode::Parallel)
//!     .contains_in_order(vec!["u"])
//!     .and()
//!     .not()
//!     .contains_in_order(vec!["u", "t"]);
//!
//! assert!(chain.that(vec!["t", "u"]).is_ok());
//! ```

use super::collection;
use crate::message::catalog;
use crate::parameter::Subject;
use crate::predicate::Predicate;
use crate::step::{Builder, Step};

/// Assertions on `Vec<E>`.
pub trait ArrayAssertions<E> {
    /// The array has no elements.
    fn is_empty(self) -> Step<Vec<E>>;

    /// The array has exactly `length` elements.
    fn has_length(self, length: usize) -> Step<Vec<E>>;

    /// The array contains `value`.
    fn contains(self, value: E) -> Step<Vec<E>>;

    /// The array contains every one of `values`.
    fn contains_all(self, values: Vec<E>) -> Step<Vec<E>>;

    /// The array contains at least one of `values`.
    fn contains_any(self, values: Vec<E>) -> Step<Vec<E>>;

    /// The array contains `values` as a contiguous run, in this order.
    fn contains_in_order(self, values: Vec<E>) -> Step<Vec<E>>;

    /// Every element matches `predicate`.
    fn all_match<P: Predicate<E> + 'static>(self, predicate: P) -> Step<Vec<E>>;

    /// At least one element matches `predicate`.
    fn any_match<P: Predicate<E> + 'static>(self, predicate: P) -> Step<Vec<E>>;
}

impl<E> ArrayAssertions<E> for Builder<Vec<E>>
where
    E: Subject + PartialEq + Send + Sync,
{
    fn is_empty(self) -> Step<Vec<E>> {
        self.push(collection::is_empty())
    }

    fn has_length(self, length: usize) -> Step<Vec<E>> {
        self.push(collection::has_size(catalog::COLLECTION_LENGTH, length))
    }

    fn contains(self, value: E) -> Step<Vec<E>> {
        let mode = self.analysis();
        self.push(collection::contains(mode, value))
    }

    fn contains_all(self, values: Vec<E>) -> Step<Vec<E>> {
        let mode = self.analysis();
        self.push(collection::contains_all(mode, values))
    }

    fn contains_any(self, values: Vec<E>) -> Step<Vec<E>> {
        let mode = self.analysis();
        self.push(collection::contains_any(mode, values))
    }

    fn contains_in_order(self, values: Vec<E>) -> Step<Vec<E>> {
        let mode = self.analysis();
        self.push(collection::contains_in_order(mode, values))
    }

    fn all_match<P: Predicate<E> + 'static>(self, predicate: P) -> Step<Vec<E>> {
        let mode = self.analysis();
        self.push(collection::all_match(mode, predicate))
    }

    fn any_match<P: Predicate<E> + 'static>(self, predicate: P) -> Step<Vec<E>> {
        let mode = self.analysis();
        self.push(collection::any_match(mode, predicate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalysisMode;
    use crate::assertions::NumberAssertions;
    use crate::locale::Locale;

    #[test]
    fn test_has_length_with_null_element() {
        let subject: Vec<Option<&'static str>> = vec![None, Some("2")];
        let builder = Builder::<Vec<Option<&'static str>>>::new;
        assert!(builder().has_length(2).that(subject.clone()).is_ok());

        let evaluator = builder().has_length(1).that(subject);
        assert!(!evaluator.is_ok());
        let failure = evaluator.failure_in(&Locale::root()).unwrap();
        assert_eq!(
            failure.message,
            "the array '[null, 2]' should have a length of: '1'"
        );
    }

    #[test]
    fn test_contains_in_order() {
        for mode in AnalysisMode::ALL {
            let target = vec!["t", "u"];
            let builder = || Builder::<Vec<&str>>::with_analysis(mode);
            assert!(builder().contains_in_order(vec!["u"]).test(&target));
            assert!(!builder().contains_in_order(vec!["u", "t"]).test(&target));
        }
    }

    #[test]
    fn test_not_contains() {
        let chain = Builder::<Vec<i32>>::new().not().contains(4);
        assert!(chain.test(&vec![1, 2]));
        assert!(!chain.test(&vec![4]));

        let failure = chain.that(vec![4]).failure_in(&Locale::root()).unwrap();
        assert_eq!(failure.message, "the array '[4]' should NOT contain the value: '4'");
    }

    #[test]
    fn test_not_contains_all_is_partial() {
        let chain = Builder::<Vec<i32>>::new().not().contains_all(vec![1, 5]);
        assert!(chain.test(&vec![1, 2]));
        assert!(!chain.test(&vec![1, 5]));
    }

    #[test]
    fn test_match_with_chain_predicate() {
        let small = Builder::<i32>::new().is_lt(10);
        let chain = Builder::<Vec<i32>>::new().any_match(small);
        assert!(chain.test(&vec![30, 3]));
        assert!(!chain.test(&vec![30]));

        let failure = chain.that(vec![30]).failure_in(&Locale::root()).unwrap();
        assert_eq!(
            failure.message,
            "at least one value of the array '[30]' should match the predicate <predicate>"
        );
    }

    #[test]
    fn test_is_empty() {
        assert!(Builder::<Vec<u8>>::new().is_empty().test(&Vec::new()));
        assert!(!Builder::<Vec<u8>>::new().is_empty().test(&vec![0]));
    }
}
