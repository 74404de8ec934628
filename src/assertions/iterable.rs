//! Iterable assertions
//!
//! `VecDeque`, `LinkedList`, `BTreeSet` and `HashSet` subjects. Ordered
//! checks follow the collection's iteration order, which for `HashSet` is
//! unspecified.

use super::collection::{self, Iterable};
use crate::message::catalog;
use crate::predicate::Predicate;
use crate::step::{Builder, Step};

/// Assertions on iterable collections with elements `E`.
///
/// ```rust
/// use std::collections::BTreeSet;
/// use tidemark::prelude::*;
///
/// let tags: BTreeSet<&str> = ["b", "a", "c"].into_iter().collect();
/// let chain = Builder::<BTreeSet<&str>>::new()
///     .has_size(3)
///     .and()
///     .contains_in_order(vec!["a", "b"]);
/// assert!(chain.test(&tags));
/// ```
pub trait IterableAssertions<E, C> {
    /// The collection has no elements.
    fn is_empty(self) -> Step<C>;

    /// The collection has exactly `size` elements.
    fn has_size(self, size: usize) -> Step<C>;

    /// The collection contains `value`.
    fn contains(self, value: E) -> Step<C>;

    /// The collection contains every one of `values`.
    fn contains_all(self, values: Vec<E>) -> Step<C>;

    /// The collection contains at least one of `values`.
    fn contains_any(self, values: Vec<E>) -> Step<C>;

    /// Iterating the collection yields `values` as a contiguous run.
    fn contains_in_order(self, values: Vec<E>) -> Step<C>;

    /// Every element matches `predicate`.
    fn all_match<P: Predicate<E> + 'static>(self, predicate: P) -> Step<C>;

    /// At least one element matches `predicate`.
    fn any_match<P: Predicate<E> + 'static>(self, predicate: P) -> Step<C>;
}

impl<C: Iterable> IterableAssertions<C::Item, C> for Builder<C> {
    fn is_empty(self) -> Step<C> {
        self.push(collection::is_empty())
    }

    fn has_size(self, size: usize) -> Step<C> {
        self.push(collection::has_size(catalog::COLLECTION_SIZE, size))
    }

    fn contains(self, value: C::Item) -> Step<C> {
        let mode = self.analysis();
        self.push(collection::contains(mode, value))
    }

    fn contains_all(self, values: Vec<C::Item>) -> Step<C> {
        let mode = self.analysis();
        self.push(collection::contains_all(mode, values))
    }

    fn contains_any(self, values: Vec<C::Item>) -> Step<C> {
        let mode = self.analysis();
        self.push(collection::contains_any(mode, values))
    }

    fn contains_in_order(self, values: Vec<C::Item>) -> Step<C> {
        let mode = self.analysis();
        self.push(collection::contains_in_order(mode, values))
    }

    fn all_match<P: Predicate<C::Item> + 'static>(self, predicate: P) -> Step<C> {
        let mode = self.analysis();
        self.push(collection::all_match(mode, predicate))
    }

    fn any_match<P: Predicate<C::Item> + 'static>(self, predicate: P) -> Step<C> {
        let mode = self.analysis();
        self.push(collection::any_match(mode, predicate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalysisMode;
    use crate::locale::Locale;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::{BTreeSet, HashSet, LinkedList, VecDeque};
    use std::hash::BuildHasherDefault;

    #[test]
    fn test_queue() {
        let queue: VecDeque<i32> = VecDeque::from(vec![4, 5, 6]);
        for mode in AnalysisMode::ALL {
            let chain = Builder::<VecDeque<i32>>::with_analysis(mode)
                .contains_in_order(vec![5, 6])
                .and()
                .contains_any(vec![9, 4])
                .and()
                .not()
                .contains(7);
            assert!(chain.test(&queue), "{}", mode);
        }
    }

    #[test]
    fn test_linked_list_order_violation() {
        let list: LinkedList<char> = "tu".chars().collect();
        assert!(!Builder::<LinkedList<char>>::new()
            .contains_in_order(vec!['u', 't'])
            .test(&list));
    }

    #[test]
    fn test_hash_set_membership() {
        let set: HashSet<u8> = [1, 2, 3].into_iter().collect();
        let chain = Builder::<HashSet<u8>>::with_analysis(AnalysisMode::Stream)
            .contains_all(vec![1, 3])
            .and()
            .all_match(|n: &u8| *n < 4);
        assert!(chain.test(&set));
    }

    #[test]
    fn test_hash_set_with_custom_hasher() {
        type Fixed = BuildHasherDefault<DefaultHasher>;
        let set: HashSet<u8, Fixed> = [7].into_iter().collect();
        let chain = Builder::<HashSet<u8, Fixed>>::new()
            .contains(7)
            .and()
            .has_size(2);

        let failure = chain.that(set).failure_in(&Locale::root()).unwrap();
        assert_eq!(failure.position, 1);
        assert_eq!(failure.message, "the iterable '[7]' should have a size of: '2'");
    }

    #[test]
    fn test_size_message_uses_iterable_noun() {
        let set: BTreeSet<i32> = [1].into_iter().collect();
        let failure = Builder::<BTreeSet<i32>>::new()
            .has_size(2)
            .that(set)
            .failure_in(&Locale::root())
            .unwrap();
        assert_eq!(failure.message, "the iterable '[1]' should have a size of: '2'");
    }

    #[test]
    fn test_empty() {
        assert!(Builder::<VecDeque<i32>>::new().is_empty().test(&VecDeque::new()));
        assert!(Builder::<BTreeSet<i32>>::new().not().is_empty().test(&[1].into()));
    }
}
