//! Leaves shared by array and iterable assertions.
//!
//! Every counted check goes through the chain's [`AnalysisMode`] and
//! [`checker_outcome`], so the three modes agree by construction.

use std::collections::{BTreeSet, HashSet, LinkedList, VecDeque};

use crate::analysis::{checker_outcome, AnalysisMode};
use crate::message::catalog::{self, MessageKey};
use crate::parameter::{ParamValue, ParameterRecord, SemanticType, Subject};
use crate::predicate::Predicate;
use crate::step::Leaf;

/// A collection whose elements can be listed in iteration order.
pub trait Elements: Subject + Send + Sync {
    /// Element type.
    type Item: Subject + PartialEq + Send + Sync;

    /// Borrow every element, in iteration order.
    fn elements(&self) -> Vec<&Self::Item>;

    /// Number of elements.
    fn size(&self) -> usize;
}

macro_rules! impl_elements {
    ($($coll:ident),+) => {
        $(
            impl<E: Subject + PartialEq + Send + Sync> Elements for $coll<E> {
                type Item = E;

                fn elements(&self) -> Vec<&E> {
                    self.iter().collect()
                }

                fn size(&self) -> usize {
                    self.len()
                }
            }
        )+
    };
}

impl_elements!(Vec, VecDeque, LinkedList, BTreeSet);

impl<E, S> Elements for HashSet<E, S>
where
    E: Subject + PartialEq + Send + Sync,
    S: Send + Sync + 'static,
{
    type Item = E;

    fn elements(&self) -> Vec<&E> {
        self.iter().collect()
    }

    fn size(&self) -> usize {
        self.len()
    }
}

/// Collections asserted through
/// [`IterableAssertions`](super::IterableAssertions): everything but `Vec`.
pub trait Iterable: Elements {}

impl<E: Subject + PartialEq + Send + Sync> Iterable for VecDeque<E> {}
impl<E: Subject + PartialEq + Send + Sync> Iterable for LinkedList<E> {}
impl<E: Subject + PartialEq + Send + Sync> Iterable for BTreeSet<E> {}
impl<E, S> Iterable for HashSet<E, S>
where
    E: Subject + PartialEq + Send + Sync,
    S: Send + Sync + 'static,
{
}

pub(crate) fn list<E: Subject>(values: &[E]) -> ParameterRecord {
    ParameterRecord::new(ParamValue::List(values.iter().map(Subject::describe).collect()))
}

pub(crate) fn non_empty<C>(
    empty: bool,
) -> impl Fn(&C) -> Result<(), MessageKey> + Send + Sync + 'static {
    move |_| {
        if empty {
            Err(catalog::COLLECTION_EMPTY_SEARCH)
        } else {
            Ok(())
        }
    }
}

pub(crate) fn is_empty<C: Elements>() -> Leaf<C> {
    Leaf::new(catalog::COLLECTION_EMPTY, |subject: &C, _| subject.size() == 0)
}

pub(crate) fn has_size<C: Elements>(key: MessageKey, expected: usize) -> Leaf<C> {
    Leaf::new(key, move |subject: &C, _| subject.size() == expected)
        .parameter(ParameterRecord::new(expected))
}

pub(crate) fn contains<C: Elements>(mode: AnalysisMode, value: C::Item) -> Leaf<C> {
    let record = ParameterRecord::of(&value);
    Leaf::new(catalog::COLLECTION_CONTAINS, move |subject: &C, negate| {
        let elements = subject.elements();
        let found = mode.count(&elements, |element| **element == value);
        checker_outcome(false, negate, found, elements.len())
    })
    .parameter(record)
}

pub(crate) fn contains_all<C: Elements>(mode: AnalysisMode, values: Vec<C::Item>) -> Leaf<C> {
    counted(catalog::COLLECTION_CONTAINS_ALL, true, mode, values)
}

pub(crate) fn contains_any<C: Elements>(mode: AnalysisMode, values: Vec<C::Item>) -> Leaf<C> {
    counted(catalog::COLLECTION_CONTAINS_ANY, false, mode, values)
}

fn counted<C: Elements>(
    key: MessageKey,
    all: bool,
    mode: AnalysisMode,
    values: Vec<C::Item>,
) -> Leaf<C> {
    let record = list(&values);
    let precondition = non_empty(values.is_empty());
    Leaf::new(key, move |subject: &C, negate| {
        let elements = subject.elements();
        let wanted: Vec<&C::Item> = values.iter().collect();
        let found = mode.count_contained(&elements, &wanted);
        checker_outcome(all, negate, found, wanted.len())
    })
    .precondition(precondition)
    .parameter(record)
}

pub(crate) fn contains_in_order<C: Elements>(
    mode: AnalysisMode,
    pattern: Vec<C::Item>,
) -> Leaf<C> {
    let record = list(&pattern);
    let precondition = non_empty(pattern.is_empty());
    Leaf::new(catalog::COLLECTION_CONTAINS_IN_ORDER, move |subject: &C, _| {
        let pattern: Vec<&C::Item> = pattern.iter().collect();
        mode.contains_in_order(&subject.elements(), &pattern)
    })
    .precondition(precondition)
    .parameter(record)
}

pub(crate) fn all_match<C, P>(mode: AnalysisMode, predicate: P) -> Leaf<C>
where
    C: Elements,
    P: Predicate<C::Item> + 'static,
{
    matching(catalog::COLLECTION_ALL_MATCH, true, mode, predicate)
}

pub(crate) fn any_match<C, P>(mode: AnalysisMode, predicate: P) -> Leaf<C>
where
    C: Elements,
    P: Predicate<C::Item> + 'static,
{
    matching(catalog::COLLECTION_ANY_MATCH, false, mode, predicate)
}

fn matching<C, P>(key: MessageKey, all: bool, mode: AnalysisMode, predicate: P) -> Leaf<C>
where
    C: Elements,
    P: Predicate<C::Item> + 'static,
{
    Leaf::new(key, move |subject: &C, negate| {
        let elements = subject.elements();
        let found = mode.count(&elements, |element| predicate.check(element));
        checker_outcome(all, negate, found, elements.len())
    })
    .parameter(ParameterRecord::hidden("predicate", SemanticType::Predicate))
}
