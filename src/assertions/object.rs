//! Assertions on any comparable subject, plus presence checks for
//! `Option`.

use crate::message::catalog;
use crate::parameter::{ParamValue, ParameterRecord, SemanticType, Subject};
use crate::predicate::Predicate;
use crate::step::{Builder, Leaf, Step};

/// Assertions available for every subject that supports equality.
///
/// ```rust
/// use tidemark::prelude::*;
///
/// let chain = Builder::<char>::new()
///     .is_one_of(vec!['a', 'e', 'i', 'o', 'u'])
///     .or()
///     .matches(|c: &char| c.is_ascii_digit());
///
/// assert!(chain.test(&'e'));
/// assert!(chain.test(&'7'));
/// assert!(!chain.test(&'z'));
/// ```
pub trait ObjectAssertions<T> {
    /// The subject equals `expected`.
    fn is_equal(self, expected: T) -> Step<T>;

    /// The subject equals one of `candidates`.
    fn is_one_of(self, candidates: Vec<T>) -> Step<T>;

    /// The subject satisfies `predicate`.
    fn matches<P: Predicate<T> + 'static>(self, predicate: P) -> Step<T>;
}

impl<T> ObjectAssertions<T> for Builder<T>
where
    T: Subject + PartialEq + Send + Sync,
{
    fn is_equal(self, expected: T) -> Step<T> {
        let record = ParameterRecord::of(&expected);
        let leaf = Leaf::new(catalog::OBJECT_EQUAL, move |subject: &T, _| *subject == expected)
            .parameter(record);
        self.push(leaf)
    }

    fn is_one_of(self, candidates: Vec<T>) -> Step<T> {
        let record = ParameterRecord::new(ParamValue::List(
            candidates.iter().map(Subject::describe).collect(),
        ));
        let leaf = Leaf::new(catalog::OBJECT_ONE_OF, move |subject: &T, _| {
            candidates.contains(subject)
        })
        .parameter(record);
        self.push(leaf)
    }

    fn matches<P: Predicate<T> + 'static>(self, predicate: P) -> Step<T> {
        let leaf = Leaf::new(catalog::OBJECT_MATCH, move |subject: &T, _| {
            predicate.check(subject)
        })
        .parameter(ParameterRecord::hidden("predicate", SemanticType::Predicate));
        self.push(leaf)
    }
}

/// Presence checks for optional subjects.
///
/// ```rust
/// use tidemark::prelude::*;
///
/// let chain = Builder::<Option<u32>>::new().is_some();
/// assert!(chain.test(&Some(3)));
/// assert_eq!(chain.that(None).errors(), Some("the number should be present"));
/// ```
pub trait OptionAssertions<T> {
    /// The subject is `None`.
    fn is_none(self) -> Step<Option<T>>;

    /// The subject is `Some`.
    fn is_some(self) -> Step<Option<T>>;
}

impl<T: Subject> OptionAssertions<T> for Builder<Option<T>> {
    fn is_none(self) -> Step<Option<T>> {
        self.push(Leaf::new(catalog::OBJECT_NONE, |subject: &Option<T>, _| {
            subject.is_none()
        }))
    }

    fn is_some(self) -> Step<Option<T>> {
        self.not().is_none()
    }
}
