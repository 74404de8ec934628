//! Text assertions
//!
//! Lengths count `char`s, not bytes.

use crate::message::catalog;
use crate::parameter::ParameterRecord;
use crate::step::{Builder, Leaf, Step};

/// Assertions on text.
///
/// ```rust
/// use tidemark::prelude::*;
///
/// let chain = Builder::<String>::new().not().has_length(4);
/// assert!(!chain.test(&"text".to_string()));
/// assert!(chain.test(&"txt".to_string()));
/// ```
pub trait CharSequenceAssertions<S> {
    /// The text has no characters.
    fn is_empty(self) -> Step<S>;

    /// The text only contains whitespace, or nothing.
    fn is_blank(self) -> Step<S>;

    /// The text has exactly `length` characters.
    fn has_length(self, length: usize) -> Step<S>;

    /// The text contains `needle`. An empty needle is a precondition
    /// failure.
    fn contains(self, needle: impl Into<String>) -> Step<S>;

    /// The text starts with `prefix`.
    fn starts_with(self, prefix: impl Into<String>) -> Step<S>;

    /// The text ends with `suffix`.
    fn ends_with(self, suffix: impl Into<String>) -> Step<S>;

    /// The texts are equal ignoring case.
    fn is_equal_ignore_case(self, other: impl Into<String>) -> Step<S>;
}

fn search<S, F>(key: catalog::MessageKey, text: String, check: F) -> Leaf<S>
where
    S: AsRef<str> + 'static,
    F: Fn(&str, &str) -> bool + Send + Sync + 'static,
{
    let record = ParameterRecord::of(&text);
    Leaf::new(key, move |subject: &S, _| check(subject.as_ref(), &text)).parameter(record)
}

macro_rules! impl_char_sequence {
    ($($ty:ty),+) => {
        $(
            impl CharSequenceAssertions<$ty> for Builder<$ty> {
                fn is_empty(self) -> Step<$ty> {
                    self.push(Leaf::new(catalog::CHARS_EMPTY, |s: &$ty, _| s.is_empty()))
                }

                fn is_blank(self) -> Step<$ty> {
                    self.push(Leaf::new(catalog::CHARS_BLANK, |s: &$ty, _| {
                        s.chars().all(char::is_whitespace)
                    }))
                }

                fn has_length(self, length: usize) -> Step<$ty> {
                    let leaf = Leaf::new(catalog::CHARS_LENGTH, move |s: &$ty, _| {
                        s.chars().count() == length
                    })
                    .parameter(ParameterRecord::new(length));
                    self.push(leaf)
                }

                fn contains(self, needle: impl Into<String>) -> Step<$ty> {
                    let needle = needle.into();
                    let empty = needle.is_empty();
                    let leaf = search(catalog::CHARS_CONTAINS, needle, |s, n| s.contains(n))
                        .precondition(move |_| {
                            if empty {
                                Err(catalog::CHARS_EMPTY_SEARCH)
                            } else {
                                Ok(())
                            }
                        });
                    self.push(leaf)
                }

                fn starts_with(self, prefix: impl Into<String>) -> Step<$ty> {
                    self.push(search(catalog::CHARS_STARTS_WITH, prefix.into(), |s, p| {
                        s.starts_with(p)
                    }))
                }

                fn ends_with(self, suffix: impl Into<String>) -> Step<$ty> {
                    self.push(search(catalog::CHARS_ENDS_WITH, suffix.into(), |s, p| {
                        s.ends_with(p)
                    }))
                }

                fn is_equal_ignore_case(self, other: impl Into<String>) -> Step<$ty> {
                    self.push(search(catalog::CHARS_EQUALS_IGNORE_CASE, other.into(), |s, o| {
                        s.to_lowercase() == o.to_lowercase()
                    }))
                }
            }
        )+
    };
}

impl_char_sequence!(String, &'static str);
