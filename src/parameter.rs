//! Parameter records and subject descriptions
//!
//! Every step carries an ordered list of [`ParameterRecord`]s: the values an
//! assertion was built with (an expected length, a bound, a searched
//! element). Together with the displayed subject they form the engine
//! namespace of the step's message template.
//!
//! Values are stored as [`ParamValue`], a small dynamic representation that
//! the message formatter knows how to render for a locale. Types that can be
//! asserted on implement [`Subject`] to produce one.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};

/// Dynamic value referenced by a message template.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Absent value, rendered as `null`.
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i128),
    /// Unsigned integer.
    UInt(u128),
    /// Floating point number.
    Float(f64),
    /// Single character.
    Char(char),
    /// Text, rendered without quotes.
    Text(String),
    /// Calendar date, rendered with the locale's date pattern.
    Date(NaiveDate),
    /// Date and time, rendered with the locale's date-time pattern.
    DateTime(NaiveDateTime),
    /// Signed duration.
    Duration(TimeDelta),
    /// Ordered values, rendered as `[a, b]`.
    List(Vec<ParamValue>),
    /// Key/value pairs, rendered as `{k=v, ...}`.
    Entries(Vec<(ParamValue, ParamValue)>),
    /// A value with no printable form (a closure, a handle). Rendered as
    /// `<name>`.
    Opaque(&'static str),
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<char> for ParamValue {
    fn from(value: char) -> Self {
        ParamValue::Char(value)
    }
}

macro_rules! impl_param_from_number {
    ($variant:ident, $wide:ty, [$($ty:ty),+]) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    ParamValue::$variant(value as $wide)
                }
            }
        )+
    };
}

impl_param_from_number!(Int, i128, [i8, i16, i32, i64, i128, isize]);
impl_param_from_number!(UInt, u128, [u8, u16, u32, u64, u128, usize]);
impl_param_from_number!(Float, f64, [f64]);

impl From<f32> for ParamValue {
    fn from(value: f32) -> Self {
        ParamValue::Float(widen(value))
    }
}

/// Widen through the shortest decimal form, so `0.1f32` stays `0.1`.
fn widen(value: f32) -> f64 {
    value.to_string().parse().unwrap_or(f64::from(value))
}

/// Semantic tag of a parameter, guiding how its value is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SemanticType {
    /// Rendered from the value alone.
    #[default]
    Plain,
    /// An integer index of a [`CalendarField`](crate::assertions::date::CalendarField),
    /// rendered as the field's name.
    CalendarField,
    /// A caller-supplied predicate.
    Predicate,
}

/// One immutable parameter of a step.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterRecord {
    value: ParamValue,
    semantic: SemanticType,
    displayable: bool,
}

impl ParameterRecord {
    /// A displayable parameter with plain semantics.
    pub fn new(value: impl Into<ParamValue>) -> Self {
        ParameterRecord {
            value: value.into(),
            semantic: SemanticType::Plain,
            displayable: true,
        }
    }

    /// A displayable parameter describing a subject-like value.
    pub fn of<S: Subject + ?Sized>(value: &S) -> Self {
        ParameterRecord::new(value.describe())
    }

    /// A displayable parameter with an explicit semantic tag.
    pub fn with_semantic(value: impl Into<ParamValue>, semantic: SemanticType) -> Self {
        ParameterRecord {
            value: value.into(),
            semantic,
            displayable: true,
        }
    }

    /// A parameter that must not be printed, rendered as `<name>`.
    pub fn hidden(name: &'static str, semantic: SemanticType) -> Self {
        ParameterRecord {
            value: ParamValue::Opaque(name),
            semantic,
            displayable: false,
        }
    }

    /// The stored value.
    pub fn value(&self) -> &ParamValue {
        &self.value
    }

    /// The semantic tag.
    pub fn semantic(&self) -> SemanticType {
        self.semantic
    }

    /// Whether the value may be printed.
    pub fn is_displayable(&self) -> bool {
        self.displayable
    }
}

/// Kind of subject a chain is built for, fixed on the chain root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SubjectKind {
    /// `Vec` and other index-addressed sequences.
    Array,
    /// Text.
    CharSequence,
    /// Primitive numbers.
    Number,
    /// Calendar dates.
    Date,
    /// Date-times, instants and durations.
    Temporal,
    /// Fieldless enumerations.
    Enumeration,
    /// Sets, queues and other iterable collections.
    Iterable,
    /// Key/value maps.
    Map,
    /// Anything else.
    #[default]
    Object,
    /// `bool`.
    Boolean,
    /// Error values.
    Throwable,
}

impl SubjectKind {
    /// Noun used in default messages, e.g. "the number '3' ...".
    pub fn noun(self) -> &'static str {
        match self {
            SubjectKind::Array => "array",
            SubjectKind::CharSequence => "char sequence",
            SubjectKind::Number => "number",
            SubjectKind::Date => "date",
            SubjectKind::Temporal => "temporal",
            SubjectKind::Enumeration => "enumeration",
            SubjectKind::Iterable => "iterable",
            SubjectKind::Map => "map",
            SubjectKind::Object => "object",
            SubjectKind::Boolean => "boolean",
            SubjectKind::Throwable => "throwable",
        }
    }
}

impl fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

/// A type that chains can be built for.
///
/// `describe` produces the value displayed for the subject in failure
/// messages (the first engine-namespace argument). `KIND` picks the noun
/// used by generic messages.
///
/// # Example
///
/// ```rust
/// use tidemark::{ParamValue, Subject, SubjectKind};
///
/// #[derive(PartialEq)]
/// struct Port(u16);
///
/// impl Subject for Port {
///     const KIND: SubjectKind = SubjectKind::Number;
///
///     fn describe(&self) -> ParamValue {
///         ParamValue::UInt(self.0 as u128)
///     }
/// }
///
/// assert_eq!(Port(8080).describe(), ParamValue::UInt(8080));
/// ```
pub trait Subject: 'static {
    /// Kind of subject, used for message nouns.
    const KIND: SubjectKind = SubjectKind::Object;

    /// Displayable form of the value.
    fn describe(&self) -> ParamValue;
}

macro_rules! impl_number_subject {
    ($variant:ident, $wide:ty, [$($ty:ty),+]) => {
        $(
            impl Subject for $ty {
                const KIND: SubjectKind = SubjectKind::Number;

                fn describe(&self) -> ParamValue {
                    ParamValue::$variant(*self as $wide)
                }
            }
        )+
    };
}

impl_number_subject!(Int, i128, [i8, i16, i32, i64, i128, isize]);
impl_number_subject!(UInt, u128, [u8, u16, u32, u64, u128, usize]);
impl_number_subject!(Float, f64, [f64]);

impl Subject for f32 {
    const KIND: SubjectKind = SubjectKind::Number;

    fn describe(&self) -> ParamValue {
        ParamValue::Float(widen(*self))
    }
}

impl Subject for bool {
    const KIND: SubjectKind = SubjectKind::Boolean;

    fn describe(&self) -> ParamValue {
        ParamValue::Bool(*self)
    }
}

impl Subject for char {
    fn describe(&self) -> ParamValue {
        ParamValue::Char(*self)
    }
}

impl Subject for String {
    const KIND: SubjectKind = SubjectKind::CharSequence;

    fn describe(&self) -> ParamValue {
        ParamValue::Text(self.clone())
    }
}

impl Subject for &'static str {
    const KIND: SubjectKind = SubjectKind::CharSequence;

    fn describe(&self) -> ParamValue {
        ParamValue::Text((*self).to_string())
    }
}

impl<T: Subject> Subject for Option<T> {
    const KIND: SubjectKind = T::KIND;

    fn describe(&self) -> ParamValue {
        match self {
            Some(value) => value.describe(),
            None => ParamValue::Null,
        }
    }
}

impl<T: Subject> Subject for Vec<T> {
    const KIND: SubjectKind = SubjectKind::Array;

    fn describe(&self) -> ParamValue {
        ParamValue::List(self.iter().map(Subject::describe).collect())
    }
}

macro_rules! impl_iterable_subject {
    ($($coll:ident),+) => {
        $(
            impl<T: Subject> Subject for $coll<T> {
                const KIND: SubjectKind = SubjectKind::Iterable;

                fn describe(&self) -> ParamValue {
                    ParamValue::List(self.iter().map(Subject::describe).collect())
                }
            }
        )+
    };
}

impl_iterable_subject!(VecDeque, BTreeSet, LinkedList);

impl<T: Subject, S: 'static> Subject for HashSet<T, S> {
    const KIND: SubjectKind = SubjectKind::Iterable;

    fn describe(&self) -> ParamValue {
        ParamValue::List(self.iter().map(Subject::describe).collect())
    }
}

impl<K: Subject, V: Subject> Subject for BTreeMap<K, V> {
    const KIND: SubjectKind = SubjectKind::Map;

    fn describe(&self) -> ParamValue {
        ParamValue::Entries(
            self.iter()
                .map(|(k, v)| (k.describe(), v.describe()))
                .collect(),
        )
    }
}

impl<K: Subject, V: Subject, S: 'static> Subject for HashMap<K, V, S> {
    const KIND: SubjectKind = SubjectKind::Map;

    fn describe(&self) -> ParamValue {
        ParamValue::Entries(
            self.iter()
                .map(|(k, v)| (k.describe(), v.describe()))
                .collect(),
        )
    }
}

impl<A: Subject, B: Subject> Subject for (A, B) {
    fn describe(&self) -> ParamValue {
        ParamValue::Entries(vec![(self.0.describe(), self.1.describe())])
    }
}

impl Subject for NaiveDate {
    const KIND: SubjectKind = SubjectKind::Date;

    fn describe(&self) -> ParamValue {
        ParamValue::Date(*self)
    }
}

impl Subject for NaiveDateTime {
    const KIND: SubjectKind = SubjectKind::Temporal;

    fn describe(&self) -> ParamValue {
        ParamValue::DateTime(*self)
    }
}

impl Subject for DateTime<Utc> {
    const KIND: SubjectKind = SubjectKind::Temporal;

    fn describe(&self) -> ParamValue {
        ParamValue::DateTime(self.naive_utc())
    }
}

impl Subject for TimeDelta {
    const KIND: SubjectKind = SubjectKind::Temporal;

    fn describe(&self) -> ParamValue {
        ParamValue::Duration(*self)
    }
}

/// Build a `Vec<ParamValue>` of user arguments from subject-like values.
///
/// # Example
///
/// ```rust
/// use tidemark::{args, ParamValue};
///
/// let values = args![3, "three", 'c'];
/// assert_eq!(
///     values,
///     vec![
///         ParamValue::Int(3),
///         ParamValue::Text("three".to_string()),
///         ParamValue::Char('c'),
///     ]
/// );
/// ```
#[macro_export]
macro_rules! args {
    ($($arg:expr),* $(,)?) => {
        vec![$($crate::Subject::describe(&$arg)),*]
    };
}
