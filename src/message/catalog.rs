//! Default message catalog
//!
//! Each [`MessageKey`] carries an affirmative and a negated template. Engine
//! placeholders (`%1$s*` is the subject, `%2$s*` onwards are the step's
//! parameters) are resolved by the formatter; `{subject}` is replaced by the
//! chain's subject noun before formatting, so collection and generic keys
//! read naturally for every subject kind.

use std::borrow::Cow;
use std::fmt;

use crate::parameter::SubjectKind;

/// Identifier and default texts of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageKey {
    id: &'static str,
    affirmative: &'static str,
    negated: &'static str,
}

impl MessageKey {
    /// A key with distinct affirmative and negated templates.
    pub const fn new(id: &'static str, affirmative: &'static str, negated: &'static str) -> Self {
        MessageKey {
            id,
            affirmative,
            negated,
        }
    }

    /// A precondition key. Preconditions are never negated, both variants
    /// share the template.
    pub const fn precondition(id: &'static str, template: &'static str) -> Self {
        MessageKey {
            id,
            affirmative: template,
            negated: template,
        }
    }

    /// Stable identifier, e.g. `number.greater`.
    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Raw template for the given polarity.
    pub fn raw(&self, negate: bool) -> &'static str {
        if negate {
            self.negated
        } else {
            self.affirmative
        }
    }

    /// Template for the given polarity with `{subject}` replaced by the
    /// subject noun.
    pub fn template(&self, negate: bool, kind: SubjectKind) -> Cow<'static, str> {
        let raw = self.raw(negate);
        if raw.contains("{subject}") {
            Cow::Owned(raw.replace("{subject}", kind.noun()))
        } else {
            Cow::Borrowed(raw)
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id)
    }
}

macro_rules! keys {
    ($($(#[$doc:meta])* $name:ident = $id:literal : $affirmative:literal / $negated:literal;)+) => {
        $(
            $(#[$doc])*
            pub const $name: MessageKey = MessageKey::new($id, $affirmative, $negated);
        )+
    };
}

macro_rules! preconditions {
    ($($(#[$doc:meta])* $name:ident = $id:literal : $template:literal;)+) => {
        $(
            $(#[$doc])*
            pub const $name: MessageKey = MessageKey::precondition($id, $template);
        )+
    };
}

// Numbers

keys! {
    /// Number equal to zero.
    NUMBER_ZERO = "number.zero":
        "the number '%1$s*' should be equal to zero"
        / "the number '%1$s*' should NOT be equal to zero";
    /// Number greater than zero.
    NUMBER_POSITIVE = "number.positive":
        "the number '%1$s*' should be positive"
        / "the number '%1$s*' should NOT be positive";
    /// Number lower than zero.
    NUMBER_NEGATIVE = "number.negative":
        "the number '%1$s*' should be negative"
        / "the number '%1$s*' should NOT be negative";
    /// Number strictly greater than a bound.
    NUMBER_GT = "number.greater":
        "the number '%1$s*' should be greater than: '%2$s*'"
        / "the number '%1$s*' should NOT be greater than: '%2$s*'";
    /// Number greater than or equal to a bound.
    NUMBER_GTE = "number.greater_or_equal":
        "the number '%1$s*' should be greater than or equal to: '%2$s*'"
        / "the number '%1$s*' should NOT be greater than or equal to: '%2$s*'";
    /// Number strictly lower than a bound.
    NUMBER_LT = "number.lower":
        "the number '%1$s*' should be lower than: '%2$s*'"
        / "the number '%1$s*' should NOT be lower than: '%2$s*'";
    /// Number lower than or equal to a bound.
    NUMBER_LTE = "number.lower_or_equal":
        "the number '%1$s*' should be lower than or equal to: '%2$s*'"
        / "the number '%1$s*' should NOT be lower than or equal to: '%2$s*'";
    /// Number within an inclusive range.
    NUMBER_BETWEEN = "number.between":
        "the number '%1$s*' should be between '%2$s*' and '%3$s*'"
        / "the number '%1$s*' should NOT be between '%2$s*' and '%3$s*'";
}

preconditions! {
    /// A bound of a number comparison is NaN.
    NUMBER_NAN_BOUND = "number.nan_bound": "the bound of the comparison cannot be NaN";
    /// Range bounds are inverted.
    NUMBER_INVERTED_RANGE = "number.inverted_range":
        "the lower bound '%2$s*' should be lower than or equal to the upper bound '%3$s*'";
}

// Char sequences

keys! {
    /// Empty text.
    CHARS_EMPTY = "chars.empty":
        "the char sequence '%1$s*' should be empty"
        / "the char sequence '%1$s*' should NOT be empty";
    /// Text containing only whitespace.
    CHARS_BLANK = "chars.blank":
        "the char sequence '%1$s*' should be blank"
        / "the char sequence '%1$s*' should NOT be blank";
    /// Text with an exact character count.
    CHARS_LENGTH = "chars.length":
        "the char sequence '%1$s*' should have a length of: '%2$s*'"
        / "the char sequence '%1$s*' should NOT have a length of: '%2$s*'";
    /// Text containing a substring.
    CHARS_CONTAINS = "chars.contains":
        "the char sequence '%1$s*' should contain: '%2$s*'"
        / "the char sequence '%1$s*' should NOT contain: '%2$s*'";
    /// Text starting with a prefix.
    CHARS_STARTS_WITH = "chars.starts_with":
        "the char sequence '%1$s*' should start with: '%2$s*'"
        / "the char sequence '%1$s*' should NOT start with: '%2$s*'";
    /// Text ending with a suffix.
    CHARS_ENDS_WITH = "chars.ends_with":
        "the char sequence '%1$s*' should end with: '%2$s*'"
        / "the char sequence '%1$s*' should NOT end with: '%2$s*'";
    /// Text equal to another ignoring case.
    CHARS_EQUALS_IGNORE_CASE = "chars.equals_ignore_case":
        "the char sequence '%1$s*' should be equal to '%2$s*' ignoring case"
        / "the char sequence '%1$s*' should NOT be equal to '%2$s*' ignoring case";
}

preconditions! {
    /// Searched text is empty.
    CHARS_EMPTY_SEARCH = "chars.empty_search": "the searched char sequence cannot be empty";
}

// Arrays and iterables

keys! {
    /// Collection without elements.
    COLLECTION_EMPTY = "collection.empty":
        "the {subject} '%1$s*' should be empty"
        / "the {subject} '%1$s*' should NOT be empty";
    /// Array with an exact length.
    COLLECTION_LENGTH = "collection.length":
        "the {subject} '%1$s*' should have a length of: '%2$s*'"
        / "the {subject} '%1$s*' should NOT have a length of: '%2$s*'";
    /// Iterable with an exact size.
    COLLECTION_SIZE = "collection.size":
        "the {subject} '%1$s*' should have a size of: '%2$s*'"
        / "the {subject} '%1$s*' should NOT have a size of: '%2$s*'";
    /// Collection containing one value.
    COLLECTION_CONTAINS = "collection.contains":
        "the {subject} '%1$s*' should contain the value: '%2$s*'"
        / "the {subject} '%1$s*' should NOT contain the value: '%2$s*'";
    /// Collection containing every listed value.
    COLLECTION_CONTAINS_ALL = "collection.contains_all":
        "the {subject} '%1$s*' should contain all the values: '%2$s*'"
        / "the {subject} '%1$s*' should NOT contain all the values: '%2$s*'";
    /// Collection containing at least one listed value.
    COLLECTION_CONTAINS_ANY = "collection.contains_any":
        "the {subject} '%1$s*' should contain at least one of the values: '%2$s*'"
        / "the {subject} '%1$s*' should NOT contain any of the values: '%2$s*'";
    /// Collection containing the values as a contiguous ordered run.
    COLLECTION_CONTAINS_IN_ORDER = "collection.contains_in_order":
        "the {subject} '%1$s*' should contain the values in the specified order: '%2$s*'"
        / "the {subject} '%1$s*' should NOT contain the values in the specified order: '%2$s*'";
    /// Every element matches a predicate.
    COLLECTION_ALL_MATCH = "collection.all_match":
        "every value of the {subject} '%1$s*' should match the predicate %2$s*"
        / "NOT every value of the {subject} '%1$s*' should match the predicate %2$s*";
    /// At least one element matches a predicate.
    COLLECTION_ANY_MATCH = "collection.any_match":
        "at least one value of the {subject} '%1$s*' should match the predicate %2$s*"
        / "no value of the {subject} '%1$s*' should match the predicate %2$s*";
}

preconditions! {
    /// The searched values are empty.
    COLLECTION_EMPTY_SEARCH = "collection.empty_search": "the searched values cannot be empty";
}

// Maps

keys! {
    /// Map without entries.
    MAP_EMPTY = "map.empty":
        "the map '%1$s*' should be empty"
        / "the map '%1$s*' should NOT be empty";
    /// Map with an exact number of entries.
    MAP_SIZE = "map.size":
        "the map '%1$s*' should have a size of: '%2$s*'"
        / "the map '%1$s*' should NOT have a size of: '%2$s*'";
    /// Map containing a key.
    MAP_CONTAINS_KEY = "map.contains_key":
        "the map '%1$s*' should contain the key: '%2$s*'"
        / "the map '%1$s*' should NOT contain the key: '%2$s*'";
    /// Map containing every listed key.
    MAP_CONTAINS_ALL_KEYS = "map.contains_all_keys":
        "the map '%1$s*' should contain all the keys: '%2$s*'"
        / "the map '%1$s*' should NOT contain all the keys: '%2$s*'";
    /// Map containing a value.
    MAP_CONTAINS_VALUE = "map.contains_value":
        "the map '%1$s*' should contain the value: '%2$s*'"
        / "the map '%1$s*' should NOT contain the value: '%2$s*'";
    /// Map containing an entry.
    MAP_CONTAINS_ENTRY = "map.contains_entry":
        "the map '%1$s*' should contain the entry: '%2$s*'"
        / "the map '%1$s*' should NOT contain the entry: '%2$s*'";
    /// Map iterating over the entries as a contiguous ordered run.
    MAP_CONTAINS_IN_ORDER = "map.contains_in_order":
        "the map '%1$s*' should contain the entries in the specified order: '%2$s*'"
        / "the map '%1$s*' should NOT contain the entries in the specified order: '%2$s*'";
    /// Map iterating over the keys as a contiguous ordered run.
    MAP_CONTAINS_KEYS_IN_ORDER = "map.contains_keys_in_order":
        "the map '%1$s*' should contain the keys in the specified order: '%2$s*'"
        / "the map '%1$s*' should NOT contain the keys in the specified order: '%2$s*'";
}

// Booleans

keys! {
    /// Boolean `true`.
    BOOLEAN_TRUE = "boolean.true":
        "the boolean should be true"
        / "the boolean should NOT be true";
    /// Boolean `false`.
    BOOLEAN_FALSE = "boolean.false":
        "the boolean should be false"
        / "the boolean should NOT be false";
}

// Objects

keys! {
    /// Equality with an expected value.
    OBJECT_EQUAL = "object.equal":
        "the {subject} '%1$s*' should be equal to: '%2$s*'"
        / "the {subject} '%1$s*' should NOT be equal to: '%2$s*'";
    /// Membership in a list of values.
    OBJECT_ONE_OF = "object.one_of":
        "the {subject} '%1$s*' should be one of: '%2$s*'"
        / "the {subject} '%1$s*' should NOT be one of: '%2$s*'";
    /// Custom predicate.
    OBJECT_MATCH = "object.match":
        "the {subject} '%1$s*' should match the predicate %2$s*"
        / "the {subject} '%1$s*' should NOT match the predicate %2$s*";
    /// Absent optional value.
    OBJECT_NONE = "object.none":
        "the {subject} should be absent"
        / "the {subject} should be present";
}

// Dates

keys! {
    /// Strictly after another date.
    DATE_AFTER = "date.after":
        "the {subject} '%1$s*' should be after: '%2$s*'"
        / "the {subject} '%1$s*' should NOT be after: '%2$s*'";
    /// After or equal to another date.
    DATE_AFTER_OR_EQUAL = "date.after_or_equal":
        "the {subject} '%1$s*' should be after or equal to: '%2$s*'"
        / "the {subject} '%1$s*' should NOT be after or equal to: '%2$s*'";
    /// Strictly before another date.
    DATE_BEFORE = "date.before":
        "the {subject} '%1$s*' should be before: '%2$s*'"
        / "the {subject} '%1$s*' should NOT be before: '%2$s*'";
    /// Before or equal to another date.
    DATE_BEFORE_OR_EQUAL = "date.before_or_equal":
        "the {subject} '%1$s*' should be before or equal to: '%2$s*'"
        / "the {subject} '%1$s*' should NOT be before or equal to: '%2$s*'";
    /// Within a tolerance of another date.
    DATE_AROUND = "date.around":
        "the {subject} '%1$s*' should be around '%2$s*' within '%3$s*'"
        / "the {subject} '%1$s*' should NOT be around '%2$s*' within '%3$s*'";
    /// Calendar field with an exact value.
    DATE_FIELD = "date.field":
        "the {subject} '%1$s*' should have the %2$s* '%3$s*'"
        / "the {subject} '%1$s*' should NOT have the %2$s* '%3$s*'";
}

preconditions! {
    /// Tolerance is negative.
    DATE_NEGATIVE_TOLERANCE = "date.negative_tolerance": "the tolerance '%3$s*' cannot be negative";
    /// Field value outside the field's range.
    DATE_FIELD_OUT_OF_RANGE = "date.field_out_of_range":
        "the value '%3$s*' is out of range for the %2$s*";
    /// Field the subject type does not carry, such as the hour of a date.
    DATE_UNSUPPORTED_FIELD = "date.unsupported_field":
        "the %2$s* is not supported by the {subject}";
}

// Errors

keys! {
    /// Error message equality.
    THROWABLE_MESSAGE = "throwable.message":
        "the {subject} '%1$s*' should have the message: '%2$s*'"
        / "the {subject} '%1$s*' should NOT have the message: '%2$s*'";
    /// Error message containing a substring.
    THROWABLE_MESSAGE_CONTAINS = "throwable.message_contains":
        "the {subject} '%1$s*' message should contain: '%2$s*'"
        / "the {subject} '%1$s*' message should NOT contain: '%2$s*'";
    /// Error with an underlying source.
    THROWABLE_SOURCE = "throwable.source":
        "the {subject} '%1$s*' should have a source"
        / "the {subject} '%1$s*' should NOT have a source";
}

preconditions! {
    /// Searched message fragment is empty.
    THROWABLE_EMPTY_SEARCH = "throwable.empty_search": "the searched message cannot be empty";
}
