//! Date and time assertions
//!
//! Implemented for `chrono`'s [`NaiveDate`], [`NaiveDateTime`] and
//! [`DateTime<Utc>`] through the [`Temporal`] trait. Dates are displayed with
//! the locale's date pattern:
//!
//! ```rust
//! use chrono::NaiveDate;
//! use tidemark::locale::Locale;
//! use tidemark::prelude::*;
//!
//! let day = |d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
//! let evaluator = Builder::<NaiveDate>::new().is_after(day(10)).that(day(9));
//!
//! let german: Locale = "de-DE".parse().unwrap();
//! assert_eq!(
//!     evaluator.failure_in(&german).unwrap().message,
//!     "the date '09.03.2024' should be after: '10.03.2024'"
//! );
//! ```

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeDelta, Timelike, Utc};

use crate::message::catalog::{self, MessageKey};
use crate::parameter::{ParameterRecord, SemanticType, Subject};
use crate::step::{Builder, Leaf, Step};

/// A calendar field that can be read from a temporal subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarField {
    /// Proleptic Gregorian year.
    Year,
    /// Month, 1 to 12.
    Month,
    /// Day of the month, 1 to 31.
    DayOfMonth,
    /// ISO day of the week, 1 (Monday) to 7 (Sunday).
    DayOfWeek,
    /// Day of the year, 1 to 366.
    DayOfYear,
    /// Hour, 0 to 23.
    Hour,
    /// Minute, 0 to 59.
    Minute,
    /// Second, 0 to 59.
    Second,
}

impl CalendarField {
    const ALL: [CalendarField; 8] = [
        CalendarField::Year,
        CalendarField::Month,
        CalendarField::DayOfMonth,
        CalendarField::DayOfWeek,
        CalendarField::DayOfYear,
        CalendarField::Hour,
        CalendarField::Minute,
        CalendarField::Second,
    ];

    /// Stable index of the field, stored in step parameters.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Field for an index returned by [`index`](Self::index).
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Name used in messages.
    pub fn name(self) -> &'static str {
        match self {
            CalendarField::Year => "year",
            CalendarField::Month => "month",
            CalendarField::DayOfMonth => "day of month",
            CalendarField::DayOfWeek => "day of week",
            CalendarField::DayOfYear => "day of year",
            CalendarField::Hour => "hour",
            CalendarField::Minute => "minute",
            CalendarField::Second => "second",
        }
    }

    /// Inclusive range of valid values.
    pub fn range(self) -> (i64, i64) {
        match self {
            CalendarField::Year => (
                i64::from(NaiveDate::MIN.year()),
                i64::from(NaiveDate::MAX.year()),
            ),
            CalendarField::Month => (1, 12),
            CalendarField::DayOfMonth => (1, 31),
            CalendarField::DayOfWeek => (1, 7),
            CalendarField::DayOfYear => (1, 366),
            CalendarField::Hour => (0, 23),
            CalendarField::Minute => (0, 59),
            CalendarField::Second => (0, 59),
        }
    }
}

impl fmt::Display for CalendarField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A point in time that can be compared and read field by field.
pub trait Temporal: Subject + Copy + PartialOrd + Send + Sync {
    /// Signed distance from `other` to `self`.
    fn since(self, other: Self) -> TimeDelta;

    /// Value of `field`, `None` when the type has no such field.
    fn field(self, field: CalendarField) -> Option<i64>;
}

fn date_field<D: Datelike>(date: &D, field: CalendarField) -> Option<i64> {
    let value = match field {
        CalendarField::Year => i64::from(date.year()),
        CalendarField::Month => i64::from(date.month()),
        CalendarField::DayOfMonth => i64::from(date.day()),
        CalendarField::DayOfWeek => i64::from(date.weekday().number_from_monday()),
        CalendarField::DayOfYear => i64::from(date.ordinal()),
        _ => return None,
    };
    Some(value)
}

fn time_field<D: Datelike + Timelike>(time: &D, field: CalendarField) -> Option<i64> {
    match field {
        CalendarField::Hour => Some(i64::from(time.hour())),
        CalendarField::Minute => Some(i64::from(time.minute())),
        CalendarField::Second => Some(i64::from(time.second())),
        _ => date_field(time, field),
    }
}

impl Temporal for NaiveDate {
    fn since(self, other: Self) -> TimeDelta {
        self.signed_duration_since(other)
    }

    fn field(self, field: CalendarField) -> Option<i64> {
        date_field(&self, field)
    }
}

impl Temporal for NaiveDateTime {
    fn since(self, other: Self) -> TimeDelta {
        self.signed_duration_since(other)
    }

    fn field(self, field: CalendarField) -> Option<i64> {
        time_field(&self, field)
    }
}

impl Temporal for DateTime<Utc> {
    fn since(self, other: Self) -> TimeDelta {
        self.signed_duration_since(other)
    }

    fn field(self, field: CalendarField) -> Option<i64> {
        time_field(&self, field)
    }
}

/// Assertions on dates and date-times.
pub trait DateAssertions<D> {
    /// Strictly after `other`.
    fn is_after(self, other: D) -> Step<D>;

    /// After or equal to `other`.
    fn is_after_or_equal(self, other: D) -> Step<D>;

    /// Strictly before `other`.
    fn is_before(self, other: D) -> Step<D>;

    /// Before or equal to `other`.
    fn is_before_or_equal(self, other: D) -> Step<D>;

    /// Within `tolerance` of `other`, either way. A negative tolerance is a
    /// precondition failure.
    fn is_around(self, other: D, tolerance: TimeDelta) -> Step<D>;

    /// `field` has the value `value`. A value outside the field's range, or
    /// a time field on a plain date, is a precondition failure.
    fn has_field(self, field: CalendarField, value: i64) -> Step<D>;
}

fn compare<D: Temporal>(key: MessageKey, other: D, ordering: fn(&D, &D) -> bool) -> Leaf<D> {
    let record = ParameterRecord::of(&other);
    Leaf::new(key, move |subject: &D, _| ordering(subject, &other)).parameter(record)
}

impl<D: Temporal> DateAssertions<D> for Builder<D> {
    fn is_after(self, other: D) -> Step<D> {
        self.push(compare(catalog::DATE_AFTER, other, PartialOrd::gt))
    }

    fn is_after_or_equal(self, other: D) -> Step<D> {
        self.push(compare(catalog::DATE_AFTER_OR_EQUAL, other, PartialOrd::ge))
    }

    fn is_before(self, other: D) -> Step<D> {
        self.push(compare(catalog::DATE_BEFORE, other, PartialOrd::lt))
    }

    fn is_before_or_equal(self, other: D) -> Step<D> {
        self.push(compare(catalog::DATE_BEFORE_OR_EQUAL, other, PartialOrd::le))
    }

    fn is_around(self, other: D, tolerance: TimeDelta) -> Step<D> {
        let other_record = ParameterRecord::of(&other);
        let leaf = Leaf::new(catalog::DATE_AROUND, move |subject: &D, _| {
            subject.since(other).abs() <= tolerance
        })
        .precondition(move |_: &D| {
            if tolerance < TimeDelta::zero() {
                Err(catalog::DATE_NEGATIVE_TOLERANCE)
            } else {
                Ok(())
            }
        })
        .parameter(other_record)
        .parameter(ParameterRecord::of(&tolerance));
        self.push(leaf)
    }

    fn has_field(self, field: CalendarField, value: i64) -> Step<D> {
        let (min, max) = field.range();
        let leaf = Leaf::new(catalog::DATE_FIELD, move |subject: &D, _| {
            subject.field(field) == Some(value)
        })
        .precondition(move |subject: &D| {
            if subject.field(field).is_none() {
                Err(catalog::DATE_UNSUPPORTED_FIELD)
            } else if value < min || value > max {
                Err(catalog::DATE_FIELD_OUT_OF_RANGE)
            } else {
                Ok(())
            }
        })
        .parameter(ParameterRecord::with_semantic(field.index(), SemanticType::CalendarField))
        .parameter(ParameterRecord::new(value));
        self.push(leaf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::locale::Locale;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_field_index_round_trip() {
        for field in CalendarField::ALL {
            assert_eq!(CalendarField::from_index(field.index()), Some(field));
        }
        assert_eq!(CalendarField::from_index(8), None);
    }

    #[test]
    fn test_ordering() {
        let subject = day(2024, 3, 9);
        assert!(Builder::new().is_before(day(2024, 3, 10)).test(&subject));
        assert!(Builder::new().is_before_or_equal(subject).test(&subject));
        assert!(!Builder::new().is_after(subject).test(&subject));
        assert!(Builder::new().is_after_or_equal(day(2023, 1, 1)).test(&subject));
    }

    #[test]
    fn test_around() {
        let subject = day(2024, 3, 9);
        let chain = Builder::new().is_around(day(2024, 3, 11), TimeDelta::days(2));
        assert!(chain.test(&subject));
        assert!(!chain.test(&day(2024, 3, 14)));
    }

    #[test]
    fn test_negative_tolerance() {
        let failure = Builder::new()
            .is_around(day(2024, 3, 11), TimeDelta::days(-1))
            .that(day(2024, 3, 11))
            .failure_in(&Locale::root())
            .unwrap();
        assert_eq!(failure.kind, FailureKind::Precondition);
        assert!(failure.message.starts_with("the tolerance '"));
    }

    #[test]
    fn test_fields() {
        let subject = day(2024, 3, 9);
        assert!(Builder::new().has_field(CalendarField::Month, 3).test(&subject));
        // 2024-03-09 is a Saturday
        assert!(Builder::new().has_field(CalendarField::DayOfWeek, 6).test(&subject));
        assert!(Builder::new().has_field(CalendarField::DayOfYear, 69).test(&subject));

        let time = subject.and_hms_opt(13, 5, 0).unwrap();
        assert!(Builder::new().has_field(CalendarField::Hour, 13).test(&time));
        assert!(Builder::<DateTime<Utc>>::new()
            .has_field(CalendarField::Minute, 5)
            .test(&time.and_utc()));
    }

    #[test]
    fn test_field_messages() {
        let subject = day(2024, 3, 9);
        let failure = Builder::new()
            .has_field(CalendarField::Month, 4)
            .that(subject)
            .failure_in(&Locale::root())
            .unwrap();
        assert_eq!(failure.message, "the date '2024-03-09' should have the month '4'");

        let failure = Builder::new()
            .has_field(CalendarField::Month, 13)
            .that(subject)
            .failure_in(&Locale::root())
            .unwrap();
        assert_eq!(failure.kind, FailureKind::Precondition);
        assert_eq!(failure.message, "the value '13' is out of range for the month");

        let failure = Builder::new()
            .has_field(CalendarField::Hour, 1)
            .that(subject)
            .failure_in(&Locale::root())
            .unwrap();
        assert_eq!(failure.kind, FailureKind::Precondition);
        assert_eq!(failure.message, "the hour is not supported by the date");
    }
}
