//! Number assertions
//!
//! Implemented for every primitive integer and float through the [`Number`]
//! trait. Bounds are checked before the comparison runs: a NaN bound or an
//! inverted range is a precondition failure, whatever the subject.
//!
//! # Example
//!
//! ```rust
//! use tidemark::prelude::*;
//!
//! let chain = Builder::<f64>::new().is_between(0.0, 1.0).or().is_zero();
//! assert!(chain.test(&0.25));
//! assert!(!chain.test(&1.5));
//!
//! let broken = Builder::<f64>::new().is_gt(f64::NAN).that(1.0);
//! assert_eq!(broken.failure().unwrap().kind, FailureKind::Precondition);
//! ```

use crate::message::catalog;
use crate::parameter::{ParameterRecord, Subject};
use crate::step::{Builder, Leaf, Step};

/// A primitive number.
pub trait Number: Subject + Copy + PartialOrd + Send + Sync {
    /// The additive identity.
    const ZERO: Self;

    /// Whether the value is NaN. Always `false` for integers.
    fn is_nan(self) -> bool;
}

macro_rules! impl_number {
    (int: $($ty:ty),+) => {
        $(
            impl Number for $ty {
                const ZERO: Self = 0;

                #[inline]
                fn is_nan(self) -> bool {
                    false
                }
            }
        )+
    };
    (float: $($ty:ty),+) => {
        $(
            impl Number for $ty {
                const ZERO: Self = 0.0;

                #[inline]
                fn is_nan(self) -> bool {
                    <$ty>::is_nan(self)
                }
            }
        )+
    };
}

impl_number!(int: i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_number!(float: f32, f64);

/// Assertions on numbers.
pub trait NumberAssertions<N> {
    /// The number equals zero.
    fn is_zero(self) -> Step<N>;

    /// The number is greater than zero.
    fn is_positive(self) -> Step<N>;

    /// The number is lower than zero.
    fn is_negative(self) -> Step<N>;

    /// The number is strictly greater than `bound`.
    fn is_gt(self, bound: N) -> Step<N>;

    /// The number is greater than or equal to `bound`.
    fn is_gte(self, bound: N) -> Step<N>;

    /// The number is strictly lower than `bound`.
    fn is_lt(self, bound: N) -> Step<N>;

    /// The number is lower than or equal to `bound`.
    fn is_lte(self, bound: N) -> Step<N>;

    /// `from <= number <= to`.
    fn is_between(self, from: N, to: N) -> Step<N>;
}

fn compare<N: Number>(
    key: catalog::MessageKey,
    bound: N,
    ordering: fn(&N, &N) -> bool,
) -> Leaf<N> {
    Leaf::new(key, move |n: &N, _| ordering(n, &bound))
        .precondition(move |_| {
            if bound.is_nan() {
                Err(catalog::NUMBER_NAN_BOUND)
            } else {
                Ok(())
            }
        })
        .parameter(ParameterRecord::of(&bound))
}

impl<N: Number> NumberAssertions<N> for Builder<N> {
    fn is_zero(self) -> Step<N> {
        self.push(Leaf::new(catalog::NUMBER_ZERO, |n: &N, _| *n == N::ZERO))
    }

    fn is_positive(self) -> Step<N> {
        self.push(Leaf::new(catalog::NUMBER_POSITIVE, |n: &N, _| *n > N::ZERO))
    }

    fn is_negative(self) -> Step<N> {
        self.push(Leaf::new(catalog::NUMBER_NEGATIVE, |n: &N, _| *n < N::ZERO))
    }

    fn is_gt(self, bound: N) -> Step<N> {
        self.push(compare(catalog::NUMBER_GT, bound, PartialOrd::gt))
    }

    fn is_gte(self, bound: N) -> Step<N> {
        self.push(compare(catalog::NUMBER_GTE, bound, PartialOrd::ge))
    }

    fn is_lt(self, bound: N) -> Step<N> {
        self.push(compare(catalog::NUMBER_LT, bound, PartialOrd::lt))
    }

    fn is_lte(self, bound: N) -> Step<N> {
        self.push(compare(catalog::NUMBER_LTE, bound, PartialOrd::le))
    }

    fn is_between(self, from: N, to: N) -> Step<N> {
        let leaf = Leaf::new(catalog::NUMBER_BETWEEN, move |n: &N, _| {
            *n >= from && *n <= to
        })
        .precondition(move |_| {
            if from.is_nan() || to.is_nan() {
                Err(catalog::NUMBER_NAN_BOUND)
            } else if from > to {
                Err(catalog::NUMBER_INVERTED_RANGE)
            } else {
                Ok(())
            }
        })
        .parameter(ParameterRecord::of(&from))
        .parameter(ParameterRecord::of(&to));
        self.push(leaf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::locale::Locale;

    fn message<N: Number>(chain: &Step<N>, subject: N) -> Option<String> {
        chain
            .that(subject)
            .failure_in(&Locale::root())
            .map(|failure| failure.message)
    }

    #[test]
    fn test_sign_checks() {
        let zero = Builder::<i64>::new().is_zero();
        let positive = Builder::<i64>::new().is_positive();
        let negative = Builder::<i64>::new().is_negative();

        assert!(zero.test(&0));
        assert!(!zero.test(&1));
        assert!(positive.test(&1));
        assert!(!positive.test(&0));
        assert!(negative.test(&-1));
        assert!(!negative.test(&0));
    }

    #[test]
    fn test_comparisons() {
        assert!(Builder::<u8>::new().is_gt(3).test(&4));
        assert!(!Builder::<u8>::new().is_gt(3).test(&3));
        assert!(Builder::<u8>::new().is_gte(3).test(&3));
        assert!(Builder::<u8>::new().is_lt(3).test(&2));
        assert!(!Builder::<u8>::new().is_lt(3).test(&3));
        assert!(Builder::<u8>::new().is_lte(3).test(&3));
    }

    #[test]
    fn test_f32_message_uses_display_form() {
        let chain = Builder::<f32>::new().is_gt(0.5);
        assert_eq!(
            message(&chain, 0.1),
            Some("the number '0.1' should be greater than: '0.5'".to_string())
        );
    }

    #[test]
    fn test_between_is_inclusive() {
        let chain = Builder::<i32>::new().is_between(-2, 2);
        assert!(chain.test(&-2));
        assert!(chain.test(&2));
        assert!(!chain.test(&3));
    }

    #[test]
    fn test_gt_or_zero() {
        let chain = Builder::<i32>::new().is_gt(13).or().is_zero();
        assert!(chain.that(158).is_ok());
        assert!(!chain.that(12).is_ok());
        assert!(chain.that(0).is_ok());
    }

    #[test]
    fn test_nan_bound_is_precondition_failure() {
        let chain = Builder::<f32>::new().not().is_lt(f32::NAN);
        let failure = chain.that(1.0).failure_in(&Locale::root()).unwrap();
        assert_eq!(failure.kind, FailureKind::Precondition);
        assert_eq!(failure.message, "the bound of the comparison cannot be NaN");
    }

    #[test]
    fn test_nan_subject_fails_comparison() {
        let chain = Builder::<f64>::new().is_lte(1.0);
        let failure = chain.that(f64::NAN).failure_in(&Locale::root()).unwrap();
        assert_eq!(failure.kind, FailureKind::Assertion);
    }

    #[test]
    fn test_inverted_range() {
        let chain = Builder::<i32>::new().is_between(5, 1);
        let failure = chain.that(3).failure_in(&Locale::root()).unwrap();
        assert_eq!(failure.kind, FailureKind::Precondition);
        assert_eq!(
            failure.message,
            "the lower bound '5' should be lower than or equal to the upper bound '1'"
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            message(&Builder::<i32>::new().is_positive(), -3).as_deref(),
            Some("the number '-3' should be positive")
        );
        assert_eq!(
            message(&Builder::<i32>::new().not().is_positive(), 3).as_deref(),
            Some("the number '3' should NOT be positive")
        );
        assert_eq!(
            message(&Builder::<f64>::new().is_between(1.0, 2.5), 3.0).as_deref(),
            Some("the number '3.0' should be between '1.0' and '2.5'")
        );
    }
}
