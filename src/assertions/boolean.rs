//! Boolean assertions

use crate::message::catalog;
use crate::step::{Builder, Leaf, Step};

/// Assertions on `bool`.
///
/// ```rust
/// use tidemark::prelude::*;
///
/// let chain = Builder::<bool>::new().is_true();
/// assert_eq!(chain.that(false).errors(), Some("the boolean should be true"));
/// ```
pub trait BooleanAssertions {
    /// The value is `true`.
    fn is_true(self) -> Step<bool>;

    /// The value is `false`.
    fn is_false(self) -> Step<bool>;
}

impl BooleanAssertions for Builder<bool> {
    fn is_true(self) -> Step<bool> {
        self.push(Leaf::new(catalog::BOOLEAN_TRUE, |b: &bool, _| *b))
    }

    fn is_false(self) -> Step<bool> {
        self.push(Leaf::new(catalog::BOOLEAN_FALSE, |b: &bool, _| !*b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truth() {
        assert!(Builder::<bool>::new().is_true().test(&true));
        assert!(!Builder::<bool>::new().is_true().test(&false));
        assert!(Builder::<bool>::new().is_false().test(&false));
        assert!(Builder::<bool>::new().not().is_false().test(&true));
    }

    #[test]
    fn test_xor_of_opposites() {
        let chain = Builder::<bool>::new().is_true().xor().is_false();
        assert!(chain.test(&true));
        assert!(chain.test(&false));
    }
}
