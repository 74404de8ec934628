//! Collection analysis strategies
//!
//! Collection assertions count how many elements match something and then
//! decide validity from that count. The count can be computed three ways:
//!
//! - [`AnalysisMode::Standard`]: an explicit loop
//! - [`AnalysisMode::Stream`]: sequential iterator adaptors
//! - [`AnalysisMode::Parallel`]: `rayon` data-parallel iterators with an
//!   atomic counter
//!
//! All three produce the same counts for the same input. The mode is chosen
//! on the chain root and inherited by every step.
//!
//! # Example
//!
//! ```rust
//! use tidemark::analysis::{is_valid, AnalysisMode};
//!
//! let values = [1, 5, 8, 13];
//! for mode in AnalysisMode::ALL {
//!     let found = mode.count(&values, |n| n % 2 == 1);
//!     assert_eq!(found, 3);
//!     // "any odd" holds, "all odd" does not
//!     assert!(is_valid(false, false, found, values.len()));
//!     assert!(!is_valid(true, false, found, values.len()));
//! }
//! ```

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

/// How collection assertions iterate over their subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnalysisMode {
    /// Explicit loops.
    #[default]
    Standard,
    /// Sequential iterator adaptors.
    Stream,
    /// Data-parallel iterators on the rayon pool.
    Parallel,
}

impl AnalysisMode {
    /// Every mode, in declaration order.
    pub const ALL: [AnalysisMode; 3] = [
        AnalysisMode::Standard,
        AnalysisMode::Stream,
        AnalysisMode::Parallel,
    ];

    /// Count the items matching `predicate`.
    pub fn count<E, P>(self, items: &[E], predicate: P) -> usize
    where
        E: Sync,
        P: Fn(&E) -> bool + Sync,
    {
        match self {
            AnalysisMode::Standard => {
                let mut found = 0;
                for item in items {
                    if predicate(item) {
                        found += 1;
                    }
                }
                found
            }
            AnalysisMode::Stream => items.iter().filter(|item| predicate(*item)).count(),
            AnalysisMode::Parallel => {
                let found = AtomicUsize::new(0);
                items.par_iter().for_each(|item| {
                    if predicate(item) {
                        found.fetch_add(1, Ordering::Relaxed);
                    }
                });
                found.into_inner()
            }
        }
    }

    /// Count how many of `values` occur somewhere in `target`.
    pub fn count_contained<E>(self, target: &[E], values: &[E]) -> usize
    where
        E: PartialEq + Sync,
    {
        self.count(values, |value| target.contains(value))
    }

    /// Whether `pattern` occurs in `target` as a contiguous run, in order.
    ///
    /// An empty pattern is always contained. Under `Parallel` each candidate
    /// window is compared in encounter order, so the result never depends on
    /// scheduling.
    pub fn contains_in_order<E>(self, target: &[E], pattern: &[E]) -> bool
    where
        E: PartialEq + Sync,
    {
        if pattern.is_empty() {
            return true;
        }
        if pattern.len() > target.len() {
            return false;
        }

        match self {
            AnalysisMode::Standard => {
                for start in 0..=(target.len() - pattern.len()) {
                    let mut streak = 0;
                    while streak < pattern.len() && target[start + streak] == pattern[streak] {
                        streak += 1;
                    }
                    if streak == pattern.len() {
                        return true;
                    }
                }
                false
            }
            AnalysisMode::Stream => target.windows(pattern.len()).any(|window| window == pattern),
            AnalysisMode::Parallel => target
                .par_windows(pattern.len())
                .any(|window| window == pattern),
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisMode::Standard => f.write_str("STANDARD"),
            AnalysisMode::Stream => f.write_str("STREAM"),
            AnalysisMode::Parallel => f.write_str("PARALLEL"),
        }
    }
}

/// Decide validity of a counted collection check.
///
/// `all` asks whether every one of `total` candidates was found, otherwise
/// whether at least one was; `not` negates the question.
///
/// | all   | not   | valid when        |
/// |-------|-------|-------------------|
/// | true  | false | `found == total`  |
/// | true  | true  | `found != total`  |
/// | false | false | `found > 0`       |
/// | false | true  | `found == 0`      |
pub fn is_valid(all: bool, not: bool, found: usize, total: usize) -> bool {
    match (all, not) {
        (true, false) => found == total,
        (true, true) => found != total,
        (false, false) => found > 0,
        (false, true) => found == 0,
    }
}

/// Raw checker outcome of a counted check evaluated under `negate`.
///
/// The evaluator applies the step's negation on top of what a checker
/// returns, so this hands back the affirmative answer whatever `negate` is.
pub fn checker_outcome(all: bool, negate: bool, found: usize, total: usize) -> bool {
    negate ^ is_valid(all, negate, found, total)
}
