//! Error types
//!
//! Two families live here:
//!
//! - [`ChainError`]: structural misuse while building a chain. Reported by
//!   [`Step::new_step`](crate::Step::new_step) the moment the step is built,
//!   never deferred to evaluation.
//! - [`AssertionError`]: a chain evaluated to `false` and the caller asked
//!   for an error value instead of a boolean.
//!
//! Message formatting problems are not errors for callers: a template that
//! cannot be formatted degrades to its raw text (see
//! [`message`](crate::message)). [`FormatError`] describes why, for logging
//! and tests.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error as StdError;
use std::fmt;

/// Builder misuse detected while constructing a step.
///
/// # Example
///
/// ```rust
/// use tidemark::{ChainError, Operator, Step, StepSpec};
/// use tidemark::message::catalog;
///
/// let spec = StepSpec::<i32>::new()
///     .checker(|n: &i32, _| *n > 0)
///     .key(catalog::NUMBER_POSITIVE);
///
/// // A root step cannot carry an operator.
/// let err = Step::new_step(None, Operator::And, spec).unwrap_err();
/// assert_eq!(err, ChainError::OperatorOnRoot(Operator::And));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainError {
    /// An operator other than `None` was given to a root step.
    OperatorOnRoot(crate::Operator),
    /// A step with a predecessor did not say how to combine with it.
    MissingOperator,
    /// A leaf step was built without a checker.
    MissingChecker,
    /// A step was given both a checker and a sub-chain.
    CheckerWithSubChain,
    /// A leaf step has neither a message key nor a custom message.
    MissingMessage,
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainError::OperatorOnRoot(op) => {
                write!(f, "a root step cannot be combined with operator {}", op)
            }
            ChainError::MissingOperator => {
                write!(f, "a step following another step requires an operator")
            }
            ChainError::MissingChecker => write!(f, "a leaf step requires a checker"),
            ChainError::CheckerWithSubChain => {
                write!(f, "a step holds either a checker or a sub-chain, not both")
            }
            ChainError::MissingMessage => {
                write!(f, "a leaf step requires a message key or a custom message")
            }
        }
    }
}

impl StdError for ChainError {}

/// Why a chain evaluated to `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// A structural prerequisite of the reported step did not hold, so its
    /// checker never ran.
    Precondition,
    /// The checker ran and its (possibly negated) outcome was `false`.
    Assertion,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Precondition => f.write_str("precondition failure"),
            FailureKind::Assertion => f.write_str("assertion failure"),
        }
    }
}

/// A rendered failure: which step is reported and what it says.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// Rendered failure message.
    pub message: String,
    /// Whether a precondition or the assertion itself failed.
    pub kind: FailureKind,
    /// Zero-based position of the reported step, root first.
    pub position: usize,
}

/// Error produced when an evaluated chain did not hold.
///
/// A backtrace is captured on creation, subject to `RUST_BACKTRACE` /
/// `RUST_LIB_BACKTRACE`.
///
/// # Example
///
/// ```rust
/// use tidemark::prelude::*;
///
/// let err = Builder::<i32>::new()
///     .is_positive()
///     .that(-3)
///     .or_fail()
///     .unwrap_err();
///
/// assert_eq!(err.kind(), FailureKind::Assertion);
/// assert_eq!(err.message(), "the number '-3' should be positive");
/// ```
#[derive(Debug)]
pub struct AssertionError {
    failure: Failure,
    backtrace: Backtrace,
}

impl AssertionError {
    /// Create an error for the given failure, capturing a backtrace.
    pub fn new(failure: Failure) -> Self {
        AssertionError {
            failure,
            backtrace: Backtrace::capture(),
        }
    }

    /// Create an error for the given failure without capturing a backtrace.
    pub fn without_backtrace(failure: Failure) -> Self {
        AssertionError {
            failure,
            backtrace: Backtrace::disabled(),
        }
    }

    /// Rendered failure message.
    pub fn message(&self) -> &str {
        &self.failure.message
    }

    /// Whether a precondition or the assertion failed.
    pub fn kind(&self) -> FailureKind {
        self.failure.kind
    }

    /// Zero-based position of the reported step.
    pub fn position(&self) -> usize {
        self.failure.position
    }

    /// The complete failure description.
    pub fn failure(&self) -> &Failure {
        &self.failure
    }

    /// Backtrace captured when the error was created.
    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    /// Consume the error and return the failure description.
    pub fn into_failure(self) -> Failure {
        self.failure
    }
}

impl fmt::Display for AssertionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.failure.message)?;
        if self.backtrace.status() == BacktraceStatus::Captured && f.alternate() {
            write!(f, "\n{}", self.backtrace)?;
        }
        Ok(())
    }
}

impl StdError for AssertionError {}

/// Which argument list a placeholder addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Caller-supplied arguments, plain specifiers such as `%s`.
    User,
    /// Subject display and step parameters, marked specifiers such as `%1$s*`.
    Engine,
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Namespace::User => f.write_str("user"),
            Namespace::Engine => f.write_str("engine"),
        }
    }
}

/// Reason a message template could not be formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A placeholder referenced an argument that does not exist.
    MissingArgument {
        /// Namespace of the placeholder.
        namespace: Namespace,
        /// One-based argument index.
        index: usize,
    },
    /// A `%<` placeholder had no previous placeholder in its namespace.
    NoPreviousArgument(Namespace),
    /// Unsupported conversion character.
    UnknownConversion(char),
    /// The argument cannot be rendered with the conversion.
    IncompatibleArgument {
        /// Conversion character.
        conversion: char,
        /// Namespace of the placeholder.
        namespace: Namespace,
        /// One-based argument index.
        index: usize,
    },
    /// The placeholder starting at this byte offset is truncated or malformed.
    Malformed(usize),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::MissingArgument { namespace, index } => {
                write!(f, "missing {} argument #{}", namespace, index)
            }
            FormatError::NoPreviousArgument(namespace) => {
                write!(f, "no previous {} argument for '%<'", namespace)
            }
            FormatError::UnknownConversion(c) => write!(f, "unknown conversion '{}'", c),
            FormatError::IncompatibleArgument {
                conversion,
                namespace,
                index,
            } => write!(
                f,
                "{} argument #{} cannot be formatted with '%{}'",
                namespace, index, conversion
            ),
            FormatError::Malformed(offset) => {
                write!(f, "malformed placeholder at byte {}", offset)
            }
        }
    }
}

impl StdError for FormatError {}

/// A locale tag that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLocaleError {
    tag: String,
}

impl ParseLocaleError {
    pub(crate) fn new(tag: &str) -> Self {
        ParseLocaleError {
            tag: tag.to_string(),
        }
    }

    /// The rejected tag.
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl fmt::Display for ParseLocaleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid locale tag '{}'", self.tag)
    }
}

impl StdError for ParseLocaleError {}
