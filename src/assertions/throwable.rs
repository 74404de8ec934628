//! Assertions on error values
//!
//! Any `std::error::Error` becomes a subject by implementing [`Throwable`];
//! the common standard errors and this crate's own errors already do.
//!
//! ```rust
//! use tidemark::prelude::*;
//!
//! let parsed = "12a".parse::<u8>().unwrap_err();
//! let chain = Builder::<std::num::ParseIntError>::new()
//!     .has_message_containing("invalid digit")
//!     .and()
//!     .not()
//!     .has_source();
//! assert!(chain.test(&parsed));
//! ```

use std::error::Error;
use std::fmt;
use std::io;
use std::num::{ParseFloatError, ParseIntError};

use crate::error::{AssertionError, ChainError};
use crate::message::catalog;
use crate::parameter::{ParamValue, ParameterRecord, Subject, SubjectKind};
use crate::step::{Builder, Leaf, Step};

/// An error value that chains can inspect.
pub trait Throwable: Subject + Send + Sync {
    /// Borrow the value as a standard error.
    fn as_error(&self) -> &(dyn Error + 'static);
}

macro_rules! impl_throwable {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Subject for $ty {
                const KIND: SubjectKind = SubjectKind::Throwable;

                fn describe(&self) -> ParamValue {
                    ParamValue::Text(self.to_string())
                }
            }

            impl Throwable for $ty {
                fn as_error(&self) -> &(dyn Error + 'static) {
                    self
                }
            }
        )+
    };
}

impl_throwable!(
    io::Error,
    ParseIntError,
    ParseFloatError,
    fmt::Error,
    AssertionError,
    ChainError,
);

impl Subject for Box<dyn Error + Send + Sync> {
    const KIND: SubjectKind = SubjectKind::Throwable;

    fn describe(&self) -> ParamValue {
        ParamValue::Text(self.to_string())
    }
}

impl Throwable for Box<dyn Error + Send + Sync> {
    fn as_error(&self) -> &(dyn Error + 'static) {
        self.as_ref()
    }
}

/// Assertions on errors.
pub trait ThrowableAssertions<E> {
    /// The error displays exactly as `message`.
    fn has_message(self, message: impl Into<String>) -> Step<E>;

    /// The error's message contains `fragment`. An empty fragment is a
    /// precondition failure.
    fn has_message_containing(self, fragment: impl Into<String>) -> Step<E>;

    /// The error has a source.
    fn has_source(self) -> Step<E>;
}

impl<E: Throwable> ThrowableAssertions<E> for Builder<E> {
    fn has_message(self, message: impl Into<String>) -> Step<E> {
        let message = message.into();
        let record = ParameterRecord::new(message.as_str());
        let leaf = Leaf::new(catalog::THROWABLE_MESSAGE, move |error: &E, _| {
            error.as_error().to_string() == message
        })
        .parameter(record);
        self.push(leaf)
    }

    fn has_message_containing(self, fragment: impl Into<String>) -> Step<E> {
        let fragment = fragment.into();
        let record = ParameterRecord::new(fragment.as_str());
        let empty = fragment.is_empty();
        let leaf = Leaf::new(catalog::THROWABLE_MESSAGE_CONTAINS, move |error: &E, _| {
            error.as_error().to_string().contains(fragment.as_str())
        })
        .precondition(move |_: &E| {
            if empty {
                Err(catalog::THROWABLE_EMPTY_SEARCH)
            } else {
                Ok(())
            }
        })
        .parameter(record);
        self.push(leaf)
    }

    fn has_source(self) -> Step<E> {
        self.push(Leaf::new(catalog::THROWABLE_SOURCE, |error: &E, _| {
            error.as_error().source().is_some()
        }))
    }
}
