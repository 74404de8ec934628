//! Failure message resolution
//!
//! A failing step is described by one of two sources:
//!
//! - a catalog [`MessageKey`](catalog::MessageKey), picked in its affirmative
//!   or negated form depending on the step's negate flag
//! - a [`CustomMessage`] supplied by the caller, which always wins over the key
//!
//! Either way the template is formatted against two argument lists: the
//! custom message's own arguments (the *user* namespace, `%s`) and the
//! subject display followed by the step's parameters (the *engine*
//! namespace, `%1$s*`). See [`format()`] for the grammar.
//!
//! Formatting never fails from the caller's point of view. A template that
//! references a missing argument or uses an unknown conversion is returned
//! unformatted.
//!
//! # Example
//!
//! ```rust
//! use tidemark::locale::Locale;
//! use tidemark::message::{catalog, resolve, Message};
//! use tidemark::{ParamValue, ParameterRecord, SubjectKind};
//!
//! let text = resolve(
//!     Message::Key {
//!         key: &catalog::NUMBER_GT,
//!         negate: true,
//!         kind: SubjectKind::Number,
//!     },
//!     &ParamValue::Int(12),
//!     &[ParameterRecord::new(13)],
//!     &Locale::root(),
//! );
//! assert_eq!(text, "the number '12' should NOT be greater than: '13'");
//! ```

pub mod catalog;
mod format;

pub use format::{display_value, format};

use crate::locale::Locale;
use crate::parameter::{ParamValue, ParameterRecord, SubjectKind};
use catalog::MessageKey;

/// A caller-supplied template with its user-namespace arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomMessage {
    template: String,
    args: Vec<ParameterRecord>,
}

impl CustomMessage {
    /// Create a custom message.
    pub fn new(template: impl Into<String>, args: Vec<ParamValue>) -> Self {
        CustomMessage {
            template: template.into(),
            args: args.into_iter().map(ParameterRecord::new).collect(),
        }
    }

    /// The raw template.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// User-namespace arguments.
    pub fn args(&self) -> &[ParameterRecord] {
        &self.args
    }
}

/// Where the text of a failure comes from.
#[derive(Debug, Clone, Copy)]
pub enum Message<'a> {
    /// Catalog entry in the given polarity, with `{subject}` bound to `kind`.
    Key {
        /// Catalog key.
        key: &'a MessageKey,
        /// Pick the negated template.
        negate: bool,
        /// Subject kind of the chain.
        kind: SubjectKind,
    },
    /// Caller template.
    Custom(&'a CustomMessage),
}

/// Render a failure message.
///
/// The engine namespace is `subject` followed by `parameters`.
pub fn resolve(
    message: Message<'_>,
    subject: &ParamValue,
    parameters: &[ParameterRecord],
    locale: &Locale,
) -> String {
    let mut engine = Vec::with_capacity(parameters.len() + 1);
    engine.push(ParameterRecord::new(subject.clone()));
    engine.extend(parameters.iter().cloned());

    match message {
        Message::Key { key, negate, kind } => {
            format_or_raw(&key.template(negate, kind), &[], &engine, locale)
        }
        Message::Custom(custom) => format_or_raw(custom.template(), custom.args(), &engine, locale),
    }
}

/// Format a template, falling back to the template itself.
pub fn format_or_raw(
    template: &str,
    user: &[ParameterRecord],
    engine: &[ParameterRecord],
    locale: &Locale,
) -> String {
    match format(template, user, engine, locale) {
        Ok(text) => text,
        Err(_err) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(template, error = %_err, "message left unformatted");
            template.to_string()
        }
    }
}
