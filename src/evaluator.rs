//! Chain evaluation
//!
//! [`Step::that`] binds a subject and runs every step of the chain
//! immediately. Each step contributes
//! `precondition && (negate ^ checker(subject, negate))`, and the
//! contributions are folded left to right with each step's operator. Every
//! step runs, even once the accumulated result can no longer change, so a
//! diagnostic is available for every position.
//!
//! The failure message is only rendered when asked for, and at most once.
//!
//! # Which step is reported
//!
//! - the earliest step, in declaration order, whose contribution was
//!   `false`
//! - if every contribution was `true` (a XOR, NAND or NOR made the chain
//!   fail), the last step, described with inverted polarity
//!
//! Sub-chains are described by their own reported step, unless the
//! sub-chain step carries a custom message.
//!
//! ```rust
//! use tidemark::prelude::*;
//!
//! let chain = Builder::<i32>::new().is_gt(13).or().is_zero();
//!
//! assert!(chain.that(158).is_ok());
//! assert!(chain.that(0).is_ok());
//! assert_eq!(
//!     chain.that(12).errors(),
//!     Some("the number '12' should be greater than: '13'")
//! );
//! ```

use std::fmt;
use std::sync::OnceLock;

use crate::error::{AssertionError, Failure, FailureKind};
use crate::locale::{self, Locale};
use crate::message::catalog::MessageKey;
use crate::message::{resolve, CustomMessage, Message};
use crate::parameter::{ParamValue, Subject};
use crate::step::{Body, Step};

/// Outcome of one step.
#[derive(Debug, Clone)]
pub(crate) struct Outcome {
    pub(crate) passed: bool,
    pub(crate) detail: Detail,
}

#[derive(Debug, Clone)]
pub(crate) enum Detail {
    Checked,
    Precondition(MessageKey),
    Nested(Box<Evaluation>),
}

/// Outcome of a whole chain, one entry per step, root first.
#[derive(Debug, Clone)]
pub(crate) struct Evaluation {
    pub(crate) ok: bool,
    pub(crate) outcomes: Vec<Outcome>,
}

pub(crate) fn evaluate<T: Subject>(chain: &Step<T>, subject: &T) -> Evaluation {
    let steps = chain.steps();
    let mut ok = false;
    let mut outcomes = Vec::with_capacity(steps.len());

    for (_position, step) in steps.iter().enumerate() {
        let outcome = evaluate_step(step, subject);
        ok = step.operator().combine(ok, outcome.passed);

        #[cfg(feature = "tracing")]
        tracing::trace!(
            position = _position,
            operator = %step.operator(),
            negate = step.is_negated(),
            passed = outcome.passed,
            accumulated = ok,
            "evaluated step"
        );

        outcomes.push(outcome);
    }

    Evaluation { ok, outcomes }
}

fn evaluate_step<T: Subject>(step: &Step<T>, subject: &T) -> Outcome {
    let node = &step.node;
    if let Some(precondition) = &node.precondition {
        if let Err(key) = precondition(subject) {
            return Outcome {
                passed: false,
                detail: Detail::Precondition(key),
            };
        }
    }

    match &node.body {
        Body::Checker(checker) => Outcome {
            passed: node.negate ^ checker(subject, node.negate),
            detail: Detail::Checked,
        },
        Body::SubChain(chain) => {
            let nested = evaluate(chain, subject);
            Outcome {
                passed: node.negate ^ nested.ok,
                detail: Detail::Nested(Box::new(nested)),
            }
        }
    }
}

struct Renderer<'a> {
    subject: &'a ParamValue,
    locale: &'a Locale,
    replacement: Option<&'a CustomMessage>,
}

impl Renderer<'_> {
    /// Describe a chain whose result contradicts what was expected of it.
    ///
    /// With `invert` unset the chain was expected to hold, otherwise it was
    /// expected not to.
    fn chain<T: Subject>(
        &self,
        chain: &Step<T>,
        evaluation: &Evaluation,
        invert: bool,
    ) -> (String, FailureKind, usize) {
        let steps = chain.steps();
        let culprit = evaluation
            .outcomes
            .iter()
            .position(|outcome| outcome.passed == invert);

        let (position, invert) = match culprit {
            Some(position) => (position, invert),
            None => (steps.len() - 1, !invert),
        };

        let (message, kind) = self.step(steps[position], &evaluation.outcomes[position], invert);
        (message, kind, position)
    }

    fn step<T: Subject>(
        &self,
        step: &Step<T>,
        outcome: &Outcome,
        invert: bool,
    ) -> (String, FailureKind) {
        let parameters = step.parameters();
        let kind = match &outcome.detail {
            Detail::Precondition(_) => FailureKind::Precondition,
            _ => FailureKind::Assertion,
        };

        if let (Detail::Nested(nested), Some(chain), None) =
            (&outcome.detail, step.sub_chain(), step.custom_message())
        {
            let (message, kind, _) = self.chain(chain, nested, invert ^ step.is_negated());
            return (message, kind);
        }

        if let Some(custom) = self.replacement.or(step.custom_message()) {
            let message = resolve(Message::Custom(custom), self.subject, parameters, self.locale);
            return (message, kind);
        }

        match &outcome.detail {
            Detail::Precondition(key) => {
                let message = Message::Key {
                    key,
                    negate: false,
                    kind: T::KIND,
                };
                (resolve(message, self.subject, parameters, self.locale), kind)
            }
            Detail::Nested(_) => (String::new(), kind),
            Detail::Checked => match step.message_key() {
                Some(key) => {
                    let message = Message::Key {
                        key,
                        negate: step.is_negated() ^ invert,
                        kind: T::KIND,
                    };
                    (resolve(message, self.subject, parameters, self.locale), kind)
                }
                None => (String::new(), kind),
            },
        }
    }
}

fn describe<T: Subject>(
    chain: &Step<T>,
    evaluation: &Evaluation,
    subject: &T,
    locale: &Locale,
    replacement: Option<&CustomMessage>,
) -> Failure {
    let subject = subject.describe();
    let renderer = Renderer {
        subject: &subject,
        locale,
        replacement,
    };
    let (message, kind, position) = renderer.chain(chain, evaluation, false);
    Failure {
        message,
        kind,
        position,
    }
}

/// A chain bound to a subject.
///
/// Created by [`Step::that`]. The chain has already been evaluated; the
/// accessors only read the outcome.
pub struct Evaluator<T> {
    chain: Step<T>,
    subject: T,
    evaluation: Evaluation,
    failure: OnceLock<Option<Failure>>,
}

impl<T: Subject> Evaluator<T> {
    pub(crate) fn new(chain: Step<T>, subject: T) -> Self {
        let evaluation = evaluate(&chain, &subject);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            steps = evaluation.outcomes.len(),
            ok = evaluation.ok,
            "evaluated chain"
        );

        Evaluator {
            chain,
            subject,
            evaluation,
            failure: OnceLock::new(),
        }
    }

    /// Whether the chain holds for the subject.
    pub fn is_ok(&self) -> bool {
        self.evaluation.ok
    }

    /// The failure message in the current locale, `None` when the chain
    /// holds. Rendered on first call and cached.
    pub fn errors(&self) -> Option<&str> {
        self.failure().map(|failure| failure.message.as_str())
    }

    /// The failure in the current locale, `None` when the chain holds.
    pub fn failure(&self) -> Option<&Failure> {
        self.failure
            .get_or_init(|| self.render(&locale::locale(), None))
            .as_ref()
    }

    /// The failure rendered for an explicit locale. Not cached.
    ///
    /// ```rust
    /// use tidemark::locale::Locale;
    /// use tidemark::prelude::*;
    ///
    /// let evaluator = Builder::<f64>::new().is_lt(0.5).that(1.25);
    /// let failure = evaluator.failure_in(&"fr-FR".parse::<Locale>().unwrap()).unwrap();
    /// assert_eq!(failure.message, "the number '1.25' should be lower than: '0.5'");
    /// ```
    pub fn failure_in(&self, locale: &Locale) -> Option<Failure> {
        self.render(locale, None)
    }

    /// The bound subject.
    pub fn subject(&self) -> &T {
        &self.subject
    }

    /// The evaluated chain.
    pub fn chain(&self) -> &Step<T> {
        &self.chain
    }

    /// Take the subject back.
    pub fn into_inner(self) -> T {
        self.subject
    }

    /// Return the subject, or an error describing the failure.
    ///
    /// ```rust
    /// use tidemark::prelude::*;
    ///
    /// let checked = Builder::<i32>::new().is_positive().that(3).or_fail();
    /// assert_eq!(checked.unwrap(), 3);
    /// ```
    pub fn or_fail(self) -> Result<T, AssertionError> {
        self.fail(true)
    }

    /// Like [`or_fail`](Self::or_fail), with the message of the reported step
    /// replaced by `template`.
    ///
    /// Plain specifiers address `args`; marked specifiers address the
    /// subject and the parameters of the reported step.
    ///
    /// ```rust
    /// use tidemark::prelude::*;
    /// use tidemark::args;
    ///
    /// let err = Builder::<String>::new()
    ///     .has_length(4)
    ///     .that("abc".to_string())
    ///     .or_fail_with("%s must have %2$s* characters, got '%1$s*'", args!["code"])
    ///     .unwrap_err();
    /// assert_eq!(err.message(), "code must have 4 characters, got 'abc'");
    /// ```
    pub fn or_fail_with(
        self,
        template: impl Into<String>,
        args: Vec<ParamValue>,
    ) -> Result<T, AssertionError> {
        if self.evaluation.ok {
            return Ok(self.subject);
        }
        let replacement = CustomMessage::new(template, args);
        let failure = self.describe(&locale::locale(), Some(&replacement));
        Err(AssertionError::new(failure))
    }

    /// Return the subject, or the caller's error built from the failure.
    ///
    /// ```rust
    /// use tidemark::prelude::*;
    ///
    /// #[derive(Debug, PartialEq)]
    /// struct InvalidPort(String);
    ///
    /// let port = Builder::<u16>::new()
    ///     .is_gte(1024)
    ///     .that(80)
    ///     .or_else(|err| InvalidPort(err.message().to_string()));
    /// assert_eq!(
    ///     port,
    ///     Err(InvalidPort(
    ///         "the number '80' should be greater than or equal to: '1024'".to_string()
    ///     ))
    /// );
    /// ```
    pub fn or_else<E, F>(self, f: F) -> Result<T, E>
    where
        F: FnOnce(AssertionError) -> E,
    {
        self.or_fail().map_err(f)
    }

    /// Like [`or_else`](Self::or_else); `fill_backtrace` decides whether the
    /// error handed to `f` captures a backtrace.
    pub fn or_else_with<E, F>(self, fill_backtrace: bool, f: F) -> Result<T, E>
    where
        F: FnOnce(AssertionError) -> E,
    {
        self.fail(fill_backtrace).map_err(f)
    }

    fn fail(mut self, fill_backtrace: bool) -> Result<T, AssertionError> {
        if self.evaluation.ok {
            return Ok(self.subject);
        }
        let failure = match self.failure.take().flatten() {
            Some(failure) => failure,
            None => self.describe(&locale::locale(), None),
        };
        if fill_backtrace {
            Err(AssertionError::new(failure))
        } else {
            Err(AssertionError::without_backtrace(failure))
        }
    }

    /// The chain as a closure over new subjects.
    pub fn as_predicate(&self) -> impl Fn(&T) -> bool + Send + Sync + 'static {
        self.chain.as_predicate()
    }

    fn render(&self, locale: &Locale, replacement: Option<&CustomMessage>) -> Option<Failure> {
        if self.evaluation.ok {
            None
        } else {
            Some(self.describe(locale, replacement))
        }
    }

    fn describe(&self, locale: &Locale, replacement: Option<&CustomMessage>) -> Failure {
        describe(&self.chain, &self.evaluation, &self.subject, locale, replacement)
    }
}

impl<T: fmt::Debug> fmt::Debug for Evaluator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Evaluator")
            .field("subject", &self.subject)
            .field("ok", &self.evaluation.ok)
            .field("chain", &self.chain)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::catalog;
    use crate::step::{Builder, Leaf, Operator, StepSpec};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn gt(bound: i32) -> Leaf<i32> {
        Leaf::new(catalog::NUMBER_GT, move |n: &i32, _| *n > bound)
            .parameter(crate::ParameterRecord::new(bound))
    }

    fn zero() -> Leaf<i32> {
        Leaf::new(catalog::NUMBER_ZERO, |n: &i32, _| *n == 0)
    }

    fn render(evaluator: &Evaluator<i32>) -> Option<String> {
        evaluator
            .failure_in(&Locale::root())
            .map(|failure| failure.message)
    }

    #[test]
    fn test_or_chain() {
        let chain = Builder::new().push(gt(13)).or().push(zero());
        assert!(chain.that(158).is_ok());
        assert!(!chain.that(12).is_ok());
        assert!(chain.that(0).is_ok());
    }

    #[test]
    fn test_every_step_runs() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let counted = Leaf::new(catalog::NUMBER_ZERO, move |n: &i32, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            *n == 0
        });

        let chain = Builder::new().push(gt(13)).or().push(counted);
        assert!(chain.that(20).is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failing_precondition_skips_checker() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let guarded = Leaf::new(catalog::NUMBER_ZERO, move |_: &i32, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        })
        .precondition(|_| Err(catalog::NUMBER_NAN_BOUND));

        let chain = Builder::new().not().push(guarded);
        let evaluator = chain.that(3);
        assert!(!evaluator.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let failure = evaluator.failure_in(&Locale::root()).unwrap();
        assert_eq!(failure.kind, FailureKind::Precondition);
        assert_eq!(failure.message, "the bound of the comparison cannot be NaN");
    }

    #[test]
    fn test_earliest_failing_step_is_reported() {
        let chain = Builder::new().push(zero()).or().push(gt(13));
        let failure = chain.that(5).failure_in(&Locale::root()).unwrap();
        assert_eq!(failure.position, 0);
        assert_eq!(failure.message, "the number '5' should be equal to zero");
    }

    #[test]
    fn test_negated_step_uses_negated_template() {
        let chain = Builder::new().not().push(gt(13));
        assert_eq!(
            render(&chain.that(20)).as_deref(),
            Some("the number '20' should NOT be greater than: '13'")
        );
    }

    #[test]
    fn test_all_passing_steps_report_last_inverted() {
        // true XOR true
        let chain = Builder::new().push(gt(1)).xor().push(gt(2));
        let failure = chain.that(5).failure_in(&Locale::root()).unwrap();
        assert_eq!(failure.position, 1);
        assert_eq!(
            failure.message,
            "the number '5' should NOT be greater than: '2'"
        );
    }

    #[test]
    fn test_sub_chain_reports_nested_step() {
        let window = Builder::new().push(gt(13)).and().push(gt(100));
        let chain = Builder::new().push(zero()).or_chain(&window);
        let evaluator = chain.that(50);
        assert!(!evaluator.is_ok());
        assert_eq!(
            render(&evaluator).as_deref(),
            Some("the number '50' should be equal to zero")
        );

        let chain = Builder::new().push(gt(0)).and_chain(&window);
        let failure = chain.that(50).failure_in(&Locale::root()).unwrap();
        assert_eq!(failure.position, 1);
        assert_eq!(failure.message, "the number '50' should be greater than: '100'");
    }

    #[test]
    fn test_negated_sub_chain_reports_inverted_nested_step() {
        let window = Builder::new().push(gt(13));
        let spec = StepSpec::new().sub_chain(&window).negate(true);
        let root = Builder::new().push(gt(0));
        let chain = Step::new_step(Some(&root), Operator::And, spec).unwrap();
        assert_eq!(
            render(&chain.that(20)).as_deref(),
            Some("the number '20' should NOT be greater than: '13'")
        );
        assert!(chain.that(5).is_ok());
    }

    #[test]
    fn test_custom_message_on_sub_chain_wins() {
        let window = Builder::new().push(gt(13));
        let chain = Builder::new()
            .push(zero())
            .and_chain(&window)
            .with_message("window check failed for %1$s*", vec![]);
        assert_eq!(
            render(&chain.that(0)).as_deref(),
            Some("window check failed for 0")
        );
    }

    #[test]
    fn test_errors_none_on_success() {
        let evaluator = Builder::new().push(zero()).that(0);
        assert!(evaluator.errors().is_none());
        assert!(evaluator.failure_in(&Locale::root()).is_none());
    }

    #[test]
    fn test_or_fail_returns_subject() {
        assert_eq!(Builder::new().push(zero()).that(0).or_fail().unwrap(), 0);
        let err = Builder::new().push(gt(13)).that(4).or_fail().unwrap_err();
        assert_eq!(err.kind(), FailureKind::Assertion);
        assert_eq!(err.position(), 0);
    }

    #[test]
    fn test_or_fail_with_uses_reported_step_parameters() {
        let err = Builder::new()
            .push(zero())
            .and()
            .push(gt(13))
            .that(0)
            .or_fail_with("%s: %1$s* <= %2$s*", vec![ParamValue::from("limit")])
            .unwrap_err();
        assert_eq!(err.message(), "limit: 0 <= 13");
        assert_eq!(err.position(), 1);
    }

    #[test]
    fn test_or_else_maps_error() {
        let result: Result<i32, String> = Builder::new()
            .push(zero())
            .that(7)
            .or_else(|err| err.kind().to_string());
        assert_eq!(result, Err("assertion failure".to_string()));
    }

    #[test]
    fn test_or_else_with_skips_backtrace() {
        use std::backtrace::BacktraceStatus;

        let status = Builder::new()
            .push(zero())
            .that(7)
            .or_else_with(false, |err| (err.message().to_string(), err.backtrace().status()));
        assert_eq!(
            status,
            Err(("the number '7' should be equal to zero".to_string(), BacktraceStatus::Disabled))
        );
        assert_eq!(
            Builder::new().push(zero()).that(0).or_else_with(false, |err| err.position()),
            Ok(0)
        );
    }

    #[test]
    fn test_reevaluation_is_idempotent() {
        let chain = Builder::new().push(gt(13)).xor().push(zero());
        for subject in [-5, 0, 13, 14, 200] {
            assert_eq!(chain.that(subject).is_ok(), chain.that(subject).is_ok());
        }
    }

    #[test]
    fn test_evaluator_as_predicate() {
        let evaluator = Builder::new().push(gt(13)).that(20);
        let predicate = evaluator.as_predicate();
        assert!(predicate(&14));
        assert!(!predicate(&13));
    }

    #[cfg(feature = "tracing")]
    #[tracing_test::traced_test]
    #[test]
    fn test_evaluation_is_traced() {
        let chain = Builder::new().push(gt(13)).or().push(zero());
        assert!(!chain.that(5).is_ok());
        assert!(logs_contain("evaluated step"));
        assert!(logs_contain("evaluated chain"));
        assert!(logs_contain("ok=false"));
    }
}
