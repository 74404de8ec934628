//! Persistent step chains
//!
//! A chain is a backward-linked list of immutable [`Step`]s. Every fluent
//! call produces a new node that shares its predecessor, so a partially
//! built chain can be forked into several branches and reused for any
//! number of subjects:
//!
//! ```rust
//! use tidemark::prelude::*;
//!
//! let positive = Builder::<i32>::new().is_positive();
//! let small = positive.and().is_lt(10);
//! let even = positive.and().matches(|n: &i32| n % 2 == 0);
//!
//! assert!(small.test(&4));
//! assert!(!small.test(&40));
//! assert!(even.test(&40));
//! assert!(positive.test(&40));
//! ```
//!
//! Operators combine strictly left to right, without precedence. Grouping
//! is expressed with sub-chains:
//!
//! ```rust
//! use tidemark::prelude::*;
//!
//! // 0 or (13 < n and n < 20)
//! let window = Builder::<i32>::new().is_gt(13).and().is_lt(20);
//! let chain = Builder::<i32>::new().is_zero().or_chain(&window);
//!
//! assert!(chain.test(&0));
//! assert!(chain.test(&15));
//! assert!(!chain.test(&7));
//! ```
//!
//! Steps are normally created by the per-type assertion traits through
//! [`Builder::push`]. [`Step::new_step`] is the general constructor, for
//! code that needs sub-chains, custom messages or explicit operators.

use std::fmt;
use std::sync::Arc;

use crate::analysis::AnalysisMode;
use crate::error::ChainError;
use crate::evaluator::Evaluator;
use crate::message::catalog::MessageKey;
use crate::message::CustomMessage;
use crate::parameter::{ParamValue, ParameterRecord, Subject};

/// Raw outcome of one assertion, given the subject and the step's negate
/// flag. The evaluator applies the negation on top of the returned value.
pub type Checker<T> = Arc<dyn Fn(&T, bool) -> bool + Send + Sync>;

/// Guard evaluated before a checker. `Err` carries the key of the
/// precondition message.
pub type Precondition<T> = Arc<dyn Fn(&T) -> Result<(), MessageKey> + Send + Sync>;

/// How a step combines with the accumulated result of its predecessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Operator {
    /// Root step only.
    #[default]
    None,
    /// `a && b`
    And,
    /// `a || b`
    Or,
    /// `a ^ b`
    Xor,
    /// `!(a && b)`
    Nand,
    /// `!(a || b)`
    Nor,
}

impl Operator {
    /// Every binary operator.
    pub const BINARY: [Operator; 5] = [
        Operator::And,
        Operator::Or,
        Operator::Xor,
        Operator::Nand,
        Operator::Nor,
    ];

    /// Fold `next` into `accumulated`.
    ///
    /// `None` discards the accumulator, which is what a root step does.
    ///
    /// ```rust
    /// use tidemark::Operator;
    ///
    /// assert!(Operator::Xor.combine(true, false));
    /// assert!(Operator::Nor.combine(false, false));
    /// assert!(!Operator::Nand.combine(true, true));
    /// ```
    pub fn combine(self, accumulated: bool, next: bool) -> bool {
        match self {
            Operator::None => next,
            Operator::And => accumulated && next,
            Operator::Or => accumulated || next,
            Operator::Xor => accumulated ^ next,
            Operator::Nand => !(accumulated && next),
            Operator::Nor => !(accumulated || next),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operator::None => "NONE",
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Xor => "XOR",
            Operator::Nand => "NAND",
            Operator::Nor => "NOR",
        };
        f.write_str(name)
    }
}

pub(crate) enum Body<T> {
    Checker(Checker<T>),
    SubChain(Step<T>),
}

impl<T> Clone for Body<T> {
    fn clone(&self) -> Self {
        match self {
            Body::Checker(checker) => Body::Checker(Arc::clone(checker)),
            Body::SubChain(chain) => Body::SubChain(chain.clone()),
        }
    }
}

pub(crate) struct Node<T> {
    pub(crate) previous: Option<Step<T>>,
    pub(crate) operator: Operator,
    pub(crate) negate: bool,
    pub(crate) precondition: Option<Precondition<T>>,
    pub(crate) body: Body<T>,
    pub(crate) key: Option<MessageKey>,
    pub(crate) custom: Option<CustomMessage>,
    pub(crate) parameters: Vec<ParameterRecord>,
    pub(crate) analysis: AnalysisMode,
}

/// One immutable node of a chain.
///
/// Cloning is cheap: it shares the node.
pub struct Step<T> {
    pub(crate) node: Arc<Node<T>>,
}

impl<T> Clone for Step<T> {
    fn clone(&self) -> Self {
        Step {
            node: Arc::clone(&self.node),
        }
    }
}

impl<T> fmt::Debug for Step<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut steps = f.debug_list();
        for step in self.steps() {
            let node = &step.node;
            let what = match (&node.body, &node.key) {
                (Body::SubChain(chain), _) => format!("{:?}", chain),
                (Body::Checker(_), Some(key)) => key.id().to_string(),
                (Body::Checker(_), None) => "custom".to_string(),
            };
            steps.entry(&format_args!(
                "{} {}{}",
                node.operator,
                if node.negate { "NOT " } else { "" },
                what
            ));
        }
        steps.finish()
    }
}

impl<T> Step<T> {
    pub(crate) fn from_node(node: Node<T>) -> Self {
        Step {
            node: Arc::new(node),
        }
    }

    /// Build a step from a full description, validating it.
    ///
    /// `previous` is `None` for a root. A root must use [`Operator::None`]
    /// and every other step must not. A step holds either a checker or a
    /// sub-chain, and a leaf needs a message key or a custom message.
    ///
    /// The analysis mode of `spec` is only read for roots; other steps
    /// inherit it from their predecessor.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tidemark::{ChainError, Operator, Step, StepSpec};
    /// use tidemark::message::catalog;
    ///
    /// let root = Step::new_step(
    ///     None,
    ///     Operator::None,
    ///     StepSpec::<i32>::new()
    ///         .checker(|n: &i32, _| *n > 0)
    ///         .key(catalog::NUMBER_POSITIVE),
    /// )?;
    ///
    /// let orphan = Step::new_step(Some(&root), Operator::None, StepSpec::new());
    /// assert_eq!(orphan.unwrap_err(), ChainError::MissingOperator);
    ///
    /// assert!(root.test(&2));
    /// # Ok::<(), ChainError>(())
    /// ```
    pub fn new_step(
        previous: Option<&Step<T>>,
        operator: Operator,
        spec: StepSpec<T>,
    ) -> Result<Step<T>, ChainError> {
        match (previous, operator) {
            (None, Operator::None) => {}
            (None, op) => return Err(ChainError::OperatorOnRoot(op)),
            (Some(_), Operator::None) => return Err(ChainError::MissingOperator),
            (Some(_), _) => {}
        }

        let body = match (spec.checker, spec.sub_chain) {
            (Some(_), Some(_)) => return Err(ChainError::CheckerWithSubChain),
            (None, None) => return Err(ChainError::MissingChecker),
            (Some(checker), None) => {
                if spec.key.is_none() && spec.custom.is_none() {
                    return Err(ChainError::MissingMessage);
                }
                Body::Checker(checker)
            }
            (None, Some(chain)) => Body::SubChain(chain),
        };

        let analysis = previous.map_or(spec.analysis, Step::analysis);
        Ok(Step::from_node(Node {
            previous: previous.cloned(),
            operator,
            negate: spec.negate,
            precondition: spec.precondition,
            body,
            key: spec.key,
            custom: spec.custom,
            parameters: spec.parameters,
            analysis,
        }))
    }

    /// Steps from the root to `self`, inclusive.
    pub(crate) fn steps(&self) -> Vec<&Step<T>> {
        let mut steps = Vec::new();
        let mut cursor = Some(self);
        while let Some(step) = cursor {
            steps.push(step);
            cursor = step.node.previous.as_ref();
        }
        steps.reverse();
        steps
    }

    /// The predecessor, `None` for a root.
    pub fn previous(&self) -> Option<&Step<T>> {
        self.node.previous.as_ref()
    }

    /// Whether this step is the root of its chain.
    pub fn is_root(&self) -> bool {
        self.node.previous.is_none()
    }

    /// Number of steps from the root to `self`.
    pub fn len(&self) -> usize {
        let mut len = 1;
        let mut cursor = self.previous();
        while let Some(step) = cursor {
            len += 1;
            cursor = step.previous();
        }
        len
    }

    /// Always `false`: a chain has at least its root.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Operator combining this step with its predecessors.
    pub fn operator(&self) -> Operator {
        self.node.operator
    }

    /// Whether this step's own outcome is negated.
    pub fn is_negated(&self) -> bool {
        self.node.negate
    }

    /// Whether this step embeds a whole chain.
    pub fn is_sub_chain(&self) -> bool {
        matches!(self.node.body, Body::SubChain(_))
    }

    /// The embedded chain of a sub-chain step.
    pub fn sub_chain(&self) -> Option<&Step<T>> {
        match &self.node.body {
            Body::SubChain(chain) => Some(chain),
            Body::Checker(_) => None,
        }
    }

    /// Catalog key of the failure message.
    pub fn message_key(&self) -> Option<&MessageKey> {
        self.node.key.as_ref()
    }

    /// Custom failure message, if one was attached.
    pub fn custom_message(&self) -> Option<&CustomMessage> {
        self.node.custom.as_ref()
    }

    /// Parameters the step was built with.
    pub fn parameters(&self) -> &[ParameterRecord] {
        &self.node.parameters
    }

    /// Analysis mode, fixed by the root.
    pub fn analysis(&self) -> AnalysisMode {
        self.node.analysis
    }

    /// Start a step combined with AND.
    pub fn and(&self) -> Builder<T> {
        self.builder(Operator::And)
    }

    /// Start a step combined with OR.
    pub fn or(&self) -> Builder<T> {
        self.builder(Operator::Or)
    }

    /// Start a step combined with XOR.
    pub fn xor(&self) -> Builder<T> {
        self.builder(Operator::Xor)
    }

    /// Start a step combined with NAND.
    pub fn nand(&self) -> Builder<T> {
        self.builder(Operator::Nand)
    }

    /// Start a step combined with NOR.
    pub fn nor(&self) -> Builder<T> {
        self.builder(Operator::Nor)
    }

    /// Append `sub` as a single step combined with AND.
    pub fn and_chain(&self, sub: &Step<T>) -> Step<T> {
        self.splice(Operator::And, sub)
    }

    /// Append `sub` as a single step combined with OR.
    pub fn or_chain(&self, sub: &Step<T>) -> Step<T> {
        self.splice(Operator::Or, sub)
    }

    /// Append `sub` as a single step combined with XOR.
    pub fn xor_chain(&self, sub: &Step<T>) -> Step<T> {
        self.splice(Operator::Xor, sub)
    }

    /// Append `sub` as a single step combined with NAND.
    pub fn nand_chain(&self, sub: &Step<T>) -> Step<T> {
        self.splice(Operator::Nand, sub)
    }

    /// Append `sub` as a single step combined with NOR.
    pub fn nor_chain(&self, sub: &Step<T>) -> Step<T> {
        self.splice(Operator::Nor, sub)
    }

    /// Replace this step's failure message with a custom template.
    ///
    /// Plain specifiers (`%s`) address `args`, marked specifiers (`%1$s*`)
    /// address the subject and the step's parameters. The returned step
    /// shares the predecessor and checker of `self`.
    ///
    /// ```rust
    /// use tidemark::prelude::*;
    /// use tidemark::ParamValue;
    ///
    /// let chain = Builder::<i32>::new()
    ///     .is_gt(13)
    ///     .with_message("%s: %1$s* is not above %2$s*", vec![ParamValue::from("speed")]);
    ///
    /// assert_eq!(chain.that(4).errors(), Some("speed: 4 is not above 13"));
    /// ```
    pub fn with_message(&self, template: impl Into<String>, args: Vec<ParamValue>) -> Step<T> {
        let node = &self.node;
        Step::from_node(Node {
            previous: node.previous.clone(),
            operator: node.operator,
            negate: node.negate,
            precondition: node.precondition.clone(),
            body: node.body.clone(),
            key: node.key,
            custom: Some(CustomMessage::new(template, args)),
            parameters: node.parameters.clone(),
            analysis: node.analysis,
        })
    }

    fn builder(&self, operator: Operator) -> Builder<T> {
        Builder {
            previous: Some(self.clone()),
            operator,
            negate: false,
            analysis: self.analysis(),
        }
    }

    fn splice(&self, operator: Operator, sub: &Step<T>) -> Step<T> {
        Step::from_node(Node {
            previous: Some(self.clone()),
            operator,
            negate: false,
            precondition: None,
            body: Body::SubChain(sub.clone()),
            key: None,
            custom: None,
            parameters: Vec::new(),
            analysis: self.analysis(),
        })
    }
}

impl<T: Subject> Step<T> {
    /// Bind a subject and evaluate the chain.
    pub fn that(&self, subject: T) -> Evaluator<T> {
        Evaluator::new(self.clone(), subject)
    }

    /// Evaluate the chain against a borrowed subject.
    pub fn test(&self, subject: &T) -> bool {
        crate::evaluator::evaluate(self, subject).ok
    }

    /// The chain as a plain closure.
    ///
    /// ```rust
    /// use tidemark::prelude::*;
    ///
    /// let positive = Builder::<i32>::new().is_positive().as_predicate();
    /// let kept: Vec<i32> = vec![-1, 2, 0, 5].into_iter().filter(|n| positive(n)).collect();
    /// assert_eq!(kept, vec![2, 5]);
    /// ```
    pub fn as_predicate(&self) -> impl Fn(&T) -> bool + Send + Sync + 'static {
        let chain = self.clone();
        move |subject: &T| chain.test(subject)
    }
}

/// Full description of a step, consumed by [`Step::new_step`].
pub struct StepSpec<T> {
    pub(crate) precondition: Option<Precondition<T>>,
    pub(crate) checker: Option<Checker<T>>,
    pub(crate) sub_chain: Option<Step<T>>,
    pub(crate) key: Option<MessageKey>,
    pub(crate) custom: Option<CustomMessage>,
    pub(crate) negate: bool,
    pub(crate) parameters: Vec<ParameterRecord>,
    pub(crate) analysis: AnalysisMode,
}

impl<T> StepSpec<T> {
    /// An empty description.
    pub fn new() -> Self {
        StepSpec {
            precondition: None,
            checker: None,
            sub_chain: None,
            key: None,
            custom: None,
            negate: false,
            parameters: Vec::new(),
            analysis: AnalysisMode::default(),
        }
    }

    /// Set the checker.
    pub fn checker<F>(mut self, checker: F) -> Self
    where
        F: Fn(&T, bool) -> bool + Send + Sync + 'static,
    {
        self.checker = Some(Arc::new(checker));
        self
    }

    /// Set the precondition.
    pub fn precondition<F>(mut self, precondition: F) -> Self
    where
        F: Fn(&T) -> Result<(), MessageKey> + Send + Sync + 'static,
    {
        self.precondition = Some(Arc::new(precondition));
        self
    }

    /// Embed a chain instead of a checker.
    pub fn sub_chain(mut self, chain: &Step<T>) -> Self {
        self.sub_chain = Some(chain.clone());
        self
    }

    /// Set the catalog key.
    pub fn key(mut self, key: MessageKey) -> Self {
        self.key = Some(key);
        self
    }

    /// Set a custom message.
    pub fn custom(mut self, template: impl Into<String>, args: Vec<ParamValue>) -> Self {
        self.custom = Some(CustomMessage::new(template, args));
        self
    }

    /// Negate the step's outcome.
    pub fn negate(mut self, negate: bool) -> Self {
        self.negate = negate;
        self
    }

    /// Append a parameter.
    pub fn parameter(mut self, record: ParameterRecord) -> Self {
        self.parameters.push(record);
        self
    }

    /// Append several parameters.
    pub fn parameters(mut self, records: impl IntoIterator<Item = ParameterRecord>) -> Self {
        self.parameters.extend(records);
        self
    }

    /// Analysis mode of a root step.
    pub fn analysis(mut self, mode: AnalysisMode) -> Self {
        self.analysis = mode;
        self
    }
}

impl<T> Default for StepSpec<T> {
    fn default() -> Self {
        StepSpec::new()
    }
}

impl<T> fmt::Debug for StepSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepSpec")
            .field("precondition", &self.precondition.is_some())
            .field("checker", &self.checker.is_some())
            .field("sub_chain", &self.sub_chain)
            .field("key", &self.key)
            .field("custom", &self.custom)
            .field("negate", &self.negate)
            .field("parameters", &self.parameters)
            .field("analysis", &self.analysis)
            .finish()
    }
}

/// A leaf assertion as produced by a type module: message key, checker,
/// optional precondition and parameters.
pub struct Leaf<T> {
    key: MessageKey,
    checker: Checker<T>,
    precondition: Option<Precondition<T>>,
    parameters: Vec<ParameterRecord>,
}

impl<T> Leaf<T> {
    /// A leaf with a key and a checker.
    pub fn new<F>(key: MessageKey, checker: F) -> Self
    where
        F: Fn(&T, bool) -> bool + Send + Sync + 'static,
    {
        Leaf {
            key,
            checker: Arc::new(checker),
            precondition: None,
            parameters: Vec::new(),
        }
    }

    /// Guard the checker.
    pub fn precondition<F>(mut self, precondition: F) -> Self
    where
        F: Fn(&T) -> Result<(), MessageKey> + Send + Sync + 'static,
    {
        self.precondition = Some(Arc::new(precondition));
        self
    }

    /// Append a parameter.
    pub fn parameter(mut self, record: ParameterRecord) -> Self {
        self.parameters.push(record);
        self
    }
}

impl<T> fmt::Debug for Leaf<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Leaf")
            .field("key", &self.key)
            .field("precondition", &self.precondition.is_some())
            .field("parameters", &self.parameters)
            .finish()
    }
}

/// A step about to be appended: the predecessor, the operator that will
/// join it and the negate flag for the next leaf.
///
/// The assertion traits are implemented on `Builder`, so every method that
/// appends a leaf consumes it and returns the new [`Step`].
///
/// ```rust
/// use tidemark::prelude::*;
///
/// // (NOT n > 13) AND n < 20
/// let chain = Builder::<i32>::new().not().is_gt(13).and().is_lt(20);
/// assert!(chain.test(&5));
/// assert!(!chain.test(&15));
/// ```
pub struct Builder<T> {
    previous: Option<Step<T>>,
    operator: Operator,
    negate: bool,
    analysis: AnalysisMode,
}

impl<T> Builder<T> {
    /// Builder for a root step, analysing collections with
    /// [`AnalysisMode::Standard`].
    pub fn new() -> Self {
        Builder::with_analysis(AnalysisMode::Standard)
    }

    /// Builder for a root step with the given analysis mode.
    pub fn with_analysis(analysis: AnalysisMode) -> Self {
        Builder {
            previous: None,
            operator: Operator::None,
            negate: false,
            analysis,
        }
    }

    /// Negate the next leaf only. Calling it twice cancels out.
    #[allow(clippy::should_implement_trait)]
    pub fn not(mut self) -> Self {
        self.negate = !self.negate;
        self
    }

    /// Whether the next leaf will be negated.
    pub fn is_negated(&self) -> bool {
        self.negate
    }

    /// Analysis mode the next leaf runs with.
    pub fn analysis(&self) -> AnalysisMode {
        self.analysis
    }

    /// Append a leaf.
    pub fn push(self, leaf: Leaf<T>) -> Step<T> {
        Step::from_node(Node {
            previous: self.previous,
            operator: self.operator,
            negate: self.negate,
            precondition: leaf.precondition,
            body: Body::Checker(leaf.checker),
            key: Some(leaf.key),
            custom: None,
            parameters: leaf.parameters,
            analysis: self.analysis,
        })
    }
}

impl<T> Default for Builder<T> {
    fn default() -> Self {
        Builder::new()
    }
}

impl<T> fmt::Debug for Builder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("previous", &self.previous)
            .field("operator", &self.operator)
            .field("negate", &self.negate)
            .field("analysis", &self.analysis)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::catalog;

    fn positive() -> StepSpec<i32> {
        StepSpec::new()
            .checker(|n: &i32, _| *n > 0)
            .key(catalog::NUMBER_POSITIVE)
    }

    fn root() -> Step<i32> {
        Step::new_step(None, Operator::None, positive()).unwrap()
    }

    fn zero_leaf() -> Leaf<i32> {
        Leaf::new(catalog::NUMBER_ZERO, |n: &i32, _| *n == 0)
    }

    #[test]
    fn test_operator_combine_truth_table() {
        let cases = [(false, false), (false, true), (true, false), (true, true)];
        for (a, b) in cases {
            assert_eq!(Operator::And.combine(a, b), a && b);
            assert_eq!(Operator::Or.combine(a, b), a || b);
            assert_eq!(Operator::Xor.combine(a, b), a ^ b);
            assert_eq!(Operator::Nand.combine(a, b), !(a && b));
            assert_eq!(Operator::Nor.combine(a, b), !(a || b));
            assert_eq!(Operator::None.combine(a, b), b);
        }
    }

    #[test]
    fn test_new_step_rejects_operator_on_root() {
        for op in Operator::BINARY {
            let err = Step::new_step(None, op, positive()).unwrap_err();
            assert_eq!(err, ChainError::OperatorOnRoot(op));
        }
    }

    #[test]
    fn test_new_step_requires_operator_after_root() {
        let err = Step::new_step(Some(&root()), Operator::None, positive()).unwrap_err();
        assert_eq!(err, ChainError::MissingOperator);
    }

    #[test]
    fn test_new_step_requires_checker() {
        let spec = StepSpec::<i32>::new().key(catalog::NUMBER_POSITIVE);
        let err = Step::new_step(None, Operator::None, spec).unwrap_err();
        assert_eq!(err, ChainError::MissingChecker);
    }

    #[test]
    fn test_new_step_rejects_checker_with_sub_chain() {
        let spec = positive().sub_chain(&root());
        let err = Step::new_step(None, Operator::None, spec).unwrap_err();
        assert_eq!(err, ChainError::CheckerWithSubChain);
    }

    #[test]
    fn test_new_step_requires_message() {
        let spec = StepSpec::<i32>::new().checker(|_, _| true);
        let err = Step::new_step(None, Operator::None, spec).unwrap_err();
        assert_eq!(err, ChainError::MissingMessage);
    }

    #[test]
    fn test_new_step_custom_message_is_enough() {
        let spec = StepSpec::<i32>::new()
            .checker(|_, _| true)
            .custom("always", vec![]);
        assert!(Step::new_step(None, Operator::None, spec).is_ok());
    }

    #[test]
    fn test_sub_chain_needs_no_message() {
        let spec = StepSpec::<i32>::new().sub_chain(&root());
        let step = Step::new_step(Some(&root()), Operator::Or, spec).unwrap();
        assert!(step.is_sub_chain());
        assert!(step.message_key().is_none());
    }

    #[test]
    fn test_analysis_inherited_from_root() {
        let spec = positive().analysis(AnalysisMode::Parallel);
        let first = Step::new_step(None, Operator::None, spec).unwrap();
        let spec = positive().analysis(AnalysisMode::Stream);
        let second = Step::new_step(Some(&first), Operator::And, spec).unwrap();
        assert_eq!(second.analysis(), AnalysisMode::Parallel);
        assert_eq!(first.and().analysis(), AnalysisMode::Parallel);
    }

    #[test]
    fn test_chain_is_persistent() {
        let first = root();
        let left = Builder::push(first.and(), zero_leaf());
        let right = Builder::push(first.or(), zero_leaf());

        assert_eq!(first.len(), 1);
        assert_eq!(left.len(), 2);
        assert_eq!(right.len(), 2);
        assert!(Arc::ptr_eq(
            &left.previous().unwrap().node,
            &right.previous().unwrap().node
        ));
        assert_eq!(left.operator(), Operator::And);
        assert_eq!(right.operator(), Operator::Or);
    }

    #[test]
    fn test_not_flags_only_next_leaf() {
        let leaf = || Leaf::new(catalog::NUMBER_POSITIVE, |n: &i32, _| *n > 0);
        let first = Builder::new().not().push(leaf());
        let second = first.and().push(leaf());
        assert!(first.is_negated());
        assert!(!second.is_negated());
        assert!(!Builder::<i32>::new().not().not().is_negated());
    }

    #[test]
    fn test_with_message_keeps_links() {
        let first = root();
        let second = Builder::push(first.and(), zero_leaf());
        let renamed = second.with_message("custom", vec![]);
        assert!(second.custom_message().is_none());
        assert_eq!(renamed.custom_message().unwrap().template(), "custom");
        assert_eq!(renamed.operator(), Operator::And);
        assert!(Arc::ptr_eq(
            &renamed.previous().unwrap().node,
            &first.node
        ));
    }

    #[test]
    fn test_steps_are_root_first() {
        let first = root();
        let second = first.or_chain(&root());
        let steps = second.steps();
        assert_eq!(steps.len(), 2);
        assert!(steps[0].is_root());
        assert!(steps[1].is_sub_chain());
    }

    #[test]
    fn test_debug_lists_steps() {
        let chain = Builder::new()
            .not()
            .push(Leaf::new(catalog::NUMBER_POSITIVE, |n: &i32, _| *n > 0));
        assert_eq!(format!("{:?}", chain), "[NONE NOT number.positive]");
    }

    #[test]
    fn test_step_is_send_and_sync() {
        fn assert_send_sync<S: Send + Sync>() {}
        assert_send_sync::<Step<String>>();
        assert_send_sync::<Builder<Vec<i32>>>();
    }
}
