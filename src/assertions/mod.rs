//! Per-type assertions
//!
//! Each module adds an extension trait on [`Builder`](crate::Builder) for one
//! family of subjects. The traits only describe leaves (message key,
//! checker, optional precondition and parameters) and hand them to
//! [`Builder::push`](crate::Builder::push); combining, negating and
//! evaluating is the chain's business.
//!
//! | trait                    | subjects                                      |
//! |--------------------------|-----------------------------------------------|
//! | [`NumberAssertions`]     | primitive integers and floats                 |
//! | [`CharSequenceAssertions`] | `String`, `&'static str`                    |
//! | [`ArrayAssertions`]      | `Vec<E>`                                      |
//! | [`IterableAssertions`]   | `VecDeque`, `LinkedList`, `BTreeSet`, `HashSet` |
//! | [`MapAssertions`]        | `BTreeMap`, `HashMap`                         |
//! | [`BooleanAssertions`]    | `bool`                                        |
//! | [`ObjectAssertions`]     | anything comparable                           |
//! | [`OptionAssertions`]     | `Option<T>`                                   |
//! | [`DateAssertions`]       | `NaiveDate`, `NaiveDateTime`, `DateTime<Utc>` |
//! | [`ThrowableAssertions`]  | error values                                  |

pub mod array;
pub mod boolean;
pub mod char_sequence;
mod collection;
pub mod date;
pub mod iterable;
pub mod map;
pub mod number;
pub mod object;
pub mod throwable;

pub use array::ArrayAssertions;
pub use boolean::BooleanAssertions;
pub use char_sequence::CharSequenceAssertions;
pub use date::{CalendarField, DateAssertions, Temporal};
pub use iterable::IterableAssertions;
pub use map::MapAssertions;
pub use number::{Number, NumberAssertions};
pub use object::{ObjectAssertions, OptionAssertions};
pub use throwable::{Throwable, ThrowableAssertions};
