//! Argument matchers.
//!
//! Every argument of a recorded call is matched by a [Matcher]. Literal values passed
//! to [`args!`](crate::args) are wrapped in [eq] automatically.

use core::fmt;
use std::sync::Arc;

use crate::captor::Captor;
use crate::func::Func;
use crate::signature::{Interface, Receiver, TypeRegistry};
use crate::value::{Array, Handle, List, Map, Ptr, Struct, Typed, Value};

/// A predicate over a single argument value.
pub trait Matcher: Send + Sync {
    /// Whether `x` is a match.
    fn matches(&self, x: &Value) -> bool;

    /// Describes what the matcher matches.
    fn describe(&self) -> String;

    /// The literal value this matcher compares against, if any.
    ///
    /// Diagnostics use it to print a diff against the actual argument.
    fn expected(&self) -> Option<&Value> {
        None
    }
}

impl fmt::Display for dyn Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

impl fmt::Debug for dyn Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// A matcher in argument position of a recorded call.
#[derive(Clone)]
pub struct ArgMatcher {
    pub(crate) matcher: Arc<dyn Matcher>,
    pub(crate) whole_tail: bool,
}

impl ArgMatcher {
    pub fn new(matcher: impl Matcher + 'static) -> Self {
        Self {
            matcher: Arc::new(matcher),
            whole_tail: false,
        }
    }

    pub fn matches(&self, x: &Value) -> bool {
        self.matcher.matches(x)
    }

    pub fn describe(&self) -> String {
        self.matcher.describe()
    }

    pub(crate) fn expected(&self) -> Option<&Value> {
        self.matcher.expected()
    }
}

impl fmt::Display for ArgMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.matcher.describe())
    }
}

/// Conversion into an argument matcher.
///
/// Implemented by every built-in matcher, and by plain values, which become [eq] matchers.
/// Wrap custom matchers with [matcher].
pub trait IntoMatcher {
    fn into_matcher(self) -> ArgMatcher;
}

impl IntoMatcher for ArgMatcher {
    fn into_matcher(self) -> ArgMatcher {
        self
    }
}

impl IntoMatcher for Box<dyn Matcher> {
    fn into_matcher(self) -> ArgMatcher {
        ArgMatcher {
            matcher: Arc::from(self),
            whole_tail: false,
        }
    }
}

impl IntoMatcher for Arc<dyn Matcher> {
    fn into_matcher(self) -> ArgMatcher {
        ArgMatcher {
            matcher: self,
            whole_tail: false,
        }
    }
}

macro_rules! matcher_arg {
    ($($t:ty),*) => {$(
        impl IntoMatcher for $t {
            fn into_matcher(self) -> ArgMatcher {
                ArgMatcher::new(self)
            }
        }
    )*};
}

matcher_arg!(
    Anything,
    Eq,
    IsNil,
    Not,
    AssignableTo,
    Len,
    Contains,
    InAnyOrder,
    All,
    IsOfType,
    Implements,
    Captor
);

impl<F> IntoMatcher for Cond<F>
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    fn into_matcher(self) -> ArgMatcher {
        ArgMatcher::new(self)
    }
}

macro_rules! literal_arg {
    ($($t:ty),*) => {$(
        impl IntoMatcher for $t {
            fn into_matcher(self) -> ArgMatcher {
                ArgMatcher::new(eq(self))
            }
        }
    )*};
}

literal_arg!(
    i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, bool, String, &str, Value,
    List, Array, Map, Struct, Ptr, Func, Handle, Receiver
);

impl<T: Into<Value> + Typed> IntoMatcher for Vec<T> {
    fn into_matcher(self) -> ArgMatcher {
        ArgMatcher::new(eq(self))
    }
}

/// Wrap a custom [Matcher] for argument position.
pub fn matcher(matcher: impl Matcher + 'static) -> ArgMatcher {
    ArgMatcher::new(matcher)
}

/// Match the whole variadic tail of a call at once, as a single list value.
///
/// Without this wrapper, the last matcher of a variadic method is tested against each
/// trailing argument separately.
pub fn tail(matcher: impl IntoMatcher) -> ArgMatcher {
    ArgMatcher {
        whole_tail: true,
        ..matcher.into_matcher()
    }
}

pub struct Anything;

impl Matcher for Anything {
    fn matches(&self, _: &Value) -> bool {
        true
    }

    fn describe(&self) -> String {
        "is anything".to_string()
    }
}

/// Matches any value.
pub fn any() -> Anything {
    Anything
}

pub struct Eq(Value);

impl Matcher for Eq {
    fn matches(&self, x: &Value) -> bool {
        self.0.deep_eq(x)
    }

    fn describe(&self) -> String {
        format!("is equal to {}", crate::debug::WithType(&self.0))
    }

    fn expected(&self) -> Option<&Value> {
        Some(&self.0)
    }
}

/// Matches values deeply equal to `x`.
pub fn eq(x: impl Into<Value>) -> Eq {
    Eq(x.into())
}

pub struct IsNil;

impl Matcher for IsNil {
    fn matches(&self, x: &Value) -> bool {
        x.is_nil()
    }

    fn describe(&self) -> String {
        "is nil".to_string()
    }
}

/// Matches nil, including the nil value of every reference type.
pub fn nil() -> IsNil {
    IsNil
}

pub struct Not(Arc<dyn Matcher>);

impl Matcher for Not {
    fn matches(&self, x: &Value) -> bool {
        !self.0.matches(x)
    }

    fn describe(&self) -> String {
        format!("not({})", self.0.describe())
    }
}

/// Reverses a matcher. Plain values are compared with [eq].
pub fn not(x: impl IntoMatcher) -> Not {
    Not(x.into_matcher().matcher)
}

pub struct AssignableTo(crate::value::Type);

impl Matcher for AssignableTo {
    fn matches(&self, x: &Value) -> bool {
        x.ty().assignable_to(&self.0)
    }

    fn describe(&self) -> String {
        format!("is assignable to {}", self.0)
    }
}

/// Matches values whose type is assignable to the type of `x`.
pub fn assignable_to_type_of(x: impl Into<Value>) -> AssignableTo {
    AssignableTo(x.into().ty())
}

pub struct Len(usize);

impl Matcher for Len {
    fn matches(&self, x: &Value) -> bool {
        x.len() == Some(self.0)
    }

    fn describe(&self) -> String {
        format!("has length {}", self.0)
    }
}

/// Matches strings, sequences and maps of length `n`.
pub fn len(n: usize) -> Len {
    Len(n)
}

pub struct Contains(Vec<Value>);

impl Matcher for Contains {
    fn matches(&self, x: &Value) -> bool {
        let Some(elements) = x.elements() else {
            return false;
        };

        self.0
            .iter()
            .all(|wanted| elements.iter().any(|given| given.deep_eq(wanted)))
    }

    fn describe(&self) -> String {
        format!("contains elements: {:?}", self.0)
    }
}

/// Matches sequences containing every one of `elements`.
pub fn contains<T: Into<Value>>(elements: impl IntoIterator<Item = T>) -> Contains {
    Contains(elements.into_iter().map(Into::into).collect())
}

pub struct InAnyOrder(Value);

impl Matcher for InAnyOrder {
    fn matches(&self, x: &Value) -> bool {
        let (Some(given), Some(wanted)) = (x.elements(), self.0.elements()) else {
            return false;
        };

        if given.len() != wanted.len() {
            return false;
        }

        let mut used = vec![false; given.len()];
        wanted.iter().all(|wanted| {
            let found = given
                .iter()
                .enumerate()
                .find(|(index, given)| !used[*index] && given.deep_eq(wanted));
            match found {
                Some((index, _)) => {
                    used[index] = true;
                    true
                }
                None => false,
            }
        })
    }

    fn describe(&self) -> String {
        format!("has the same elements as {:?}", self.0)
    }

    fn expected(&self) -> Option<&Value> {
        Some(&self.0)
    }
}

/// Matches sequences holding the same elements as `x`, in any order.
///
/// Both operands must be sequences. Strings are not sequences.
pub fn in_any_order(x: impl Into<Value>) -> InAnyOrder {
    InAnyOrder(x.into())
}

pub struct All(Vec<Arc<dyn Matcher>>);

impl Matcher for All {
    fn matches(&self, x: &Value) -> bool {
        self.0.iter().all(|matcher| matcher.matches(x))
    }

    fn describe(&self) -> String {
        self.0
            .iter()
            .map(|matcher| matcher.describe())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Matches when every one of `matchers` matches.
pub fn all(matchers: impl IntoIterator<Item = ArgMatcher>) -> All {
    All(matchers.into_iter().map(|arg| arg.matcher).collect())
}

pub struct IsOfType(String);

impl Matcher for IsOfType {
    fn matches(&self, x: &Value) -> bool {
        x.ty().to_string() == self.0
    }

    fn describe(&self) -> String {
        format!("is of type {}", self.0)
    }
}

/// Matches values whose type name renders as `name`, e.g. `"Vec<i64>"`.
pub fn is_of_type(name: impl Into<String>) -> IsOfType {
    IsOfType(name.into())
}

pub struct Implements {
    name: String,
    interface: Option<Arc<Interface>>,
}

impl Matcher for Implements {
    fn matches(&self, x: &Value) -> bool {
        match (&self.interface, x) {
            (Some(interface), Value::Mock(receiver)) => receiver.interface().provides(interface),
            _ => false,
        }
    }

    fn describe(&self) -> String {
        format!("implements interface {}", self.name)
    }
}

/// Matches mocks whose interface provides every method of the interface `name`
/// registered in `registry`. An unregistered name never matches.
pub fn implements(registry: &TypeRegistry, name: impl Into<String>) -> Implements {
    let name = name.into();
    Implements {
        interface: registry.get(&name),
        name,
    }
}

pub struct Cond<F> {
    description: String,
    predicate: F,
}

impl<F> Matcher for Cond<F>
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    fn matches(&self, x: &Value) -> bool {
        (self.predicate)(x)
    }

    fn describe(&self) -> String {
        self.description.clone()
    }
}

/// A matcher backed by a closure.
pub fn cond<F>(description: impl Into<String>, predicate: F) -> Cond<F>
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    Cond {
        description: description.into(),
        predicate,
    }
}
