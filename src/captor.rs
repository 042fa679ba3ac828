use std::sync::Arc;

use crate::matcher::{Anything, IntoMatcher, Matcher};
use crate::util::Guarded;
use crate::value::Value;

/// A matcher that records every value it is asked to match.
///
/// Clones share the same log, so keep one clone for inspection and pass another to
/// [`args!`](crate::args):
///
/// ```rust,ignore
/// let captor = mockctrl::any_captor();
/// ctrl.record_call(&recv, "Put", mockctrl::args![captor.clone()]);
/// // ...
/// assert_eq!(Some(Value::from(5)), captor.value());
/// ```
#[derive(Clone)]
pub struct Captor {
    inner: Arc<CaptorInner>,
}

struct CaptorInner {
    matcher: Arc<dyn Matcher>,
    values: Guarded<Vec<Value>>,
}

impl Captor {
    /// The last captured value, if any.
    pub fn value(&self) -> Option<Value> {
        self.inner.values.locked(|values| values.last().cloned())
    }

    /// Every captured value, in the order they were matched.
    pub fn all_values(&self) -> Vec<Value> {
        self.inner.values.locked(|values| values.clone())
    }
}

impl Matcher for Captor {
    fn matches(&self, x: &Value) -> bool {
        self.inner.values.locked(|values| values.push(x.clone()));
        self.inner.matcher.matches(x)
    }

    fn describe(&self) -> String {
        self.inner.matcher.describe()
    }

    fn expected(&self) -> Option<&Value> {
        self.inner.matcher.expected()
    }
}

/// Capture every value tested against `matcher`.
pub fn captor(matcher: impl IntoMatcher) -> Captor {
    Captor {
        inner: Arc::new(CaptorInner {
            matcher: matcher.into_matcher().matcher,
            values: Guarded::new(vec![]),
        }),
    }
}

/// A captor accepting any value.
pub fn any_captor() -> Captor {
    captor(Anything)
}
