use core::fmt;
use std::sync::Arc;

use crate::action::Action;
use crate::counter::{CallCounter, UNBOUNDED};
use crate::debug::Origin;
use crate::error::{ActionError, MockError};
use crate::func::{Func, IntoFunc};
use crate::matcher::ArgMatcher;
use crate::mismatch::Mismatch;
use crate::reporter::TestReporter;
use crate::signature::{self, MethodSig, Receiver, SigError};
use crate::util::Guarded;
use crate::value::{List, Type, Value};

/// One expected invocation of a mocked method.
///
/// `Call` is a shared handle: builder methods take `&self`, update the expectation in place
/// and return another handle to it, so they chain directly off
/// [Controller::record_call](crate::Controller::record_call).
///
/// Misuse detected while building (incompatible actions, ordering loops) is reported as a
/// fatal failure through the controller's reporter.
#[derive(Clone)]
pub struct Call {
    inner: Arc<CallInner>,
}

struct CallInner {
    receiver: Receiver,
    method: String,
    sig: MethodSig,
    args: Vec<ArgMatcher>,
    origin: Origin,
    reporter: Arc<dyn TestReporter>,
    counter: CallCounter,
    state: Guarded<CallState>,
}

#[derive(Default)]
struct CallState {
    prereqs: Vec<Call>,
    actions: Vec<Action>,
}

impl Call {
    pub(crate) fn new(
        reporter: Arc<dyn TestReporter>,
        receiver: Receiver,
        method: String,
        sig: MethodSig,
        args: Vec<ArgMatcher>,
        origin: Origin,
    ) -> Self {
        Self {
            inner: Arc::new(CallInner {
                receiver,
                method,
                sig,
                args,
                origin,
                reporter,
                counter: CallCounter::new(),
                state: Guarded::default(),
            }),
        }
    }

    /// Expect exactly `n` calls. `times(0)` forbids the call altogether.
    pub fn times(&self, n: usize) -> Self {
        self.inner.counter.set_bounds(n, n);
        self.clone()
    }

    /// Allow any number of calls, including none.
    pub fn any_times(&self) -> Self {
        self.inner.counter.set_bounds(0, UNBOUNDED);
        self.clone()
    }

    /// Expect at least `n` calls. Lifts the upper bound if it is still the default.
    pub fn min_times(&self, n: usize) -> Self {
        self.inner.counter.set_min(n);
        if self.inner.counter.max() == 1 {
            self.inner.counter.set_max(UNBOUNDED);
        }
        self.clone()
    }

    /// Expect at most `n` calls. Drops the lower bound if it is still the default.
    pub fn max_times(&self, n: usize) -> Self {
        self.inner.counter.set_max(n);
        if self.inner.counter.min() == 1 {
            self.inner.counter.set_min(0);
        }
        self.clone()
    }

    /// Declare the values to return.
    ///
    /// Each value must be assignable to the method's result type. [Value::Nil] stands for
    /// the nil of any nilable result type.
    pub fn returns(&self, values: impl IntoIterator<Item = Value>) -> Self {
        let values: Vec<Value> = values.into_iter().collect();
        let results = self.inner.sig.results();

        if values.len() != results.len() {
            self.fatal(MockError::WrongReturnCount {
                call: self.clone(),
                expected: results.len(),
                actual: values.len(),
            });
        }

        let mut checked = Vec::with_capacity(values.len());
        for (index, (value, expected)) in values.into_iter().zip(results).enumerate() {
            if value.is_nil() && expected.is_nilable() {
                checked.push(expected.zero());
            } else if value.ty().assignable_to(expected) {
                checked.push(value);
            } else {
                self.fatal(MockError::WrongReturnType {
                    call: self.clone(),
                    index,
                    expected: expected.clone(),
                    actual: value,
                });
            }
        }

        self.push_action(Action::Return(checked))
    }

    /// Run `f` when the call is matched. `f` receives the call's arguments, with a variadic
    /// tail passed as one list, and must not return anything.
    pub fn run<M>(&self, f: impl IntoFunc<M>) -> Self {
        let func = Func::new(f);
        let checked = signature::check_inputs(&func, &self.inner.sig).and_then(|()| {
            match func.results().len() {
                0 => Ok(()),
                actual => Err(SigError::ResultArity {
                    expected: 0,
                    actual,
                }),
            }
        });

        if let Err(error) = checked {
            self.fatal(MockError::IncompatibleAction {
                call: self.clone(),
                action: "run",
                error,
            });
        }

        self.push_action(Action::Run(func))
    }

    /// Run `f` when the call is matched and return what it returns.
    pub fn run_and_return<M>(&self, f: impl IntoFunc<M>) -> Self {
        let func = Func::new(f);
        let checked = signature::check_inputs(&func, &self.inner.sig)
            .and_then(|()| signature::check_outputs(&func, &self.inner.sig));

        if let Err(error) = checked {
            self.fatal(MockError::IncompatibleAction {
                call: self.clone(),
                action: "run_and_return",
                error,
            });
        }

        self.push_action(Action::RunAndReturn(func))
    }

    /// Write `value` into argument `index` when the call is matched.
    ///
    /// The argument must be a [Ptr](crate::Ptr), whose pointee is replaced, or a
    /// [List], which is overwritten element by element up to the shorter length. Indices
    /// count actual arguments, so each element of a variadic tail has its own index.
    pub fn set_arg(&self, index: usize, value: impl Into<Value>) -> Self {
        let value = value.into();
        let sig = &self.inner.sig;

        let Some(param) = sig.arg_type(index) else {
            self.fatal(MockError::SetArgOutOfRange {
                call: self.clone(),
                index,
                len: sig.params().len(),
            });
        };

        match param {
            Type::Any => {}
            Type::Ptr(elem) => {
                if value.assign_to(elem).is_none() {
                    self.fatal(MockError::SetArgNotAssignable {
                        call: self.clone(),
                        index,
                        expected: (**elem).clone(),
                        actual: value,
                    });
                }
            }
            Type::List(elem) => {
                let fits = value.elements().is_some_and(|items| {
                    items.iter().all(|item| item.assign_to(elem).is_some())
                });
                if !fits {
                    self.fatal(MockError::SetArgNotAssignable {
                        call: self.clone(),
                        index,
                        expected: param.clone(),
                        actual: value,
                    });
                }
            }
            _ => self.fatal(MockError::SetArgNotSettable {
                call: self.clone(),
                index,
                ty: param.clone(),
            }),
        }

        self.push_action(Action::SetArg { index, value })
    }

    /// Only match after `prerequisite` has been satisfied.
    pub fn after(&self, prerequisite: &Call) -> Self {
        if self.ptr_eq(prerequisite) {
            self.fatal(MockError::SelfPrerequisite);
        }
        if prerequisite.depends_on(self) {
            self.fatal(MockError::CallOrderLoop {
                prerequisite: self.clone(),
                call: prerequisite.clone(),
            });
        }

        tracing::trace!(call = %self, prerequisite = %prerequisite, "ordering recorded");
        self.inner
            .state
            .locked(|state| state.prereqs.push(prerequisite.clone()));
        self.clone()
    }

    /// Whether the number of calls reached the lower bound.
    pub fn is_satisfied(&self) -> bool {
        self.inner.counter.is_satisfied()
    }

    /// Whether the number of calls reached the upper bound.
    pub fn is_exhausted(&self) -> bool {
        self.inner.counter.is_exhausted()
    }

    pub fn num_calls(&self) -> usize {
        self.inner.counter.num_calls()
    }

    pub(crate) fn min_calls(&self) -> usize {
        self.inner.counter.min()
    }

    pub(crate) fn receiver(&self) -> &Receiver {
        &self.inner.receiver
    }

    pub(crate) fn method(&self) -> &str {
        &self.inner.method
    }

    pub(crate) fn origin(&self) -> Origin {
        self.inner.origin
    }

    pub(crate) fn ptr_eq(&self, other: &Call) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Check the actual arguments and the prerequisites. Has no side effects, except for
    /// the logs of any captors among the matchers.
    pub(crate) fn matches(&self, args: &[Value]) -> Result<(), Mismatch> {
        self.match_args(args)?;

        for prerequisite in self.prereqs() {
            if !prerequisite.is_satisfied() {
                return Err(Mismatch::Prerequisite {
                    call: self.clone(),
                    prerequisite,
                });
            }
        }

        Ok(())
    }

    fn match_args(&self, args: &[Value]) -> Result<(), Mismatch> {
        let matchers = &self.inner.args;
        let sig = &self.inner.sig;
        let arg_count = || Mismatch::ArgCount {
            call: self.clone(),
            actual: args.len(),
            expected: matchers.len(),
        };

        if !sig.is_variadic() {
            if matchers.len() != args.len() {
                return Err(arg_count());
            }
            return self.match_positional(matchers, args, 0);
        }

        let declared = sig.params().len();
        let fixed = sig.fixed_params();
        let whole_tail = matchers.last().is_some_and(|matcher| matcher.whole_tail);

        if whole_tail {
            if matchers.len() != declared || args.len() < fixed {
                return Err(arg_count());
            }
            self.match_positional(&matchers[..fixed], &args[..fixed], 0)?;

            let tail = Value::List(List::new(
                sig.params()[fixed].clone(),
                args[fixed..].iter().cloned(),
            ));
            return self.match_one(&matchers[fixed], tail, fixed);
        }

        if matchers.len() == args.len() {
            return self.match_positional(matchers, args, 0);
        }

        if matchers.len() == declared && args.len() >= fixed {
            self.match_positional(&matchers[..fixed], &args[..fixed], 0)?;
            for (index, arg) in args.iter().enumerate().skip(fixed) {
                self.match_one(&matchers[fixed], arg.clone(), index)?;
            }
            return Ok(());
        }

        Err(arg_count())
    }

    fn match_positional(
        &self,
        matchers: &[ArgMatcher],
        args: &[Value],
        offset: usize,
    ) -> Result<(), Mismatch> {
        for (index, (matcher, arg)) in matchers.iter().zip(args).enumerate() {
            if !matcher.matches(arg) {
                return Err(Mismatch::Arg {
                    call: self.clone(),
                    index: offset + index,
                    actual: arg.clone(),
                    matcher: matcher.clone(),
                });
            }
        }
        Ok(())
    }

    fn match_one(&self, matcher: &ArgMatcher, arg: Value, index: usize) -> Result<(), Mismatch> {
        if matcher.matches(&arg) {
            Ok(())
        } else {
            Err(Mismatch::Arg {
                call: self.clone(),
                index,
                actual: arg,
                matcher: matcher.clone(),
            })
        }
    }

    fn prereqs(&self) -> Vec<Call> {
        self.inner.state.locked(|state| state.prereqs.clone())
    }

    /// Whether `other` is a direct or indirect prerequisite of this call.
    fn depends_on(&self, other: &Call) -> bool {
        self.prereqs()
            .iter()
            .any(|prerequisite| prerequisite.ptr_eq(other) || prerequisite.depends_on(other))
    }

    /// Forget the prerequisites, handing them back to the caller.
    pub(crate) fn drop_prereqs(&self) -> Vec<Call> {
        self.inner
            .state
            .locked(|state| std::mem::take(&mut state.prereqs))
    }

    /// Count one matched call and snapshot the actions to run for it.
    pub(crate) fn invoke(&self) -> Invocation {
        self.inner.counter.tick();
        Invocation {
            call: self.clone(),
            actions: self.inner.state.locked(|state| state.actions.clone()),
        }
    }

    fn push_action(&self, action: Action) -> Self {
        self.inner.state.locked(|state| state.actions.push(action));
        self.clone()
    }

    fn fatal(&self, error: MockError) -> ! {
        let message = error.to_string();
        tracing::error!(%message, "invalid expectation");
        self.inner.reporter.fatal(&message)
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}(", self.inner.receiver, self.inner.method)?;
        for (index, matcher) in self.inner.args.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{matcher}")?;
        }
        write!(f, ") at {}", self.inner.origin)
    }
}

impl fmt::Debug for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Make each call a prerequisite of the next one.
pub fn in_order<'c>(calls: impl IntoIterator<Item = &'c Call>) {
    let mut previous: Option<&Call> = None;
    for call in calls {
        if let Some(previous) = previous {
            call.after(previous);
        }
        previous = Some(call);
    }
}

/// The actions of one matched call, to be run outside the controller lock.
pub(crate) struct Invocation {
    call: Call,
    actions: Vec<Action>,
}

impl Invocation {
    pub fn call(&self) -> &Call {
        &self.call
    }

    /// Run every action in registration order. The last declared results win, and without
    /// any the method returns the zero value of each result type.
    pub fn run(&self, args: &[Value]) -> Result<Vec<Value>, ActionError> {
        let sig = &self.call.inner.sig;
        let mut results = None;

        for action in &self.actions {
            if let Some(declared) = action.apply(sig, args)? {
                results = Some(declared);
            }
        }

        Ok(results.unwrap_or_else(|| sig.zero_results()))
    }
}
