//!
//! `mockctrl` is the runtime half of a mock object framework: it records expected calls,
//! matches actual calls against them and verifies at the end of a test that every
//! expectation was met.
//!
//! Mocks are thin shims. Every mocked method forwards to [Controller::call], and every
//! recorder method forwards to [Controller::record_call]. The shim describes its interface
//! once with an [Interface] and identifies each mock instance by a [Receiver]:
//!
//! ```rust
//! use std::sync::Arc;
//! use mockctrl::*;
//!
//! struct MockStore {
//!     ctrl: Controller,
//!     recv: Receiver,
//! }
//!
//! impl MockStore {
//!     fn new(ctrl: &Controller) -> Self {
//!         let iface = Interface::new("Store")
//!             .method("Get", MethodSig::new([Type::Str], [Type::Int, Type::Bool]));
//!         Self {
//!             ctrl: ctrl.clone(),
//!             recv: Receiver::new(Arc::new(iface)),
//!         }
//!     }
//!
//!     #[track_caller]
//!     fn expect_get(&self, key: impl IntoMatcher) -> Call {
//!         self.ctrl.record_call(&self.recv, "Get", args![key])
//!     }
//!
//!     fn get(&self, key: &str) -> (i64, bool) {
//!         let results = self.ctrl.call(&self.recv, "Get", vals![key]);
//!         (
//!             results[0].cast().unwrap_or_default(),
//!             results[1].cast().unwrap_or_default(),
//!         )
//!     }
//! }
//!
//! #[test]
//! fn test() {
//!     let ctrl = Controller::new(PanicReporter);
//!     let _finish = ctrl.finish_guard();
//!
//!     let store = MockStore::new(&ctrl);
//!     store.expect_get("answer").returns(vals![42, true]);
//!
//!     assert_eq!((42, true), store.get("answer"));
//! }
//! ```
//!
//! # Matching
//! Each recorded argument is a [Matcher]. Plain values become [eq] matchers, and there are
//! matchers for [any] value, [nil], negation with [not], [len], [contains], [in_any_order] and
//! more. A [Captor] records the values it sees for later assertions.
//!
//! # Cardinality and ordering
//! A recorded [Call] is expected exactly once by default. Use [Call::times],
//! [Call::any_times], [Call::min_times] or [Call::max_times] to change that, and [Call::after]
//! or [in_order] to constrain the order of calls.
//!
//! # Failures
//! Failures go to a [TestReporter]. The default [PanicReporter] panics on fatal failures,
//! which fails the enclosing test.

#![forbid(unsafe_code)]

mod action;
mod call;
mod call_set;
mod captor;
mod counter;
mod debug;
mod error;
mod func;
mod matcher;
mod mismatch;
mod reporter;
mod signature;
mod state;
mod teardown;
mod util;
mod value;

use std::sync::Arc;

pub use call::{in_order, Call};
pub use captor::{any_captor, captor, Captor};
pub use func::{Func, IntoFunc, Results};
pub use matcher::{
    all, any, assignable_to_type_of, cond, contains, eq, implements, in_any_order, is_of_type,
    len, matcher, nil, not, tail, ArgMatcher, IntoMatcher, Matcher,
};
pub use reporter::{PanicReporter, TestReporter};
pub use signature::{Interface, MethodSig, Receiver, SigError, TypeRegistry};
pub use value::{
    Array, FromValue, Handle, List, Map, Ptr, Struct, StructType, Type, Typed, Value,
};

#[cfg(feature = "cancellation")]
pub use tokio_util::sync::CancellationToken;

use debug::{ActualCall, Origin};
use error::MockError;
use mismatch::MatchError;
use state::SharedState;

/// Build the argument matchers of [Controller::record_call].
///
/// Every argument is converted with [IntoMatcher], so plain values match by equality.
#[macro_export]
macro_rules! args {
    ($($arg:expr),* $(,)?) => {
        ::std::vec![$($crate::IntoMatcher::into_matcher($arg)),*]
    };
}

/// Build the argument or result values of [Controller::call] and [Call::returns].
#[macro_export]
macro_rules! vals {
    ($($val:expr),* $(,)?) => {
        ::std::vec![$(<$crate::Value as ::core::convert::From<_>>::from($val)),*]
    };
}

/// Owner of the expected calls of one test.
///
/// `Controller` is a cheap handle: clones share the same expectations, and it can be sent
/// to any thread that the code under test spawns.
///
/// Call [Controller::finish] exactly once at the end of the test, or hold a
/// [Controller::finish_guard] for the duration of it.
#[derive(Clone)]
pub struct Controller {
    state: Arc<SharedState>,
}

impl Controller {
    /// A controller reporting failures to `reporter`.
    pub fn new(reporter: impl TestReporter + 'static) -> Self {
        Self::builder(reporter).build()
    }

    pub fn builder(reporter: impl TestReporter + 'static) -> ControllerBuilder {
        ControllerBuilder {
            reporter: Arc::new(reporter),
            overridable: false,
        }
    }

    /// A controller whose fatal failures also cancel the returned token.
    ///
    /// The token is a child of `parent`. Code under test that selects on it stops waiting
    /// for calls that can no longer arrive once the test has failed.
    #[cfg(feature = "cancellation")]
    pub fn with_cancellation(
        reporter: impl TestReporter + 'static,
        parent: &CancellationToken,
    ) -> (Self, CancellationToken) {
        let token = parent.child_token();
        let reporter = reporter::CancelReporter::new(Arc::new(reporter), token.clone());
        (Self::new(reporter), token)
    }

    /// Record an expected call of `method` on `receiver`.
    ///
    /// The expectation initially matches exactly one call, and returns the zero values of
    /// the method's result types.
    #[track_caller]
    pub fn record_call(&self, receiver: &Receiver, method: &str, args: Vec<ArgMatcher>) -> Call {
        let origin = Origin::caller();

        let Some(sig) = receiver.interface().method_sig(method) else {
            self.state.fatal(MockError::UnknownMethod {
                receiver: receiver.clone(),
                method: method.to_string(),
                origin,
            });
        };

        let call = Call::new(
            self.state.reporter.clone(),
            receiver.clone(),
            method.to_string(),
            sig.clone(),
            args,
            origin,
        );

        tracing::debug!(%call, "expected call recorded");
        self.state
            .expected_calls
            .locked(|calls| calls.add(call.clone()));

        call
    }

    /// Dispatch an actual call of `method` on `receiver` and produce its results.
    ///
    /// Runs the actions of the first matching expectation. Without a match, the failure is
    /// reported as fatal.
    #[track_caller]
    pub fn call(&self, receiver: &Receiver, method: &str, args: Vec<Value>) -> Vec<Value> {
        let origin = Origin::caller();

        let outcome = self.state.expected_calls.locked(|calls| {
            let expected = calls.find_match(receiver, method, &args)?;

            // prerequisites are no longer needed once their dependent was reached
            for prerequisite in expected.drop_prereqs() {
                calls.remove(&prerequisite);
            }

            let invocation = expected.invoke();
            if expected.is_exhausted() {
                tracing::trace!(call = %expected, "expected call exhausted");
                calls.remove(&expected);
            }

            Ok::<_, MatchError>(invocation)
        });

        let invocation = match outcome {
            Ok(invocation) => invocation,
            Err(reason) => self.state.fatal(MockError::UnexpectedCall {
                call: ActualCall {
                    receiver: receiver.clone(),
                    method: method.to_string(),
                    args,
                },
                origin,
                reason,
            }),
        };

        tracing::debug!(call = %invocation.call(), %origin, "call matched");

        // the lock is released: actions may call back into the controller
        match invocation.run(&args) {
            Ok(results) => results,
            Err(error) => self.state.fatal(MockError::ActionFailed {
                expectation: invocation.call().clone(),
                call: ActualCall {
                    receiver: receiver.clone(),
                    method: method.to_string(),
                    args,
                },
                error,
            }),
        }
    }

    /// Verify that every expected call was made.
    ///
    /// Each missing call is reported as an error, followed by one fatal failure. Calling
    /// `finish` twice is fatal. While the thread is already panicking, verification is
    /// skipped so the original panic is not masked.
    pub fn finish(&self) {
        teardown::finish(&self.state)
    }

    /// A guard calling [Controller::finish] when dropped.
    pub fn finish_guard(&self) -> FinishGuard {
        FinishGuard {
            controller: self.clone(),
        }
    }

    /// Whether every expected call has reached its minimum number of calls.
    pub fn satisfied(&self) -> bool {
        self.state.expected_calls.locked(|calls| calls.satisfied())
    }
}

/// Options for a [Controller].
pub struct ControllerBuilder {
    reporter: Arc<dyn TestReporter>,
    overridable: bool,
}

impl ControllerBuilder {
    /// Let a later [Controller::record_call] for the same receiver and method replace the
    /// expectations recorded before it, instead of queueing behind them.
    pub fn overridable_expectations(mut self) -> Self {
        self.overridable = true;
        self
    }

    pub fn build(self) -> Controller {
        Controller {
            state: Arc::new(SharedState::new(self.reporter, self.overridable)),
        }
    }
}

/// Calls [Controller::finish] when dropped.
#[must_use = "the controller is finished when the guard is dropped"]
pub struct FinishGuard {
    controller: Controller,
}

impl Drop for FinishGuard {
    fn drop(&mut self) {
        self.controller.finish();
    }
}
