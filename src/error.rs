use crate::call::Call;
use crate::counter::NCalls;
use crate::debug::{self, ActualCall};
use crate::mismatch::MatchError;
use crate::signature::{Receiver, SigError};
use crate::value::{Type, Value};

/// Failures detected by the engine, rendered into reporter messages.
#[derive(Clone)]
pub(crate) enum MockError {
    UnknownMethod {
        receiver: Receiver,
        method: String,
        origin: debug::Origin,
    },
    UnexpectedCall {
        call: ActualCall,
        origin: debug::Origin,
        reason: MatchError,
    },
    ActionFailed {
        call: ActualCall,
        expectation: Call,
        error: ActionError,
    },
    FinishedTwice,
    SelfPrerequisite,
    CallOrderLoop {
        prerequisite: Call,
        call: Call,
    },
    IncompatibleAction {
        call: Call,
        action: &'static str,
        error: SigError,
    },
    WrongReturnCount {
        call: Call,
        expected: usize,
        actual: usize,
    },
    WrongReturnType {
        call: Call,
        index: usize,
        expected: Type,
        actual: Value,
    },
    SetArgOutOfRange {
        call: Call,
        index: usize,
        len: usize,
    },
    SetArgNotAssignable {
        call: Call,
        index: usize,
        expected: Type,
        actual: Value,
    },
    SetArgNotSettable {
        call: Call,
        index: usize,
        ty: Type,
    },
    MissingCall {
        call: Call,
        min: usize,
        actual: usize,
    },
    AbortMissingCalls,
}

impl std::fmt::Display for MockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownMethod {
                receiver,
                method,
                origin,
            } => {
                write!(
                    f,
                    "{origin}: failed finding method {method} on {receiver}: the interface has no such method"
                )
            }
            Self::UnexpectedCall {
                call,
                origin,
                reason,
            } => {
                write!(f, "Unexpected call to {call} at {origin} because: {reason}")
            }
            Self::ActionFailed {
                call,
                expectation,
                error,
            } => {
                write!(
                    f,
                    "{call}: action of expected call {expectation} failed: {error}"
                )
            }
            Self::FinishedTwice => write!(
                f,
                "Controller.finish was called more than once. It has to be called exactly once."
            ),
            Self::SelfPrerequisite => {
                write!(f, "A call isn't allowed to be its own prerequisite")
            }
            Self::CallOrderLoop { prerequisite, call } => write!(
                f,
                "Loop in call order: {prerequisite} is a prerequisite to {call} (possibly indirectly)."
            ),
            Self::IncompatibleAction {
                call,
                action,
                error,
            } => {
                write!(f, "incompatible function passed to {action} for {call}: {error}")
            }
            Self::WrongReturnCount {
                call,
                expected,
                actual,
            } => write!(
                f,
                "wrong number of arguments to returns for {call}: got {actual}, want {expected}"
            ),
            Self::WrongReturnType {
                call,
                index,
                expected,
                actual,
            } => write!(
                f,
                "wrong type of argument {index} to returns for {call}: {} is not assignable to {expected}",
                debug::WithType(actual)
            ),
            Self::SetArgOutOfRange { call, index, len } => write!(
                f,
                "set_arg({index}, ..) called for {call}, a method with {len} args"
            ),
            Self::SetArgNotAssignable {
                call,
                index,
                expected,
                actual,
            } => write!(
                f,
                "set_arg({index}, ..) for {call}: {} is not assignable to {expected}",
                debug::WithType(actual)
            ),
            Self::SetArgNotSettable { call, index, ty } => write!(
                f,
                "set_arg({index}, ..) for {call} refers to an argument of non-pointer non-list type {ty}"
            ),
            Self::MissingCall { call, min, actual } => write!(
                f,
                "missing call(s) to {call}: expected at least {}, but it was matched {}",
                NCalls(*min),
                NCalls(*actual)
            ),
            Self::AbortMissingCalls => write!(f, "aborting test due to missing call(s)"),
        }
    }
}

/// Failures while running the actions of a matched expectation.
#[derive(Clone, Debug)]
pub(crate) enum ActionError {
    MissingArgument {
        index: usize,
    },
    Conversion {
        index: usize,
        expected: Type,
        actual: Value,
    },
    ArgOutOfRange {
        index: usize,
        len: usize,
    },
    NotSettable {
        index: usize,
        actual: Value,
    },
    NotAssignable {
        index: usize,
        expected: Type,
        actual: Value,
    },
    ResultCount {
        expected: usize,
        actual: usize,
    },
}

impl std::fmt::Display for ActionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingArgument { index } => write!(f, "missing argument #{index}"),
            Self::Conversion {
                index,
                expected,
                actual,
            } => write!(f, "cannot convert argument #{index} ({actual:?}) to {expected}"),
            Self::ArgOutOfRange { index, len } => {
                write!(f, "cannot set argument #{index} of a call with {len} arguments")
            }
            Self::NotSettable { index, actual } => write!(
                f,
                "cannot set argument #{index}: {} is neither a pointer nor a list",
                debug::WithType(actual)
            ),
            Self::NotAssignable {
                index,
                expected,
                actual,
            } => write!(
                f,
                "cannot set argument #{index}: {} is not assignable to {expected}",
                debug::WithType(actual)
            ),
            Self::ResultCount { expected, actual } => {
                write!(f, "action returned {actual} values, want {expected}")
            }
        }
    }
}
