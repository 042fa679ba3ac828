use core::fmt;
use std::panic::Location;

use crate::signature::Receiver;
use crate::value::Value;

/// Source location of a recorded expectation or an actual call.
#[derive(Clone, Copy)]
pub(crate) struct Origin(pub &'static Location<'static>);

impl Origin {
    #[track_caller]
    pub fn caller() -> Self {
        Self(Location::caller())
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.0.file(), self.0.line())
    }
}

/// An invocation as it actually happened, for diagnostics.
#[derive(Clone)]
pub(crate) struct ActualCall {
    pub receiver: Receiver,
    pub method: String,
    pub args: Vec<Value>,
}

impl fmt::Display for ActualCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}(", self.receiver, self.method)?;
        for (index, arg) in self.args.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{arg:?}")?;
        }
        write!(f, ")")
    }
}

/// Formats a value together with its type, as in `42 (i64)`.
pub(crate) struct WithType<'v>(pub &'v Value);

impl<'v> fmt::Display for WithType<'v> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({})", self.0, self.0.ty())
    }
}
