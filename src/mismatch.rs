use std::fmt::Display;

use crate::call::Call;
use crate::debug::WithType;
use crate::matcher::ArgMatcher;
use crate::value::Value;

/// Why one candidate expectation did not match an actual call.
#[derive(Clone)]
pub(crate) enum Mismatch {
    ArgCount {
        call: Call,
        actual: usize,
        expected: usize,
    },
    Arg {
        call: Call,
        index: usize,
        actual: Value,
        matcher: ArgMatcher,
    },
    Prerequisite {
        call: Call,
        prerequisite: Call,
    },
    Exhausted {
        call: Call,
    },
    /// The call was dropped as a prerequisite before reaching its maximum.
    Retired {
        call: Call,
    },
}

impl Display for Mismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ArgCount {
                call,
                actual,
                expected,
            } => write!(
                f,
                "expected call at {} has the wrong number of arguments. Got: {actual}, want: {expected}",
                call.origin()
            ),
            Self::Arg {
                call,
                index,
                actual,
                matcher,
            } => {
                write!(
                    f,
                    "expected call at {} doesn't match the argument at index {index}.\nGot: {}\nWant: {matcher}",
                    call.origin(),
                    WithType(actual)
                )?;

                if let Some(expected) = matcher.expected() {
                    let actual = format!("{actual:?}");
                    let expected = format!("{expected:?}");
                    if actual != expected {
                        write!(f, "\nDiff (actual / expected):\n")?;
                        Diff::new(&actual, &expected).fmt(f)?;
                    }
                }

                Ok(())
            }
            Self::Prerequisite { call, prerequisite } => write!(
                f,
                "expected call at {} doesn't have a prerequisite call satisfied:\n{prerequisite}\nshould be called before:\n{call}",
                call.origin()
            ),
            Self::Exhausted { call } => write!(
                f,
                "expected call at {} has already been called the max number of times",
                call.origin()
            ),
            Self::Retired { call } => write!(
                f,
                "expected call at {} is no longer expected, a call ordered after it was already made",
                call.origin()
            ),
        }
    }
}

/// Why no expectation was selected for an actual call.
#[derive(Clone)]
pub(crate) enum MatchError {
    NoReceiver,
    NoMethod { method: String },
    Mismatches(Vec<Mismatch>),
}

impl Display for MatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoReceiver => write!(f, "there are no expected method calls for that receiver"),
            Self::NoMethod { method } => write!(
                f,
                "there are no expected calls of the method \"{method}\" for that receiver"
            ),
            Self::Mismatches(mismatches) => {
                for mismatch in mismatches {
                    write!(f, "\n{mismatch}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::fmt::Debug for MatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

struct Diff<'s> {
    actual: &'s str,
    expected: &'s str,
}

impl<'s> Diff<'s> {
    fn new(actual: &'s impl AsRef<str>, expected: &'s impl AsRef<str>) -> Self {
        Self {
            actual: actual.as_ref(),
            expected: expected.as_ref(),
        }
    }
}

impl<'s> Display for Diff<'s> {
    #[cfg(feature = "pretty-print")]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let comparison = pretty_assertions::StrComparison::new(self.actual, self.expected);
        write!(f, "{comparison}")
    }

    #[cfg(not(feature = "pretty-print"))]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "  actual: {}", self.actual)?;
        write!(f, "expected: {}", self.expected)
    }
}
