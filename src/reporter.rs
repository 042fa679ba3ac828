//! The sink through which the controller signals failures to the test harness.

use std::sync::Arc;

/// Receives failure reports from a [Controller](crate::Controller).
///
/// `error` reports a failure and lets the test continue. `fatal` must not return: it aborts
/// the current test, typically by panicking.
pub trait TestReporter: Send + Sync {
    fn error(&self, message: &str);

    fn fatal(&self, message: &str) -> !;
}

impl<R: TestReporter + ?Sized> TestReporter for Arc<R> {
    fn error(&self, message: &str) {
        (**self).error(message)
    }

    fn fatal(&self, message: &str) -> ! {
        (**self).fatal(message)
    }
}

/// Reports errors on stderr and turns fatal failures into panics, which fail the
/// surrounding `#[test]`.
#[derive(Clone, Copy, Debug, Default)]
pub struct PanicReporter;

impl TestReporter for PanicReporter {
    fn error(&self, message: &str) {
        eprintln!("mockctrl: {message}");
    }

    fn fatal(&self, message: &str) -> ! {
        panic!("{message}")
    }
}

/// Cancels a token before forwarding fatal failures.
#[cfg(feature = "cancellation")]
pub(crate) struct CancelReporter {
    inner: Arc<dyn TestReporter>,
    token: tokio_util::sync::CancellationToken,
}

#[cfg(feature = "cancellation")]
impl CancelReporter {
    pub fn new(
        inner: Arc<dyn TestReporter>,
        token: tokio_util::sync::CancellationToken,
    ) -> Self {
        Self { inner, token }
    }
}

#[cfg(feature = "cancellation")]
impl TestReporter for CancelReporter {
    fn error(&self, message: &str) {
        self.inner.error(message)
    }

    fn fatal(&self, message: &str) -> ! {
        self.token.cancel();
        self.inner.fatal(message)
    }
}
