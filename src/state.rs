use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::call_set::CallSet;
use crate::error::MockError;
use crate::reporter::TestReporter;
use crate::util::Guarded;

pub(crate) struct SharedState {
    pub reporter: Arc<dyn TestReporter>,
    pub expected_calls: Guarded<CallSet>,
    pub finished: OnceCell<()>,
}

impl SharedState {
    pub fn new(reporter: Arc<dyn TestReporter>, overridable: bool) -> Self {
        Self {
            reporter,
            expected_calls: Guarded::new(CallSet::new(overridable)),
            finished: OnceCell::new(),
        }
    }

    /// Report a failure the test can continue past.
    pub fn error(&self, error: MockError) {
        let message = error.to_string();
        tracing::warn!(%message, "mock failure");
        self.reporter.error(&message);
    }

    /// Report a failure that aborts the test. Must not be called while holding the
    /// expected-calls lock.
    pub fn fatal(&self, error: MockError) -> ! {
        let message = error.to_string();
        tracing::error!(%message, "fatal mock failure");
        self.reporter.fatal(&message)
    }
}
