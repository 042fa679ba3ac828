use crate::error::MockError;
use crate::state::SharedState;

pub(crate) fn finish(state: &SharedState) {
    if state.finished.set(()).is_err() {
        // a second finish while unwinding would turn the original panic into an abort
        if std::thread::panicking() {
            return;
        }
        state.fatal(MockError::FinishedTwice);
    }

    // skip verification if already panicking, the original failure is what matters.
    if std::thread::panicking() {
        tracing::debug!("finish skipped verification while panicking");
        return;
    }

    let failures = state.expected_calls.locked(|calls| calls.failures());
    if failures.is_empty() {
        tracing::debug!("all expected calls satisfied");
        return;
    }

    for call in failures {
        state.error(MockError::MissingCall {
            min: call.min_calls(),
            actual: call.num_calls(),
            call,
        });
    }

    state.fatal(MockError::AbortMissingCalls)
}
