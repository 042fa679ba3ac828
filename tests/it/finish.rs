use mockctrl::*;

use crate::reporter::{expect_fatal, Recorder};
use crate::subject::{MockLogger, MockStore};

#[test]
fn finish_without_expectations_passes() {
    let ctrl = Controller::new(PanicReporter);
    ctrl.finish();
}

#[test]
#[should_panic(
    expected = "Controller.finish was called more than once. It has to be called exactly once."
)]
fn second_finish_is_fatal() {
    let ctrl = Controller::new(PanicReporter);
    ctrl.finish();
    ctrl.finish();
}

#[test]
fn missing_calls_are_reported_individually_then_aborted() {
    let recorder = Recorder::default();
    let ctrl = Controller::new(recorder.clone());
    let store = MockStore::new(&ctrl);
    let logger = MockLogger::new(&ctrl);

    store.expect("Len", args![]).times(2);
    logger.expect_log("hello");
    logger.expect_log(any()).any_times();
    store.len();

    let message = expect_fatal(|| ctrl.finish());
    assert_eq!("aborting test due to missing call(s)", message);

    let mut errors = recorder.errors();
    errors.sort();
    assert_eq!(2, errors.len());
    assert!(errors[0].starts_with("missing call(s) to Logger.Log(is equal to \"hello\" (String)) at tests/it/finish.rs:"));
    assert!(errors[0].ends_with(": expected at least 1 call, but it was matched no calls"));
    assert!(errors[1].starts_with("missing call(s) to Store.Len() at tests/it/finish.rs:"));
    assert!(errors[1].ends_with(": expected at least 2 calls, but it was matched 1 call"));
}

#[test]
fn satisfied_tracks_minimum_calls() {
    let ctrl = Controller::new(PanicReporter);
    let logger = MockLogger::new(&ctrl);

    logger.expect_log(any()).min_times(1);
    assert!(!ctrl.satisfied());

    logger.log("x");
    assert!(ctrl.satisfied());
    ctrl.finish();
}

#[test]
fn guard_finishes_on_scope_exit() {
    let recorder = Recorder::default();
    let ctrl = Controller::new(recorder.clone());
    let logger = MockLogger::new(&ctrl);

    logger.expect_log("never");

    let message = expect_fatal(|| {
        let _finish = ctrl.finish_guard();
    });
    assert_eq!("aborting test due to missing call(s)", message);
    assert_eq!(1, recorder.errors().len());
}

#[test]
#[should_panic(expected = "the test failed for its own reasons")]
fn guard_does_not_mask_an_ongoing_panic() {
    let ctrl = Controller::new(PanicReporter);
    let _finish = ctrl.finish_guard();
    let logger = MockLogger::new(&ctrl);

    logger.expect_log("never");

    panic!("the test failed for its own reasons");
}
