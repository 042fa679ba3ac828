use mockctrl::*;

use crate::reporter::{expect_fatal, Recorder};
use crate::subject::{MockLogger, MockStore};

#[test]
fn after_waits_for_the_prerequisite() {
    let ctrl = Controller::new(Recorder::default());
    let store = MockStore::new(&ctrl);

    let first = store.expect("Put", args!["a", any()]);
    store.expect("Len", args![]).after(&first).returns(vals![1]);

    let message = expect_fatal(|| {
        store.len();
    });
    assert!(message.contains("doesn't have a prerequisite call satisfied:\nStore.Put("));
    assert!(message.contains("should be called before:\nStore.Len() at"));

    store.put("a", 0);
    assert_eq!(1, store.len());
    ctrl.finish();
}

#[test]
fn ordering_works_across_mocks() {
    let ctrl = Controller::new(PanicReporter);
    let store = MockStore::new(&ctrl);
    let logger = MockLogger::new(&ctrl);

    let opened = logger.expect_log("open");
    let read = store.expect("Len", args![]).returns(vals![3]);
    let closed = logger.expect_log("close");
    in_order([&opened, &read, &closed]);

    logger.log("open");
    assert_eq!(3, store.len());
    logger.log("close");

    ctrl.finish();
}

#[test]
fn in_order_blocks_skipping_a_call() {
    let ctrl = Controller::new(Recorder::default());
    let logger = MockLogger::new(&ctrl);

    let c1 = logger.expect_log("one");
    let c2 = logger.expect_log("two");
    let c3 = logger.expect_log("three");
    in_order([&c1, &c2, &c3]);

    logger.log("one");
    let message = expect_fatal(|| logger.log("three"));
    assert!(message.contains("doesn't have a prerequisite call satisfied"));
    assert!(!c3.is_satisfied());

    logger.log("two");
    logger.log("three");
    assert!(ctrl.satisfied());
}

#[test]
fn prerequisites_are_retired_once_the_dependent_matches() {
    let ctrl = Controller::new(Recorder::default());
    let logger = MockLogger::new(&ctrl);

    let setup = logger.expect_log("setup").any_times();
    logger.expect_log("run").after(&setup);

    logger.log("setup");
    logger.log("setup");
    logger.log("run");

    let message = expect_fatal(|| logger.log("setup"));
    assert!(message.contains(
        "is no longer expected, a call ordered after it was already made"
    ));
}

#[test]
#[should_panic(expected = "A call isn't allowed to be its own prerequisite")]
fn call_cannot_be_its_own_prerequisite() {
    let ctrl = Controller::new(PanicReporter);
    let logger = MockLogger::new(&ctrl);

    let call = logger.expect_log(any());
    call.after(&call);
}

#[test]
#[should_panic(
    expected = "Loop in call order: Logger.Log(is equal to \"a\" (String)) at tests/it/mock_order.rs:"
)]
fn transitive_loop_is_rejected() {
    let ctrl = Controller::new(PanicReporter);
    let logger = MockLogger::new(&ctrl);

    let a = logger.expect_log("a");
    let b = logger.expect_log("b").after(&a);
    let c = logger.expect_log("c").after(&b);

    a.after(&c);
}

#[test]
fn rejected_loop_leaves_ordering_untouched() {
    let ctrl = Controller::new(Recorder::default());
    let logger = MockLogger::new(&ctrl);

    let a = logger.expect_log("a");
    let b = logger.expect_log("b").after(&a);

    let message = expect_fatal(|| {
        a.after(&b);
    });
    assert!(message.starts_with("Loop in call order:"));

    // `a` still has no prerequisites
    logger.log("a");
    logger.log("b");
    assert!(ctrl.satisfied());
}
