use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use mockctrl::*;

use crate::reporter::{expect_fatal, Recorder};
use crate::subject::MockStore;

#[test]
fn default_expectation_matches_once() {
    let ctrl = Controller::new(PanicReporter);
    let store = MockStore::new(&ctrl);

    let call = store.expect("Get", args!["a"]).returns(vals![1, true]);
    assert!(!call.is_satisfied());

    assert_eq!((1, true), store.get("a"));
    assert!(call.is_satisfied());
    assert!(call.is_exhausted());
    assert_eq!(1, call.num_calls());

    ctrl.finish();
}

#[test]
#[should_panic(expected = "has already been called the max number of times")]
fn second_identical_call_fails_once_consumed() {
    let ctrl = Controller::new(PanicReporter);
    let store = MockStore::new(&ctrl);

    store.expect("Get", args!["a"]).returns(vals![1, true]);

    store.get("a");
    store.get("a");
}

#[test]
fn zero_values_are_returned_without_declared_results() {
    let ctrl = Controller::new(PanicReporter);
    let store = MockStore::new(&ctrl);

    store.expect("Get", args![any()]);
    store.expect("Link", args![any()]);

    assert_eq!((0, false), store.get("a"));
    assert!(store.link(Value::from(1)).is_nil());

    ctrl.finish();
}

#[test]
fn times_moves_from_pending_to_exhausted() {
    let recorder = Recorder::default();
    let ctrl = Controller::new(recorder.clone());
    let store = MockStore::new(&ctrl);

    let call = store.expect("Len", args![]).times(2).returns(vals![5]);

    assert_eq!(5, store.len());
    assert!(!call.is_satisfied());
    assert!(!call.is_exhausted());

    assert_eq!(5, store.len());
    assert!(call.is_satisfied());
    assert!(call.is_exhausted());

    let message = expect_fatal(|| {
        store.len();
    });
    assert!(message.starts_with("Unexpected call to Store.Len() at tests/it/basic.rs:"));
    assert!(message.contains("has already been called the max number of times"));
    assert_eq!(2, call.num_calls());
}

#[test]
fn any_times_is_never_exhausted() {
    let ctrl = Controller::new(PanicReporter);
    let store = MockStore::new(&ctrl);

    let call = store.expect("Len", args![]).any_times().returns(vals![7]);
    assert!(call.is_satisfied());

    for _ in 0..100 {
        assert_eq!(7, store.len());
    }
    assert!(!call.is_exhausted());
    assert_eq!(100, call.num_calls());

    ctrl.finish();
}

#[test]
fn any_times_without_calls_is_satisfied() {
    let ctrl = Controller::new(PanicReporter);
    let store = MockStore::new(&ctrl);

    store.expect("Len", args![]).any_times();

    assert!(ctrl.satisfied());
    ctrl.finish();
}

#[test]
fn min_times_lifts_the_default_upper_bound() {
    let ctrl = Controller::new(PanicReporter);
    let store = MockStore::new(&ctrl);

    let call = store.expect("Len", args![]).min_times(2);

    store.len();
    assert!(!ctrl.satisfied());
    store.len();
    store.len();
    assert!(call.is_satisfied());
    assert!(!call.is_exhausted());

    ctrl.finish();
}

#[test]
fn max_times_drops_the_default_lower_bound() {
    let ctrl = Controller::new(PanicReporter);
    let store = MockStore::new(&ctrl);

    let call = store.expect("Len", args![]).max_times(2);
    assert!(call.is_satisfied());

    store.len();
    store.len();
    assert!(call.is_exhausted());

    ctrl.finish();
}

#[test]
#[should_panic(expected = "has already been called the max number of times")]
fn times_zero_forbids_the_call() {
    let ctrl = Controller::new(PanicReporter);
    let store = MockStore::new(&ctrl);

    store.expect("Len", args![]).times(0);
    store.len();
}

#[test]
fn first_matching_expectation_in_insertion_order_wins() {
    let ctrl = Controller::new(PanicReporter);
    let store = MockStore::new(&ctrl);

    store.expect("Get", args![any()]).returns(vals![1, true]);
    store.expect("Get", args![any()]).returns(vals![2, true]);

    assert_eq!((1, true), store.get("x"));
    assert_eq!((2, true), store.get("x"));

    ctrl.finish();
}

#[test]
fn expectations_are_keyed_by_receiver() {
    let ctrl = Controller::new(PanicReporter);
    let first = MockStore::new(&ctrl);
    let second = MockStore::new(&ctrl);

    first.expect("Len", args![]).returns(vals![1]);
    second.expect("Len", args![]).returns(vals![2]);

    assert_eq!(2, second.len());
    assert_eq!(1, first.len());

    ctrl.finish();
}

#[test]
fn run_sees_the_arguments() {
    let ctrl = Controller::new(PanicReporter);
    let store = MockStore::new(&ctrl);
    let total = Arc::new(AtomicUsize::new(0));

    store.expect("Put", args![any(), any()]).times(2).run({
        let total = total.clone();
        move |_: String, value: i64| {
            total.fetch_add(value as usize, Ordering::SeqCst);
        }
    });

    store.put("a", 3);
    store.put("b", 4);

    assert_eq!(7, total.load(Ordering::SeqCst));
    ctrl.finish();
}

#[test]
fn run_and_return_computes_results() {
    let ctrl = Controller::new(PanicReporter);
    let store = MockStore::new(&ctrl);

    store
        .expect("Get", args![any()])
        .any_times()
        .run_and_return(|key: String| (key.len() as i64, key.is_empty()));

    assert_eq!((3, false), store.get("abc"));
    assert_eq!((0, true), store.get(""));

    ctrl.finish();
}

#[test]
fn run_with_generic_parameters() {
    let ctrl = Controller::new(PanicReporter);
    let store = MockStore::new(&ctrl);

    store
        .expect("Get", args![any()])
        .run_and_return(|key: Value| (key.len().unwrap_or_default() as i64, true));

    assert_eq!((2, true), store.get("ab"));
    ctrl.finish();
}

#[test]
fn last_declared_results_win() {
    let ctrl = Controller::new(PanicReporter);
    let store = MockStore::new(&ctrl);

    store
        .expect("Get", args!["k"])
        .returns(vals![1, true])
        .run_and_return(|_: String| (2i64, false));

    assert_eq!((2, false), store.get("k"));
    ctrl.finish();
}

#[test]
fn returns_nil_for_nilable_results() {
    let ctrl = Controller::new(PanicReporter);
    let store = MockStore::new(&ctrl);

    store.expect("Link", args![nil()]).returns(vals![Value::Nil]);

    assert!(store.link(Value::Nil).is_nil());
    ctrl.finish();
}

#[test]
fn actions_may_call_back_into_the_controller() {
    let ctrl = Controller::new(PanicReporter);
    let store = Arc::new(MockStore::new(&ctrl));

    store.expect("Len", args![]).returns(vals![10]);
    store.expect("Get", args!["len"]).run_and_return({
        let store = store.clone();
        move |_: String| (store.len(), true)
    });

    assert_eq!((10, true), store.get("len"));
    ctrl.finish();
}

#[test]
fn overridable_expectations_replace_earlier_ones() {
    let ctrl = Controller::builder(PanicReporter)
        .overridable_expectations()
        .build();
    let store = MockStore::new(&ctrl);

    store.expect("Len", args![]).returns(vals![1]);
    store.expect("Len", args![]).returns(vals![2]);

    assert_eq!(2, store.len());
    ctrl.finish();
}

#[test]
fn expectation_renders_with_its_location() {
    let ctrl = Controller::new(PanicReporter);
    let store = MockStore::new(&ctrl);

    let call = store.expect("Put", args!["a", not(0)]).any_times();
    let rendered = call.to_string();

    assert!(rendered.starts_with(
        "Store.Put(is equal to \"a\" (String), not(is equal to 0 (i64))) at tests/it/basic.rs:"
    ));
    ctrl.finish();
}
