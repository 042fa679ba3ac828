use mockctrl::*;

use crate::reporter::{expect_fatal, Recorder};
use crate::subject::MockStore;

#[test]
fn last_matcher_applies_to_each_trailing_argument() {
    let ctrl = Controller::new(PanicReporter);
    let store = MockStore::new(&ctrl);

    store
        .expect("Sum", args!["total", cond("is positive", |x: &Value| {
            x.cast::<i64>().is_some_and(|x| x > 0)
        })])
        .times(3);

    store.sum("total", &[1, 2, 3]);
    store.sum("total", &[4]);
    store.sum("total", &[]);

    ctrl.finish();
}

#[test]
fn per_argument_mismatch_names_the_actual_index() {
    let ctrl = Controller::new(Recorder::default());
    let store = MockStore::new(&ctrl);

    store.expect("Sum", args!["total", 1]);

    let message = expect_fatal(|| {
        store.sum("total", &[1, 1, 2]);
    });
    assert!(message.contains("doesn't match the argument at index 3.\nGot: 2 (i64)"));
}

#[test]
fn one_matcher_per_argument_is_positional() {
    let ctrl = Controller::new(PanicReporter);
    let store = MockStore::new(&ctrl);

    store.expect("Sum", args!["pair", 1, 2]).returns(vals![3]);

    assert_eq!(3, store.sum("pair", &[1, 2]));
    ctrl.finish();
}

#[test]
fn tail_matches_the_whole_variadic_part() {
    let ctrl = Controller::new(PanicReporter);
    let store = MockStore::new(&ctrl);

    store
        .expect("Sum", args!["a", tail(len(3))])
        .returns(vals![1]);
    store
        .expect("Sum", args!["b", tail(vec![5, 6])])
        .returns(vals![2]);

    assert_eq!(1, store.sum("a", &[0, 0, 0]));
    assert_eq!(2, store.sum("b", &[5, 6]));
    ctrl.finish();
}

#[test]
fn tail_captor_sees_one_list() {
    let ctrl = Controller::new(PanicReporter);
    let store = MockStore::new(&ctrl);
    let rest = any_captor();

    store.expect("Sum", args![any(), tail(rest.clone())]);

    store.sum("x", &[7, 8]);

    assert_eq!(Some(Value::from(vec![7, 8])), rest.value());
    assert_eq!(1, rest.all_values().len());
    ctrl.finish();
}

#[test]
fn wrong_argument_count() {
    let ctrl = Controller::new(Recorder::default());
    let store = MockStore::new(&ctrl);

    store.expect("Sum", args!["x", 1, 2]);

    let message = expect_fatal(|| {
        store.sum("x", &[1]);
    });
    assert!(message.contains("has the wrong number of arguments. Got: 2, want: 3"));
}

#[test]
fn actions_receive_the_tail_as_a_list() {
    let ctrl = Controller::new(PanicReporter);
    let store = MockStore::new(&ctrl);

    store
        .expect("Sum", args![any(), any()])
        .any_times()
        .run_and_return(|_: String, values: Vec<i64>| (values.iter().sum::<i64>(),));

    assert_eq!(6, store.sum("x", &[1, 2, 3]));
    assert_eq!(0, store.sum("x", &[]));
    ctrl.finish();
}

#[test]
#[should_panic(expected = "expected function to have arg of type Vec<i64> at position 1 not type i64")]
fn actions_cannot_take_the_tail_as_a_single_value() {
    let ctrl = Controller::new(PanicReporter);
    let store = MockStore::new(&ctrl);

    store
        .expect("Sum", args![any(), any()])
        .run_and_return(|_: String, value: i64| (value,));
}
