use std::sync::Arc;
use std::thread;

use mockctrl::*;

use crate::subject::MockStore;

#[test]
fn two_threads_match_distinct_expectations() {
    let ctrl = Controller::new(PanicReporter);
    let store = Arc::new(MockStore::new(&ctrl));

    store.expect("Get", args!["left"]).returns(vals![1, true]);
    store.expect("Get", args!["right"]).returns(vals![2, true]);

    let handles: Vec<_> = [("left", 1), ("right", 2)]
        .into_iter()
        .map(|(key, expected)| {
            let store = store.clone();
            thread::spawn(move || assert_eq!((expected, true), store.get(key)))
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert!(ctrl.satisfied());
    ctrl.finish();
}

#[test]
fn many_threads_share_one_expectation() {
    let ctrl = Controller::new(PanicReporter);
    let store = Arc::new(MockStore::new(&ctrl));

    let call = store.expect("Put", args![any(), any()]).times(64);

    thread::scope(|scope| {
        for index in 0..8 {
            let store = store.clone();
            scope.spawn(move || {
                for value in 0..8 {
                    store.put(&format!("{index}"), value);
                }
            });
        }
    });

    assert_eq!(64, call.num_calls());
    assert!(call.is_exhausted());
    ctrl.finish();
}

#[test]
fn actions_may_block_on_other_threads() {
    let ctrl = Controller::new(PanicReporter);
    let store = Arc::new(MockStore::new(&ctrl));

    store.expect("Len", args![]).returns(vals![4]);
    store.expect("Get", args!["spawned"]).run_and_return({
        let store = store.clone();
        move |_: String| {
            // the spawned thread calls into the controller while this action runs
            let store = store.clone();
            let len = thread::spawn(move || store.len()).join().unwrap();
            (len, true)
        }
    });

    assert_eq!((4, true), store.get("spawned"));
    ctrl.finish();
}
