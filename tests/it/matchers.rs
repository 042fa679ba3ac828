use std::sync::Arc;

use mockctrl::*;

use crate::reporter::{expect_fatal, Recorder};
use crate::subject::{logger_interface, MockStore};

struct Even;

impl Matcher for Even {
    fn matches(&self, x: &Value) -> bool {
        x.cast::<i64>().is_some_and(|x| x % 2 == 0)
    }

    fn describe(&self) -> String {
        "is even".to_string()
    }
}

#[test]
fn user_defined_matcher() {
    let ctrl = Controller::new(Recorder::default());
    let store = MockStore::new(&ctrl);

    store.expect("Put", args![any(), matcher(Even)]).any_times();

    store.put("a", 2);
    store.put("b", 4);
    let message = expect_fatal(|| store.put("c", 3));
    assert!(message.contains("Want: is even"));
}

#[test]
fn closure_matcher() {
    let ctrl = Controller::new(PanicReporter);
    let store = MockStore::new(&ctrl);

    let short = cond("is short", |x: &Value| x.len().is_some_and(|len| len < 3));
    store.expect("Get", args![short]).returns(vals![1, true]);

    assert_eq!((1, true), store.get("ab"));
    ctrl.finish();
}

#[test]
fn sequence_matchers() {
    let ctrl = Controller::new(PanicReporter);
    let store = MockStore::new(&ctrl);

    store.expect("Read", args![in_any_order(vec![1, 2, 3])]).returns(vals![1]);
    store.expect("Read", args![contains([9])]).returns(vals![2]);
    store.expect("Read", args![len(0)]).returns(vals![3]);

    assert_eq!(1, store.read(&List::new(Type::Int, vals![3, 1, 2])));
    assert_eq!(2, store.read(&List::new(Type::Int, vals![8, 9])));
    assert_eq!(3, store.read(&List::new(Type::Int, [])));

    ctrl.finish();
}

#[test]
fn in_any_order_rejects_longer_sequences() {
    let ctrl = Controller::new(Recorder::default());
    let store = MockStore::new(&ctrl);

    store.expect("Read", args![in_any_order(vec![1, 2, 3])]);

    let message = expect_fatal(|| {
        store.read(&List::new(Type::Int, vals![1, 2, 3, 4]));
    });
    assert!(message.contains("Want: has the same elements as [1, 2, 3]"));
}

#[test]
fn nil_matches_typed_nil() {
    let ctrl = Controller::new(PanicReporter);
    let store = MockStore::new(&ctrl);

    store.expect("Link", args![nil()]).times(2);

    store.link(Value::Nil);
    store.link(Value::Null(Type::ptr(Type::Int)));
    ctrl.finish();
}

#[test]
fn negation_and_conjunction() {
    let ctrl = Controller::new(Recorder::default());
    let store = MockStore::new(&ctrl);

    store
        .expect("Link", args![all([not(nil()).into_matcher(), assignable_to_type_of(0).into_matcher()])])
        .any_times();

    store.link(Value::from(5));
    let message = expect_fatal(|| {
        store.link(Value::Nil);
    });
    assert!(message.contains("Want: not(is nil); is assignable to i64"));
}

#[test]
fn type_name_matcher() {
    let ctrl = Controller::new(PanicReporter);
    let store = MockStore::new(&ctrl);

    store.expect("Link", args![is_of_type("Vec<String>")]).returns(vals![true]);

    assert_eq!(Value::from(true), store.link(Value::from(vec!["a".to_string()])));
    ctrl.finish();
}

#[test]
fn implements_consults_the_registry() {
    let ctrl = Controller::new(Recorder::default());
    let store = MockStore::new(&ctrl);

    let mut registry = TypeRegistry::new();
    registry.register(Arc::new(
        Interface::new("Sized").method("Len", MethodSig::new([], [Type::Int])),
    ));

    store
        .expect("Link", args![implements(&registry, "Sized")])
        .any_times();
    store
        .expect("Link", args![implements(&registry, "Unknown")])
        .any_times();

    let other = MockStore::new(&ctrl);
    store.link(Value::from(other.receiver().clone()));

    let logger = Receiver::new(logger_interface());
    let message = expect_fatal(|| {
        store.link(Value::from(logger));
    });
    assert!(message.contains("Want: implements interface Sized"));
    assert!(message.contains("Want: implements interface Unknown"));
}
