use mockctrl::{args, eq, in_any_order, Controller, Matcher, Value};
use proptest::prelude::*;

use crate::reporter::{expect_fatal, Recorder};
use crate::subject::MockStore;

proptest! {
    #[test]
    fn in_any_order_accepts_every_permutation(
        (items, shuffled) in prop::collection::vec(any::<i64>(), 0..16)
            .prop_flat_map(|items| (Just(items.clone()), Just(items).prop_shuffle()))
    ) {
        prop_assert!(in_any_order(items).matches(&Value::from(shuffled)));
    }

    #[test]
    fn in_any_order_rejects_extra_elements(
        items in prop::collection::vec(any::<i64>(), 0..16),
        extra in any::<i64>(),
    ) {
        let mut longer = items.clone();
        longer.push(extra);

        prop_assert!(!in_any_order(items.clone()).matches(&Value::from(longer.clone())));
        prop_assert!(!in_any_order(longer).matches(&Value::from(items)));
    }

    #[test]
    fn eq_agrees_with_rust_equality(a in any::<i64>(), b in any::<i64>()) {
        prop_assert_eq!(a == b, eq(a).matches(&Value::from(b)));
    }

    #[test]
    fn times_allows_exactly_n_calls(n in 0usize..12) {
        let ctrl = Controller::new(Recorder::default());
        let store = MockStore::new(&ctrl);
        let call = store.expect("Len", args![]).times(n);

        for made in 0..n {
            prop_assert!(!call.is_exhausted());
            prop_assert_eq!(made >= n, call.is_satisfied());
            store.len();
        }

        prop_assert!(call.is_satisfied());
        prop_assert!(call.is_exhausted());

        let message = expect_fatal(|| {
            store.len();
        });
        prop_assert!(message.contains("has already been called the max number of times"));
        prop_assert_eq!(n, call.num_calls());
    }
}
