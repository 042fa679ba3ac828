use std::collections::{BTreeMap, HashMap};

use crate::call::Call;
use crate::mismatch::{MatchError, Mismatch};
use crate::signature::Receiver;
use crate::value::Value;

type Buckets = HashMap<Receiver, BTreeMap<String, Vec<Call>>>;

/// Expectations indexed by receiver and method, in insertion order.
///
/// Calls that can no longer match are kept in a separate index so that diagnostics can
/// still explain why they were not selected.
pub(crate) struct CallSet {
    expected: Buckets,
    exhausted: Buckets,
    overridable: bool,
}

impl CallSet {
    pub fn new(overridable: bool) -> Self {
        Self {
            expected: HashMap::new(),
            exhausted: HashMap::new(),
            overridable,
        }
    }

    /// Append a call to its bucket, or replace the bucket when expectations are overridable.
    pub fn add(&mut self, call: Call) {
        let bucket = self
            .expected
            .entry(call.receiver().clone())
            .or_default()
            .entry(call.method().to_string())
            .or_default();

        if self.overridable {
            bucket.clear();
        }
        bucket.push(call);
    }

    /// Move a call from the live index to the exhausted index.
    pub fn remove(&mut self, call: &Call) {
        let Some(bucket) = self
            .expected
            .get_mut(call.receiver())
            .and_then(|methods| methods.get_mut(call.method()))
        else {
            return;
        };

        let Some(position) = bucket.iter().position(|c| c.ptr_eq(call)) else {
            return;
        };

        let removed = bucket.remove(position);
        self.exhausted
            .entry(removed.receiver().clone())
            .or_default()
            .entry(removed.method().to_string())
            .or_default()
            .push(removed);
    }

    /// The first live call matching `args`, in insertion order.
    pub fn find_match(
        &self,
        receiver: &Receiver,
        method: &str,
        args: &[Value],
    ) -> Result<Call, MatchError> {
        let live = self.expected.get(receiver);
        let retired = self.exhausted.get(receiver);

        if live.is_none() && retired.is_none() {
            return Err(MatchError::NoReceiver);
        }

        let live = bucket(live, method);
        let retired = bucket(retired, method);

        if live.is_empty() && retired.is_empty() {
            return Err(MatchError::NoMethod {
                method: method.to_string(),
            });
        }

        let mut mismatches = vec![];

        for call in live {
            if call.is_exhausted() {
                mismatches.push(Mismatch::Exhausted { call: call.clone() });
                continue;
            }

            match call.matches(args) {
                Ok(()) => return Ok(call.clone()),
                Err(mismatch) => mismatches.push(mismatch),
            }
        }

        for call in retired {
            match call.matches(args) {
                Err(mismatch) => mismatches.push(mismatch),
                Ok(()) if call.is_exhausted() => {
                    mismatches.push(Mismatch::Exhausted { call: call.clone() })
                }
                Ok(()) => mismatches.push(Mismatch::Retired { call: call.clone() }),
            }
        }

        Err(MatchError::Mismatches(mismatches))
    }

    /// Every live call that has not reached its minimum number of calls.
    pub fn failures(&self) -> Vec<Call> {
        self.live_calls()
            .filter(|call| !call.is_satisfied())
            .cloned()
            .collect()
    }

    pub fn satisfied(&self) -> bool {
        self.live_calls().all(Call::is_satisfied)
    }

    fn live_calls(&self) -> impl Iterator<Item = &Call> {
        self.expected
            .values()
            .flat_map(BTreeMap::values)
            .flatten()
    }
}

fn bucket<'s>(methods: Option<&'s BTreeMap<String, Vec<Call>>>, method: &str) -> &'s [Call] {
    methods
        .and_then(|methods| methods.get(method))
        .map(Vec::as_slice)
        .unwrap_or_default()
}
