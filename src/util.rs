use std::sync::{Mutex, PoisonError};

/// A mutex that is only ever accessed through a closure.
///
/// A panic raised by a fatal report must not leave the engine unusable for
/// the remaining teardown, so lock poisoning is ignored.
pub(crate) struct Guarded<T> {
    inner: Mutex<T>,
}

impl<T> Guarded<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(value),
        }
    }

    pub fn locked<U>(&self, func: impl FnOnce(&mut T) -> U) -> U {
        let mut lock = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        func(&mut lock)
    }
}

impl<T: Default> Default for Guarded<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
