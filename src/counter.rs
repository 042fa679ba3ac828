use std::fmt::Display;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Upper bound meaning "no upper bound".
pub(crate) const UNBOUNDED: usize = usize::MAX;

/// Cardinality bookkeeping of one expectation.
///
/// Bounds are adjusted through shared handles while building, so every field is atomic.
pub(crate) struct CallCounter {
    num_calls: AtomicUsize,
    min: AtomicUsize,
    max: AtomicUsize,
}

impl CallCounter {
    pub fn new() -> Self {
        Self {
            num_calls: AtomicUsize::new(0),
            min: AtomicUsize::new(1),
            max: AtomicUsize::new(1),
        }
    }

    pub fn set_bounds(&self, min: usize, max: usize) {
        self.min.store(min, Ordering::SeqCst);
        self.max.store(max, Ordering::SeqCst);
    }

    pub fn set_min(&self, min: usize) {
        self.min.store(min, Ordering::SeqCst);
    }

    pub fn set_max(&self, max: usize) {
        self.max.store(max, Ordering::SeqCst);
    }

    pub fn min(&self) -> usize {
        self.min.load(Ordering::SeqCst)
    }

    pub fn max(&self) -> usize {
        self.max.load(Ordering::SeqCst)
    }

    pub fn num_calls(&self) -> usize {
        self.num_calls.load(Ordering::SeqCst)
    }

    pub fn tick(&self) -> usize {
        self.num_calls.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_satisfied(&self) -> bool {
        self.num_calls() >= self.min()
    }

    pub fn is_exhausted(&self) -> bool {
        self.num_calls() >= self.max()
    }
}

pub(crate) struct NCalls(pub usize);

impl Display for NCalls {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            0 => write!(f, "no calls"),
            1 => write!(f, "1 call"),
            UNBOUNDED => write!(f, "unlimited calls"),
            _ => write!(f, "{} calls", self.0),
        }
    }
}
