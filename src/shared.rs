//! Lock-guarded accumulator handle for callers on multiple threads.

use crate::accumulator::{Accumulator, Reduction};
use crate::error::Result;
use crate::number::Number;
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable handle to one accumulator behind a mutex.
///
/// Each method holds the lock for the whole operation, so read-then-write
/// steps such as `remove_last` are never interleaved. Sequence results are
/// returned as owned snapshots.
#[derive(Debug, Clone, Default)]
pub struct SharedAccumulator {
    inner: Arc<Mutex<Accumulator>>,
}

impl SharedAccumulator {
    /// Creates a handle to a fresh, unset accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value under the lock.
    pub fn push(&self, value: Number) {
        self.inner.lock().push(value);
    }

    /// See [`Accumulator::multiply`].
    pub fn multiply(&self) -> Result<Number> {
        self.reduce(Reduction::Multiply)
    }

    /// See [`Accumulator::add`].
    pub fn add(&self) -> Result<Number> {
        self.reduce(Reduction::Add)
    }

    /// See [`Accumulator::subtract`].
    pub fn subtract(&self) -> Result<Number> {
        self.reduce(Reduction::Subtract)
    }

    /// Folds `op` across the values while holding the lock.
    pub fn reduce(&self, op: Reduction) -> Result<Number> {
        self.inner.lock().reduce(op)
    }

    /// Drops the last value and returns a snapshot of what remains.
    pub fn remove_last(&self) -> Vec<Number> {
        self.inner.lock().remove_last().to_vec()
    }

    /// Resets to an explicit empty sequence and returns it.
    pub fn clear(&self) -> Vec<Number> {
        self.inner.lock().clear().to_vec()
    }

    /// Snapshot of the current sequence, `None` while unset.
    pub fn values(&self) -> Option<Vec<Number>> {
        self.inner.lock().values().map(<[Number]>::to_vec)
    }
}

impl From<Accumulator> for SharedAccumulator {
    fn from(acc: Accumulator) -> Self {
        SharedAccumulator {
            inner: Arc::new(Mutex::new(acc)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_concurrent_pushes_are_all_kept() {
        let shared = SharedAccumulator::new();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let handle = shared.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        handle.push(Number::ONE);
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(shared.add().unwrap(), Number::from(800));
        assert_eq!(shared.multiply().unwrap(), Number::ONE);
    }

    #[test]
    fn test_shared_state_machine() {
        let shared = SharedAccumulator::new();
        assert_eq!(shared.values(), None);

        shared.push(Number::from(3));
        shared.push(Number::from(1));
        assert_eq!(shared.subtract().unwrap(), Number::from(2));
        assert_eq!(shared.remove_last(), vec![Number::from(3)]);
        assert!(shared.clear().is_empty());
        assert_eq!(shared.values(), Some(vec![]));
        assert!(shared.add().is_err());
    }

    #[test]
    fn test_from_existing_accumulator() {
        let mut acc = Accumulator::new();
        acc.push(Number::from(5));
        let shared = SharedAccumulator::from(acc);
        assert_eq!(shared.values(), Some(vec![Number::from(5)]));
    }
}
