use parking_lot::RwLock;
use std::sync::Arc;

/// Single-writer / many-reader publication cell.
///
/// Writers build a complete value and swap it in; readers clone the `Arc` and
/// keep a consistent view for as long as they hold it. The lock is only held
/// for the pointer swap or clone, never while a value is being computed.
pub struct SnapshotCell<T> {
    current: RwLock<Arc<T>>,
}

impl<T> SnapshotCell<T> {
    pub fn new(value: T) -> Self {
        Self {
            current: RwLock::new(Arc::new(value)),
        }
    }

    pub fn load(&self) -> Arc<T> {
        self.current.read().clone()
    }

    pub fn store(&self, value: T) {
        *self.current.write() = Arc::new(value);
    }

    /// Publishes `value` only if `accept(current, &value)` holds, checked under
    /// the write lock. Returns whether the value was published.
    pub fn publish_if<F>(&self, value: T, accept: F) -> bool
    where
        F: FnOnce(&T, &T) -> bool,
    {
        let mut current = self.current.write();
        if !accept(&current, &value) {
            return false;
        }
        *current = Arc::new(value);
        true
    }

    /// Derives a new value from the current one and publishes it atomically
    /// with respect to other writers.
    pub fn update<F>(&self, f: F) -> Arc<T>
    where
        F: FnOnce(&T) -> T,
    {
        let mut current = self.current.write();
        let next = Arc::new(f(&current));
        *current = next.clone();
        next
    }
}
