//! Reactive state management

use std::sync::{Arc, PoisonError, RwLock};

type Listener = Box<dyn Fn() + Send + Sync>;

/// Reactive state container - notifies subscribers whenever it is written
pub struct State<T: Clone + Send + Sync + 'static> {
    value: Arc<RwLock<T>>,
    listeners: Arc<RwLock<Vec<Listener>>>,
}

impl<T: Clone + Send + Sync + 'static> State<T> {
    pub fn new(initial: T) -> Self {
        Self {
            value: Arc::new(RwLock::new(initial)),
            listeners: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Get the current value
    pub fn get(&self) -> T {
        self.value.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Read the current value without cloning it
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let value = self.value.read().unwrap_or_else(PoisonError::into_inner);
        f(&value)
    }

    /// Set a new value and notify listeners
    pub fn set(&self, new_value: T) {
        {
            let mut value = self.value.write().unwrap_or_else(PoisonError::into_inner);
            *value = new_value;
        }
        self.notify();
    }

    /// Update value with a function and notify listeners
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = {
            let mut value = self.value.write().unwrap_or_else(PoisonError::into_inner);
            f(&mut value)
        };
        self.notify();
        result
    }

    /// Subscribe to changes.
    ///
    /// Callbacks run synchronously on the writing thread and must not
    /// subscribe to the same state.
    pub fn subscribe<F: Fn() + Send + Sync + 'static>(&self, callback: F) {
        let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        listeners.push(Box::new(callback));
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn notify(&self) {
        let listeners = self.listeners.read().unwrap_or_else(PoisonError::into_inner);
        for listener in listeners.iter() {
            listener();
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            listeners: Arc::clone(&self.listeners),
        }
    }
}

impl<T: Clone + Default + Send + Sync + 'static> Default for State<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + std::fmt::Debug + Send + Sync + 'static> std::fmt::Debug for State<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.with(|value| f.debug_tuple("State").field(value).finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_set_and_get() {
        let state = State::new(1i64);
        state.set(7);
        assert_eq!(state.get(), 7);
    }

    #[test]
    fn test_clones_share_value() {
        let state = State::new(String::from("a"));
        let other = state.clone();
        other.update(|s| s.push('b'));
        assert_eq!(state.get(), "ab");
    }

    #[test]
    fn test_every_write_notifies() {
        let state = State::new(0i32);
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_listener = Arc::clone(&hits);
        state.subscribe(move || {
            hits_listener.fetch_add(1, Ordering::SeqCst);
        });

        state.set(1);
        let doubled = state.update(|v| {
            *v *= 2;
            *v
        });

        assert_eq!(doubled, 2);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert_eq!(state.listener_count(), 1);
    }

    #[test]
    fn test_listener_can_read_state() {
        let state = State::new(3u8);
        let seen = Arc::new(AtomicUsize::new(0));
        let (reader, seen_listener) = (state.clone(), Arc::clone(&seen));
        state.subscribe(move || {
            seen_listener.store(reader.get() as usize, Ordering::SeqCst);
        });

        state.set(9);
        assert_eq!(seen.load(Ordering::SeqCst), 9);
    }
}
