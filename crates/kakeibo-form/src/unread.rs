//! # Unread Notification Store
//!
//! The replenishment-notification badge count, as an explicit store the
//! workflow layer owns and injects — not a module-global counter with
//! event plumbing scattered across components. Interested views
//! subscribe; every change notifies them with the new count.

use std::sync::{Arc, Mutex};

type Listener = Arc<dyn Fn(usize) + Send + Sync>;

/// Handle for removing a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

#[derive(Default)]
struct Inner {
    count: usize,
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Observable unread-notification counter.
#[derive(Default)]
pub struct UnreadStore {
    inner: Mutex<Inner>,
}

impl UnreadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current count.
    pub fn count(&self) -> usize {
        self.inner.lock().expect("unread mutex poisoned").count
    }

    /// Registers a listener, called with the new count on every change.
    pub fn subscribe(&self, listener: impl Fn(usize) + Send + Sync + 'static) -> SubscriptionId {
        let mut inner = self.inner.lock().expect("unread mutex poisoned");
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Arc::new(listener)));
        SubscriptionId(id)
    }

    /// Removes a listener. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        let mut inner = self.inner.lock().expect("unread mutex poisoned");
        inner.listeners.retain(|(listener_id, _)| *listener_id != id.0);
    }

    /// Replaces the count and notifies.
    pub fn set(&self, count: usize) {
        self.update(|_| count);
    }

    /// Bumps the count by one and notifies.
    pub fn increment(&self) {
        self.update(|count| count + 1);
    }

    /// Marks everything read and notifies.
    pub fn mark_all_read(&self) {
        self.set(0);
    }

    fn update(&self, f: impl FnOnce(usize) -> usize) {
        // Snapshot listeners, then notify outside the lock: a listener
        // reading back count() must not deadlock.
        let (count, listeners) = {
            let mut inner = self.inner.lock().expect("unread mutex poisoned");
            inner.count = f(inner.count);
            (
                inner.count,
                inner
                    .listeners
                    .iter()
                    .map(|(_, l)| Arc::clone(l))
                    .collect::<Vec<_>>(),
            )
        };

        for listener in listeners {
            listener(count);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn test_set_and_increment() {
        let store = UnreadStore::new();
        assert_eq!(store.count(), 0);

        store.set(3);
        assert_eq!(store.count(), 3);

        store.increment();
        assert_eq!(store.count(), 4);

        store.mark_all_read();
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_subscribers_see_every_change() {
        let store = UnreadStore::new();
        let seen = Arc::new(AtomicUsize::new(usize::MAX));

        let seen_clone = Arc::clone(&seen);
        store.subscribe(move |count| seen_clone.store(count, Ordering::SeqCst));

        store.set(2);
        assert_eq!(seen.load(Ordering::SeqCst), 2);

        store.increment();
        assert_eq!(seen.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let store = UnreadStore::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let calls_clone = Arc::clone(&calls);
        let id = store.subscribe(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        store.increment();
        store.unsubscribe(id);
        store.increment();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_listener_may_read_count_back() {
        let store = Arc::new(UnreadStore::new());
        let observed = Arc::new(AtomicUsize::new(0));

        let store_clone = Arc::clone(&store);
        let observed_clone = Arc::clone(&observed);
        store.subscribe(move |_| {
            observed_clone.store(store_clone.count(), Ordering::SeqCst);
        });

        store.set(7);
        assert_eq!(observed.load(Ordering::SeqCst), 7);
    }
}
