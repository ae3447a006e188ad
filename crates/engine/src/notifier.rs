//! Property change notification.
//!
//! Observers subscribe to a [`ChangeNotifier`] and are called with the tag of
//! the property that changed. Dispatch is synchronous, on the thread that
//! made the change, in subscription order.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tracing::warn;

/// Callback invoked with the tag of the changed property.
pub type Observer<P> = Arc<dyn Fn(P) + Send + Sync + 'static>;

/// Handle returned by [`ChangeNotifier::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Registry of observers for one object's observable properties.
pub struct ChangeNotifier<P> {
    observers: Mutex<Vec<(SubscriptionId, Observer<P>)>>,
    next_id: AtomicU64,
}

impl<P> Default for ChangeNotifier<P> {
    fn default() -> Self {
        Self {
            observers: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }
}

impl<P> std::fmt::Debug for ChangeNotifier<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        f.debug_struct("ChangeNotifier")
            .field("observers", &count)
            .finish()
    }
}

impl<P: Copy + std::fmt::Debug> ChangeNotifier<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an observer. Returns the id needed to unsubscribe.
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(P) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock().push((id, Arc::new(observer)));
        id
    }

    /// Removes an observer. Returns `true` if it was subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.lock();
        let len_before = observers.len();
        observers.retain(|(sid, _)| *sid != id);
        observers.len() != len_before
    }

    pub fn observer_count(&self) -> usize {
        self.lock().len()
    }

    /// Calls every subscribed observer with `property`.
    ///
    /// The observer list is not locked while callbacks run, so observers may
    /// subscribe or unsubscribe from inside a callback. An observer removed
    /// mid-dispatch is skipped. A panicking observer is logged and the
    /// remaining observers still run.
    pub fn notify(&self, property: P) {
        let snapshot: Vec<(SubscriptionId, Observer<P>)> = self.lock().clone();

        for (id, observer) in snapshot {
            if !self.is_subscribed(id) {
                continue;
            }
            if catch_unwind(AssertUnwindSafe(|| observer(property))).is_err() {
                warn!(subscription = id.0, ?property, "change observer panicked");
            }
        }
    }

    /// Stores `value` in `slot`, then notifies observers of `property`.
    ///
    /// The slot's write lock is released before observers run. Returns the
    /// previous value.
    pub fn set_and_notify<T>(&self, slot: &RwLock<T>, value: T, property: P) -> T {
        let previous = {
            let mut guard = slot.write().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *guard, value)
        };
        self.notify(property);
        previous
    }

    fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.lock().iter().any(|(sid, _)| *sid == id)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(SubscriptionId, Observer<P>)>> {
        self.observers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Prop {
        Title,
        Count,
    }

    fn recorder() -> (Arc<Mutex<Vec<Prop>>>, impl Fn(Prop) + Send + Sync + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |p| sink.lock().unwrap().push(p))
    }

    #[test]
    fn notify_reaches_every_observer() {
        let notifier = ChangeNotifier::new();
        let (a, obs_a) = recorder();
        let (b, obs_b) = recorder();
        notifier.subscribe(obs_a);
        notifier.subscribe(obs_b);

        notifier.notify(Prop::Title);

        assert_eq!(*a.lock().unwrap(), vec![Prop::Title]);
        assert_eq!(*b.lock().unwrap(), vec![Prop::Title]);
    }

    #[test]
    fn observers_run_in_subscription_order() {
        let notifier = ChangeNotifier::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for n in 0..4 {
            let order = order.clone();
            notifier.subscribe(move |_: Prop| order.lock().unwrap().push(n));
        }

        notifier.notify(Prop::Count);

        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn unsubscribed_observer_is_not_notified() {
        let notifier = ChangeNotifier::new();
        let (seen, obs) = recorder();
        let id = notifier.subscribe(obs);

        notifier.notify(Prop::Title);
        assert!(notifier.unsubscribe(id));
        notifier.notify(Prop::Count);

        assert_eq!(*seen.lock().unwrap(), vec![Prop::Title]);
        assert_eq!(notifier.observer_count(), 0);
    }

    #[test]
    fn unsubscribe_unknown_id_returns_false() {
        let notifier: ChangeNotifier<Prop> = ChangeNotifier::new();
        let id = notifier.subscribe(|_| {});
        assert!(notifier.unsubscribe(id));
        assert!(!notifier.unsubscribe(id));
    }

    #[test]
    fn subscription_ids_are_unique() {
        let notifier: ChangeNotifier<Prop> = ChangeNotifier::new();
        let a = notifier.subscribe(|_| {});
        let b = notifier.subscribe(|_| {});
        assert_ne!(a, b);
    }

    #[test]
    fn observer_removed_during_dispatch_is_skipped() {
        let notifier = Arc::new(ChangeNotifier::new());
        let (seen, obs) = recorder();
        let victim = Arc::new(Mutex::new(None::<SubscriptionId>));

        let n = notifier.clone();
        let v = victim.clone();
        notifier.subscribe(move |_: Prop| {
            if let Some(id) = *v.lock().unwrap() {
                n.unsubscribe(id);
            }
        });
        *victim.lock().unwrap() = Some(notifier.subscribe(obs));

        notifier.notify(Prop::Title);

        assert!(seen.lock().unwrap().is_empty());
        assert_eq!(notifier.observer_count(), 1);
    }

    #[test]
    fn panicking_observer_does_not_block_others() {
        let notifier = ChangeNotifier::new();
        let (before, obs_before) = recorder();
        let (after, obs_after) = recorder();
        notifier.subscribe(obs_before);
        notifier.subscribe(|_: Prop| panic!("observer failure"));
        notifier.subscribe(obs_after);

        notifier.notify(Prop::Title);
        notifier.notify(Prop::Count);

        assert_eq!(*before.lock().unwrap(), vec![Prop::Title, Prop::Count]);
        assert_eq!(*after.lock().unwrap(), vec![Prop::Title, Prop::Count]);
        assert_eq!(notifier.observer_count(), 3);
    }

    #[test]
    fn set_and_notify_assigns_then_notifies() {
        let notifier = Arc::new(ChangeNotifier::new());
        let slot = Arc::new(RwLock::new(1u32));
        let observed = Arc::new(Mutex::new(Vec::new()));

        let s = slot.clone();
        let o = observed.clone();
        notifier.subscribe(move |p: Prop| {
            // Reading the slot here would deadlock if the write lock were held.
            o.lock().unwrap().push((p, *s.read().unwrap()));
        });

        let previous = notifier.set_and_notify(&slot, 2, Prop::Count);

        assert_eq!(previous, 1);
        assert_eq!(*slot.read().unwrap(), 2);
        assert_eq!(*observed.lock().unwrap(), vec![(Prop::Count, 2)]);
    }

    #[test]
    fn notify_without_observers_is_a_no_op() {
        let notifier: ChangeNotifier<Prop> = ChangeNotifier::new();
        notifier.notify(Prop::Title);
        assert_eq!(notifier.observer_count(), 0);
    }
}
