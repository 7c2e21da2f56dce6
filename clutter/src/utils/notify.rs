//! Defines the property change notification system.
//!
//! Unlike the [`EventManager`](crate::utils::EventManager), notifications are delivered
//! synchronously, on the thread performing the mutation, once the mutation is fully committed.

use std::fmt::{Debug, Formatter};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::utils::Value;

pub type NotifyHandler = usize;
type NotifyCallback = Arc<dyn Fn(&PropertyChange) + Send + Sync>;

/// A single property change: the property name and its new value.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyChange {
    pub name: &'static str,
    pub value: Value,
}

impl PropertyChange {
    pub fn new<V: Into<Value>>(name: &'static str, value: V) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

struct NotifyWrapper {
    id: NotifyHandler,
    /// The watched property, or `None` to watch them all.
    property: Option<String>,
    callback: NotifyCallback,
}

/// Registry of property change observers.
///
/// Cloning a `Notifier` gives another handle on the same set of observers.
#[derive(Clone, Default)]
pub struct Notifier {
    callbacks: Arc<RwLock<Vec<NotifyWrapper>>>,
    next_id: Arc<AtomicUsize>,
}

impl Notifier {
    /// Registers a callback invoked each time the given property changes.
    ///
    /// # Example
    /// ```
    /// use clutter::utils::{Notifier, PropertyChange};
    ///
    /// let notifier = Notifier::default();
    /// notifier.on("opacity-start", |change: &PropertyChange| {
    ///     println!("{} is now {}", change.name, change.value);
    /// });
    /// notifier.notify(PropertyChange::new("opacity-start", 12u8));
    /// ```
    pub fn on<S, F>(&self, property: S, callback: F) -> NotifyHandler
    where
        S: Into<String>,
        F: Fn(&PropertyChange) + Send + Sync + 'static,
    {
        self.register(Some(property.into()), Arc::new(callback))
    }

    /// Registers a callback invoked for every property change.
    pub fn on_any<F>(&self, callback: F) -> NotifyHandler
    where
        F: Fn(&PropertyChange) + Send + Sync + 'static,
    {
        self.register(None, Arc::new(callback))
    }

    fn register(&self, property: Option<String>, callback: NotifyCallback) -> NotifyHandler {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.callbacks.write().push(NotifyWrapper {
            id,
            property,
            callback,
        });
        id
    }

    /// Unregisters a given handler if found.
    pub fn unregister(&self, handler: NotifyHandler) {
        self.callbacks.write().retain(|cb| cb.id != handler);
    }

    /// Dispatches a change to the matching callbacks right away.
    ///
    /// The observer list is not locked while callbacks run: a callback may register, unregister
    /// or trigger new notifications.
    pub fn notify(&self, change: PropertyChange) {
        let callbacks: Vec<NotifyCallback> = self
            .callbacks
            .read()
            .iter()
            .filter(|wrapper| match &wrapper.property {
                None => true,
                Some(property) => property == change.name,
            })
            .map(|wrapper| wrapper.callback.clone())
            .collect();

        log::trace!("Notify '{}' = {}", change.name, change.value);
        for callback in callbacks {
            callback(&change);
        }
    }

    /// Opens a batch: changes pushed to it are held back and dispatched at once when the batch
    /// is dropped.
    pub fn batch(&self) -> NotifyBatch<'_> {
        NotifyBatch {
            notifier: self,
            pending: vec![],
        }
    }

    /// Returns the number of registered callbacks.
    pub fn len(&self) -> usize {
        self.callbacks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Debug for Notifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Notifier {{ callbacks: {} }}", self.len())
    }
}

/// Collects the changes of a multi-field mutation and flushes them to the [`Notifier`] when
/// dropped, so observers never see an intermediate state.
///
/// Several changes of the same property within one batch coalesce into a single notification
/// carrying the latest value.
pub struct NotifyBatch<'a> {
    notifier: &'a Notifier,
    pending: Vec<PropertyChange>,
}

impl NotifyBatch<'_> {
    /// Queues a change.
    pub fn push<V: Into<Value>>(&mut self, name: &'static str, value: V) {
        let value = value.into();
        match self.pending.iter_mut().find(|change| change.name == name) {
            Some(change) => change.value = value,
            None => self.pending.push(PropertyChange { name, value }),
        }
    }

    /// Number of changes waiting to be dispatched.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Drop for NotifyBatch<'_> {
    fn drop(&mut self) {
        for change in self.pending.drain(..) {
            self.notifier.notify(change);
        }
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;

    fn recorder(notifier: &Notifier) -> Arc<Mutex<Vec<PropertyChange>>> {
        let received = Arc::new(Mutex::new(vec![]));
        let received_clone = received.clone();
        notifier.on_any(move |change: &PropertyChange| {
            received_clone.lock().push(change.clone());
        });
        received
    }

    #[test]
    fn test_notify_property() {
        let notifier = Notifier::default();
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = counter.clone();
        notifier.on("x-scale-start", move |change: &PropertyChange| {
            assert_eq!(change.value, Value::Float(2.0));
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        notifier.notify(PropertyChange::new("x-scale-start", 2.0));
        notifier.notify(PropertyChange::new("y-scale-start", 3.0));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_notify_any() {
        let notifier = Notifier::default();
        let received = recorder(&notifier);

        notifier.notify(PropertyChange::new("x-scale-start", 2.0));
        notifier.notify(PropertyChange::new("scale-gravity", crate::Gravity::North));
        assert_eq!(received.lock().len(), 2);
        assert_eq!(received.lock()[1].name, "scale-gravity");
    }

    #[test]
    fn test_unregister() {
        let notifier = Notifier::default();
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = counter.clone();
        let handler = notifier.on_any(move |_: &PropertyChange| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(notifier.len(), 1);

        notifier.unregister(handler);
        assert!(notifier.is_empty());
        notifier.notify(PropertyChange::new("alpha", Value::Null));
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_batch_holds_back_until_dropped() {
        let notifier = Notifier::default();
        let received = recorder(&notifier);

        {
            let mut batch = notifier.batch();
            batch.push("x-scale-start", 1.0);
            batch.push("y-scale-start", 2.0);
            assert_eq!(batch.len(), 2);
            assert!(received.lock().is_empty(), "Nothing is dispatched yet.");
        }

        let received = received.lock();
        assert_eq!(received.len(), 2);
        assert_eq!(received[0], PropertyChange::new("x-scale-start", 1.0));
        assert_eq!(received[1], PropertyChange::new("y-scale-start", 2.0));
    }

    #[test]
    fn test_batch_coalesces_same_property() {
        let notifier = Notifier::default();
        let received = recorder(&notifier);

        {
            let mut batch = notifier.batch();
            batch.push("opacity-end", 10u8);
            batch.push("opacity-end", 20u8);
        }

        assert_eq!(
            *received.lock(),
            vec![PropertyChange::new("opacity-end", 20u8)]
        );
    }

    #[test]
    fn test_empty_batch() {
        let notifier = Notifier::default();
        let received = recorder(&notifier);
        let batch = notifier.batch();
        assert!(batch.is_empty());
        drop(batch);
        assert!(received.lock().is_empty());
    }

    #[test]
    fn test_reentrant_notification() {
        let notifier = Notifier::default();
        let received = recorder(&notifier);
        let notifier_clone = notifier.clone();
        notifier.on("first", move |_: &PropertyChange| {
            notifier_clone.notify(PropertyChange::new("second", true));
        });

        notifier.notify(PropertyChange::new("first", true));
        let names: Vec<&str> = received.lock().iter().map(|c| c.name).collect();
        assert_eq!(names, ["first", "second"]);
    }
}
