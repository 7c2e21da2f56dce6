//! Defines the Clutter (asynchronous) event manager system.

use std::any::Any;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use parking_lot::RwLock;

use crate::errors::Error;
use crate::utils::task;

type CallbackMap = RwLock<HashMap<String, Vec<CallbackWrapper>>>;
pub type EventHandler = usize;

/// Manages named events: each callback runs as its own task on the Clutter runtime.
#[derive(Clone, Default)]
pub struct EventManager {
    callbacks: Arc<CallbackMap>,
    next_id: Arc<AtomicUsize>,
}

struct CallbackWrapper {
    id: EventHandler,
    callback: Box<
        dyn FnMut(Arc<dyn Any + Send + Sync>) -> BoxFuture<'static, Result<(), Error>>
            + Send
            + Sync,
    >,
}

impl EventManager {
    /// Register event handler for a specific event name.
    ///
    /// # Parameters
    /// * `event` - The event name (any type that matches an Into<String>)
    /// * `callback` - An async moved callback that accepts a single parameter as an argument.
    ///   The argument can be anything that might be both `Send + Sync`.
    ///   You can trick multiple parameters by turning them in a single tuple.
    ///
    /// # Return
    /// Returns an EventHandler that can be used by the `unregister()` method.
    ///
    /// # Errors
    /// If the event handler does not match the expected emitted event exactly it will fail silently.
    /// That means if the tuple gave in the callback parameter does not exactly match the emit one
    /// no handler will be called.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let events: EventManager = Default::default();
    ///
    /// events.on("new-frame", |(timeline, frame): (Timeline, u32)| async move {
    ///     println!("Frame {} of {}", frame, timeline.get_n_frames());
    ///     Ok(())
    /// });
    ///
    /// events.emit("new-frame", (timeline.clone(), 12u32));
    /// ```
    pub fn on<S, F, T, Fut>(&self, event: S, mut callback: F) -> EventHandler
    where
        S: Into<String>,
        T: 'static + Send + Sync + Clone,
        F: FnMut(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), Error>> + Send + 'static,
    {
        let event_name = event.into();
        let callback_event = event_name.clone();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        // Boxes the callback and downcast its parameter.
        let boxed_callback = Box::new(move |arg: Arc<dyn Any + Send + Sync>| {
            match arg.downcast::<T>() {
                Ok(arg) => (callback)((*arg).clone()).boxed(),
                Err(_) => {
                    log::warn!(
                        "The callback for event '{}' could not be called because parameter does not match",
                        callback_event
                    );
                    async { Ok(()) }.boxed()
                }
            }
        });

        self.callbacks
            .write()
            .entry(event_name)
            .or_default()
            .push(CallbackWrapper {
                id,
                callback: boxed_callback,
            });

        id
    }

    /// Invoke all event handlers registered for a specific event name.
    /// Only the callback registered by the `on()` method and whose payload matches the declared
    /// callback type will be called. All others will be silently skipped.
    ///
    /// Each matching callback runs in its own task: nothing is spawned (and the runtime is not
    /// required) when no handler is registered for the event.
    pub fn emit<S, T>(&self, event: S, payload: T)
    where
        S: Into<String>,
        T: 'static + Send + Sync,
    {
        let event = event.into();
        let mut callbacks = self.callbacks.write();
        let Some(wrappers) = callbacks.get_mut(&event) else {
            return;
        };

        let payload: Arc<dyn Any + Send + Sync> = Arc::new(payload);
        for wrapper in wrappers.iter_mut() {
            let future = (wrapper.callback)(payload.clone());
            if let Err(err) = task::run(future) {
                log::error!("Event '{}' callback could not be run: {}", event, err);
            }
        }
    }

    /// Unregister a given handler if found.
    pub fn unregister(&self, handler: EventHandler) {
        self.callbacks
            .write()
            .values_mut()
            .for_each(|v| v.retain(|cb| cb.id != handler));
    }

    /// Indicates if at least one handler listens to the given event.
    pub fn has_handlers<S: Into<String>>(&self, event: S) -> bool {
        self.callbacks
            .read()
            .get(&event.into())
            .is_some_and(|wrappers| !wrappers.is_empty())
    }
}

impl Debug for EventManager {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let count: usize = self.callbacks.read().values().map(Vec::len).sum();
        write!(f, "EventManager {{ callbacks: {} }}", count)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicU8};

    use serial_test::serial;

    use crate::pause;

    use super::*;

    #[clutter_macros::test]
    #[serial]
    async fn test_register_and_emit_event() {
        let events: EventManager = Default::default();
        let payload = Arc::new(AtomicBool::new(false));

        events.on("register", |flag: Arc<AtomicBool>| async move {
            flag.store(true, Ordering::SeqCst);
            Ok(())
        });
        assert!(events.has_handlers("register"));

        events.emit("register", payload.clone());

        pause!(100);
        assert!(
            payload.load(Ordering::SeqCst),
            "The flag have been set by the triggered event."
        );
    }

    #[clutter_macros::test]
    #[serial]
    async fn test_unregister_event_handler() {
        let events: EventManager = Default::default();
        let flag = Arc::new(AtomicBool::new(false));

        let handler = events.on("unregister", |flag: Arc<AtomicBool>| async move {
            flag.store(true, Ordering::SeqCst);
            Ok(())
        });

        events.unregister(handler);
        assert!(!events.has_handlers("unregister"));
        events.emit("unregister", flag.clone());

        pause!(100);
        assert!(
            !flag.load(Ordering::SeqCst),
            "The event was unregistered: the flag have not been set."
        );
    }

    #[clutter_macros::test]
    #[serial]
    async fn test_multiple_handlers() {
        let events: EventManager = Default::default();
        let flag = Arc::new(AtomicUsize::new(0));

        events.on("multiple", |flag: Arc<AtomicUsize>| async move {
            flag.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        events.on("multiple", |flag: Arc<AtomicUsize>| async move {
            flag.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        events.on(
            "multiple",
            |(_not_matching, flag): (u8, Arc<AtomicUsize>)| async move {
                flag.fetch_add(1, Ordering::SeqCst);
                Ok(())
            },
        );

        events.emit("multiple", flag.clone());

        pause!(100);
        assert_eq!(
            flag.load(Ordering::SeqCst),
            2,
            "The flag have been increased by 2."
        );
    }

    #[clutter_macros::test]
    #[serial]
    async fn test_event_with_complex_payload() {
        let events: EventManager = Default::default();
        let flag = Arc::new(AtomicU8::new(0));

        events.on(
            "payload",
            |(number1, number2, container): (u8, u8, Arc<AtomicU8>)| async move {
                container.store(number1 + number2, Ordering::SeqCst);
                Ok(())
            },
        );
        events.emit("payload", (42u8, 69u8, flag.clone()));

        pause!(100);
        assert_eq!(
            flag.load(Ordering::SeqCst),
            111,
            "The complex flag has been properly received."
        );
    }

    #[test]
    fn test_no_handlers_for_event() {
        // Runs outside of any runtime: nothing is spawned without handlers.
        let events: EventManager = Default::default();
        events.emit("no_event", ());
        assert!(!events.has_handlers("no_event"));
        assert_eq!(format!("{:?}", events), "EventManager { callbacks: 0 }");
    }
}
