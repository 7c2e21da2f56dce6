use std::any::Any;
use std::fmt::{Debug, Formatter};
use std::sync::{Arc, Weak};

use crate::behaviours::Behaviour;

type TickCallback = Arc<dyn Fn() -> bool + Send + Sync>;

/// Non-owning handle on a behaviour.
///
/// A timeline keeps its behaviours through this handle: it never extends their lifetime, so a
/// behaviour dropped by its owner stops being ticked and the behaviour/alpha/timeline graph holds
/// no reference cycle.
#[derive(Clone)]
pub struct WeakBehaviour {
    state: Weak<dyn Any + Send + Sync>,
    tick: TickCallback,
}

impl WeakBehaviour {
    /// Creates a handle on a behaviour whose state lives behind `state`: `wrap` rebuilds the
    /// behaviour from its upgraded state.
    pub fn new<T, B, F>(state: &Arc<T>, wrap: F) -> Self
    where
        T: Send + Sync + 'static,
        B: Behaviour,
        F: Fn(Arc<T>) -> B + Send + Sync + 'static,
    {
        let weak = Arc::downgrade(state);
        let any: Weak<dyn Any + Send + Sync> = weak.clone();
        Self {
            state: any,
            tick: Arc::new(move || match weak.upgrade() {
                Some(state) => {
                    wrap(state).tick();
                    true
                }
                None => false,
            }),
        }
    }

    /// Indicates if the behaviour is still owned somewhere.
    pub fn is_alive(&self) -> bool {
        self.state.strong_count() > 0
    }

    /// Ticks the behaviour if it is still alive. Returns `false` once it was dropped.
    pub(crate) fn tick(&self) -> bool {
        (self.tick)()
    }
}

impl Debug for WeakBehaviour {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "WeakBehaviour {{ alive: {} }}", self.is_alive())
    }
}
