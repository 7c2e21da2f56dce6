//! Defines the capabilities a behaviour needs from the actors it animates.
//!
//! Actors belong to the application (or to a scene graph living outside this crate): behaviours
//! only keep [`WeakActor`] references on them and never extend their lifetime.

use std::fmt::Debug;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::gravity::Gravity;

/// Shared handle on an actor.
pub type ActorHandle = Arc<RwLock<dyn Actor>>;
/// Non-owning handle on an actor, as kept by behaviours.
pub type WeakActor = Weak<RwLock<dyn Actor>>;

/// Wraps an actor into a shareable [`ActorHandle`].
///
/// # Example
/// ```ignore
/// use clutter::actors::{self, ActorHandle};
/// use clutter::mocks::MockActor;
///
/// let actor: ActorHandle = actors::handle(MockActor::new(100.0, 50.0));
/// ```
pub fn handle<A: Actor + 'static>(actor: A) -> ActorHandle {
    Arc::new(RwLock::new(actor))
}

/// The surface of an actor a behaviour is allowed to touch.
pub trait Actor: Debug + Send + Sync {
    /// Returns the actor `(width, height)`.
    fn get_size(&self) -> (f64, f64);

    /// Sets the point (relative to the actor origin) transformations are applied around.
    fn set_anchor_point(&mut self, anchor_x: f64, anchor_y: f64);

    /// Sets the actor scale factor on both axis.
    fn set_scale(&mut self, scale_x: f64, scale_y: f64);

    /// Re-derives the anchor point from the given gravity and the actor own size.
    /// [`Gravity::None`] leaves the anchor point untouched.
    fn set_anchor_point_from_gravity(&mut self, gravity: Gravity) {
        let (width, height) = self.get_size();
        if let Some((anchor_x, anchor_y)) = gravity.anchor_point(width, height) {
            self.set_anchor_point(anchor_x, anchor_y);
        }
    }

    /// Sets the actor opacity. Actors without opacity support ignore it.
    fn set_opacity(&mut self, _opacity: u8) {}
}

/// Indicates if a weak reference points to the given actor.
pub(crate) fn is_same_actor(weak: &WeakActor, actor: &ActorHandle) -> bool {
    std::ptr::addr_eq(weak.as_ptr(), Arc::as_ptr(actor))
}

#[cfg(test)]
mod tests {
    use crate::mocks::MockActor;

    use super::*;

    #[test]
    fn test_anchor_point_from_gravity() {
        let mut actor = MockActor::new(200.0, 100.0);
        actor.set_anchor_point_from_gravity(Gravity::SouthEast);
        assert_eq!(actor.get_anchor_point(), (200.0, 100.0));

        actor.set_anchor_point_from_gravity(Gravity::None);
        assert_eq!(actor.get_anchor_point(), (200.0, 100.0));
        assert_eq!(actor.get_anchor_calls(), 1);
    }

    #[test]
    fn test_is_same_actor() {
        let first = handle(MockActor::new(1.0, 1.0));
        let second = handle(MockActor::new(1.0, 1.0));
        let weak = Arc::downgrade(&first);

        assert!(is_same_actor(&weak, &first));
        assert!(!is_same_actor(&weak, &second));
    }

    #[test]
    fn test_default_opacity_is_ignored() {
        #[derive(Debug)]
        struct Plain;
        impl Actor for Plain {
            fn get_size(&self) -> (f64, f64) {
                (0.0, 0.0)
            }
            fn set_anchor_point(&mut self, _: f64, _: f64) {}
            fn set_scale(&mut self, _: f64, _: f64) {}
        }

        let actor = handle(Plain);
        actor.write().set_opacity(12);
        assert_eq!(actor.read().get_size(), (0.0, 0.0));
    }
}
