use std::sync::Arc;

use parking_lot::RwLock;

use crate::behaviours::{Behaviour, BehaviourCore, WeakBehaviour};
use crate::timeline::{Alpha, ALPHA_MAX};
use crate::utils::Range;

/// Animates the opacity of its actors, from a start opacity to an end opacity.
///
/// # Example
/// ```
/// use clutter::behaviours::OpacityBehaviour;
///
/// // Fades out.
/// let behaviour = OpacityBehaviour::new(None, 255, 0);
/// assert_eq!(behaviour.compute_opacity(0), 255);
/// assert_eq!(behaviour.compute_opacity(clutter::timeline::ALPHA_MAX), 0);
/// ```
#[derive(Clone, Debug)]
pub struct OpacityBehaviour {
    inner: Arc<OpacityState>,
}

#[derive(Debug)]
struct OpacityState {
    core: BehaviourCore,
    bounds: RwLock<Range<u8>>,
}

impl OpacityBehaviour {
    pub fn new(alpha: Option<Alpha>, opacity_start: u8, opacity_end: u8) -> Self {
        let behaviour = Self {
            inner: Arc::new(OpacityState {
                core: BehaviourCore::default(),
                bounds: RwLock::new(Range::new(opacity_start, opacity_end)),
            }),
        };
        if alpha.is_some() {
            behaviour.set_alpha(alpha);
        }
        behaviour
    }

    /// Returns `(opacity_start, opacity_end)`.
    pub fn get_bounds(&self) -> (u8, u8) {
        let bounds = *self.inner.bounds.read();
        (bounds.start, bounds.end)
    }

    /// Sets the bounds, notifying `opacity-start` and `opacity-end` once both are committed
    /// (if they changed).
    pub fn set_bounds(&self, opacity_start: u8, opacity_end: u8) {
        let mut batch = self.inner.core.notifier().batch();
        let mut bounds = self.inner.bounds.write();
        if bounds.start != opacity_start {
            bounds.start = opacity_start;
            batch.push("opacity-start", opacity_start);
        }
        if bounds.end != opacity_end {
            bounds.end = opacity_end;
            batch.push("opacity-end", opacity_end);
        }
        drop(bounds);
        drop(batch);
    }

    /// Computes the opacity for the given alpha value.
    pub fn compute_opacity(&self, alpha: u32) -> u8 {
        assert!(alpha <= ALPHA_MAX, "Alpha {} is out of range", alpha);
        let bounds = *self.inner.bounds.read();
        let (start, end) = (bounds.start as i64, bounds.end as i64);
        (start + alpha as i64 * (end - start) / ALPHA_MAX as i64) as u8
    }
}

impl Behaviour for OpacityBehaviour {
    fn core(&self) -> &BehaviourCore {
        &self.inner.core
    }

    fn downgrade(&self) -> WeakBehaviour {
        WeakBehaviour::new(&self.inner, |inner| OpacityBehaviour { inner })
    }

    fn alpha_notify(&self, alpha: u32) {
        let opacity = self.compute_opacity(alpha);
        self.inner
            .core
            .actors_foreach(|actor| actor.write().set_opacity(opacity));
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use crate::actors::ActorHandle;
    use crate::mocks::MockActor;
    use crate::timeline::{AlphaFunc, Timeline};
    use crate::utils::PropertyChange;

    use super::*;

    #[test]
    fn test_opacity_end_points_are_exact() {
        let behaviour = OpacityBehaviour::new(None, 30, 200);
        assert_eq!(behaviour.compute_opacity(0), 30);
        assert_eq!(behaviour.compute_opacity(ALPHA_MAX), 200);
        assert_eq!(behaviour.compute_opacity(ALPHA_MAX / 2), 114);

        let behaviour = OpacityBehaviour::new(None, 255, 0);
        assert_eq!(behaviour.compute_opacity(0), 255);
        assert_eq!(behaviour.compute_opacity(1), 255);
        assert_eq!(behaviour.compute_opacity(ALPHA_MAX), 0);
    }

    #[test]
    fn test_alpha_notify_sets_opacity() {
        let behaviour = OpacityBehaviour::new(None, 0, 255);
        let actor = Arc::new(RwLock::new(MockActor::new(10.0, 10.0)));
        let actor_handle: ActorHandle = actor.clone();
        behaviour.apply(&actor_handle);

        behaviour.alpha_notify(ALPHA_MAX);
        assert_eq!(actor.read().get_opacity(), 255);
        behaviour.alpha_notify(0);
        assert_eq!(actor.read().get_opacity(), 0);
        assert_eq!(actor.read().get_history(), ["opacity", "opacity"]);
    }

    #[test]
    fn test_set_bounds() {
        let behaviour = OpacityBehaviour::new(None, 0, 255);
        let received = Arc::new(Mutex::new(vec![]));
        let received_clone = received.clone();
        behaviour.on_any_notify(move |change: &PropertyChange| {
            received_clone.lock().push(change.clone());
        });

        behaviour.set_bounds(0, 255);
        assert!(received.lock().is_empty());

        behaviour.set_bounds(0, 128);
        assert_eq!(behaviour.get_bounds(), (0, 128));
        assert_eq!(
            *received.lock(),
            vec![PropertyChange::new("opacity-end", 128u8)]
        );
    }

    #[test]
    fn test_timeline_drives_opacity() {
        let timeline = Timeline::new(1000).set_fps(2).unwrap();
        let alpha = Alpha::new(&timeline, AlphaFunc::RampDec);
        let behaviour = OpacityBehaviour::new(Some(alpha), 0, 200);
        let actor = Arc::new(RwLock::new(MockActor::new(10.0, 10.0)));
        let actor_handle: ActorHandle = actor.clone();
        behaviour.apply(&actor_handle);

        timeline.next_frame();
        assert_eq!(actor.read().get_opacity(), 100);
        timeline.next_frame();
        assert_eq!(actor.read().get_opacity(), 0);
        behaviour.set_alpha(None);
    }

    #[test]
    fn test_dropped_behaviour_no_longer_fades() {
        let timeline = Timeline::new(1000).set_fps(2).unwrap();
        let behaviour =
            OpacityBehaviour::new(Some(Alpha::new(&timeline, AlphaFunc::RampInc)), 0, 200);
        let actor = Arc::new(RwLock::new(MockActor::new(10.0, 10.0)));
        let actor_handle: ActorHandle = actor.clone();
        behaviour.apply(&actor_handle);
        drop(behaviour);

        timeline.next_frame();
        assert!(actor.read().get_history().is_empty());
        assert_eq!(timeline.get_n_behaviours(), 0);
    }

    #[test]
    fn test_behaviours_are_polymorphic() {
        let behaviours: Vec<Box<dyn Behaviour>> = vec![
            Box::new(OpacityBehaviour::new(None, 0, 100)),
            Box::new(crate::behaviours::ScaleBehaviour::new(
                None,
                1.0,
                1.0,
                2.0,
                2.0,
                crate::Gravity::None,
            )),
        ];
        let actor = Arc::new(RwLock::new(MockActor::new(10.0, 10.0)));
        let actor_handle: ActorHandle = actor.clone();
        for behaviour in behaviours.iter().cloned() {
            behaviour.apply(&actor_handle);
            behaviour.alpha_notify(ALPHA_MAX);
            assert!(behaviour.get_alpha().is_none());
        }

        let actor = actor.read();
        assert_eq!(actor.get_opacity(), 100);
        assert_eq!(actor.get_scale(), (2.0, 2.0));
    }
}
