use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::actors::{is_same_actor, ActorHandle, WeakActor};
use crate::behaviours::WeakBehaviour;
use crate::timeline::Alpha;
use crate::utils::{Notifier, PropertyChange};

/// The state shared by every behaviour: the actors it drives, its alpha and its observers.
///
/// Actors are held through weak references: an actor dropped by its owner silently leaves the
/// set. Cloning a core gives another handle on the same state.
#[derive(Clone, Default)]
pub struct BehaviourCore {
    actors: Arc<RwLock<Vec<WeakActor>>>,
    /// The alpha, and the id under which the behaviour is attached to its timeline.
    alpha: Arc<RwLock<Option<(Alpha, usize)>>>,
    notifier: Notifier,
}

impl BehaviourCore {
    /// Adds an actor to the set. An actor already applied is not added twice.
    pub fn apply(&self, actor: &ActorHandle) {
        let mut actors = self.actors.write();
        actors.retain(|weak| weak.strong_count() > 0);
        if actors.iter().any(|weak| is_same_actor(weak, actor)) {
            return;
        }
        actors.push(Arc::downgrade(actor));
        log::debug!("Behaviour applied to a new actor ({} actors)", actors.len());
    }

    /// Removes an actor from the set, if present.
    pub fn remove(&self, actor: &ActorHandle) {
        let mut actors = self.actors.write();
        let before = actors.len();
        actors.retain(|weak| weak.strong_count() > 0 && !is_same_actor(weak, actor));
        if actors.len() < before {
            log::debug!("Behaviour removed from an actor ({} actors)", actors.len());
        }
    }

    /// Empties the set.
    pub fn remove_all(&self) {
        self.actors.write().clear();
    }

    pub fn is_applied(&self, actor: &ActorHandle) -> bool {
        self.actors
            .read()
            .iter()
            .any(|weak| weak.strong_count() > 0 && is_same_actor(weak, actor))
    }

    /// Returns the live actors, in application order.
    pub fn get_actors(&self) -> Vec<ActorHandle> {
        let mut actors = self.actors.write();
        actors.retain(|weak| weak.strong_count() > 0);
        actors.iter().filter_map(|weak| weak.upgrade()).collect()
    }

    /// Returns the number of live actors.
    pub fn get_n_actors(&self) -> usize {
        self.get_actors().len()
    }

    /// Returns the live actor at the given position, if any.
    pub fn get_nth_actor(&self, index: usize) -> Option<ActorHandle> {
        self.get_actors().into_iter().nth(index)
    }

    /// Calls `callback` on every live actor. The set is snapshot first: the callback may apply
    /// or remove actors.
    pub fn actors_foreach<F: FnMut(&ActorHandle)>(&self, mut callback: F) {
        for actor in self.get_actors() {
            callback(&actor);
        }
    }

    pub fn get_alpha(&self) -> Option<Alpha> {
        self.alpha.read().as_ref().map(|(alpha, _)| alpha.clone())
    }

    /// Replaces the alpha: `driver` gets ticked by the new alpha's timeline while the behaviour
    /// is detached from the previous one.
    pub(crate) fn set_alpha(&self, alpha: Option<Alpha>, driver: WeakBehaviour) {
        {
            let mut current = self.alpha.write();
            let unchanged = match (current.as_ref(), alpha.as_ref()) {
                (None, None) => true,
                (Some((current, _)), Some(alpha)) => current.ptr_eq(alpha),
                _ => false,
            };
            if unchanged {
                return;
            }

            if let Some((previous, id)) = current.take() {
                previous.get_timeline().detach(id);
            }
            *current = alpha.map(|alpha| {
                let id = alpha.get_timeline().attach(driver);
                (alpha, id)
            });
        }

        let attached = self.alpha.read().is_some();
        log::debug!("Behaviour alpha {}", if attached { "set" } else { "unset" });
        self.notifier
            .notify(PropertyChange::new("alpha", attached));
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }
}

impl Debug for BehaviourCore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BehaviourCore")
            .field("actors", &self.get_n_actors())
            .field("alpha", &self.alpha.read().is_some())
            .field("notifier", &self.notifier)
            .finish()
    }
}
