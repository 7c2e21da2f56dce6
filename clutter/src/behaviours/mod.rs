//! Defines behaviours: objects translating an alpha value into property changes on a set of
//! actors.

use std::fmt::Debug;

use dyn_clone::DynClone;

pub use crate::behaviours::core::BehaviourCore;
pub use crate::behaviours::opacity::OpacityBehaviour;
pub use crate::behaviours::scale::{ScaleBehaviour, ScaleBounds, ScaleProperty};
pub use crate::behaviours::weak::WeakBehaviour;
use crate::actors::ActorHandle;
use crate::timeline::Alpha;
use crate::utils::{NotifyHandler, PropertyChange};

mod core;
mod opacity;
mod scale;
mod weak;

/// A behaviour drives a set of actors from the value of an [`Alpha`].
///
/// Implementors only provide access to their [`BehaviourCore`] and the [`Behaviour::alpha_notify`]
/// hook: the actor set management, the alpha binding and the property observers are shared.
pub trait Behaviour: Debug + DynClone + Send + Sync {
    /// Internal only: the shared behaviour state.
    fn core(&self) -> &BehaviourCore;

    /// Returns a non-owning handle on the behaviour, as kept by the timeline driving it.
    fn downgrade(&self) -> WeakBehaviour;

    /// Reacts to a new alpha value (between 0 and [`ALPHA_MAX`](crate::timeline::ALPHA_MAX)) by
    /// updating every actor the behaviour applies to.
    fn alpha_notify(&self, alpha: u32);

    /// Samples the alpha and forwards its value to [`Behaviour::alpha_notify`].
    /// A behaviour without alpha does nothing.
    fn tick(&self) {
        if let Some(alpha) = self.core().get_alpha() {
            let value = alpha.get_alpha();
            log::trace!("Behaviour tick: alpha={}", value);
            self.alpha_notify(value);
        }
    }

    /// Adds an actor to the set the behaviour drives.
    fn apply(&self, actor: &ActorHandle) {
        self.core().apply(actor)
    }

    /// Removes an actor from the set the behaviour drives.
    fn remove(&self, actor: &ActorHandle) {
        self.core().remove(actor)
    }

    fn remove_all(&self) {
        self.core().remove_all()
    }

    fn is_applied(&self, actor: &ActorHandle) -> bool {
        self.core().is_applied(actor)
    }

    fn get_actors(&self) -> Vec<ActorHandle> {
        self.core().get_actors()
    }

    fn get_n_actors(&self) -> usize {
        self.core().get_n_actors()
    }

    fn get_nth_actor(&self, index: usize) -> Option<ActorHandle> {
        self.core().get_nth_actor(index)
    }

    /// Calls `callback` on every live actor.
    fn actors_foreach<F: FnMut(&ActorHandle)>(&self, callback: F)
    where
        Self: Sized,
    {
        self.core().actors_foreach(callback)
    }

    fn get_alpha(&self) -> Option<Alpha> {
        self.core().get_alpha()
    }

    /// Binds the behaviour to an alpha (or unbinds it with `None`): from now on, each new frame
    /// of the alpha's timeline ticks the behaviour.
    ///
    /// The timeline only holds the behaviour weakly: once every handle on the behaviour is
    /// dropped, frames stop affecting its actors.
    ///
    /// Emits an `alpha` notification when the binding changes.
    fn set_alpha(&self, alpha: Option<Alpha>) {
        self.core().set_alpha(alpha, self.downgrade())
    }

    /// Registers a callback invoked each time the given property changes.
    fn on_notify<S, F>(&self, property: S, callback: F) -> NotifyHandler
    where
        Self: Sized,
        S: Into<String>,
        F: Fn(&PropertyChange) + Send + Sync + 'static,
    {
        self.core().notifier().on(property, callback)
    }

    /// Registers a callback invoked for every property change.
    fn on_any_notify<F>(&self, callback: F) -> NotifyHandler
    where
        Self: Sized,
        F: Fn(&PropertyChange) + Send + Sync + 'static,
    {
        self.core().notifier().on_any(callback)
    }

    fn unregister_notify(&self, handler: NotifyHandler) {
        self.core().notifier().unregister(handler)
    }
}
dyn_clone::clone_trait_object!(Behaviour);
