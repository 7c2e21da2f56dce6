//! <h1 align="center">CLUTTER - Alpha-driven behaviours</h1>
//! <div style="text-align:center;font-style:italic;">The animation core of a scene graph: timelines, alphas and the behaviours they drive.</div>
//!
//! # Documentation
//!
//! This is the API documentation.
//!
//! # Features
//!
//! **Clutter** animates the properties of actors living in a scene graph (owned by your
//! application): the crate never draws anything, it computes and applies property values.
//!
//! - Play a [`Timeline`](timeline::Timeline) on the Clutter runtime or drive it frame by frame
//! - Map the timeline progress through an [`Alpha`](timeline::Alpha) and its
//!   [`AlphaFunc`](timeline::AlphaFunc) easing curve
//! - Apply [`Behaviour`](behaviours::Behaviour)s to any number of [`Actor`](actors::Actor)s:
//!   [`ScaleBehaviour`](behaviours::ScaleBehaviour) (around a [`Gravity`]) or
//!   [`OpacityBehaviour`](behaviours::OpacityBehaviour)
//! - Observe behaviour property changes, batched per mutation
//!
//! All interpolations run in 16.16 [`Fixed`] point arithmetic: results are bit-for-bit
//! identical on every platform.
//!
//! # Getting Started
//!
//! - Add the following to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! clutter = "0.6.0"
//! ```
//!
//! - Implement [`Actor`](actors::Actor) for your scene graph nodes, then animate them:
//! ```ignore
//! use clutter::actors;
//! use clutter::behaviours::{Behaviour, ScaleBehaviour};
//! use clutter::timeline::{Alpha, AlphaFunc, Timeline};
//! use clutter::Gravity;
//!
//! #[clutter::runtime]
//! async fn main() {
//!     let actor = actors::handle(MyActor::new(200.0, 100.0));
//!
//!     // One second at 60fps.
//!     let timeline = Timeline::new(1000);
//!     let alpha = Alpha::new(&timeline, AlphaFunc::SineInc);
//!
//!     // Doubles the actor size, around its center.
//!     let behaviour = ScaleBehaviour::new(Some(alpha), 1.0, 1.0, 2.0, 2.0, Gravity::Center);
//!     behaviour.apply(&actor);
//!
//!     timeline.start().unwrap();
//!     // The actor and the behaviour must outlive the animation.
//!     clutter::pause!(1000);
//! }
//! ```
//!
//! # Feature flags
//!
//! - **serde** -- Enables serialize/deserialize capabilities for the value types.
//! - **mocks** -- Provides a mocked actor (useful for tests mostly).

#[cfg(test)]
extern crate self as clutter;

pub mod actors;
pub mod behaviours;
pub mod errors;
mod fixed;
mod gravity;
#[cfg(any(test, feature = "mocks"))]
pub mod mocks;
pub mod timeline;
pub mod utils;

pub use crate::fixed::{Fixed, FIXED_Q};
pub use crate::gravity::Gravity;
pub use clutter_macros::runtime;
