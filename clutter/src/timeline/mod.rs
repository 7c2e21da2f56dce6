//! Defines the clock side of an animation: a [`Timeline`] counts frames, an [`Alpha`] maps the
//! timeline progress to the value behaviours are driven by.

pub use crate::timeline::alpha::{Alpha, ALPHA_MAX};
pub use crate::timeline::alpha_func::AlphaFunc;
pub use crate::timeline::timeline::{Direction, Timeline, TimelineEvent, DEFAULT_FPS};

mod alpha;
mod alpha_func;
#[allow(clippy::module_inception)]
mod timeline;
