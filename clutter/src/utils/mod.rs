pub use tokio;

pub use crate::utils::events::{EventHandler, EventManager};
pub use crate::utils::notify::{Notifier, NotifyBatch, NotifyHandler, PropertyChange};
pub use crate::utils::range::Range;
pub use crate::utils::task::TaskHandler;
pub use crate::utils::value::Value;

mod events;
mod notify;
mod range;
pub mod task;
mod value;
