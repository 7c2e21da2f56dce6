pub use crate::mocks::actor::MockActor;

mod actor;
