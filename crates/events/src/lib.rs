//! Domain events and their distribution.
//!
//! Aggregates decide events; [`execute`] applies them; an [`EventBus`] fans
//! messages out to whoever renders them.

pub mod bus;
pub mod event;
pub mod handler;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use event::Event;
pub use handler::execute;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
