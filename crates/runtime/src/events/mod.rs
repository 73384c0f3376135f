//! Topic-based event bus for battle events.
//!
//! Battle events are published to a topic, and consumers subscribe only to the
//! topics they need. Observers in this module bridge the synchronous
//! `battle-core` observer hook to the bus and to `tracing`.

mod bus;
mod logging;

pub use bus::{BusObserver, EventBus, Topic};
pub use logging::TracingObserver;
