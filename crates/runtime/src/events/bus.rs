//! Topic-based event bus implementation.

use std::sync::Arc;

use battle_core::{BattleEvent, BattleEventKind, BattleObserver};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Lifecycle and turn handover (started, new turn, ended)
    Turn,
    /// Actions taken by either side (attack, block, use item)
    Action,
}

impl Topic {
    pub fn of(kind: &BattleEventKind) -> Self {
        if kind.is_action() {
            Topic::Action
        } else {
            Topic::Turn
        }
    }
}

struct Channels {
    turn: broadcast::Sender<BattleEvent>,
    action: broadcast::Sender<BattleEvent>,
}

impl Channels {
    fn get(&self, topic: Topic) -> &broadcast::Sender<BattleEvent> {
        match topic {
            Topic::Turn => &self.turn,
            Topic::Action => &self.action,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Clones share the same channels.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                turn: broadcast::channel(capacity).0,
                action: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: BattleEvent) {
        let topic = Topic::of(&event.kind);

        if self.channels.get(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<BattleEvent> {
        self.channels.get(topic).subscribe()
    }

    pub fn receiver_count(&self, topic: Topic) -> usize {
        self.channels.get(topic).receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("turn_receivers", &self.receiver_count(Topic::Turn))
            .field("action_receivers", &self.receiver_count(Topic::Action))
            .finish()
    }
}

/// Battle observer that forwards every event to an [`EventBus`].
#[derive(Clone, Debug)]
pub struct BusObserver {
    bus: EventBus,
}

impl BusObserver {
    pub fn new(bus: EventBus) -> Self {
        Self { bus }
    }
}

impl BattleObserver for BusObserver {
    fn on_battle_event(&mut self, event: &BattleEvent) {
        self.bus.publish(event.clone());
    }
}
