//! Battle events and observers.
//!
//! Every state transition of a [`crate::Battle`] is announced as a
//! [`BattleEvent`], delivered synchronously and in causal order to each
//! subscribed [`BattleObserver`]:
//!
//! ```text
//! Started, NewTurn, (Attack | Block | UseItem, NewTurn)*, (Attack | Block | UseItem), Ended
//! ```
//!
//! Observers only ever see `&BattleEvent`, never the battle itself, so they
//! cannot re-enter a mutating operation while it is in progress.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use crate::attack::Attack;
use crate::combat::AttackReport;
use crate::combatant::Side;
use crate::inventory::Collectible;

/// Identifies the battle an event came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleId(pub u64);

impl fmt::Display for BattleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "battle#{}", self.0)
    }
}

/// What happened.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEventKind {
    Started,
    NewTurn {
        current: Side,
    },
    Attack {
        side: Side,
        attack: Attack,
        report: AttackReport,
    },
    Block {
        side: Side,
    },
    UseItem {
        side: Side,
        item: Collectible,
    },
    Ended {
        winner: Side,
    },
}

impl BattleEventKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::NewTurn { .. } => "new_turn",
            Self::Attack { .. } => "attack",
            Self::Block { .. } => "block",
            Self::UseItem { .. } => "use_item",
            Self::Ended { .. } => "ended",
        }
    }

    /// Returns true for the action kinds (attack, block, use item).
    pub const fn is_action(&self) -> bool {
        matches!(
            self,
            Self::Attack { .. } | Self::Block { .. } | Self::UseItem { .. }
        )
    }
}

/// An immutable record of one battle transition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleEvent {
    pub battle: BattleId,
    /// Turn number the event belongs to (1 for the opening turn).
    pub turn: u32,
    pub kind: BattleEventKind,
}

/// Receives battle events synchronously.
///
/// Observers are `Sync` so a `&Battle` can be shared with async action
/// providers.
pub trait BattleObserver: Send + Sync {
    fn on_battle_event(&mut self, event: &BattleEvent);
}

impl<F> BattleObserver for F
where
    F: FnMut(&BattleEvent) + Send + Sync,
{
    fn on_battle_event(&mut self, event: &BattleEvent) {
        self(event)
    }
}

/// Subscriber list owned by a battle.
#[derive(Default)]
pub(crate) struct Observers {
    subscribers: Vec<Box<dyn BattleObserver>>,
}

impl Observers {
    pub(crate) fn push(&mut self, observer: Box<dyn BattleObserver>) {
        self.subscribers.push(observer);
    }

    pub(crate) fn notify(&mut self, event: &BattleEvent) {
        for subscriber in &mut self.subscribers {
            subscriber.on_battle_event(event);
        }
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

/// Observer that keeps every event in memory.
///
/// Clones share the same log, so one handle can be subscribed while another is
/// kept for inspection.
#[derive(Clone, Debug, Default)]
pub struct EventRecorder {
    events: Arc<Mutex<Vec<BattleEvent>>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events.
    pub fn events(&self) -> Vec<BattleEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Recorded event kinds as their string names.
    pub fn kinds(&self) -> Vec<&'static str> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|event| event.kind.as_str())
            .collect()
    }

    /// Removes and returns the recorded events.
    pub fn drain(&self) -> Vec<BattleEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl BattleObserver for EventRecorder {
    fn on_battle_event(&mut self, event: &BattleEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}
