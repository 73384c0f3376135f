//! Async orchestration for turn-based battles.
//!
//! This crate drives a [`battle_core::Battle`] to completion by asking one
//! [`ActionProvider`] per side for the next action, and fans battle events out
//! to async consumers. Consumers build a [`BattleSession`] and `run` it.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the session loop and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus and logging observer
//! - [`providers`] contains the built-in action providers
pub mod api;
pub mod events;
pub mod providers;
pub mod session;

pub use api::{ActionProvider, BattleAction, BlockActionProvider, Result, RuntimeError};
pub use events::{BusObserver, EventBus, Topic, TracingObserver};
pub use providers::{AiActionProvider, ChannelActionProvider, ScriptedActionProvider};
pub use session::{BattleOutcome, BattleSession, SessionBuilder, SessionConfig};
