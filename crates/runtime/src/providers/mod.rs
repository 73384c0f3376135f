//! Built-in action providers.

pub mod ai;
pub mod channel;
pub mod scripted;

pub use ai::AiActionProvider;
pub use channel::ChannelActionProvider;
pub use scripted::ScriptedActionProvider;
