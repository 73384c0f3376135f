//! Unified error types surfaced by the runtime API.
//!
//! Wraps rule violations from `battle-core` and failures of action providers
//! so clients can bubble them up with consistent context.
use battle_core::{BattleError, Collectible, Side};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{side} action provider not set")]
    ProviderNotSet { side: Side },

    #[error("{side} combatant not set")]
    CombatantNotSet { side: Side },

    #[error("{side} action provider has no more actions")]
    ProviderExhausted { side: Side },

    #[error("action provider channel closed")]
    ActionProviderChannelClosed,

    #[error("attack '{name}' is not in the move set of {side}")]
    UnknownAttack { side: Side, name: String },

    #[error("{side} carries no inventory to take {item} from")]
    NoInventory { side: Side, item: Collectible },

    #[error("{side} gave up after {limit} invalid actions")]
    TooManyInvalidActions { side: Side, limit: u32 },

    #[error(transparent)]
    Battle(#[from] BattleError),
}

impl RuntimeError {
    /// True when the provider may simply be asked again.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Battle(error) => error.is_retryable(),
            Self::UnknownAttack { .. } | Self::NoInventory { .. } => true,
            _ => false,
        }
    }
}
