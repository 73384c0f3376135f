//! Asynchronous abstraction for sourcing each side's intent.
//!
//! Runtime users plug in [`ActionProvider`] implementations so a battle can
//! run with human input, scripted fixtures, or AI policies.
use async_trait::async_trait;
use battle_core::{Battle, Collectible, Decision, Side};
use serde::{Deserialize, Serialize};

use super::errors::Result;

/// An action requested by a provider.
///
/// Attacks are named rather than passed by value; the session resolves the
/// name against the acting side's move set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleAction {
    Attack(String),
    Block,
    UseItem(Collectible),
}

impl BattleAction {
    pub fn attack(name: impl Into<String>) -> Self {
        Self::Attack(name.into())
    }

    pub fn from_decision(decision: &Decision) -> Self {
        match decision {
            Decision::Attack(attack) => Self::Attack(attack.name().to_owned()),
            Decision::Block => Self::Block,
        }
    }
}

impl From<Decision> for BattleAction {
    fn from(decision: Decision) -> Self {
        Self::from_decision(&decision)
    }
}

/// Trait for providing actions based on the current battle.
///
/// Different implementations can handle:
/// - Player input (from UI/CLI)
/// - AI decisions
/// - Scripted/replayed actions
#[async_trait]
pub trait ActionProvider: Send + Sync {
    /// Provide the next action for `side`, which holds the turn.
    ///
    /// # Arguments
    /// * `side` - The side that needs to act
    /// * `battle` - Read-only view of the battle
    async fn provide_action(&self, side: Side, battle: &Battle) -> Result<BattleAction>;
}

/// A provider that always blocks.
/// Useful for testing or as a fallback.
pub struct BlockActionProvider;

#[async_trait]
impl ActionProvider for BlockActionProvider {
    async fn provide_action(&self, _side: Side, _battle: &Battle) -> Result<BattleAction> {
        Ok(BattleAction::Block)
    }
}
