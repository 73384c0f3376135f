//! Policy-driven AI action provider.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use battle_core::{
    AiPolicy, Battle, BattleConfig, BattleId, PcgRng, RandomPolicy, Side, compute_seed,
};

use crate::api::{ActionProvider, BattleAction, Result};

/// Provider that delegates every decision to an [`AiPolicy`].
///
/// The policy sees only the attacks the acting side can afford, so its
/// answers never fail validation.
pub struct AiActionProvider<P = RandomPolicy<PcgRng>> {
    policy: Mutex<P>,
}

impl<P: AiPolicy + Send> AiActionProvider<P> {
    pub fn new(policy: P) -> Self {
        Self {
            policy: Mutex::new(policy),
        }
    }
}

impl AiActionProvider {
    /// Random policy with a stream derived from the session seed, the battle
    /// and the side, so two AI sides never share a sequence.
    pub fn seeded(session_seed: u64, battle: BattleId, side: Side, config: &BattleConfig) -> Self {
        let seed = compute_seed(session_seed, battle.0, side.index());
        Self::new(RandomPolicy::from_config(PcgRng::seed_from_u64(seed), config))
    }
}

#[async_trait]
impl<P: AiPolicy + Send> ActionProvider for AiActionProvider<P> {
    async fn provide_action(&self, side: Side, battle: &Battle) -> Result<BattleAction> {
        let decision = {
            let mut policy = self.policy.lock().unwrap_or_else(PoisonError::into_inner);
            policy.decide(&battle.decision_context())
        };
        tracing::debug!(%side, ?decision, "ai decided");

        Ok(BattleAction::from(decision))
    }
}
