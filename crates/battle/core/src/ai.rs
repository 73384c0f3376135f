//! Decision policies for automated opponents.
//!
//! A policy is a pure function of the [`DecisionContext`] and its own random
//! source. [`crate::Battle::play`] builds the context, asks the policy and
//! applies the answer.

use crate::attack::Attack;
use crate::combatant::{Combatant, Side};
use crate::config::BattleConfig;
use crate::rng::BattleRng;

/// Action chosen by a policy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    Attack(Attack),
    Block,
}

/// Read-only view of the battle for the side about to act.
#[derive(Clone, Debug)]
pub struct DecisionContext<'a> {
    pub side: Side,
    pub actor: &'a Combatant,
    pub opponent: &'a Combatant,
    /// Attacks that pass their eligibility check right now. The basic physical
    /// attack is always among them.
    pub eligible: Vec<&'a Attack>,
}

pub trait AiPolicy {
    fn decide(&mut self, ctx: &DecisionContext<'_>) -> Decision;
}

impl<P: AiPolicy + ?Sized> AiPolicy for &mut P {
    fn decide(&mut self, ctx: &DecisionContext<'_>) -> Decision {
        (**self).decide(ctx)
    }
}

impl<P: AiPolicy + ?Sized> AiPolicy for Box<P> {
    fn decide(&mut self, ctx: &DecisionContext<'_>) -> Decision {
        (**self).decide(ctx)
    }
}

/// Attacks with a fixed probability, otherwise blocks.
///
/// The attack is drawn uniformly from the eligible set. An empty set (which a
/// well-formed battle never produces) falls back to blocking.
#[derive(Clone, Debug)]
pub struct RandomPolicy<R> {
    rng: R,
    attack_chance_percent: u32,
}

impl<R: BattleRng> RandomPolicy<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            attack_chance_percent: BattleConfig::DEFAULT_ATTACK_CHANCE_PERCENT,
        }
    }

    pub fn from_config(rng: R, config: &BattleConfig) -> Self {
        Self::new(rng).with_attack_chance(config.attack_chance_percent)
    }

    pub fn with_attack_chance(mut self, percent: u32) -> Self {
        self.attack_chance_percent = percent.min(100);
        self
    }

    pub fn attack_chance_percent(&self) -> u32 {
        self.attack_chance_percent
    }
}

impl<R: BattleRng> AiPolicy for RandomPolicy<R> {
    fn decide(&mut self, ctx: &DecisionContext<'_>) -> Decision {
        if self.rng.roll_percent() >= self.attack_chance_percent {
            return Decision::Block;
        }

        match self.rng.pick_index(ctx.eligible.len()) {
            Some(index) => Decision::Attack(ctx.eligible[index].clone()),
            None => Decision::Block,
        }
    }
}
