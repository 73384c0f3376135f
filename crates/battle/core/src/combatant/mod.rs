//! Battle-relevant state of one side.

mod stats;

pub use stats::FighterStats;

use crate::attack::{Attack, ResourceCost};
use crate::config::BattleConfig;

/// One of the two sides of a battle.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Side {
    /// The player's fighter. Holds the first turn.
    Me,
    Foe,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Me, Side::Foe];

    pub const fn opponent(self) -> Self {
        match self {
            Self::Me => Self::Foe,
            Self::Foe => Self::Me,
        }
    }

    pub const fn index(self) -> u32 {
        match self {
            Self::Me => 0,
            Self::Foe => 1,
        }
    }
}

/// Notification a combatant receives when the turn changes hands.
///
/// The battle sends `FoeTurn` to the side that now holds the turn and
/// `MyTurn` to the side that just finished acting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnRole {
    MyTurn,
    FoeTurn,
}

/// Transformation capability.
///
/// Only combatants created with [`Combatant::with_transformation`] carry one;
/// the battle logic asks for the capability instead of the fighter's kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transformation {
    transformed: bool,
}

impl Transformation {
    pub const fn is_transformed(&self) -> bool {
        self.transformed
    }
}

/// A fighter taking part in a battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    name: String,
    stats: FighterStats,
    health: u32,
    stamina: u32,
    energy: u32,
    blocking: bool,
    transformation: Option<Transformation>,
    super_attacks: Vec<Attack>,
    ultimate_attacks: Vec<Attack>,
}

impl Combatant {
    /// Creates a fighter at full health and stamina with no ki.
    pub fn new(name: impl Into<String>, stats: FighterStats) -> Self {
        Self {
            name: name.into(),
            stats,
            health: stats.max_health,
            stamina: stats.max_stamina,
            energy: 0,
            blocking: false,
            transformation: None,
            super_attacks: Vec::new(),
            ultimate_attacks: Vec::new(),
        }
    }

    pub fn with_super_attacks(mut self, attacks: impl IntoIterator<Item = Attack>) -> Self {
        self.super_attacks.extend(attacks);
        self
    }

    pub fn with_ultimate_attacks(mut self, attacks: impl IntoIterator<Item = Attack>) -> Self {
        self.ultimate_attacks.extend(attacks);
        self
    }

    /// Grants the transformation capability.
    pub fn with_transformation(mut self) -> Self {
        self.transformation = Some(Transformation::default());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stats(&self) -> &FighterStats {
        &self.stats
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.stats.max_health
    }

    pub fn stamina(&self) -> u32 {
        self.stamina
    }

    pub fn max_stamina(&self) -> u32 {
        self.stats.max_stamina
    }

    pub fn energy(&self) -> u32 {
        self.energy
    }

    pub fn max_energy(&self) -> u32 {
        self.stats.max_energy
    }

    pub fn is_blocking(&self) -> bool {
        self.blocking
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    pub fn transformation(&self) -> Option<Transformation> {
        self.transformation
    }

    pub fn can_transform(&self) -> bool {
        self.transformation.is_some()
    }

    pub fn is_transformed(&self) -> bool {
        self.transformation
            .is_some_and(|transformation| transformation.is_transformed())
    }

    pub fn super_attacks(&self) -> &[Attack] {
        &self.super_attacks
    }

    pub fn ultimate_attacks(&self) -> &[Attack] {
        &self.ultimate_attacks
    }

    /// Returns true if `attack` is one of the learned super or ultimate attacks.
    pub fn has_learned(&self, attack: &Attack) -> bool {
        self.super_attacks.contains(attack) || self.ultimate_attacks.contains(attack)
    }

    /// Sets health, clamped to `[0, max_health]`.
    pub fn set_health(&mut self, health: u32) {
        self.health = health.min(self.stats.max_health);
    }

    /// Sets stamina, clamped to `[0, max_stamina]`.
    pub fn set_stamina(&mut self, stamina: u32) {
        self.stamina = stamina.min(self.stats.max_stamina);
    }

    /// Sets ki, clamped to `[0, max_energy]`.
    pub fn set_energy(&mut self, energy: u32) {
        self.energy = energy.min(self.stats.max_energy);
    }

    /// Adds ki up to the maximum. Returns the amount actually gained.
    pub fn gain_energy(&mut self, amount: u32) -> u32 {
        let before = self.energy;
        self.set_energy(before.saturating_add(amount));
        self.energy - before
    }

    /// Restores health and stamina to their maximums.
    pub fn restore(&mut self) {
        self.health = self.stats.max_health;
        self.stamina = self.stats.max_stamina;
    }

    /// Deducts a cost. Callers check affordability first.
    pub(crate) fn pay(&mut self, cost: ResourceCost) {
        self.stamina = self.stamina.saturating_sub(cost.stamina);
        self.energy = self.energy.saturating_sub(cost.energy);
    }

    pub(crate) fn set_blocking(&mut self, blocking: bool) {
        self.blocking = blocking;
    }

    /// No-op for combatants without the capability.
    pub(crate) fn set_transformed(&mut self, transformed: bool) {
        if let Some(transformation) = self.transformation.as_mut() {
            transformation.transformed = transformed;
        }
    }

    /// Snapshot to battle-start values: full health and stamina, no ki, not
    /// blocking, untransformed.
    pub(crate) fn reset_for_battle(&mut self) {
        self.restore();
        self.energy = 0;
        self.blocking = false;
        self.set_transformed(false);
    }

    /// Turn-change hook run by the battle after the turn pointer moves.
    ///
    /// A transformed fighter pays its upkeep on [`TurnRole::MyTurn`], right
    /// after each of its own actions, and reverts once its ki runs out.
    pub(crate) fn on_turn_change(&mut self, role: TurnRole, config: &BattleConfig) {
        match role {
            TurnRole::MyTurn => self.pay_transformation_upkeep(config),
            TurnRole::FoeTurn => {
                tracing::trace!(fighter = %self.name, blocking = self.blocking, "facing foe turn");
            }
        }
    }

    fn pay_transformation_upkeep(&mut self, config: &BattleConfig) {
        if !self.is_transformed() {
            return;
        }

        self.energy = self.energy.saturating_sub(config.transform_upkeep_energy);
        if self.energy == 0 {
            self.set_transformed(false);
            tracing::debug!(fighter = %self.name, "transformation wore off");
        }
    }
}
