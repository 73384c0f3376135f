use crate::attack::AttackCategory;

/// Damage reduction applied to a blocking target, in percent per category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MitigationTable {
    pub physical: u32,
    pub super_attack: u32,
    pub ultimate: u32,
}

impl MitigationTable {
    pub const DEFAULT_PHYSICAL: u32 = 50;
    pub const DEFAULT_SUPER: u32 = 50;
    pub const DEFAULT_ULTIMATE: u32 = 25;

    pub const fn new() -> Self {
        Self {
            physical: Self::DEFAULT_PHYSICAL,
            super_attack: Self::DEFAULT_SUPER,
            ultimate: Self::DEFAULT_ULTIMATE,
        }
    }

    /// Mitigation for a category, capped at 100%.
    pub fn percent(&self, category: AttackCategory) -> u32 {
        let value = match category {
            AttackCategory::Physical => self.physical,
            AttackCategory::Super => self.super_attack,
            AttackCategory::Ultimate => self.ultimate,
        };
        value.min(100)
    }
}

impl Default for MitigationTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Battle balance parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Base damage of the basic physical attack every fighter knows.
    pub physical_attack_damage: u32,

    /// Ki gained by the attacker on every physical attack.
    pub physical_energy_gain: u32,

    pub mitigation: MitigationTable,

    /// Extra damage dealt while transformed, in percent.
    pub transform_damage_bonus_percent: u32,

    /// Ki drained from a transformed fighter at the start of each of its turns.
    /// The transformation ends when ki reaches zero.
    pub transform_upkeep_energy: u32,

    /// Chance (0-100) that the random AI attacks instead of blocking.
    pub attack_chance_percent: u32,
}

impl BattleConfig {
    pub const DEFAULT_PHYSICAL_ATTACK_DAMAGE: u32 = 50;
    pub const DEFAULT_PHYSICAL_ENERGY_GAIN: u32 = 1;
    pub const DEFAULT_TRANSFORM_DAMAGE_BONUS_PERCENT: u32 = 25;
    pub const DEFAULT_TRANSFORM_UPKEEP_ENERGY: u32 = 1;
    pub const DEFAULT_ATTACK_CHANCE_PERCENT: u32 = 85;

    pub const fn new() -> Self {
        Self {
            physical_attack_damage: Self::DEFAULT_PHYSICAL_ATTACK_DAMAGE,
            physical_energy_gain: Self::DEFAULT_PHYSICAL_ENERGY_GAIN,
            mitigation: MitigationTable::new(),
            transform_damage_bonus_percent: Self::DEFAULT_TRANSFORM_DAMAGE_BONUS_PERCENT,
            transform_upkeep_energy: Self::DEFAULT_TRANSFORM_UPKEEP_ENERGY,
            attack_chance_percent: Self::DEFAULT_ATTACK_CHANCE_PERCENT,
        }
    }

    pub const fn with_physical_attack_damage(mut self, damage: u32) -> Self {
        self.physical_attack_damage = damage;
        self
    }

    pub const fn with_mitigation(mut self, mitigation: MitigationTable) -> Self {
        self.mitigation = mitigation;
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
