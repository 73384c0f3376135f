//! Attack definitions.
//!
//! An [`Attack`] is immutable data: a category, a base damage, a resource cost
//! and an effect. Resolution lives in [`crate::combat`]; the methods here are
//! the attack-facing entry points into it.

use crate::combat::{self, AttackReport};
use crate::combatant::Combatant;
use crate::config::BattleConfig;
use crate::error::InvalidAttackReason;

/// Attack category. Determines which damage stat scales the attack and which
/// mitigation ratio a block applies.
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
pub enum AttackCategory {
    /// Basic melee attack. Scales with physical damage and builds ki.
    Physical,
    /// Ki blast. Scales with blast damage.
    Super,
    /// Signature move. Scales with blast damage and needs a full ki charge.
    Ultimate,
}

impl AttackCategory {
    /// Cost used when an attack definition does not spell one out.
    pub const fn default_cost(self) -> ResourceCost {
        match self {
            Self::Physical => ResourceCost::FREE,
            Self::Super => ResourceCost::energy(1),
            Self::Ultimate => ResourceCost::energy(3),
        }
    }
}

/// Resources deducted from the attacker when an attack is used.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ResourceCost {
    pub stamina: u32,
    pub energy: u32,
}

impl ResourceCost {
    pub const FREE: Self = Self {
        stamina: 0,
        energy: 0,
    };

    pub const fn new(stamina: u32, energy: u32) -> Self {
        Self { stamina, energy }
    }

    pub const fn energy(energy: u32) -> Self {
        Self { stamina: 0, energy }
    }

    pub const fn stamina(stamina: u32) -> Self {
        Self { stamina, energy: 0 }
    }

    pub const fn is_free(&self) -> bool {
        self.stamina == 0 && self.energy == 0
    }
}

/// What an attack does once its cost is paid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackEffect {
    /// Deal damage to the target.
    #[default]
    Damage,
    /// Gather ki instead of dealing damage.
    Charge { energy: u32 },
    /// Enter the transformed state.
    Transform,
}

/// An immutable attack definition.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attack {
    name: String,
    category: AttackCategory,
    damage: u32,
    cost: ResourceCost,
    required_energy: u32,
    effect: AttackEffect,
}

impl Attack {
    pub const PHYSICAL_NAME: &'static str = "Physical Attack";

    /// Creates a damaging attack with the category's default cost and no
    /// ki requirement beyond it.
    pub fn new(name: impl Into<String>, category: AttackCategory, damage: u32) -> Self {
        Self {
            name: name.into(),
            category,
            damage,
            cost: category.default_cost(),
            required_energy: 0,
            effect: AttackEffect::Damage,
        }
    }

    /// The basic physical attack every fighter knows.
    pub fn physical(damage: u32) -> Self {
        Self::new(Self::PHYSICAL_NAME, AttackCategory::Physical, damage)
    }

    pub fn super_attack(name: impl Into<String>, damage: u32) -> Self {
        Self::new(name, AttackCategory::Super, damage)
    }

    pub fn ultimate(name: impl Into<String>, damage: u32) -> Self {
        Self::new(name, AttackCategory::Ultimate, damage)
    }

    /// A free super attack that gathers ki instead of dealing damage.
    pub fn charge(name: impl Into<String>, energy: u32) -> Self {
        Self::new(name, AttackCategory::Super, 0)
            .with_cost(ResourceCost::FREE)
            .with_effect(AttackEffect::Charge { energy })
    }

    /// An ultimate that transforms the user. Requires a full ki charge but
    /// does not consume it; the transformation drains ki turn by turn instead.
    pub fn transform(name: impl Into<String>) -> Self {
        let required = AttackCategory::Ultimate.default_cost().energy;
        Self::new(name, AttackCategory::Ultimate, 0)
            .with_cost(ResourceCost::FREE)
            .with_required_energy(required)
            .with_effect(AttackEffect::Transform)
    }

    pub fn with_cost(mut self, cost: ResourceCost) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_required_energy(mut self, required_energy: u32) -> Self {
        self.required_energy = required_energy;
        self
    }

    pub fn with_effect(mut self, effect: AttackEffect) -> Self {
        self.effect = effect;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> AttackCategory {
        self.category
    }

    pub fn damage(&self) -> u32 {
        self.damage
    }

    pub fn cost(&self) -> ResourceCost {
        self.cost
    }

    /// Minimum ki needed to use the attack. Never below the ki cost.
    pub fn required_energy(&self) -> u32 {
        self.required_energy.max(self.cost.energy)
    }

    pub fn effect(&self) -> AttackEffect {
        self.effect
    }

    /// Eligibility predicate for `actor`.
    pub fn check(&self, actor: &Combatant) -> Result<(), InvalidAttackReason> {
        combat::check_attack(actor, self)
    }

    pub fn is_eligible(&self, actor: &Combatant) -> bool {
        self.check(actor).is_ok()
    }

    /// Applies the attack from `actor` to `target`. See [`combat::resolve_attack`].
    pub fn apply(
        &self,
        actor: &mut Combatant,
        target: &mut Combatant,
        target_blocking: bool,
        config: &BattleConfig,
    ) -> Result<AttackReport, InvalidAttackReason> {
        combat::resolve_attack(actor, target, self, target_blocking, config)
    }
}
