//! Attack catalog.
//!
//! Attack definitions are written as [`AttackSpec`] entries and resolved into
//! immutable [`Attack`] values keyed by name.

use std::collections::BTreeMap;

use battle_core::{Attack, AttackCategory, AttackEffect, ResourceCost};

/// Attack entry as written in content files.
///
/// `cost` falls back to the category default when omitted, and
/// `required_energy` to the ki cost.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackSpec {
    pub name: String,
    pub category: AttackCategory,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost: Option<ResourceCost>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub required_energy: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effect: AttackEffect,
}

impl AttackSpec {
    pub fn new(name: impl Into<String>, category: AttackCategory, damage: u32) -> Self {
        Self {
            name: name.into(),
            category,
            damage,
            cost: None,
            required_energy: None,
            effect: AttackEffect::Damage,
        }
    }

    pub fn with_cost(mut self, cost: ResourceCost) -> Self {
        self.cost = Some(cost);
        self
    }

    pub fn with_effect(mut self, effect: AttackEffect) -> Self {
        self.effect = effect;
        self
    }

    /// Builds the attack this entry describes.
    pub fn build(&self) -> Attack {
        let mut attack =
            Attack::new(self.name.clone(), self.category, self.damage).with_effect(self.effect);
        if let Some(cost) = self.cost {
            attack = attack.with_cost(cost);
        }
        if let Some(required) = self.required_energy {
            attack = attack.with_required_energy(required);
        }
        attack
    }
}

/// Attacks available to rosters, keyed by name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttackCatalog {
    attacks: BTreeMap<String, Attack>,
}

impl AttackCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from specs. Returns the first duplicated name as the
    /// error.
    pub fn from_specs<'a>(specs: impl IntoIterator<Item = &'a AttackSpec>) -> Result<Self, String> {
        let mut catalog = Self::new();
        for spec in specs {
            if !catalog.insert(spec.build()) {
                return Err(spec.name.clone());
            }
        }
        Ok(catalog)
    }

    /// Adds an attack. Returns false (and keeps the existing entry) when the
    /// name is already taken.
    pub fn insert(&mut self, attack: Attack) -> bool {
        if self.attacks.contains_key(attack.name()) {
            return false;
        }
        self.attacks.insert(attack.name().to_owned(), attack);
        true
    }

    pub fn get(&self, name: &str) -> Option<&Attack> {
        self.attacks.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attacks.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.attacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attacks.is_empty()
    }

    /// Attacks in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Attack> {
        self.attacks.values()
    }
}
