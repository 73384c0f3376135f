//! Fighter roster.
//!
//! A [`FighterTemplate`] names its attacks; [`Roster::combatant`] resolves the
//! names against an [`AttackCatalog`] and builds a ready-to-fight
//! [`Combatant`].

use battle_core::{AttackCategory, Combatant, FighterStats};

use crate::catalog::AttackCatalog;

/// Errors raised while building a combatant from the roster.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("unknown fighter '{0}'")]
    UnknownFighter(String),

    #[error("fighter '{fighter}' references unknown attack '{attack}'")]
    UnknownAttack { fighter: String, attack: String },

    #[error("attack '{attack}' is {found}, but fighter '{fighter}' lists it as {expected}")]
    WrongCategory {
        fighter: String,
        attack: String,
        expected: AttackCategory,
        found: AttackCategory,
    },
}

/// Roster entry as written in content files.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FighterTemplate {
    /// Lookup key, e.g. `"goku"`.
    pub id: String,
    /// Display name.
    pub name: String,
    pub stats: FighterStats,
    #[cfg_attr(feature = "serde", serde(default))]
    pub super_attacks: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ultimate_attacks: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub can_transform: bool,
}

impl FighterTemplate {
    /// Resolves the template into a combatant.
    pub fn build(&self, catalog: &AttackCatalog) -> Result<Combatant, RosterError> {
        let supers = self.resolve(catalog, &self.super_attacks, AttackCategory::Super)?;
        let ultimates = self.resolve(catalog, &self.ultimate_attacks, AttackCategory::Ultimate)?;

        let combatant = Combatant::new(self.name.clone(), self.stats)
            .with_super_attacks(supers)
            .with_ultimate_attacks(ultimates);

        Ok(if self.can_transform {
            combatant.with_transformation()
        } else {
            combatant
        })
    }

    fn resolve(
        &self,
        catalog: &AttackCatalog,
        names: &[String],
        expected: AttackCategory,
    ) -> Result<Vec<battle_core::Attack>, RosterError> {
        names
            .iter()
            .map(|name| {
                let attack = catalog
                    .get(name)
                    .ok_or_else(|| RosterError::UnknownAttack {
                        fighter: self.id.clone(),
                        attack: name.clone(),
                    })?;
                if attack.category() != expected {
                    return Err(RosterError::WrongCategory {
                        fighter: self.id.clone(),
                        attack: name.clone(),
                        expected,
                        found: attack.category(),
                    });
                }
                Ok(attack.clone())
            })
            .collect()
    }
}

/// All fighters known to the content set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    pub fighters: Vec<FighterTemplate>,
}

impl Roster {
    pub fn new(fighters: Vec<FighterTemplate>) -> Self {
        Self { fighters }
    }

    pub fn template(&self, id: &str) -> Option<&FighterTemplate> {
        self.fighters
            .iter()
            .find(|template| template.id.eq_ignore_ascii_case(id))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.fighters.iter().map(|template| template.id.as_str())
    }

    /// Builds the combatant registered under `id` (case-insensitive).
    pub fn combatant(&self, id: &str, catalog: &AttackCatalog) -> Result<Combatant, RosterError> {
        let template = self
            .template(id)
            .ok_or_else(|| RosterError::UnknownFighter(id.to_owned()))?;
        let combatant = template.build(catalog)?;
        tracing::debug!(
            fighter = template.id.as_str(),
            supers = combatant.super_attacks().len(),
            ultimates = combatant.ultimate_attacks().len(),
            "combatant built from roster"
        );
        Ok(combatant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AttackSpec;
    use battle_core::{AttackEffect, ResourceCost};

    fn catalog() -> AttackCatalog {
        AttackCatalog::from_specs(&[
            AttackSpec::new("Kamehameha", AttackCategory::Super, 60),
            AttackSpec::new("Spirit Bomb", AttackCategory::Ultimate, 150),
            AttackSpec::new("Super Saiyan", AttackCategory::Ultimate, 0)
                .with_cost(ResourceCost::FREE)
                .with_effect(AttackEffect::Transform),
        ])
        .unwrap()
    }

    fn goku() -> FighterTemplate {
        FighterTemplate {
            id: "goku".into(),
            name: "Goku".into(),
            stats: FighterStats::new(500, 100, 5).with_damage(10, 20),
            super_attacks: vec!["Kamehameha".into()],
            ultimate_attacks: vec!["Spirit Bomb".into(), "Super Saiyan".into()],
            can_transform: true,
        }
    }

    #[test]
    fn builds_combatant_with_resolved_attacks() {
        let roster = Roster::new(vec![goku()]);
        let goku = roster.combatant("Goku", &catalog()).unwrap();

        assert_eq!(goku.name(), "Goku");
        assert_eq!(goku.max_health(), 500);
        assert_eq!(goku.super_attacks()[0].name(), "Kamehameha");
        assert_eq!(goku.ultimate_attacks().len(), 2);
        assert!(goku.can_transform());
    }

    #[test]
    fn unknown_fighter() {
        let roster = Roster::new(vec![goku()]);
        assert_eq!(
            roster.combatant("vegeta", &catalog()),
            Err(RosterError::UnknownFighter("vegeta".into()))
        );
    }

    #[test]
    fn unknown_attack() {
        let mut template = goku();
        template.super_attacks.push("Final Flash".into());

        assert_eq!(
            template.build(&catalog()),
            Err(RosterError::UnknownAttack {
                fighter: "goku".into(),
                attack: "Final Flash".into(),
            })
        );
    }

    #[test]
    fn attack_in_wrong_slot() {
        let mut template = goku();
        template.super_attacks.push("Spirit Bomb".into());

        let err = template.build(&catalog()).unwrap_err();
        assert_eq!(
            err,
            RosterError::WrongCategory {
                fighter: "goku".into(),
                attack: "Spirit Bomb".into(),
                expected: AttackCategory::Super,
                found: AttackCategory::Ultimate,
            }
        );
        assert_eq!(
            err.to_string(),
            "attack 'Spirit Bomb' is ultimate, but fighter 'goku' lists it as super"
        );
    }
}
