//! Attack eligibility and resolution.

use crate::attack::{Attack, AttackCategory, AttackEffect, ResourceCost};
use crate::combatant::Combatant;
use crate::config::BattleConfig;
use crate::error::InvalidAttackReason;

use super::damage::{apply_damage, calculate_damage, mitigate};

/// Result of a resolved attack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackReport {
    /// Damage subtracted from the target (before clamping at 0 HP).
    pub damage: u32,

    /// Damage absorbed by the target's block.
    pub mitigated: u32,

    /// Target health after the attack.
    pub target_health: u32,

    /// Ki gained by the attacker (charge effects and physical build-up).
    pub energy_gained: u32,
}

/// Cost actually charged to `actor` for `attack`.
///
/// A transformed fighter fires super and ultimate attacks without spending ki.
pub fn effective_cost(actor: &Combatant, attack: &Attack) -> ResourceCost {
    let mut cost = attack.cost();
    if draws_on_transformation(actor, attack) {
        cost.energy = 0;
    }
    cost
}

fn effective_required_energy(actor: &Combatant, attack: &Attack) -> u32 {
    if draws_on_transformation(actor, attack) {
        0
    } else {
        attack.required_energy()
    }
}

fn draws_on_transformation(actor: &Combatant, attack: &Attack) -> bool {
    actor.is_transformed() && attack.category() != AttackCategory::Physical
}

/// Check whether `actor` may use `attack` right now.
///
/// Does not check the move set; that is the battle's concern.
pub fn check_attack(actor: &Combatant, attack: &Attack) -> Result<(), InvalidAttackReason> {
    if attack.effect() == AttackEffect::Transform {
        match actor.transformation() {
            None => return Err(InvalidAttackReason::CannotTransform),
            Some(transformation) if transformation.is_transformed() => {
                return Err(InvalidAttackReason::AlreadyTransformed);
            }
            Some(_) => {}
        }
    }

    let cost = effective_cost(actor, attack);
    if actor.stamina() < cost.stamina {
        return Err(InvalidAttackReason::InsufficientStamina {
            have: actor.stamina(),
            need: cost.stamina,
        });
    }

    let required = effective_required_energy(actor, attack);
    if actor.energy() < required {
        return Err(InvalidAttackReason::InsufficientEnergy {
            have: actor.energy(),
            need: required,
        });
    }

    Ok(())
}

/// Resolve `attack` from `actor` against `target`.
///
/// Steps:
/// 1. Eligibility check (fails without touching either combatant)
/// 2. Cost deduction
/// 3. Effect: damage (mitigated when `target_blocking`), ki charge, or
///    transformation
/// 4. Physical attacks build ki for the attacker
pub fn resolve_attack(
    actor: &mut Combatant,
    target: &mut Combatant,
    attack: &Attack,
    target_blocking: bool,
    config: &BattleConfig,
) -> Result<AttackReport, InvalidAttackReason> {
    check_attack(actor, attack)?;

    let cost = effective_cost(actor, attack);
    actor.pay(cost);

    let mut report = AttackReport::default();
    match attack.effect() {
        AttackEffect::Damage => {
            let raw = calculate_damage(actor, attack, config);
            let dealt = if target_blocking {
                mitigate(raw, attack.category(), config)
            } else {
                raw
            };
            target.set_health(apply_damage(target.health(), dealt));
            report.damage = dealt;
            report.mitigated = raw - dealt;
        }
        AttackEffect::Charge { energy } => {
            report.energy_gained += actor.gain_energy(energy);
        }
        AttackEffect::Transform => actor.set_transformed(true),
    }

    if attack.category() == AttackCategory::Physical {
        report.energy_gained += actor.gain_energy(config.physical_energy_gain);
    }
    report.target_health = target.health();

    Ok(report)
}
