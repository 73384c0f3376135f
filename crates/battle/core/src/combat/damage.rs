//! Damage calculation and application.

use crate::attack::{Attack, AttackCategory};
use crate::combatant::Combatant;
use crate::config::BattleConfig;

/// Calculate the unmitigated damage of an attack.
///
/// # Formula
///
/// ```text
/// stat = physical_damage  (physical attacks)
///      | blast_damage     (super / ultimate attacks)
/// raw = attack.damage + stat
///
/// if transformed:
///     raw = raw * (100 + transform_damage_bonus_percent) / 100
/// ```
pub fn calculate_damage(attacker: &Combatant, attack: &Attack, config: &BattleConfig) -> u32 {
    let stat = match attack.category() {
        AttackCategory::Physical => attacker.stats().physical_damage,
        AttackCategory::Super | AttackCategory::Ultimate => attacker.stats().blast_damage,
    };
    let raw = attack.damage().saturating_add(stat);

    if attacker.is_transformed() {
        scale_percent(raw, 100u32.saturating_add(config.transform_damage_bonus_percent))
    } else {
        raw
    }
}

/// Reduce damage against a blocking target by the category's mitigation ratio.
pub fn mitigate(damage: u32, category: AttackCategory, config: &BattleConfig) -> u32 {
    scale_percent(damage, 100 - config.mitigation.percent(category))
}

/// Apply damage to current HP.
///
/// # Returns
///
/// New HP value (clamped to 0)
pub fn apply_damage(current_hp: u32, damage: u32) -> u32 {
    current_hp.saturating_sub(damage)
}

fn scale_percent(value: u32, percent: u32) -> u32 {
    let scaled = u64::from(value) * u64::from(percent) / 100;
    u32::try_from(scaled).unwrap_or(u32::MAX)
}
