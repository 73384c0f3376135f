//! Static fighter attributes.

/// Maximums and damage stats of a fighter.
///
/// These never change during a battle. Current values live on
/// [`super::Combatant`] and are always clamped to the maximums here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FighterStats {
    pub max_health: u32,
    pub max_stamina: u32,
    /// Maximum ki a fighter can hold.
    pub max_energy: u32,
    /// Added to the base damage of physical attacks.
    pub physical_damage: u32,
    /// Added to the base damage of super and ultimate attacks.
    pub blast_damage: u32,
}

impl FighterStats {
    pub const fn new(max_health: u32, max_stamina: u32, max_energy: u32) -> Self {
        Self {
            max_health,
            max_stamina,
            max_energy,
            physical_damage: 0,
            blast_damage: 0,
        }
    }

    pub const fn with_damage(mut self, physical_damage: u32, blast_damage: u32) -> Self {
        self.physical_damage = physical_damage;
        self.blast_damage = blast_damage;
        self
    }
}
