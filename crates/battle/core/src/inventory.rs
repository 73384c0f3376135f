//! Consumables a player can bring into battle.

/// Items that can be collected on the world map.
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
pub enum Collectible {
    /// Restores health and stamina to full. Usable in battle.
    SenzuBean,
    /// Summoning material. No battle use.
    DragonBall,
}

/// Inventory provider consulted by [`crate::Battle::use_item`].
pub trait Inventory {
    /// Number of `item` held.
    fn count(&self, item: Collectible) -> u32;

    /// Removes one `item`. Returns false, changing nothing, when none are held.
    fn consume(&mut self, item: Collectible) -> bool;
}

/// Collectible counts of a player.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Player {
    senzu_beans: u32,
    dragon_balls: u32,
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_senzu_beans(mut self, count: u32) -> Self {
        self.senzu_beans = count;
        self
    }

    pub fn with_dragon_balls(mut self, count: u32) -> Self {
        self.dragon_balls = count;
        self
    }

    pub fn senzu_beans(&self) -> u32 {
        self.senzu_beans
    }

    pub fn dragon_balls(&self) -> u32 {
        self.dragon_balls
    }

    pub fn collect(&mut self, item: Collectible) {
        let slot = self.slot_mut(item);
        *slot = slot.saturating_add(1);
    }

    fn slot_mut(&mut self, item: Collectible) -> &mut u32 {
        match item {
            Collectible::SenzuBean => &mut self.senzu_beans,
            Collectible::DragonBall => &mut self.dragon_balls,
        }
    }
}

impl Inventory for Player {
    fn count(&self, item: Collectible) -> u32 {
        match item {
            Collectible::SenzuBean => self.senzu_beans,
            Collectible::DragonBall => self.dragon_balls,
        }
    }

    fn consume(&mut self, item: Collectible) -> bool {
        let slot = self.slot_mut(item);
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }
}
