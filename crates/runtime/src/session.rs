//! Battle session orchestrator.
//!
//! A session owns one [`Battle`], one action provider per side and the event
//! bus, and exposes a builder-based API to drive the battle to its end.

use battle_core::{
    Battle, BattleConfig, BattleEvent, BattleId, BattleObserver, BattlePhase, Combatant, Player,
    Side,
};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::api::{ActionProvider, BattleAction, Result, RuntimeError};
use crate::events::{BusObserver, EventBus, Topic, TracingObserver};
use crate::providers::AiActionProvider;

/// Session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub battle_config: BattleConfig,
    /// Capacity of each event bus topic.
    pub event_buffer_size: usize,
    /// Consecutive rejected actions tolerated from one side before the
    /// session gives up.
    pub max_invalid_actions: u32,
    /// Seed for AI sides. Drawn from the OS when unset.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            battle_config: BattleConfig::default(),
            event_buffer_size: 100,
            max_invalid_actions: 8,
            seed: None,
        }
    }
}

/// Final result of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleOutcome {
    pub battle: BattleId,
    pub winner: Side,
    /// Turn number on which the battle ended.
    pub turns: u32,
    pub me: Combatant,
    pub foe: Combatant,
}

impl BattleOutcome {
    pub fn winner_combatant(&self) -> &Combatant {
        match self.winner {
            Side::Me => &self.me,
            Side::Foe => &self.foe,
        }
    }
}

/// Drives a battle by alternating between the two action providers.
pub struct BattleSession {
    battle: Battle,
    providers: [Box<dyn ActionProvider>; 2],
    inventories: [Option<Player>; 2],
    bus: EventBus,
    config: SessionConfig,
    seed: u64,
}

impl BattleSession {
    /// Create a new session builder
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    pub fn battle(&self) -> &Battle {
        &self.battle
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Seed the AI sides were created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Get a cloneable handle to the event bus
    pub fn bus(&self) -> EventBus {
        self.bus.clone()
    }

    /// Subscribe to battle events of one topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<BattleEvent> {
        self.bus.subscribe(topic)
    }

    pub fn inventory(&self, side: Side) -> Option<&Player> {
        self.inventories[slot(side)].as_ref()
    }

    /// Execute one turn.
    ///
    /// Starts the battle first if needed. The acting side's provider is asked
    /// again after every retryable rejection, up to `max_invalid_actions`
    /// times in a row.
    pub async fn step(&mut self) -> Result<()> {
        self.ensure_started()?;

        let side = self.battle.current_side();
        let limit = self.config.max_invalid_actions;
        let mut rejected = 0;

        loop {
            let action = self.providers[slot(side)]
                .provide_action(side, &self.battle)
                .await?;

            match self.apply(side, &action) {
                Ok(()) => return Ok(()),
                Err(error) if error.is_retryable() => {
                    rejected += 1;
                    tracing::warn!(%side, ?action, %error, rejected, "action rejected");
                    if rejected >= limit {
                        return Err(RuntimeError::TooManyInvalidActions { side, limit });
                    }
                }
                Err(error) => return Err(error),
            }
        }
    }

    /// Run the battle to its end and hand back the result.
    pub async fn run(mut self) -> Result<BattleOutcome> {
        let winner = loop {
            if let Some(winner) = self.battle.winner() {
                break winner;
            }
            self.step().await?;
        };

        let battle = self.battle.id();
        let turns = self.battle.turn();
        let (me, foe) = self.battle.into_combatants();
        tracing::info!(%battle, %winner, turns, "session finished");

        Ok(BattleOutcome {
            battle,
            winner,
            turns,
            me,
            foe,
        })
    }

    fn ensure_started(&mut self) -> Result<()> {
        if self.battle.phase() == BattlePhase::NotStarted {
            self.battle.start()?;
        }
        Ok(())
    }

    fn apply(&mut self, side: Side, action: &BattleAction) -> Result<()> {
        match action {
            BattleAction::Attack(name) => {
                let attack = self.battle.find_attack(name).cloned().ok_or_else(|| {
                    RuntimeError::UnknownAttack {
                        side,
                        name: name.clone(),
                    }
                })?;
                self.battle.attack(&attack)?;
            }
            BattleAction::Block => self.battle.block()?,
            BattleAction::UseItem(item) => {
                let inventory = self.inventories[slot(side)]
                    .as_mut()
                    .ok_or(RuntimeError::NoInventory { side, item: *item })?;
                self.battle.use_item(inventory, *item)?;
            }
        }
        Ok(())
    }
}

fn slot(side: Side) -> usize {
    match side {
        Side::Me => 0,
        Side::Foe => 1,
    }
}

enum ProviderChoice {
    Custom(Box<dyn ActionProvider>),
    Ai,
}

/// Builder for [`BattleSession`].
pub struct SessionBuilder {
    config: SessionConfig,
    battle_id: BattleId,
    combatants: [Option<Combatant>; 2],
    providers: [Option<ProviderChoice>; 2],
    inventories: [Option<Player>; 2],
    observers: Vec<Box<dyn BattleObserver>>,
}

impl SessionBuilder {
    fn new() -> Self {
        Self {
            config: SessionConfig::default(),
            battle_id: BattleId::default(),
            combatants: [None, None],
            providers: [None, None],
            inventories: [None, None],
            observers: Vec::new(),
        }
    }

    /// Override session configuration
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn battle_id(mut self, id: BattleId) -> Self {
        self.battle_id = id;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Set the fighter for a side (required for both sides)
    pub fn combatant(mut self, side: Side, combatant: Combatant) -> Self {
        self.combatants[slot(side)] = Some(combatant);
        self
    }

    /// Set the action provider for a side (required for both sides)
    pub fn provider(mut self, side: Side, provider: impl ActionProvider + 'static) -> Self {
        self.providers[slot(side)] = Some(ProviderChoice::Custom(Box::new(provider)));
        self
    }

    /// Let the random AI play a side, seeded from the session seed.
    pub fn ai(mut self, side: Side) -> Self {
        self.providers[slot(side)] = Some(ProviderChoice::Ai);
        self
    }

    /// Give a side an inventory to draw items from (optional)
    pub fn inventory(mut self, side: Side, inventory: Player) -> Self {
        self.inventories[slot(side)] = Some(inventory);
        self
    }

    /// Add a synchronous battle observer, notified before the event bus.
    pub fn observer(mut self, observer: impl BattleObserver + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Build the session. The battle is created but not started.
    pub fn build(self) -> Result<BattleSession> {
        let Self {
            config,
            battle_id,
            combatants: [me, foe],
            providers,
            inventories,
            observers,
        } = self;

        let me = me.ok_or(RuntimeError::CombatantNotSet { side: Side::Me })?;
        let foe = foe.ok_or(RuntimeError::CombatantNotSet { side: Side::Foe })?;
        let seed = config.seed.unwrap_or_else(rand::random);

        let [me_choice, foe_choice] = providers;
        let providers = [
            resolve_provider(me_choice, Side::Me, seed, battle_id, &config)?,
            resolve_provider(foe_choice, Side::Foe, seed, battle_id, &config)?,
        ];

        let bus = EventBus::with_capacity(config.event_buffer_size);
        let mut battle = Battle::with_config(battle_id, me, foe, config.battle_config);
        for observer in observers {
            battle.subscribe_boxed(observer);
        }
        battle.subscribe(TracingObserver);
        battle.subscribe(BusObserver::new(bus.clone()));

        tracing::debug!(battle = %battle_id, seed, "session built");

        Ok(BattleSession {
            battle,
            providers,
            inventories,
            bus,
            config,
            seed,
        })
    }
}

fn resolve_provider(
    choice: Option<ProviderChoice>,
    side: Side,
    seed: u64,
    battle: BattleId,
    config: &SessionConfig,
) -> Result<Box<dyn ActionProvider>> {
    match choice {
        Some(ProviderChoice::Custom(provider)) => Ok(provider),
        Some(ProviderChoice::Ai) => Ok(Box::new(AiActionProvider::seeded(
            seed,
            battle,
            side,
            &config.battle_config,
        ))),
        None => Err(RuntimeError::ProviderNotSet { side }),
    }
}
