//! Battle state machine.
//!
//! The [`Battle`] is the authoritative owner of both combatants. Every action
//! runs the same pipeline:
//!
//! ```text
//! phase check → resolve (or direct mutation) → action event → end of turn
//! ```
//!
//! End of turn either declares a winner (`Ended`, terminal) or hands the turn
//! to the other side (`NewTurn`). An action that fails leaves the battle
//! exactly as it was and emits nothing.

mod turns;

use crate::ai::{AiPolicy, Decision, DecisionContext};
use crate::attack::{Attack, AttackCategory};
use crate::combat::{self, AttackReport};
use crate::combatant::{Combatant, Side};
use crate::config::BattleConfig;
use crate::error::{BattleError, BattleResult, InvalidAttackReason};
use crate::event::{BattleEvent, BattleEventKind, BattleId, BattleObserver, Observers};
use crate::inventory::{Collectible, Inventory};

/// Lifecycle of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattlePhase {
    NotStarted,
    InProgress,
    /// Terminal.
    Ended { winner: Side },
}

/// A two-sided, turn-based battle.
#[derive(Debug)]
pub struct Battle {
    id: BattleId,
    config: BattleConfig,
    me: Combatant,
    foe: Combatant,
    current: Side,
    phase: BattlePhase,
    turn: u32,
    basic_attack: Attack,
    observers: Observers,
}

impl Battle {
    /// Creates a battle with default balance parameters.
    pub fn new(me: Combatant, foe: Combatant) -> Self {
        Self::with_config(BattleId::default(), me, foe, BattleConfig::default())
    }

    /// Creates a battle. Both combatants are reset to full health and stamina,
    /// zero ki and untransformed; `me` holds the first turn. No event is
    /// emitted until [`Battle::start`].
    pub fn with_config(
        id: BattleId,
        mut me: Combatant,
        mut foe: Combatant,
        config: BattleConfig,
    ) -> Self {
        me.reset_for_battle();
        foe.reset_for_battle();

        Self {
            id,
            config,
            me,
            foe,
            current: Side::Me,
            phase: BattlePhase::NotStarted,
            turn: 0,
            basic_attack: Attack::physical(config.physical_attack_damage),
            observers: Observers::default(),
        }
    }

    /// Adds an observer. Events are delivered in subscription order.
    pub fn subscribe(&mut self, observer: impl BattleObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Adds an already boxed observer.
    pub fn subscribe_boxed(&mut self, observer: Box<dyn BattleObserver>) {
        self.observers.push(observer);
    }

    pub fn id(&self) -> BattleId {
        self.id
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn me(&self) -> &Combatant {
        &self.me
    }

    pub fn foe(&self) -> &Combatant {
        &self.foe
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Me => &self.me,
            Side::Foe => &self.foe,
        }
    }

    fn combatant_mut(&mut self, side: Side) -> &mut Combatant {
        match side {
            Side::Me => &mut self.me,
            Side::Foe => &mut self.foe,
        }
    }

    /// Splits into (actor, target) for the given acting side.
    fn split_mut(&mut self, actor: Side) -> (&mut Combatant, &mut Combatant) {
        match actor {
            Side::Me => (&mut self.me, &mut self.foe),
            Side::Foe => (&mut self.foe, &mut self.me),
        }
    }

    /// Side holding the turn.
    pub fn current_side(&self) -> Side {
        self.current
    }

    pub fn other_side(&self) -> Side {
        self.current.opponent()
    }

    pub fn current_combatant(&self) -> &Combatant {
        self.combatant(self.current)
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    /// Current turn number. 0 before the battle starts.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, BattlePhase::Ended { .. })
    }

    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            BattlePhase::Ended { winner } => Some(winner),
            _ => None,
        }
    }

    /// The basic physical attack every fighter knows.
    pub fn basic_attack(&self) -> &Attack {
        &self.basic_attack
    }

    /// Move set of the side holding the turn: the basic physical attack, then
    /// learned super attacks, then learned ultimate attacks.
    pub fn available_attacks(&self) -> Vec<&Attack> {
        let current = self.current_combatant();
        std::iter::once(&self.basic_attack)
            .chain(current.super_attacks())
            .chain(current.ultimate_attacks())
            .collect()
    }

    /// Subset of [`Battle::available_attacks`] that passes eligibility now.
    pub fn eligible_attacks(&self) -> Vec<&Attack> {
        let current = self.current_combatant();
        self.available_attacks()
            .into_iter()
            .filter(|attack| attack.is_eligible(current))
            .collect()
    }

    /// Looks up an attack of the current move set by name.
    pub fn find_attack(&self, name: &str) -> Option<&Attack> {
        self.available_attacks()
            .into_iter()
            .find(|attack| attack.name() == name)
    }

    /// Context handed to AI policies for the side holding the turn.
    pub fn decision_context(&self) -> DecisionContext<'_> {
        DecisionContext {
            side: self.current,
            actor: self.current_combatant(),
            opponent: self.combatant(self.other_side()),
            eligible: self.eligible_attacks(),
        }
    }

    /// Announces the battle: emits `Started` then `NewTurn` for `me`.
    pub fn start(&mut self) -> BattleResult<()> {
        match self.phase {
            BattlePhase::NotStarted => {}
            BattlePhase::InProgress => return Err(BattleError::AlreadyStarted),
            BattlePhase::Ended { .. } => return Err(BattleError::BattleEnded),
        }

        self.phase = BattlePhase::InProgress;
        self.turn = 1;
        tracing::debug!(battle = %self.id, me = self.me.name(), foe = self.foe.name(), "battle started");

        self.emit(BattleEventKind::Started);
        self.emit(BattleEventKind::NewTurn {
            current: self.current,
        });
        Ok(())
    }

    fn ensure_in_progress(&self) -> BattleResult<()> {
        match self.phase {
            BattlePhase::InProgress => Ok(()),
            BattlePhase::NotStarted => Err(BattleError::NotStarted),
            BattlePhase::Ended { .. } => Err(BattleError::BattleEnded),
        }
    }

    fn knows_attack(&self, side: Side, attack: &Attack) -> bool {
        if attack.category() == AttackCategory::Physical {
            return *attack == self.basic_attack;
        }
        self.combatant(side).has_learned(attack)
    }

    /// Performs `attack` for the side holding the turn, then ends the turn.
    ///
    /// The opponent's blocking flag mitigates the damage. Fails with
    /// [`BattleError::InvalidAttack`] when the attack is not in the move set
    /// or not affordable; nothing changes and no event is emitted.
    pub fn attack(&mut self, attack: &Attack) -> BattleResult<AttackReport> {
        self.ensure_in_progress()?;

        let side = self.current;
        if !self.knows_attack(side, attack) {
            return Err(InvalidAttackReason::NotLearned(attack.name().to_owned()).into());
        }

        let config = self.config;
        let (actor, target) = self.split_mut(side);
        let target_blocking = target.is_blocking();
        let report = combat::resolve_attack(actor, target, attack, target_blocking, &config)
            .inspect_err(|reason| {
                tracing::debug!(%side, attack = attack.name(), %reason, "attack rejected");
            })?;

        self.emit(BattleEventKind::Attack {
            side,
            attack: attack.clone(),
            report,
        });
        self.end_turn();
        Ok(report)
    }

    /// Raises the current side's guard until the opponent's next action
    /// resolves, then ends the turn. Costs nothing.
    pub fn block(&mut self) -> BattleResult<()> {
        self.ensure_in_progress()?;

        let side = self.current;
        self.combatant_mut(side).set_blocking(true);

        self.emit(BattleEventKind::Block { side });
        self.end_turn();
        Ok(())
    }

    /// Uses a collectible for the side holding the turn, then ends the turn.
    ///
    /// A senzu bean restores the acting fighter to full health and stamina.
    /// Fails with [`BattleError::NotEnoughCollectibles`] when the inventory
    /// holds none; dragon balls have no battle use.
    pub fn use_item(
        &mut self,
        inventory: &mut (impl Inventory + ?Sized),
        item: Collectible,
    ) -> BattleResult<()> {
        self.ensure_in_progress()?;

        match item {
            Collectible::SenzuBean => {
                if !inventory.consume(item) {
                    return Err(BattleError::NotEnoughCollectibles { item });
                }
                let side = self.current;
                self.combatant_mut(side).restore();
                self.emit(BattleEventKind::UseItem { side, item });
            }
            Collectible::DragonBall => return Err(BattleError::ItemNotUsable { item }),
        }

        self.end_turn();
        Ok(())
    }

    /// Applies a policy decision for the side holding the turn.
    pub fn apply_decision(&mut self, decision: &Decision) -> BattleResult<()> {
        match decision {
            Decision::Attack(attack) => self.attack(attack).map(|_| ()),
            Decision::Block => self.block(),
        }
    }

    /// Plays the current side automatically using `policy`.
    ///
    /// The policy only ever sees eligible attacks, so a decision can always be
    /// applied.
    pub fn play(&mut self, policy: &mut (impl AiPolicy + ?Sized)) -> BattleResult<Decision> {
        self.ensure_in_progress()?;

        let decision = policy.decide(&self.decision_context());
        self.apply_decision(&decision)?;
        Ok(decision)
    }

    /// Consumes the battle and hands the combatants back as (me, foe).
    pub fn into_combatants(self) -> (Combatant, Combatant) {
        (self.me, self.foe)
    }

    fn emit(&mut self, kind: BattleEventKind) {
        let event = BattleEvent {
            battle: self.id,
            turn: self.turn,
            kind,
        };
        tracing::trace!(battle = %self.id, turn = self.turn, kind = event.kind.as_str(), "emit");
        self.observers.notify(&event);
    }
}
