use crate::combatant::{Side, TurnRole};
use crate::event::BattleEventKind;

use super::{Battle, BattlePhase};

/// Turn sequencing for Battle.
impl Battle {
    /// Runs after every successful action.
    ///
    /// 1. The waiting side's block has now covered one action and drops.
    ///    A block raised this turn belongs to the acting side and stays up.
    /// 2. A side at 0 HP ends the battle (`me` is checked first).
    /// 3. Otherwise the turn passes. The new current side hears `FoeTurn`,
    ///    the side that just acted hears `MyTurn`, then `NewTurn` is emitted.
    pub(super) fn end_turn(&mut self) {
        let acted = self.current;
        let waiting = acted.opponent();

        self.combatant_mut(waiting).set_blocking(false);

        if self.me.is_defeated() {
            self.finish(Side::Foe);
            return;
        }
        if self.foe.is_defeated() {
            self.finish(Side::Me);
            return;
        }

        self.switch_turn();
    }

    fn switch_turn(&mut self) {
        let config = self.config;
        let next = self.current.opponent();
        self.current = next;

        self.combatant_mut(next)
            .on_turn_change(TurnRole::FoeTurn, &config);
        self.combatant_mut(next.opponent())
            .on_turn_change(TurnRole::MyTurn, &config);

        self.turn += 1;
        tracing::trace!(battle = %self.id, turn = self.turn, current = %next, "turn passed");
        self.emit(BattleEventKind::NewTurn { current: next });
    }

    fn finish(&mut self, winner: Side) {
        self.phase = BattlePhase::Ended { winner };
        tracing::debug!(battle = %self.id, turn = self.turn, %winner, "battle ended");
        self.emit(BattleEventKind::Ended { winner });
    }
}
