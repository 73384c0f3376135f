//! Structured logging of battle events.

use battle_core::{BattleEvent, BattleEventKind, BattleObserver};

/// Battle observer that logs every event through `tracing` at `info`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl BattleObserver for TracingObserver {
    fn on_battle_event(&mut self, event: &BattleEvent) {
        let battle = event.battle;
        let turn = event.turn;
        match &event.kind {
            BattleEventKind::Started => tracing::info!(%battle, "battle started"),
            BattleEventKind::NewTurn { current } => {
                tracing::info!(%battle, turn, %current, "new turn")
            }
            BattleEventKind::Attack {
                side,
                attack,
                report,
            } => tracing::info!(
                %battle,
                turn,
                %side,
                attack = attack.name(),
                damage = report.damage,
                mitigated = report.mitigated,
                target_health = report.target_health,
                "attack"
            ),
            BattleEventKind::Block { side } => tracing::info!(%battle, turn, %side, "block"),
            BattleEventKind::UseItem { side, item } => {
                tracing::info!(%battle, turn, %side, %item, "item used")
            }
            BattleEventKind::Ended { winner } => {
                tracing::info!(%battle, turn, %winner, "battle ended")
            }
        }
    }
}
