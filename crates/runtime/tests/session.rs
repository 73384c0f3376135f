use battle_content::ContentFactory;
use battle_core::{
    Attack, BattleEvent, BattleEventKind, Collectible, Combatant, FighterStats, Player, Side,
};
use battle_runtime::{
    BattleAction, BattleOutcome, BattleSession, BlockActionProvider, ChannelActionProvider,
    RuntimeError, ScriptedActionProvider, SessionConfig, Topic,
};
use tokio::sync::broadcast::Receiver;

fn fighter(name: &str, health: u32) -> Combatant {
    Combatant::new(name, FighterStats::new(health, 50, 5))
}

fn physical() -> BattleAction {
    BattleAction::attack(Attack::PHYSICAL_NAME)
}

fn drain(rx: &mut Receiver<BattleEvent>) -> Vec<BattleEventKind> {
    let mut kinds = Vec::new();
    while let Ok(event) = rx.try_recv() {
        kinds.push(event.kind);
    }
    kinds
}

#[tokio::test]
async fn scripted_battle_runs_to_completion() {
    let session = BattleSession::builder()
        .combatant(Side::Me, fighter("Goku", 100))
        .combatant(Side::Foe, fighter("Frieza", 100))
        .provider(Side::Me, ScriptedActionProvider::new([physical(), physical()]))
        .provider(Side::Foe, ScriptedActionProvider::new([physical()]))
        .build()
        .unwrap();
    let mut turns = session.subscribe(Topic::Turn);
    let mut actions = session.subscribe(Topic::Action);

    let outcome = session.run().await.unwrap();

    assert_eq!(outcome.winner, Side::Me);
    assert_eq!(outcome.turns, 3);
    assert_eq!(outcome.me.health(), 50);
    assert_eq!(outcome.foe.health(), 0);
    assert_eq!(outcome.winner_combatant().name(), "Goku");

    assert_eq!(
        drain(&mut turns),
        vec![
            BattleEventKind::Started,
            BattleEventKind::NewTurn { current: Side::Me },
            BattleEventKind::NewTurn { current: Side::Foe },
            BattleEventKind::NewTurn { current: Side::Me },
            BattleEventKind::Ended { winner: Side::Me },
        ]
    );
    let actions = drain(&mut actions);
    assert_eq!(actions.len(), 3);
    assert!(actions.iter().all(BattleEventKind::is_action));
}

#[tokio::test]
async fn channel_fed_side_plays_until_the_sender_hangs_up() {
    let (tx, input) = ChannelActionProvider::channel(8);
    let session = BattleSession::builder()
        .combatant(Side::Me, fighter("Goku", 100))
        .combatant(Side::Foe, fighter("Frieza", 100))
        .provider(Side::Me, input)
        .provider(Side::Foe, ScriptedActionProvider::new([physical()]))
        .build()
        .unwrap();

    tx.send(physical()).await.unwrap();
    drop(tx);

    let error = session.run().await.unwrap_err();
    assert!(matches!(error, RuntimeError::ActionProviderChannelClosed));
}

#[tokio::test]
async fn channel_fed_side_wins_with_live_input() {
    let (tx, input) = ChannelActionProvider::channel(1);
    let session = BattleSession::builder()
        .combatant(Side::Me, fighter("Goku", 100))
        .combatant(Side::Foe, fighter("Frieza", 100))
        .provider(Side::Me, input)
        .provider(Side::Foe, ScriptedActionProvider::new([physical()]))
        .build()
        .unwrap();

    let feeder = tokio::spawn(async move {
        for _ in 0..2 {
            tx.send(physical()).await.unwrap();
        }
    });

    let outcome = session.run().await.unwrap();
    feeder.await.unwrap();

    assert_eq!(outcome.winner, Side::Me);
    assert_eq!(outcome.foe.health(), 0);
}

#[tokio::test]
async fn rejected_actions_are_asked_again() {
    let me_script = ScriptedActionProvider::new([
        BattleAction::attack("Final Flash"),
        BattleAction::UseItem(Collectible::SenzuBean),
        BattleAction::UseItem(Collectible::DragonBall),
        BattleAction::Block,
    ]);
    let mut session = BattleSession::builder()
        .combatant(Side::Me, fighter("Goku", 100))
        .combatant(Side::Foe, fighter("Frieza", 100))
        .provider(Side::Me, me_script)
        .provider(Side::Foe, BlockActionProvider)
        .inventory(Side::Foe, Player::new().with_senzu_beans(1))
        .build()
        .unwrap();

    session.step().await.unwrap();

    assert!(session.battle().me().is_blocking());
    assert_eq!(session.battle().current_side(), Side::Foe);
}

#[tokio::test]
async fn gives_up_after_too_many_invalid_actions() {
    let config = SessionConfig {
        max_invalid_actions: 2,
        ..SessionConfig::default()
    };
    let mut session = BattleSession::builder()
        .config(config)
        .combatant(Side::Me, fighter("Goku", 100))
        .combatant(Side::Foe, fighter("Frieza", 100))
        .provider(
            Side::Me,
            ScriptedActionProvider::new([
                BattleAction::attack("Spirit Bomb"),
                BattleAction::attack("Spirit Bomb"),
                BattleAction::Block,
            ]),
        )
        .provider(Side::Foe, BlockActionProvider)
        .build()
        .unwrap();

    let error = session.step().await.unwrap_err();

    assert!(matches!(
        error,
        RuntimeError::TooManyInvalidActions {
            side: Side::Me,
            limit: 2
        }
    ));
    assert_eq!(session.battle().current_side(), Side::Me);
}

#[tokio::test]
async fn exhausted_script_is_fatal() {
    let mut session = BattleSession::builder()
        .combatant(Side::Me, fighter("Goku", 100))
        .combatant(Side::Foe, fighter("Frieza", 100))
        .provider(Side::Me, ScriptedActionProvider::default())
        .provider(Side::Foe, BlockActionProvider)
        .build()
        .unwrap();

    let error = session.step().await.unwrap_err();
    assert!(matches!(
        error,
        RuntimeError::ProviderExhausted { side: Side::Me }
    ));
}

#[tokio::test]
async fn senzu_bean_comes_out_of_the_side_inventory() {
    let mut session = BattleSession::builder()
        .combatant(Side::Me, fighter("Goku", 200))
        .combatant(Side::Foe, fighter("Frieza", 200))
        .provider(
            Side::Me,
            ScriptedActionProvider::new([
                physical(),
                BattleAction::UseItem(Collectible::SenzuBean),
            ]),
        )
        .provider(Side::Foe, ScriptedActionProvider::new([physical(), physical()]))
        .inventory(Side::Me, Player::new().with_senzu_beans(1))
        .build()
        .unwrap();
    let mut actions = session.subscribe(Topic::Action);

    for _ in 0..4 {
        session.step().await.unwrap();
    }

    assert_eq!(session.battle().me().health(), 150);
    assert_eq!(session.battle().foe().health(), 150);
    assert_eq!(session.inventory(Side::Me).map(Player::senzu_beans), Some(0));
    assert!(drain(&mut actions).contains(&BattleEventKind::UseItem {
        side: Side::Me,
        item: Collectible::SenzuBean,
    }));
}

#[test]
fn build_requires_both_sides() {
    let missing_provider = BattleSession::builder()
        .combatant(Side::Me, fighter("Goku", 100))
        .combatant(Side::Foe, fighter("Frieza", 100))
        .provider(Side::Me, BlockActionProvider)
        .build();
    assert!(matches!(
        missing_provider,
        Err(RuntimeError::ProviderNotSet { side: Side::Foe })
    ));

    let missing_fighter = BattleSession::builder()
        .combatant(Side::Foe, fighter("Frieza", 100))
        .ai(Side::Me)
        .ai(Side::Foe)
        .build();
    assert!(matches!(
        missing_fighter,
        Err(RuntimeError::CombatantNotSet { side: Side::Me })
    ));
}

async fn ai_session(config: &SessionConfig, me: &str, foe: &str) -> BattleOutcome {
    let factory = ContentFactory::bundled();
    let catalog = factory.load_attacks().unwrap();
    let roster = factory.load_roster().unwrap();

    BattleSession::builder()
        .config(config.clone())
        .combatant(Side::Me, roster.combatant(me, &catalog).unwrap())
        .combatant(Side::Foe, roster.combatant(foe, &catalog).unwrap())
        .ai(Side::Me)
        .ai(Side::Foe)
        .build()
        .unwrap()
        .run()
        .await
        .unwrap()
}

#[tokio::test]
async fn seeded_ai_sessions_replay_identically() {
    let config = SessionConfig {
        battle_config: ContentFactory::bundled().load_config().unwrap(),
        seed: Some(2024),
        ..SessionConfig::default()
    };

    let first = ai_session(&config, "goku", "frieza").await;
    let second = ai_session(&config, "goku", "frieza").await;

    assert_eq!(first, second);
    assert!(!first.winner_combatant().is_defeated());
    let loser = match first.winner {
        Side::Me => &first.foe,
        Side::Foe => &first.me,
    };
    assert!(loser.is_defeated());
}
