use battle_core::{
    Attack, Battle, BattleConfig, BattleError, BattleEventKind, BattleId, BattlePhase, BattleRng,
    Collectible, Combatant, Decision, EventRecorder, FighterStats, InvalidAttackReason,
    MitigationTable, PcgRng, Player, RandomPolicy, ResourceCost, Side,
};

fn fighter(name: &str) -> Combatant {
    Combatant::new(name, FighterStats::new(100, 50, 5))
}

/// Battle where the basic physical attack deals `damage`.
fn battle_with_physical(damage: u32) -> (Battle, EventRecorder) {
    let config = BattleConfig::default().with_physical_attack_damage(damage);
    let mut battle = Battle::with_config(BattleId(1), fighter("Goku"), fighter("Frieza"), config);
    let recorder = EventRecorder::new();
    battle.subscribe(recorder.clone());
    (battle, recorder)
}

fn physical(battle: &Battle) -> Attack {
    battle.basic_attack().clone()
}

#[test]
fn construction_resets_fighters_and_emits_nothing() {
    let mut me = fighter("Goku").with_transformation();
    me.set_health(3);
    me.set_energy(4);
    let mut foe = fighter("Frieza");
    foe.set_stamina(0);

    let mut battle = Battle::new(me, foe);
    let recorder = EventRecorder::new();
    battle.subscribe(recorder.clone());

    assert_eq!(battle.me().health(), 100);
    assert_eq!(battle.me().energy(), 0);
    assert!(!battle.me().is_transformed());
    assert_eq!(battle.foe().stamina(), 50);
    assert_eq!(battle.current_side(), Side::Me);
    assert_eq!(battle.phase(), BattlePhase::NotStarted);
    assert!(recorder.events().is_empty());
}

#[test]
fn start_emits_started_then_new_turn_for_me() {
    let (mut battle, recorder) = battle_with_physical(10);

    battle.start().unwrap();

    assert_eq!(recorder.kinds(), vec!["started", "new_turn"]);
    let events = recorder.events();
    assert_eq!(events[1].kind, BattleEventKind::NewTurn { current: Side::Me });
    assert!(events.iter().all(|event| event.battle == BattleId(1)));
    assert_eq!(battle.current_side(), Side::Me);
    assert_eq!(battle.phase(), BattlePhase::InProgress);
}

#[test]
fn start_twice_is_rejected() {
    let (mut battle, _) = battle_with_physical(10);
    battle.start().unwrap();

    assert_eq!(battle.start(), Err(BattleError::AlreadyStarted));
}

#[test]
fn actions_before_start_are_rejected() {
    let (mut battle, recorder) = battle_with_physical(10);
    let attack = physical(&battle);

    assert_eq!(battle.attack(&attack), Err(BattleError::NotStarted));
    assert_eq!(battle.block(), Err(BattleError::NotStarted));
    assert!(recorder.events().is_empty());
}

#[test]
fn physical_attack_hits_and_passes_the_turn() {
    let (mut battle, recorder) = battle_with_physical(10);
    battle.start().unwrap();
    recorder.drain();

    let attack = physical(&battle);
    battle.attack(&attack).unwrap();

    assert_eq!(battle.foe().health(), 90);
    assert_eq!(battle.current_side(), Side::Foe);
    assert_eq!(recorder.kinds(), vec!["attack", "new_turn"]);

    let events = recorder.events();
    match &events[0].kind {
        BattleEventKind::Attack {
            side,
            attack: used,
            report,
        } => {
            assert_eq!(*side, Side::Me);
            assert_eq!(used, &attack);
            assert_eq!(report.damage, 10);
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(events[1].kind, BattleEventKind::NewTurn { current: Side::Foe });
    assert_eq!(events[1].turn, 2);
}

#[test]
fn lethal_attack_ends_the_battle() {
    let config = BattleConfig::default().with_physical_attack_damage(15);
    let mut battle =
        Battle::with_config(BattleId(2), fighter("Goku"), fighter("Frieza"), config);
    let recorder = EventRecorder::new();
    battle.subscribe(recorder.clone());
    battle.start().unwrap();

    // Trade blows until both sides sit at 10 HP.
    let attack = physical(&battle);
    for _ in 0..6 {
        battle.attack(&attack).unwrap();
        battle.attack(&attack).unwrap();
    }
    assert_eq!(battle.foe().health(), 10);
    assert_eq!(battle.me().health(), 10);
    recorder.drain();

    battle.attack(&attack).unwrap();

    assert_eq!(battle.foe().health(), 0);
    assert_eq!(battle.winner(), Some(Side::Me));
    assert_eq!(recorder.kinds(), vec!["attack", "ended"]);
    assert_eq!(
        recorder.events()[1].kind,
        BattleEventKind::Ended { winner: Side::Me }
    );
}

#[test]
fn ended_battle_rejects_everything_and_stays_quiet() {
    let (mut battle, recorder) = battle_with_physical(100);
    battle.start().unwrap();
    let attack = physical(&battle);
    battle.attack(&attack).unwrap();
    assert!(battle.is_over());
    recorder.drain();

    let me_before = battle.me().clone();
    let foe_before = battle.foe().clone();
    let mut player = Player::new().with_senzu_beans(3);

    assert_eq!(battle.attack(&attack), Err(BattleError::BattleEnded));
    assert_eq!(battle.block(), Err(BattleError::BattleEnded));
    assert_eq!(
        battle.use_item(&mut player, Collectible::SenzuBean),
        Err(BattleError::BattleEnded)
    );
    let mut policy = RandomPolicy::new(PcgRng::seed_from_u64(1));
    assert_eq!(battle.play(&mut policy), Err(BattleError::BattleEnded));
    assert_eq!(battle.start(), Err(BattleError::BattleEnded));

    assert!(recorder.events().is_empty());
    assert_eq!(battle.me(), &me_before);
    assert_eq!(battle.foe(), &foe_before);
    assert_eq!(player.senzu_beans(), 3);
}

#[test]
fn senzu_bean_without_stock_fails_cleanly() {
    let (mut battle, recorder) = battle_with_physical(10);
    battle.start().unwrap();
    let attack = physical(&battle);
    battle.attack(&attack).unwrap();
    battle.attack(&attack).unwrap();
    recorder.drain();

    let mut player = Player::new();
    let result = battle.use_item(&mut player, Collectible::SenzuBean);

    assert_eq!(
        result,
        Err(BattleError::NotEnoughCollectibles {
            item: Collectible::SenzuBean
        })
    );
    assert!(recorder.events().is_empty());
    assert_eq!(battle.me().health(), 90);
    assert_eq!(battle.current_side(), Side::Me);
}

#[test]
fn senzu_bean_restores_and_consumes() {
    let (mut battle, recorder) = battle_with_physical(10);
    battle.start().unwrap();
    let attack = physical(&battle);
    battle.attack(&attack).unwrap();
    battle.attack(&attack).unwrap();
    recorder.drain();

    let mut player = Player::new().with_senzu_beans(2);
    battle.use_item(&mut player, Collectible::SenzuBean).unwrap();

    assert_eq!(battle.me().health(), 100);
    assert_eq!(battle.me().stamina(), 50);
    assert_eq!(player.senzu_beans(), 1);
    assert_eq!(recorder.kinds(), vec!["use_item", "new_turn"]);
    assert_eq!(battle.current_side(), Side::Foe);
}

#[test]
fn dragon_balls_have_no_battle_use() {
    let (mut battle, recorder) = battle_with_physical(10);
    battle.start().unwrap();
    recorder.drain();

    let mut player = Player::new().with_dragon_balls(7);
    assert_eq!(
        battle.use_item(&mut player, Collectible::DragonBall),
        Err(BattleError::ItemNotUsable {
            item: Collectible::DragonBall
        })
    );
    assert_eq!(player.dragon_balls(), 7);
    assert!(recorder.events().is_empty());
}

#[test]
fn block_halves_the_next_physical_hit_then_drops() {
    let (mut battle, recorder) = battle_with_physical(10);
    battle.start().unwrap();
    recorder.drain();

    battle.block().unwrap();
    assert!(battle.me().is_blocking());
    assert_eq!(battle.current_side(), Side::Foe);

    let attack = physical(&battle);
    let report = battle.attack(&attack).unwrap();

    assert_eq!(report.damage, 5);
    assert_eq!(battle.me().health(), 95);
    assert!(!battle.me().is_blocking());
    assert_eq!(recorder.kinds(), vec!["block", "new_turn", "attack", "new_turn"]);

    // Me attacks, foe attacks again: the old block no longer applies.
    battle.attack(&attack).unwrap();
    battle.attack(&attack).unwrap();
    assert_eq!(battle.me().health(), 85);
}

#[test]
fn block_covers_exactly_one_opposing_action_even_when_it_is_not_an_attack() {
    let (mut battle, _) = battle_with_physical(10);
    battle.start().unwrap();

    battle.block().unwrap(); // me
    battle.block().unwrap(); // foe; me's block is spent here
    assert!(!battle.me().is_blocking());
    assert!(battle.foe().is_blocking());

    let attack = physical(&battle);
    battle.attack(&attack).unwrap(); // me hits a blocking foe
    assert_eq!(battle.foe().health(), 95);
    assert!(!battle.foe().is_blocking());
}

#[test]
fn mitigation_ratio_is_configurable_per_category() {
    let config = BattleConfig::default()
        .with_physical_attack_damage(10)
        .with_mitigation(MitigationTable {
            physical: 100,
            ..MitigationTable::default()
        });
    let mut battle = Battle::with_config(BattleId(3), fighter("Goku"), fighter("Frieza"), config);
    battle.start().unwrap();

    battle.block().unwrap();
    let attack = physical(&battle);
    battle.attack(&attack).unwrap();

    assert_eq!(battle.me().health(), 100);
}

#[test]
fn turn_toggles_after_every_non_terminal_action() {
    let (mut battle, _) = battle_with_physical(1);
    battle.start().unwrap();
    let attack = physical(&battle);

    let mut expected = Side::Me;
    for step in 0..20 {
        assert_eq!(battle.current_side(), expected);
        if step % 3 == 0 {
            battle.block().unwrap();
        } else {
            battle.attack(&attack).unwrap();
        }
        expected = expected.opponent();
    }
}

#[test]
fn unlearned_attack_is_invalid() {
    let (mut battle, recorder) = battle_with_physical(10);
    battle.start().unwrap();
    recorder.drain();

    let stranger = Attack::super_attack("Death Beam", 40);
    assert_eq!(
        battle.attack(&stranger),
        Err(BattleError::InvalidAttack(InvalidAttackReason::NotLearned(
            "Death Beam".to_owned()
        )))
    );

    let forged = Attack::physical(9_999);
    assert!(matches!(
        battle.attack(&forged),
        Err(BattleError::InvalidAttack(InvalidAttackReason::NotLearned(_)))
    ));
    assert!(recorder.events().is_empty());
    assert_eq!(battle.current_side(), Side::Me);
}

#[test]
fn unaffordable_attack_changes_nothing() {
    let blast = Attack::super_attack("Kamehameha", 30);
    let me = fighter("Goku").with_super_attacks([blast.clone()]);
    let mut battle = Battle::new(me, fighter("Frieza"));
    let recorder = EventRecorder::new();
    battle.subscribe(recorder.clone());
    battle.start().unwrap();
    recorder.drain();

    let result = battle.attack(&blast);

    assert_eq!(
        result,
        Err(BattleError::InvalidAttack(
            InvalidAttackReason::InsufficientEnergy { have: 0, need: 1 }
        ))
    );
    assert_eq!(battle.foe().health(), 100);
    assert_eq!(battle.current_side(), Side::Me);
    assert!(recorder.events().is_empty());
}

#[test]
fn paid_attack_deducts_exactly_its_cost() {
    let blast = Attack::super_attack("Kamehameha", 30).with_cost(ResourceCost::new(5, 1));
    let me = fighter("Goku").with_super_attacks([blast.clone()]);
    let mut battle = Battle::with_config(
        BattleId(4),
        me,
        fighter("Frieza"),
        BattleConfig::default().with_physical_attack_damage(1),
    );
    battle.start().unwrap();

    // Build one ki with a physical attack, let the foe block.
    let physical = physical(&battle);
    battle.attack(&physical).unwrap();
    battle.block().unwrap();
    assert_eq!(battle.me().energy(), 1);

    let foe_health = battle.foe().health();
    battle.attack(&blast).unwrap();

    assert_eq!(battle.me().energy(), 0);
    assert_eq!(battle.me().stamina(), 45);
    assert!(battle.foe().health() <= foe_health);
}

#[test]
fn eligible_attacks_always_include_physical() {
    let blast = Attack::super_attack("Kamehameha", 30);
    let bomb = Attack::ultimate("Spirit Bomb", 90);
    let me = fighter("Goku")
        .with_super_attacks([blast.clone()])
        .with_ultimate_attacks([bomb.clone()]);
    let battle = Battle::new(me, fighter("Frieza"));

    let available: Vec<&str> = battle
        .available_attacks()
        .into_iter()
        .map(Attack::name)
        .collect();
    assert_eq!(available, vec![Attack::PHYSICAL_NAME, "Kamehameha", "Spirit Bomb"]);

    let eligible = battle.eligible_attacks();
    assert_eq!(eligible, vec![battle.basic_attack()]);
    assert_eq!(battle.find_attack("Spirit Bomb"), Some(&bomb));
}

#[test]
fn transformation_lifecycle_through_turns() {
    let transform = Attack::transform("Super Saiyan");
    let charge = Attack::charge("Maximum Charge", 3);
    let me = Combatant::new("Goku", FighterStats::new(100, 50, 5))
        .with_transformation()
        .with_super_attacks([charge.clone()])
        .with_ultimate_attacks([transform.clone()]);
    let mut battle = Battle::new(me, fighter("Frieza"));
    let recorder = EventRecorder::new();
    battle.subscribe(recorder.clone());
    battle.start().unwrap();

    // Charging is free, so it works from an empty ki pool.
    assert_eq!(battle.me().energy(), 0);
    battle.attack(&charge).unwrap();
    assert_eq!(battle.me().energy(), 3);
    battle.block().unwrap();

    // Upkeep is paid as the transforming turn hands over, before `NewTurn`.
    battle.attack(&transform).unwrap();
    assert!(battle.me().is_transformed());
    assert_eq!(battle.me().energy(), 2);
    assert_eq!(battle.current_side(), Side::Foe);
    assert_eq!(
        recorder.events().last().map(|event| event.kind.clone()),
        Some(BattleEventKind::NewTurn { current: Side::Foe })
    );

    // The foe's turn leaves my ki alone.
    let foe_hit = physical(&battle);
    assert_eq!(
        battle.attack(&foe_hit),
        Ok(battle_core::AttackReport {
            damage: 50,
            mitigated: 0,
            target_health: 50,
            energy_gained: 1,
        })
    );
    assert_eq!(battle.current_side(), Side::Me);
    assert_eq!(battle.me().energy(), 2);

    assert_eq!(
        battle.attack(&transform),
        Err(BattleError::InvalidAttack(InvalidAttackReason::AlreadyTransformed))
    );
}

#[test]
fn observers_fire_in_subscription_order() {
    use std::sync::{Arc, Mutex};

    let order = Arc::new(Mutex::new(Vec::new()));
    let mut battle = Battle::new(fighter("Goku"), fighter("Frieza"));
    for tag in ["first", "second"] {
        let order = Arc::clone(&order);
        battle.subscribe(move |_: &battle_core::BattleEvent| order.lock().unwrap().push(tag));
    }

    battle.start().unwrap();

    assert_eq!(
        *order.lock().unwrap(),
        vec!["first", "second", "first", "second"]
    );
}

#[test]
fn seeded_ai_battles_replay_identically_and_always_terminate() {
    fn run(seed: u64) -> Vec<BattleEventKind> {
        let blast = Attack::super_attack("Kamehameha", 60);
        let me = fighter("Goku").with_super_attacks([blast.clone()]);
        let foe = fighter("Frieza").with_super_attacks([blast]);
        let mut battle = Battle::new(me, foe);
        let recorder = EventRecorder::new();
        battle.subscribe(recorder.clone());
        battle.start().unwrap();

        let mut me_ai = RandomPolicy::new(PcgRng::seed_from_u64(seed));
        let mut foe_ai = RandomPolicy::new(PcgRng::seed_from_u64(seed ^ 0xff));
        let mut guard = 0;
        while !battle.is_over() {
            let decision = match battle.current_side() {
                Side::Me => battle.play(&mut me_ai),
                Side::Foe => battle.play(&mut foe_ai),
            }
            .unwrap();
            if let Decision::Attack(attack) = decision {
                assert!(!attack.name().is_empty());
            }
            guard += 1;
            assert!(guard < 10_000, "battle did not terminate");
        }

        recorder.events().into_iter().map(|event| event.kind).collect()
    }

    let first = run(42);
    assert_eq!(first, run(42));
    assert!(matches!(first.last(), Some(BattleEventKind::Ended { .. })));
    assert_eq!(
        first
            .iter()
            .filter(|kind| matches!(kind, BattleEventKind::Ended { .. }))
            .count(),
        1
    );
}

#[test]
fn health_stays_within_bounds_under_random_play() {
    let mut rng = PcgRng::seed_from_u64(7);
    for round in 0..20 {
        let mut battle = Battle::new(fighter("Goku"), fighter("Frieza"));
        battle.start().unwrap();
        let mut policy = RandomPolicy::new(PcgRng::seed_from_u64(round));
        let mut player = Player::new().with_senzu_beans(1);

        while !battle.is_over() {
            if rng.roll_percent() < 5 && battle.use_item(&mut player, Collectible::SenzuBean).is_ok() {
                continue;
            }
            battle.play(&mut policy).unwrap();
            for side in Side::ALL {
                let combatant = battle.combatant(side);
                assert!(combatant.health() <= combatant.max_health());
            }
        }

        let loser = battle.combatant(battle.winner().unwrap().opponent());
        assert_eq!(loser.health(), 0);
    }
}
