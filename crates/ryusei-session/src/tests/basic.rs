use super::*;

// --- End to end ---

#[test]
fn test_single_word_battle() {
    let mut battle = make_battle(&[("あい", "愛")]);
    let spawned = battle.spawn();
    assert_eq!(
        spawned,
        Notification::Spawned {
            enemy: 0,
            word: 0,
            display: "愛".into(),
            predicted: "ai".into(),
        }
    );

    assert_eq!(
        battle.tick(&['a']),
        vec![
            Notification::Locked { enemy: 0 },
            Notification::KeyAccepted {
                key: 'a',
                enemy: 0,
                confirmed: "a".into(),
                typed: "a".into(),
                predicted: "i".into(),
            },
        ]
    );
    assert_eq!(battle.locked(), Some(0));

    assert_eq!(
        battle.tick(&['i']),
        vec![
            Notification::KeyAccepted {
                key: 'i',
                enemy: 0,
                confirmed: "ai".into(),
                typed: "ai".into(),
                predicted: String::new(),
            },
            Notification::Destroyed {
                enemy: 0,
                points: 100,
            },
        ]
    );
    assert_eq!(battle.enemy_count(), 0);
    assert_eq!(battle.locked(), None);
    assert_eq!(battle.scoreboard().score, 100);
    assert_eq!(battle.scoreboard().accuracy(), 100.0);
}

#[test]
fn test_one_key_word_locks_and_completes() {
    let mut battle = make_battle(&[("え", "絵")]);
    battle.spawn();
    let out = battle.tick(&['e']);
    assert_eq!(out.len(), 3);
    assert_eq!(out[0], Notification::Locked { enemy: 0 });
    assert!(matches!(out[2], Notification::Destroyed { enemy: 0, .. }));
}

#[test]
fn test_trailing_n_word_through_battle() {
    let mut battle = make_battle(&[("かんじ", "漢字")]);
    battle.spawn();
    let out = type_string(&mut battle, "kannji");
    assert!(matches!(
        out.last(),
        Some(Notification::Destroyed { points: 100, .. })
    ));
    assert_eq!(battle.scoreboard().correct, 6);
    assert_eq!(battle.scoreboard().incorrect, 0);
}

// --- Spawning ---

#[test]
fn test_spawn_skipped_when_kana_in_use() {
    let mut battle = make_battle(&[("あめ", "雨"), ("あさ", "朝")]);
    assert!(matches!(battle.spawn(), Notification::Spawned { .. }));
    assert_eq!(battle.spawn(), Notification::SpawnSkipped);
    assert_eq!(battle.enemy_count(), 1);
}

#[test]
fn test_spawn_skipped_for_overlapping_first_keys() {
    // し can start with s, like さ.
    let mut battle = make_battle(&[("しま", "島"), ("さくら", "桜")]);
    assert!(matches!(battle.spawn(), Notification::Spawned { .. }));
    assert_eq!(battle.spawn(), Notification::SpawnSkipped);
}

#[test]
fn test_spawn_cadence() {
    let mut config = quiet_config();
    config.spawn_ticks = 3;
    let mut battle = Battle::new(make_vocab(&[("あめ", "雨"), ("いぬ", "犬")]), config);
    assert!(battle.tick(&[]).is_empty());
    assert!(battle.tick(&[]).is_empty());
    assert!(matches!(
        battle.tick(&[]).as_slice(),
        [Notification::Spawned { .. }]
    ));
    assert_eq!(battle.current_tick(), 3);
}

#[test]
fn test_enemy_ids_are_not_reused() {
    let mut battle = make_battle(&[("え", "絵")]);
    battle.spawn();
    type_string(&mut battle, "e");
    assert!(matches!(
        battle.spawn(),
        Notification::Spawned { enemy: 1, .. }
    ));
}

// --- Locking and exclusion ---

#[test]
fn test_lock_releases_exclusion() {
    let mut battle = make_battle(&[("あめ", "雨"), ("あさ", "朝")]);
    battle.spawn();
    assert!(!battle.selector().is_selectable('あ'));
    battle.tick(&['a']);
    assert!(battle.selector().is_selectable('あ'));

    // A second あ word may now spawn while the first is being typed.
    assert!(matches!(battle.spawn(), Notification::Spawned { enemy: 1, .. }));
    assert!(battle.roster.is_indexed(1));
    assert!(!battle.roster.is_indexed(0));
}

#[test]
fn test_locked_enemy_is_removed_from_index() {
    let mut battle = make_battle(&[("かんじ", "漢字"), ("あめ", "雨")]);
    battle.spawn();
    battle.spawn();
    let keys_before = battle.roster.index().len();
    let target = battle.roster.index()[&'k'];
    battle.tick(&['k']);
    assert_eq!(battle.locked(), Some(target));
    assert!(!battle.roster.is_indexed(target));
    // か is indexed under k and c.
    assert_eq!(battle.roster.index().len(), keys_before - 2);
}

// --- Collisions ---

#[test]
fn test_collision_of_unlocked_enemy() {
    let mut battle = make_battle(&[("あめ", "雨")]);
    battle.spawn();
    assert_eq!(
        battle.collide(0),
        Some(Notification::Collided {
            enemy: 0,
            health: 4
        })
    );
    assert_eq!(battle.enemy_count(), 0);
    assert!(battle.roster.index().is_empty());
    assert!(battle.selector().is_selectable('あ'));
    assert_eq!(battle.scoreboard().damage, 1);
}

#[test]
fn test_collision_of_locked_enemy_clears_lock() {
    let mut battle = make_battle(&[("あめ", "雨")]);
    battle.spawn();
    battle.tick(&['a']);
    assert_eq!(battle.locked(), Some(0));
    assert!(battle.collide(0).is_some());
    assert_eq!(battle.locked(), None);
    assert_eq!(battle.health(), 4);
    assert!(battle.selector().is_selectable('あ'));
    assert_eq!(battle.selector().restriction_count('あ'), 0);
}

#[test]
fn test_collide_unknown_enemy() {
    let mut battle = make_battle(&[("あめ", "雨")]);
    assert_eq!(battle.collide(7), None);
    assert_eq!(battle.health(), 5);
}

#[test]
fn test_movement_reaches_target() {
    let mut config = quiet_config();
    config.speed = 0.25;
    let mut battle = Battle::new(make_vocab(&[("あめ", "雨")]), config);
    battle.spawn();
    assert!(battle.tick(&[]).is_empty());
    assert_eq!(battle.views()[0].position, 0.75);
    battle.tick(&[]);
    battle.tick(&[]);
    assert_eq!(
        battle.tick(&[]),
        vec![Notification::Collided {
            enemy: 0,
            health: 4
        }]
    );
}

// --- Ending ---

#[test]
fn test_deadline_finishes_battle() {
    let mut config = quiet_config();
    config.end_ticks = 3;
    let mut battle = Battle::new(make_vocab(&[("あめ", "雨")]), config);
    for _ in 0..3 {
        assert!(battle.tick(&[]).is_empty());
    }
    let out = battle.tick(&[]);
    assert!(matches!(out.as_slice(), [Notification::Finished(_)]));
    assert!(battle.is_finished());
    assert!(battle.tick(&['a']).is_empty());
    assert_eq!(battle.current_tick(), 4);
}

#[test]
fn test_zero_health_finishes_battle() {
    let mut config = quiet_config();
    config.max_health = 1;
    config.speed = 1.0;
    let mut battle = Battle::new(make_vocab(&[("あめ", "雨")]), config);
    battle.spawn();
    let out = battle.tick(&[]);
    assert_eq!(out.len(), 2);
    assert!(matches!(out[0], Notification::Collided { health: 0, .. }));
    match &out[1] {
        Notification::Finished(result) => assert_eq!(result.residues, 0),
        other => panic!("expected Finished, got {other:?}"),
    }
}

#[test]
fn test_external_collision_to_zero_health_ends_next_tick() {
    let mut config = quiet_config();
    config.max_health = 1;
    config.spawn_ticks = 1;
    let mut battle = Battle::new(make_vocab(&[("あめ", "雨"), ("いぬ", "犬")]), config);
    battle.spawn();
    battle.collide(0);
    assert_eq!(battle.health(), 0);

    let out = battle.tick(&['a']);
    assert!(matches!(out.as_slice(), [Notification::Finished(_)]), "{out:?}");
    assert_eq!(battle.scoreboard().keystrokes(), 0);
    assert_eq!(battle.enemy_count(), 0);
}

#[test]
fn test_spawn_after_finish_is_skipped() {
    let mut battle = make_battle(&[("あめ", "雨")]);
    battle.finish();
    assert_eq!(battle.spawn(), Notification::SpawnSkipped);
    assert_eq!(battle.enemy_count(), 0);
    assert!(battle.selector().is_selectable('あ'));
}

#[test]
fn test_debug_events_are_compiled_in() {
    use tracing::level_filters::{LevelFilter, STATIC_MAX_LEVEL};
    assert!(STATIC_MAX_LEVEL >= LevelFilter::DEBUG, "{STATIC_MAX_LEVEL}");
}

#[test]
fn test_finish_releases_every_exclusion() {
    let mut battle = make_battle(&[("あめ", "雨"), ("いぬ", "犬"), ("うみ", "海")]);
    battle.spawn();
    battle.spawn();
    battle.spawn();
    battle.tick(&['a']);
    battle.finish();
    assert_eq!(battle.enemy_count(), 0);
    for kana in ['あ', 'い', 'う'] {
        assert!(battle.selector().is_selectable(kana), "{kana} still excluded");
    }
}

#[test]
fn test_finish_result_and_idempotence() {
    let mut battle = make_battle(&[("あい", "愛")]);
    battle.spawn();
    type_string(&mut battle, "aqi");
    let result = battle.finish();
    assert_eq!(result.score, 100);
    assert_eq!(result.accuracy, 66.67);
    assert_eq!(result.residues, 5);
    assert_eq!(result.total, 100 + 6667 + 500);
    assert_eq!(battle.finish(), result);
    assert_eq!(battle.result(), Some(result));
}

#[test]
fn test_config_from_default_settings() {
    let s = ryusei_core::settings::parse_settings_toml(
        ryusei_core::settings::DEFAULT_SETTINGS_TOML,
    )
    .unwrap();
    let c = BattleConfig::from_settings(&s, 9);
    assert_eq!(c.end_ticks, 3600);
    assert_eq!(c.spawn_ticks, 60);
    assert_eq!(c.max_health, 5);
    assert!((c.speed - 1.0 * 0.05 / 30.0).abs() < 1e-12);
    assert_eq!(c.seed, 9);
}
