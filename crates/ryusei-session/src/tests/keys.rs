use super::*;

// --- Routing ---

#[test]
fn test_key_with_no_target_is_a_miss() {
    let mut battle = make_battle(&[("あめ", "雨")]);
    battle.spawn();
    assert_eq!(battle.tick(&['z']), vec![Notification::KeyRejected { key: 'z' }]);
    assert_eq!(battle.locked(), None);
    assert_eq!(battle.scoreboard().incorrect, 1);
    assert_eq!(battle.scoreboard().correct, 0);
}

#[test]
fn test_key_with_no_enemies_is_a_miss() {
    let mut battle = make_battle(&[("あめ", "雨")]);
    assert_eq!(battle.tick(&['a']), vec![Notification::KeyRejected { key: 'a' }]);
}

#[test]
fn test_rejected_key_on_locked_enemy_changes_nothing() {
    let mut battle = make_battle(&[("かんじ", "漢字")]);
    battle.spawn();
    type_string(&mut battle, "ka");
    let before = battle.view(0).unwrap();
    assert_eq!(battle.tick(&['q']), vec![Notification::KeyRejected { key: 'q' }]);
    assert_eq!(battle.view(0).unwrap(), before);
    assert_eq!(battle.locked(), Some(0));
}

#[test]
fn test_locked_enemy_takes_keys_of_other_enemies() {
    // With あめ locked, 'i' goes to あめ (and is rejected) even though いぬ is indexed under it.
    let mut battle = make_battle(&[("あめ", "雨"), ("いぬ", "犬")]);
    battle.spawn();
    battle.spawn();
    battle.tick(&['a']);
    let locked = battle.locked().unwrap();
    assert_eq!(battle.tick(&['i']), vec![Notification::KeyRejected { key: 'i' }]);
    assert_eq!(battle.locked(), Some(locked));
}

#[test]
fn test_views_reflect_lock_and_progress() {
    let mut battle = make_battle(&[("しゃしん", "写真")]);
    battle.spawn();
    let v = &battle.views()[0];
    assert!(!v.locked);
    assert_eq!(v.predicted, "syasinn");
    assert_eq!(v.acceptable_keys, vec!['c', 's']);
    assert_eq!(v.position, 1.0);

    type_string(&mut battle, "sh");
    let v = &battle.views()[0];
    assert!(v.locked);
    assert_eq!(v.confirmed, "");
    assert_eq!(v.typed, "sh");
    assert_eq!(v.predicted, "a");
    assert_eq!(v.reading, "しゃしん");
    assert_eq!(v.display, "写真");
}

#[test]
fn test_key_accepted_carries_partial_unit() {
    let mut battle = make_battle(&[("しま", "島")]);
    battle.spawn();
    let out = battle.tick(&['s']);
    match &out[1] {
        Notification::KeyAccepted {
            confirmed,
            typed,
            predicted,
            ..
        } => {
            assert_eq!(confirmed, "");
            assert_eq!(typed, "s");
            assert_eq!(predicted, "ima");
        }
        other => panic!("expected KeyAccepted, got {other:?}"),
    }
}

// --- Key policies ---

#[test]
fn test_fifo_processes_one_key_per_tick() {
    let mut battle = make_battle(&[("あい", "愛")]);
    battle.spawn();
    let out = battle.tick(&['a', 'i']);
    assert_eq!(out.len(), 2); // Locked + KeyAccepted for 'a'
    assert_eq!(battle.pending_keys(), 1);

    let out = battle.tick(&[]);
    assert!(matches!(
        out.as_slice(),
        [
            Notification::KeyAccepted { key: 'i', .. },
            Notification::Destroyed { .. }
        ]
    ));
    assert_eq!(battle.pending_keys(), 0);
}

#[test]
fn test_latest_keeps_only_last_key() {
    let mut config = quiet_config();
    config.key_policy = KeyPolicy::Latest;
    let mut battle = Battle::new(make_vocab(&[("あい", "愛")]), config);
    battle.spawn();

    let out = battle.tick(&['x', 'q', 'a']);
    assert!(matches!(out[1], Notification::KeyAccepted { key: 'a', .. }));
    assert_eq!(battle.pending_keys(), 0);
    assert_eq!(battle.scoreboard().incorrect, 0);

    let out = battle.tick(&['z', 'i']);
    assert!(matches!(out.last(), Some(Notification::Destroyed { .. })));
}

#[test]
fn test_at_most_one_key_result_per_tick() {
    let mut battle = make_battle(&[("がっこう", "学校")]);
    battle.spawn();
    for _ in 0..3 {
        let out = battle.tick(&['g', 'a', 'k', 'k', 'o']);
        let keyed = out
            .iter()
            .filter(|n| {
                matches!(
                    n,
                    Notification::KeyAccepted { .. } | Notification::KeyRejected { .. }
                )
            })
            .count();
        assert_eq!(keyed, 1);
    }
}

#[test]
fn test_pending_keys_dropped_on_finish() {
    let mut battle = make_battle(&[("あい", "愛")]);
    battle.spawn();
    battle.tick(&['a', 'i', 'u']);
    assert_eq!(battle.pending_keys(), 2);
    battle.finish();
    assert_eq!(battle.pending_keys(), 0);
}
