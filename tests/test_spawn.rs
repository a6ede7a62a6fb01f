use rand::rngs::StdRng;
use rand::SeedableRng;

use shard_shooter::catalog::{BossKind, EnemyKind, WeaponKind};
use shard_shooter::compute::init_state;
use shard_shooter::config::Tuning;
use shard_shooter::entities::{EnergyShard, GameState};
use shard_shooter::events::{GameEvent, SoundEvent};
use shard_shooter::spawn::*;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn make_state(rng: &mut StdRng) -> GameState {
    init_state(Tuning::default(), rng)
}

// ── Weighted selection ────────────────────────────────────────────────────────

#[test]
fn weighted_pick_converges_to_weights() {
    let mut rng = seeded_rng();
    let table = [(EnemyKind::Basic, 80), (EnemyKind::Scout, 20)];
    let n = 20_000;
    let basics = (0..n).filter(|_| pick_enemy_kind(&table, &mut rng) == EnemyKind::Basic).count();
    let freq = basics as f64 / n as f64;
    assert!((freq - 0.8).abs() < 0.02, "freq = {freq}");
}

#[test]
fn empty_or_zero_weights_fall_back_to_basic() {
    let mut rng = seeded_rng();
    assert_eq!(pick_enemy_kind(&[], &mut rng), EnemyKind::Basic);
    assert_eq!(pick_enemy_kind(&[(EnemyKind::Heavy, 0)], &mut rng), EnemyKind::Basic);
}

#[test]
fn single_entry_table_always_picks_it() {
    let mut rng = seeded_rng();
    for _ in 0..100 {
        assert_eq!(pick_enemy_kind(&[(EnemyKind::Turret, 5)], &mut rng), EnemyKind::Turret);
    }
}

// ── Enemy cadence ─────────────────────────────────────────────────────────────

#[test]
fn enemies_arrive_after_the_spawn_interval() {
    let mut rng = seeded_rng();
    let mut state = make_state(&mut rng);
    // level 1-1 spawns every 3000 ms (x0.8 .. x1.2)
    for _ in 0..23 {
        run(&mut state, 100.0, &mut rng);
    }
    assert!(state.enemies.is_empty());
    for _ in 0..14 {
        run(&mut state, 100.0, &mut rng);
    }
    assert_eq!(state.enemies.len(), 1);
    let e = &state.enemies[0];
    assert_eq!(e.kind, EnemyKind::Basic);
    assert_eq!(e.y(), -50.0);
    assert!(e.x() >= 20.0 && e.x() <= 780.0);
}

#[test]
fn enemy_cap_blocks_spawns_but_resets_timer() {
    let mut rng = seeded_rng();
    let mut state = make_state(&mut rng);
    state.tuning.max_enemies = 0;
    for _ in 0..100 {
        run(&mut state, 100.0, &mut rng);
    }
    assert!(state.enemies.is_empty());
    assert!(state.spawner.enemy_timer_ms <= 3600.0);
}

#[test]
fn zero_dt_spawns_nothing() {
    let mut rng = seeded_rng();
    let mut state = make_state(&mut rng);
    state.spawner.enemy_timer_ms = 1.0e6;
    state.spawner.shard_timer_ms = 1.0e6;
    run(&mut state, 0.0, &mut rng);
    assert!(state.enemies.is_empty());
    assert!(state.shards.is_empty());
}

// ── Shards ────────────────────────────────────────────────────────────────────

#[test]
fn ambient_shards_are_capped() {
    let mut rng = seeded_rng();
    let mut state = make_state(&mut rng);
    state.progress.shards_this_level = 8;
    // two remaining -> ceil(2 * 0.7) = 2 ambient shards at most
    for _ in 0..20 {
        state.spawner.shard_timer_ms = 10_000.0;
        run(&mut state, 1.0, &mut rng);
    }
    assert_eq!(state.shards.len(), 2);
}

#[test]
fn no_shards_once_quota_is_met() {
    let mut rng = seeded_rng();
    let mut state = make_state(&mut rng);
    state.progress.shards_this_level = state.progress.shards_needed;
    state.spawner.shard_timer_ms = 10_000.0;
    run(&mut state, 1.0, &mut rng);
    assert!(state.shards.is_empty());
}

#[test]
fn spawned_shard_falls_within_tuned_speeds() {
    let mut rng = seeded_rng();
    let mut state = make_state(&mut rng);
    spawn_shard(&mut state, 100.0, 50.0, &mut rng);
    let EnergyShard { x, y, fall_speed, .. } = state.shards[0].clone();
    assert_eq!((x, y), (100.0, 50.0));
    assert!((150.0..=200.0).contains(&fall_speed));
}

// ── Weapon drops ──────────────────────────────────────────────────────────────

#[test]
fn weapon_drop_is_guaranteed_after_four_levels() {
    let mut rng = seeded_rng();
    let mut state = make_state(&mut rng);
    state.spawner.levels_since_drop = 3;
    let kind = on_level_advanced(&mut state, &mut rng);
    assert!(kind.is_some());
    assert_ne!(kind, Some(WeaponKind::Pistol));
    assert_eq!(state.weapon_drops.len(), 1);
    assert_eq!(state.spawner.levels_since_drop, 0);
    assert!(state.events.contains(&GameEvent::Sound(SoundEvent::WeaponDrop)));
}

#[test]
fn no_weapon_drop_in_the_first_levels() {
    let mut rng = seeded_rng();
    let mut state = make_state(&mut rng);
    assert_eq!(on_level_advanced(&mut state, &mut rng), None);
    assert_eq!(on_level_advanced(&mut state, &mut rng), None);
    assert_eq!(state.spawner.levels_since_drop, 2);
    assert!(state.weapon_drops.is_empty());
}

#[test]
fn weapon_drop_roll_is_about_thirty_percent() {
    let mut rng = seeded_rng();
    let mut state = make_state(&mut rng);
    let trials = 2000;
    let mut drops = 0;
    for _ in 0..trials {
        state.spawner.levels_since_drop = 2;
        if on_level_advanced(&mut state, &mut rng).is_some() {
            drops += 1;
        }
    }
    let freq = drops as f64 / trials as f64;
    assert!((freq - 0.3).abs() < 0.05, "freq = {freq}");
}

#[test]
fn drops_never_offer_the_equipped_weapon() {
    let mut rng = seeded_rng();
    let mut state = make_state(&mut rng);
    state.player.weapon = WeaponKind::Laser;
    for _ in 0..200 {
        assert_ne!(spawn_weapon_drop(&mut state, &mut rng), Some(WeaponKind::Laser));
    }
}

// ── Bosses ────────────────────────────────────────────────────────────────────

#[test]
fn bosses_enter_top_centre() {
    let mut rng = seeded_rng();
    let mut state = make_state(&mut rng);
    spawn_boss(&mut state, BossKind::Stage1);
    let boss = &state.bosses[0];
    assert_eq!(boss.motion.x, (800.0 - 80.0) / 2.0);
    assert_eq!(boss.motion.y, 100.0);
    assert!(state.events.contains(&GameEvent::BossSpawned(BossKind::Stage1)));
    assert!(state.events.contains(&GameEvent::Sound(SoundEvent::BossSpawn)));
}

#[test]
fn reset_for_stage_clears_timers() {
    let mut director = SpawnDirector::new();
    director.enemy_timer_ms = 500.0;
    director.shard_timer_ms = 700.0;
    director.levels_since_drop = 2;
    director.reset_for_stage();
    assert_eq!(director, SpawnDirector::new());
}
