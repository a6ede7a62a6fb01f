use rand::rngs::StdRng;
use rand::SeedableRng;

use shard_shooter::catalog::{level_params, EnemyKind};
use shard_shooter::compute::*;
use shard_shooter::config::Tuning;
use shard_shooter::delay::DeferredEffect;
use shard_shooter::entities::*;
use shard_shooter::events::{dispatch_sounds, AudioSink, GameEvent, SoundEvent};
use shard_shooter::hud::HudSnapshot;
use shard_shooter::input::InputState;

fn make_state() -> GameState {
    init_state(Tuning::default(), &mut seeded_rng())
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn pressed(f: impl FnOnce(&mut InputState)) -> InputState {
    let mut input = InputState::idle();
    f(&mut input);
    input
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_player_position() {
    let s = make_state();
    assert_eq!(s.player.x, 400.0);
    assert_eq!(s.player.y, 500.0);
    assert_eq!(s.player.health, 100);
    assert_eq!(s.player.weapon_level, 1);
}

#[test]
fn init_state_empty_collections() {
    let s = make_state();
    assert!(s.enemies.is_empty());
    assert!(s.bosses.is_empty());
    assert!(s.bullets.is_empty());
    assert!(s.shards.is_empty());
    assert!(s.weapon_drops.is_empty());
    assert!(s.delayed.is_empty());
    assert!(!s.stars.is_empty());
    assert_eq!(s.score, 0);
    assert_eq!(s.frame, 0);
    assert_eq!(s.status, GameStatus::Playing);
}

#[test]
fn init_state_starts_at_first_level() {
    let s = make_state();
    assert_eq!((s.progress.stage, s.progress.level), (1, 1));
    assert_eq!(s.progress.shards_needed, 10);
    assert_eq!(s.field, Field { width: 800.0, height: 600.0 });
}

// ── tick ──────────────────────────────────────────────────────────────────────

#[test]
fn tick_does_not_mutate_its_input() {
    let s = make_state();
    let next = tick(&s, &InputState::idle(), 16.0, &mut seeded_rng());
    assert_eq!(s.clock_ms, 0.0);
    assert_eq!(next.clock_ms, 16.0);
    assert_eq!(next.frame, 1);
}

#[test]
fn zero_delta_moves_nothing() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.enemies.push(Enemy::spawn(EnemyKind::Basic, 100.0, 100.0, 1, level_params(1, 1), &mut rng));
    s.shards.push(EnergyShard::new(200.0, 200.0, 150.0));

    let next = tick(&s, &pressed(|i| i.left = true), 0.0, &mut rng);

    assert_eq!((next.enemies[0].x(), next.enemies[0].y()), (100.0, 100.0));
    assert_eq!(next.enemies[0].health, 30.0);
    assert_eq!(next.shards[0].center(), (200.0, 200.0));
    assert_eq!(next.player.x, 400.0);
    assert_eq!(next.clock_ms, 0.0);
}

#[test]
fn oversized_deltas_are_clamped() {
    let s = make_state();
    let next = tick(&s, &InputState::idle(), 5_000.0, &mut seeded_rng());
    assert_eq!(next.clock_ms, 100.0);
}

#[test]
fn fire_spawns_a_bullet_and_a_sound() {
    let s = make_state();
    let next = tick(&s, &pressed(|i| i.fire = true), 16.0, &mut seeded_rng());
    let shots: Vec<_> = next.bullets.iter().filter(|b| b.owner == Owner::Player).collect();
    assert_eq!(shots.len(), 1);
    assert!(next.events.contains(&GameEvent::Sound(SoundEvent::Shoot)));
}

#[test]
fn holding_fire_respects_the_interval() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    let fire = pressed(|i| i.fire = true);
    // pistol fires every 300 ms: t = 16, 332, 648, 964
    for _ in 0..62 {
        s = tick(&s, &fire, 16.0, &mut rng);
    }
    assert_eq!(s.bullets.iter().filter(|b| b.owner == Owner::Player).count(), 4);
}

#[test]
fn boss_shards_land_on_schedule() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    for due in [0.0, 200.0, 400.0] {
        s.delayed.schedule(due, DeferredEffect::SpawnShard { x: 100.0, y: 100.0 });
    }

    s = tick(&s, &InputState::idle(), 16.0, &mut rng);
    assert_eq!(s.shards.len(), 1);
    for _ in 0..12 {
        s = tick(&s, &InputState::idle(), 16.0, &mut rng);
    }
    assert_eq!(s.shards.len(), 2);
    for _ in 0..13 {
        s = tick(&s, &InputState::idle(), 16.0, &mut rng);
    }
    assert_eq!(s.shards.len(), 3);
    assert!(s.delayed.is_empty());
}

// ── Pause ─────────────────────────────────────────────────────────────────────

#[test]
fn pause_is_edge_triggered() {
    let mut rng = seeded_rng();
    let down = pressed(|i| i.pause = true);
    let up = InputState::idle();

    let s = tick(&make_state(), &down, 16.0, &mut rng);
    assert_eq!(s.status, GameStatus::Paused);
    let s = tick(&s, &down, 16.0, &mut rng);
    assert_eq!(s.status, GameStatus::Paused);
    let s = tick(&s, &up, 16.0, &mut rng);
    assert_eq!(s.status, GameStatus::Paused);
    let s = tick(&s, &down, 16.0, &mut rng);
    assert_eq!(s.status, GameStatus::Playing);
}

#[test]
fn paused_game_stands_still() {
    let mut rng = seeded_rng();
    let s = toggle_pause(&make_state());
    let next = tick(&s, &pressed(|i| i.right = true), 16.0, &mut rng);
    assert_eq!(next.clock_ms, 0.0);
    assert_eq!(next.player.x, 400.0);
}

#[test]
fn toggle_pause_only_affects_play() {
    let s = make_state();
    let paused = toggle_pause(&s);
    assert_eq!(paused.status, GameStatus::Paused);
    assert_eq!(toggle_pause(&paused).status, GameStatus::Playing);

    let mut over = make_state();
    over.status = GameStatus::GameOver;
    assert_eq!(toggle_pause(&over).status, GameStatus::GameOver);
}

// ── clamp_frame_delta ─────────────────────────────────────────────────────────

#[test]
fn clamp_frame_delta_bounds() {
    assert_eq!(clamp_frame_delta(16.0, 100.0), 16.0);
    assert_eq!(clamp_frame_delta(250.0, 100.0), 100.0);
    assert_eq!(clamp_frame_delta(-5.0, 100.0), 0.0);
    assert_eq!(clamp_frame_delta(f32::NAN, 100.0), 0.0);
    assert_eq!(clamp_frame_delta(f32::INFINITY, 100.0), 0.0);
}

// ── restart ───────────────────────────────────────────────────────────────────

#[test]
fn restart_resets_everything() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.score = 9000;
    s.status = GameStatus::GameOver;
    s.progress.stage = 4;
    s.progress.level = 3;
    s.player.weapon_level = 4;
    s.enemies.push(Enemy::spawn(EnemyKind::Heavy, 10.0, 10.0, 1, level_params(1, 1), &mut rng));
    s.delayed.schedule(50.0, DeferredEffect::SpawnShard { x: 0.0, y: 0.0 });
    s.tuning.max_enemies = 7;

    let fresh = restart(&s, &mut rng);

    assert_eq!(fresh.score, 0);
    assert_eq!(fresh.status, GameStatus::Playing);
    assert_eq!((fresh.progress.stage, fresh.progress.level), (1, 1));
    assert_eq!(fresh.player.weapon_level, 1);
    assert!(fresh.enemies.is_empty());
    assert!(fresh.delayed.is_empty());
    assert_eq!(fresh.tuning.max_enemies, 7);
}

// ── Determinism ───────────────────────────────────────────────────────────────

fn play_session(seed: u64) -> GameState {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut s = init_state(Tuning::default(), &mut rng);
    for frame in 0..600 {
        let input = pressed(|i| {
            i.fire = true;
            i.left = frame % 120 < 60;
            i.right = !i.left;
        });
        s = tick(&s, &input, 16.0, &mut rng);
    }
    s
}

#[test]
fn same_seed_replays_the_same_session() {
    let a = play_session(7);
    let b = play_session(7);
    assert_eq!(a.score, b.score);
    assert_eq!(a.clock_ms, b.clock_ms);
    assert_eq!((a.player.x, a.player.y), (b.player.x, b.player.y));
    assert_eq!(a.enemies.len(), b.enemies.len());
    for (ea, eb) in a.enemies.iter().zip(&b.enemies) {
        assert_eq!((ea.kind, ea.x(), ea.y()), (eb.kind, eb.x(), eb.y()));
    }
    assert_eq!(a.bullets.len(), b.bullets.len());
    assert_eq!(a.progress, b.progress);
}

// ── Sanitising ────────────────────────────────────────────────────────────────

#[test]
fn non_finite_entities_are_swept() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    let mut broken = Enemy::spawn(EnemyKind::Basic, 100.0, 100.0, 1, level_params(1, 1), &mut rng);
    broken.motion.x = f32::NAN;
    s.enemies.push(broken);
    s.enemies.push(Enemy::spawn(EnemyKind::Basic, 200.0, 100.0, 1, level_params(1, 1), &mut rng));
    s.shards.push(EnergyShard::new(f32::INFINITY, 0.0, 150.0));
    s.player.y = f32::NAN;

    sweep_non_finite(&mut s);

    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.enemies[0].x(), 200.0);
    assert!(s.shards.is_empty());
    assert_eq!((s.player.x, s.player.y), (400.0, 500.0));
}

// ── HUD ───────────────────────────────────────────────────────────────────────

#[test]
fn hud_reports_the_opening_state() {
    let hud = HudSnapshot::capture(&make_state());
    assert_eq!(hud.level, "1-1");
    assert_eq!(hud.stage_name, "Deep Space");
    assert_eq!(hud.weapon, "Pistol Lv.1");
    assert_eq!(hud.shards, "0/10");
    assert_eq!(hud.health, 100);
    assert_eq!(hud.health_fraction, 1.0);
    assert_eq!(hud.banner, None);
}

#[test]
fn hud_banners_follow_status() {
    let paused = HudSnapshot::capture(&toggle_pause(&make_state()));
    assert_eq!(paused.banner.map(|b| b.text), Some("PAUSED".to_string()));

    let mut over = make_state();
    over.score = 420;
    over.status = GameStatus::GameOver;
    let hud = HudSnapshot::capture(&over);
    assert_eq!(hud.banner.map(|b| b.text), Some("GAME OVER  -  score 420".to_string()));
}

// ── Audio ─────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Recorder(Vec<SoundEvent>);

impl AudioSink for Recorder {
    fn play(&mut self, sound: SoundEvent) {
        self.0.push(sound);
    }
}

#[test]
fn sounds_are_dispatched_in_order() {
    let events = vec![
        GameEvent::Sound(SoundEvent::Hit),
        GameEvent::EnemyDestroyed { kind: EnemyKind::Basic, points: 100 },
        GameEvent::Sound(SoundEvent::Explosion),
    ];
    let mut sink = Recorder::default();
    dispatch_sounds(&events, &mut sink);
    assert_eq!(sink.0, vec![SoundEvent::Hit, SoundEvent::Explosion]);
}
