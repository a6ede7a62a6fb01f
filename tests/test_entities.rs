use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use shard_shooter::catalog::{level_params, BossKind, EnemyKind, MovementPattern, WeaponKind};
use shard_shooter::config::Tuning;
use shard_shooter::entities::particle::emit_burst;
use shard_shooter::entities::*;
use shard_shooter::events::{GameEvent, SoundEvent};
use shard_shooter::input::InputState;
use shard_shooter::motion::{self, Motion, Steering, Wobble};
use shard_shooter::render::Rgb;
use shard_shooter::weapon::WeaponTable;

const FIELD: Field = Field { width: 800.0, height: 600.0 };

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Owns everything a `FrameContext` borrows.
struct Harness {
    now_ms: f64,
    level: u32,
    target: Option<(f32, f32)>,
    input: InputState,
    weapons: WeaponTable,
    rng: StdRng,
    spawned: Vec<Bullet>,
    events: Vec<GameEvent>,
}

impl Harness {
    fn new() -> Self {
        Self {
            now_ms: 0.0,
            level: 1,
            target: None,
            input: InputState::idle(),
            weapons: WeaponTable::new(),
            rng: seeded_rng(),
            spawned: Vec::new(),
            events: Vec::new(),
        }
    }

    fn ctx(&mut self) -> FrameContext<'_> {
        FrameContext {
            now_ms: self.now_ms,
            field: FIELD,
            stage: 1,
            level: self.level,
            level_params: level_params(1, self.level),
            target: self.target,
            input: &self.input,
            weapons: &self.weapons,
            rng: &mut self.rng,
            spawned: &mut self.spawned,
            events: &mut self.events,
        }
    }
}

fn basic_enemy(x: f32, y: f32) -> Enemy {
    let mut rng = seeded_rng();
    Enemy::spawn(EnemyKind::Basic, x, y, 1, level_params(1, 1), &mut rng)
}

// ── BoundingBox ───────────────────────────────────────────────────────────────

#[test]
fn overlap_is_symmetric() {
    let boxes = [
        BoundingBox::new(0.0, 0.0, 10.0, 10.0),
        BoundingBox::new(5.0, 5.0, 10.0, 10.0),
        BoundingBox::new(20.0, 0.0, 5.0, 5.0),
        BoundingBox::centered(10.0, 10.0, 4.0, 4.0),
    ];
    for a in &boxes {
        for b in &boxes {
            assert_eq!(a.overlaps(b), b.overlaps(a));
        }
    }
}

#[test]
fn touching_edges_do_not_collide() {
    let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    let right = BoundingBox::new(10.0, 0.0, 10.0, 10.0);
    let below = BoundingBox::new(0.0, 10.0, 10.0, 10.0);
    assert!(!a.overlaps(&right));
    assert!(!a.overlaps(&below));
    assert!(a.overlaps(&BoundingBox::new(9.9, 9.9, 1.0, 1.0)));
}

#[test]
fn centered_box_reports_its_centre() {
    let b = BoundingBox::centered(50.0, 40.0, 10.0, 20.0);
    assert_eq!(b.center(), (50.0, 40.0));
    assert_relative_eq!(b.x, 45.0);
    assert_relative_eq!(b.y, 30.0);
}

#[test]
fn entities_collide_through_their_bounds() {
    let enemy = basic_enemy(100.0, 100.0);
    let mut rng = seeded_rng();
    let shots = shard_shooter::weapon::player_volley(
        &shard_shooter::weapon::resolve(WeaponKind::Pistol, 1),
        (115.0, 115.0),
        1.0,
        &mut rng,
    );
    assert!(shots[0].collides_with(&enemy));
    assert!(enemy.collides_with(&shots[0]));
}

// ── Zero-time idempotence ─────────────────────────────────────────────────────

#[test]
fn zero_dt_leaves_enemy_unchanged() {
    let mut h = Harness::new();
    h.level = 3;
    let mut enemy = basic_enemy(100.0, 200.0);
    enemy.shoot_chance = 1.0;
    let before = (enemy.x(), enemy.y(), enemy.health);
    enemy.update(0.0, &mut h.ctx());
    assert_eq!((enemy.x(), enemy.y(), enemy.health), before);
    assert!(h.spawned.is_empty());
}

#[test]
fn zero_dt_leaves_player_unchanged() {
    let mut h = Harness::new();
    h.input = InputState { left: true, up: true, fire: true, ..InputState::idle() };
    let mut player = Player::new(&Tuning::default());
    let before = (player.x, player.y, player.health);
    player.update(0.0, &mut h.ctx());
    assert_eq!((player.x, player.y, player.health), before);
    assert!(h.spawned.is_empty());
}

#[test]
fn zero_dt_leaves_projectiles_and_pickups_unchanged() {
    let mut h = Harness::new();
    h.target = Some((0.0, 0.0));

    let mut homing = Bullet::homing(300.0, 300.0);
    let mut spiral = Bullet::spiral(300.0, 300.0, 1.0);
    let mut shard = EnergyShard::new(10.0, 10.0, 150.0);
    let mut drop = WeaponDrop::new(10.0, 10.0, WeaponKind::Laser, 200.0);
    let mut boss = Boss::spawn(BossKind::Stage4, 300.0, 100.0);

    homing.update(0.0, &mut h.ctx());
    spiral.update(0.0, &mut h.ctx());
    shard.update(0.0, &mut h.ctx());
    drop.update(0.0, &mut h.ctx());
    boss.update(0.0, &mut h.ctx());

    assert_eq!((homing.x, homing.y, homing.vx, homing.vy), (300.0, 300.0, 0.0, homing.speed));
    assert_eq!((spiral.x, spiral.y), (300.0, 300.0));
    assert_eq!((shard.x, shard.y), (10.0, 10.0));
    assert_eq!((drop.x, drop.y), (10.0, 10.0));
    assert_eq!((boss.motion.x, boss.motion.y, boss.health), (300.0, 100.0, boss.max_health));
    assert!(h.spawned.is_empty());
}

// ── Player ────────────────────────────────────────────────────────────────────

#[test]
fn player_moves_at_base_speed() {
    let mut h = Harness::new();
    h.input = InputState { left: true, ..InputState::idle() };
    let mut player = Player::new(&Tuning::default());
    let x0 = player.x;
    player.update(100.0, &mut h.ctx());
    assert_relative_eq!(player.x, x0 - 30.0);
}

#[test]
fn player_is_clamped_to_the_field() {
    let mut h = Harness::new();
    h.input = InputState { right: true, down: true, ..InputState::idle() };
    let mut player = Player::new(&Tuning::default());
    for _ in 0..100 {
        player.update(100.0, &mut h.ctx());
    }
    assert_relative_eq!(player.x, FIELD.width - player.width);
    assert_relative_eq!(player.y, FIELD.height - player.height);
}

#[test]
fn player_fire_respects_interval() {
    let mut rng = seeded_rng();
    let table = WeaponTable::new();
    let mut player = Player::new(&Tuning::default());
    let mut out = Vec::new();
    assert!(player.try_fire(0.0, &table, &mut rng, &mut out));
    assert!(!player.try_fire(100.0, &table, &mut rng, &mut out));
    assert!(!player.try_fire(300.0, &table, &mut rng, &mut out));
    assert!(player.try_fire(301.0, &table, &mut rng, &mut out));
    assert_eq!(out.len(), 2);
}

#[test]
fn firing_emits_a_shoot_sound() {
    let mut h = Harness::new();
    h.input = InputState { fire: true, ..InputState::idle() };
    let mut player = Player::new(&Tuning::default());
    player.update(16.0, &mut h.ctx());
    assert_eq!(h.spawned.len(), 1);
    assert_eq!(h.events, vec![GameEvent::Sound(SoundEvent::Shoot)]);
}

#[test]
fn fire_rate_upgrade_shortens_interval() {
    let table = WeaponTable::new();
    let mut player = Player::new(&Tuning::default());
    player.upgrades.fire_rate = 1.5;
    assert_relative_eq!(player.fire_interval_ms(&table), 200.0);
}

#[test]
fn player_health_saturates_at_zero() {
    let mut player = Player::new(&Tuning::default());
    let mut last = player.health;
    for amount in [30, 0, 50, 1000, u32::MAX] {
        player.take_damage(amount);
        assert!(player.health <= last);
        last = player.health;
    }
    assert_eq!(player.health, 0);
    assert!(player.is_dead());
}

#[test]
fn weapon_upgrade_caps_at_five() {
    let mut player = Player::new(&Tuning::default());
    for _ in 0..4 {
        assert!(player.upgrade_weapon());
    }
    assert_eq!(player.weapon_level, 5);
    assert!(!player.upgrade_weapon());
}

#[test]
fn collecting_a_weapon_resets_level_and_scales_it() {
    let mut table = WeaponTable::new();
    let mut player = Player::new(&Tuning::default());
    player.weapon_level = 4;
    player.collect_weapon(WeaponKind::Bazooka, &mut table, 2, 3);
    assert_eq!(player.weapon, WeaponKind::Bazooka);
    assert_eq!(player.weapon_level, 1);
    assert!(table.base(WeaponKind::Bazooka).damage > 80.0);
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[test]
fn level_one_enemies_are_slowed() {
    let enemy = basic_enemy(0.0, 0.0);
    assert_relative_eq!(enemy.speed, 100.0 * 0.8 * 0.8);

    let mut rng = seeded_rng();
    let later = Enemy::spawn(EnemyKind::Basic, 0.0, 0.0, 2, level_params(1, 2), &mut rng);
    assert_relative_eq!(later.speed, 90.0);
}

#[test]
fn enemy_health_clamps_at_zero() {
    let mut enemy = basic_enemy(0.0, 0.0);
    enemy.take_damage(1000.0);
    assert_eq!(enemy.health, 0.0);
    assert!(enemy.is_dead());
}

#[test]
fn split_halves_health_and_size() {
    let mut rng = seeded_rng();
    let parent = basic_enemy(100.0, 100.0);
    let [a, b] = parent.split(&mut rng).unwrap();
    for child in [&a, &b] {
        assert_relative_eq!(child.health, 15.0);
        assert_relative_eq!(child.width, 15.0);
        assert_relative_eq!(child.speed, parent.speed * 1.2);
        assert!(!child.carries_shard);
    }
    assert!(a.x() < b.x());
}

#[test]
fn tiny_enemies_do_not_split() {
    let mut rng = seeded_rng();
    let mut enemy = basic_enemy(0.0, 0.0);
    enemy.max_health = 1.0;
    assert!(enemy.split(&mut rng).is_none());
}

#[test]
fn enemies_hold_fire_before_level_three() {
    let mut rng = seeded_rng();
    let mut h = Harness::new();
    h.level = 2;
    let mut enemy = Enemy::spawn(EnemyKind::Zigzag, 100.0, 100.0, 2, level_params(1, 2), &mut rng);
    enemy.shoot_chance = 1.0;
    enemy.update(16.0, &mut h.ctx());
    assert!(h.spawned.is_empty());

    h.level = 3;
    enemy.update(16.0, &mut h.ctx());
    assert_eq!(h.spawned.len(), 2);
    assert!(h.spawned.iter().all(|b| b.owner == Owner::Enemy));
}

#[test]
fn enemies_leave_below_the_field() {
    let mut enemy = basic_enemy(0.0, 0.0);
    assert!(enemy.is_alive(&FIELD));
    enemy.motion.y = FIELD.height + Field::MARGIN + 1.0;
    assert!(!enemy.is_alive(&FIELD));
}

// ── Motion ────────────────────────────────────────────────────────────────────

fn steering(level: u32, target: Option<(f32, f32)>) -> Steering {
    Steering { speed: 100.0, level, width: 30.0, height: 30.0, target, field: FIELD }
}

#[test]
fn turrets_drift_with_the_scroll() {
    let m = Motion::new(100.0, 0.0, 0.0, Wobble { amplitude: 40.0, frequency: 1.5 });
    let next = motion::advance(MovementPattern::Stationary, m, &steering(1, None), 1000.0);
    assert_relative_eq!(next.y, motion::SCROLL_SPEED);
    assert_relative_eq!(next.x, 100.0);
}

#[test]
fn trackers_close_on_the_target() {
    let m = Motion::new(100.0, 100.0, 0.0, Wobble { amplitude: 40.0, frequency: 1.5 });
    let target = Some((415.0, 115.0));
    let next = motion::advance(MovementPattern::Tracking { hunt: 0.5 }, m, &steering(1, target), 1000.0);
    assert_relative_eq!(next.x, 150.0);
    assert_relative_eq!(next.y, 100.0);
}

#[test]
fn tracker_on_top_of_target_stays_finite() {
    let m = Motion::new(100.0, 100.0, 0.0, Wobble { amplitude: 40.0, frequency: 1.5 });
    let next = motion::advance(MovementPattern::Tracking { hunt: 0.5 }, m, &steering(1, Some((115.0, 115.0))), 16.0);
    assert!(next.x.is_finite() && next.y.is_finite());
}

#[test]
fn zigzag_waits_for_level_two() {
    let m = Motion::new(100.0, 0.0, 0.0, Wobble { amplitude: 50.0, frequency: 1.0 });
    let straight = motion::advance(MovementPattern::Straight, m, &steering(1, None), 800.0);
    let early = motion::advance(MovementPattern::Zigzag, m, &steering(1, None), 800.0);
    let late = motion::advance(MovementPattern::Zigzag, m, &steering(2, None), 800.0);
    assert_eq!(early, straight);
    assert_ne!(late.x, straight.x);
}

#[test]
fn spiral_orbits_its_anchor() {
    let mut m = Motion::new(400.0, 0.0, 50.0, Wobble { amplitude: 40.0, frequency: 1.5 });
    for _ in 0..60 {
        m = motion::advance(MovementPattern::Spiral, m, &steering(1, None), 16.0);
        assert!((m.x - 400.0).abs() <= m.radius + 1e-3);
    }
    assert!(m.radius > 50.0);
}

// ── Bullets ───────────────────────────────────────────────────────────────────

#[test]
fn piercing_bullet_survives_extra_hits() {
    let mut rng = seeded_rng();
    let stats = shard_shooter::weapon::resolve(WeaponKind::Pistol, 5);
    let mut bullet = shard_shooter::weapon::player_volley(&stats, (0.0, 0.0), 1.0, &mut rng).remove(0);
    assert!(!bullet.register_hit());
    assert!(!bullet.register_hit());
    assert!(bullet.register_hit());
    assert!(bullet.spent);
    assert!(!bullet.is_alive(&FIELD));
}

#[test]
fn enemy_homing_bullet_turns_toward_target() {
    let mut h = Harness::new();
    h.target = Some((400.0, 100.0));
    let mut bullet = Bullet::homing(100.0, 100.0);
    bullet.update(100.0, &mut h.ctx());
    assert!(bullet.vx > 0.0);
    let speed = (bullet.vx * bullet.vx + bullet.vy * bullet.vy).sqrt();
    assert!(speed <= bullet.speed + 1e-3);
}

#[test]
fn homing_bullet_on_target_stays_finite() {
    let mut h = Harness::new();
    h.target = Some((100.0, 100.0));
    let mut bullet = Bullet::homing(100.0, 100.0);
    bullet.update(16.0, &mut h.ctx());
    assert!(bullet.x.is_finite() && bullet.vx.is_finite() && bullet.vy.is_finite());
}

#[test]
fn bullets_leave_past_the_margin() {
    let mut bullet = Bullet::homing(100.0, 100.0);
    assert!(bullet.is_alive(&FIELD));
    bullet.y = -Field::MARGIN - 1.0;
    assert!(!bullet.is_alive(&FIELD));
}

// ── Bosses ────────────────────────────────────────────────────────────────────

#[test]
fn boss_phases_can_jump_several_steps() {
    let mut boss = Boss::spawn(BossKind::Stage1, 100.0, 100.0);
    boss.take_damage(boss.max_health * 0.8);
    boss.advance_phase();
    assert_eq!(boss.phase, 4);
    assert_relative_eq!(boss.attack_rate_ms, 2000.0 * 0.8 * 0.8 * 0.8, epsilon = 1e-2);
}

#[test]
fn boss_phase_never_exceeds_four() {
    let mut boss = Boss::spawn(BossKind::Stage1, 100.0, 100.0);
    boss.take_damage(boss.max_health);
    boss.advance_phase();
    boss.advance_phase();
    assert_eq!(boss.phase, 4);
}

#[test]
fn boss_attacks_once_its_timer_runs_out() {
    let mut h = Harness::new();
    let mut boss = Boss::spawn(BossKind::Stage1, 300.0, 100.0);
    boss.update(1000.0, &mut h.ctx());
    assert!(h.spawned.is_empty());
    boss.update(1001.0, &mut h.ctx());
    assert_eq!(h.spawned.len(), 3);
    assert_eq!(boss.attack_timer_ms, 0.0);
}

#[test]
fn patrolling_boss_stays_near_the_field() {
    let mut h = Harness::new();
    let mut boss = Boss::spawn(BossKind::Stage1, 360.0, 100.0);
    for _ in 0..2000 {
        boss.update(16.0, &mut h.ctx());
        assert!(boss.motion.x > 0.0 && boss.motion.x + boss.width < FIELD.width);
    }
}

// ── Pickups and particles ─────────────────────────────────────────────────────

#[test]
fn shards_fall_at_their_speed() {
    let mut h = Harness::new();
    let mut shard = EnergyShard::new(100.0, 0.0, 150.0);
    shard.update(1000.0, &mut h.ctx());
    assert_relative_eq!(shard.y, 150.0);
}

#[test]
fn burst_respects_particle_cap() {
    let mut rng = seeded_rng();
    let mut particles = Vec::new();
    emit_burst(&mut particles, 25, (0.0, 0.0), Rgb::CYAN, 20, &mut rng);
    emit_burst(&mut particles, 25, (0.0, 0.0), Rgb::CYAN, 20, &mut rng);
    assert_eq!(particles.len(), 25);
}

#[test]
fn particles_fade_out() {
    let mut rng = seeded_rng();
    let mut particles = Vec::new();
    emit_burst(&mut particles, 10, (0.0, 0.0), Rgb::WHITE, 1, &mut rng);
    let p = &mut particles[0];
    for _ in 0..200 {
        p.advance(16.67);
    }
    assert!(p.life <= 0.0);
    assert!(!p.is_alive(&FIELD));
}

#[test]
fn stars_wrap_to_the_top() {
    let mut rng = seeded_rng();
    let mut stars = Star::field_for(shard_shooter::catalog::stage_params(1), FIELD, &mut rng);
    assert_eq!(stars.len(), 60 + 45 + 30);
    let star = &mut stars[0];
    star.y = FIELD.height - 0.1;
    star.scroll(1000.0, 1.0, FIELD, &mut rng);
    assert_eq!(star.y, 0.0);
}
