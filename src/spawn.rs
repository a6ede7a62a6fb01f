//! Spawn director: timer-driven enemies and shards, level-driven weapon
//! drops, and boss entry.

use rand::{Rng, RngCore};

use crate::catalog::{level_params, BossKind, EnemyKind, WeaponKind};
use crate::entities::{Boss, Enemy, EnergyShard, GameState, WeaponDrop};
use crate::events::{GameEvent, SoundEvent};

/// Spawn columns keep this far from either side.
const SIDE_MARGIN: f32 = 20.0;
const ENEMY_SPAWN_Y: f32 = -50.0;
const SHARD_SPAWN_Y: f32 = -20.0;
const DROP_SPAWN_Y: f32 = -30.0;
const BOSS_SPAWN_Y: f32 = 100.0;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpawnDirector {
    pub enemy_timer_ms: f32,
    pub shard_timer_ms: f32,
    /// Level transitions since the last weapon drop.
    pub levels_since_drop: u32,
}

impl SpawnDirector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset every counter for a fresh stage.
    pub fn reset_for_stage(&mut self) {
        *self = Self::default();
    }
}

/// Weighted draw over `weights`. Empty or all-zero tables yield `Basic`.
pub fn pick_enemy_kind(weights: &[(EnemyKind, u32)], rng: &mut dyn RngCore) -> EnemyKind {
    let total: u64 = weights.iter().map(|&(_, w)| w as u64).sum();
    if total == 0 {
        return EnemyKind::Basic;
    }
    let mut draw = rng.gen::<f64>() * total as f64;
    for &(kind, weight) in weights {
        if draw < weight as f64 {
            return kind;
        }
        draw -= weight as f64;
    }
    EnemyKind::Basic
}

/// Random x in `[margin, width - margin)`.
fn spawn_column(width: f32, rng: &mut dyn RngCore) -> f32 {
    SIDE_MARGIN + rng.gen::<f32>() * (width - 2.0 * SIDE_MARGIN).max(0.0)
}

/// Uniform float in `[lo, hi)`; returns `lo` when the range is empty.
fn uniform(lo: f32, hi: f32, rng: &mut dyn RngCore) -> f32 {
    lo + rng.gen::<f32>() * (hi - lo).max(0.0)
}

/// Per-frame enemy and shard cadence.
pub fn run(state: &mut GameState, dt: f32, rng: &mut dyn RngCore) {
    if dt <= 0.0 {
        return;
    }
    spawn_enemies(state, dt, rng);
    spawn_shards(state, dt, rng);
}

fn spawn_enemies(state: &mut GameState, dt: f32, rng: &mut dyn RngCore) {
    let stage = state.progress.stage;
    let level = state.progress.level;
    let params = level_params(stage, level);

    state.spawner.enemy_timer_ms += dt;
    let threshold = params.spawn_rate_ms * uniform(0.8, 1.2, rng);
    if state.spawner.enemy_timer_ms <= threshold {
        return;
    }
    state.spawner.enemy_timer_ms = 0.0;
    if state.enemies.len() >= state.tuning.max_enemies {
        return;
    }

    let kind = pick_enemy_kind(params.enemy_weights, rng);
    let x = spawn_column(state.field.width, rng);
    let mut enemy = Enemy::spawn(kind, x, ENEMY_SPAWN_Y, level, params, rng);
    enemy.carries_shard = rng.gen::<f64>() < state.tuning.shard_enemy_carry_chance;
    log::trace!("Spawned {} at x={x:.0} (shard: {})", kind.key(), enemy.carries_shard);
    state.enemies.push(enemy);
}

fn spawn_shards(state: &mut GameState, dt: f32, rng: &mut dyn RngCore) {
    let t = &state.tuning;
    state.spawner.shard_timer_ms += dt;
    let interval = uniform(t.shard_spawn_interval_min_ms, t.shard_spawn_interval_max_ms, rng);
    let collected = state.progress.shards_this_level;
    let needed = state.progress.shards_needed;
    if state.spawner.shard_timer_ms <= interval || collected >= needed {
        return;
    }
    // cap ambient shards so enemy carriers supply the rest
    let remaining = (needed - collected) as f32;
    let ambient_cap = (remaining * t.ambient_shard_share).ceil() as usize;
    if state.shards.len() < ambient_cap {
        let x = spawn_column(state.field.width, rng);
        spawn_shard(state, x, SHARD_SPAWN_Y, rng);
        state.spawner.shard_timer_ms = 0.0;
    }
}

/// Drop a shard centred on `(x, y)` with a random fall speed.
pub fn spawn_shard(state: &mut GameState, x: f32, y: f32, rng: &mut dyn RngCore) {
    let fall = uniform(state.tuning.shard_fall_speed_min, state.tuning.shard_fall_speed_max, rng);
    state.shards.push(EnergyShard::new(x, y, fall));
}

/// Count a level transition and maybe drop a weapon the player does not
/// already hold. Returns the dropped kind.
pub fn on_level_advanced(state: &mut GameState, rng: &mut dyn RngCore) -> Option<WeaponKind> {
    state.spawner.levels_since_drop += 1;
    let since = state.spawner.levels_since_drop;
    let t = &state.tuning;
    let drop = if since >= t.weapon_drop_guaranteed_after_levels {
        true
    } else if since == t.weapon_drop_roll_after_levels {
        rng.gen::<f64>() < t.weapon_drop_chance
    } else {
        false
    };
    if !drop {
        return None;
    }
    let kind = spawn_weapon_drop(state, rng)?;
    state.spawner.levels_since_drop = 0;
    Some(kind)
}

/// Drop a random weapon other than the equipped one.
pub fn spawn_weapon_drop(state: &mut GameState, rng: &mut dyn RngCore) -> Option<WeaponKind> {
    let current = state.player.weapon;
    let choices: Vec<WeaponKind> = WeaponKind::ALL.iter().copied().filter(|&k| k != current).collect();
    if choices.is_empty() {
        return None;
    }
    let kind = choices[rng.gen_range(0..choices.len())];
    let x = spawn_column(state.field.width, rng);
    state
        .weapon_drops
        .push(WeaponDrop::new(x, DROP_SPAWN_Y, kind, state.tuning.weapon_drop_fall_speed));
    state.events.push(GameEvent::Sound(SoundEvent::WeaponDrop));
    log::debug!("Weapon drop: {}", kind.name());
    Some(kind)
}

/// Bring a boss in at the top centre of the field.
pub fn spawn_boss(state: &mut GameState, kind: BossKind) {
    let width = kind.params().width;
    let x = (state.field.width - width) / 2.0;
    state.bosses.push(Boss::spawn(kind, x, BOSS_SPAWN_Y));
    state.events.push(GameEvent::Sound(SoundEvent::BossSpawn));
    state.events.push(GameEvent::BossSpawned(kind));
    log::info!("Boss {} entered", kind.key());
}
