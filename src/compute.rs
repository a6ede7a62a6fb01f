//! The simulation loop.
//!
//! [`tick`] takes the current `GameState`, this frame's input, the elapsed
//! milliseconds and an RNG handle, and returns a brand-new `GameState`.
//! Side effects are limited to the injected RNG, so a seeded RNG replays
//! a session exactly.

use rand::{Rng, RngCore};

use crate::catalog::{level_params, stage_params};
use crate::combat;
use crate::config::Tuning;
use crate::delay::{DeferredEffect, DelayQueue};
use crate::entities::{Entity, Field, FrameContext, GameState, GameStatus, Player, Star};
use crate::input::InputState;
use crate::progression::{self, Progression};
use crate::spawn::{self, SpawnDirector};
use crate::weapon::WeaponTable;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state: stage 1-1, a fresh player, empty world.
pub fn init_state(tuning: Tuning, rng: &mut impl Rng) -> GameState {
    let field = Field::from_tuning(&tuning);
    let stars = Star::field_for(stage_params(1), field, rng);
    GameState {
        player: Player::new(&tuning),
        enemies: Vec::new(),
        bosses: Vec::new(),
        bullets: Vec::new(),
        shards: Vec::new(),
        weapon_drops: Vec::new(),
        particles: Vec::new(),
        stars,
        weapons: WeaponTable::new(),
        spawner: SpawnDirector::new(),
        progress: Progression::new(&tuning),
        delayed: DelayQueue::new(),
        events: Vec::new(),
        score: 0,
        status: GameStatus::Playing,
        clock_ms: 0.0,
        frame: 0,
        pause_held: false,
        field,
        tuning,
    }
}

/// Start a new session with the same tuning. Nothing carries over:
/// entities, pending delayed effects and weapon scaling are all fresh.
pub fn restart(state: &GameState, rng: &mut impl Rng) -> GameState {
    log::info!("Restarting (previous score {})", state.score);
    init_state(state.tuning.clone(), rng)
}

/// Flip between playing and paused; other states are unaffected.
pub fn toggle_pause(state: &GameState) -> GameState {
    let status = match state.status {
        GameStatus::Playing => GameStatus::Paused,
        GameStatus::Paused => GameStatus::Playing,
        other => other,
    };
    GameState { status, ..state.clone() }
}

/// Clamp a raw frame delta to `[0, max_ms]`; non-finite deltas count as 0.
pub fn clamp_frame_delta(dt_ms: f32, max_ms: f32) -> f32 {
    if !dt_ms.is_finite() {
        return 0.0;
    }
    dt_ms.clamp(0.0, max_ms.max(0.0))
}

// ── Per-frame tick ─────────────────────────────────────────────────────────────

/// Advance the simulation by one frame of `dt_ms` milliseconds.
pub fn tick(state: &GameState, input: &InputState, dt_ms: f32, rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();
    step(&mut next, input, dt_ms, rng);
    next
}

/// In-place form of [`tick`].
pub fn step(state: &mut GameState, input: &InputState, dt_ms: f32, rng: &mut dyn RngCore) {
    state.events.clear();
    let dt = clamp_frame_delta(dt_ms, state.tuning.max_frame_ms);

    if input.pause && !state.pause_held {
        *state = toggle_pause(state);
    }
    state.pause_held = input.pause;
    progression::feed_keys(state, &input.typed, rng);

    match state.status {
        GameStatus::Playing => play_frame(state, input, dt, rng),
        GameStatus::LevelComplete => {
            advance_particles(state, dt);
            progression::advance_level_complete(state, dt, rng);
        }
        GameStatus::StageTransition => progression::advance_stage_transition(state, dt, rng),
        GameStatus::Paused | GameStatus::GameOver | GameStatus::Victory => return,
    }
    progression::tick_banners(state, dt);
    log::trace!("frame {} {:?} dt={dt:.1}", state.frame, state.status);
}

fn play_frame(state: &mut GameState, input: &InputState, dt: f32, rng: &mut dyn RngCore) {
    // ── 1. Clock ─────────────────────────────────────────────────────────────
    state.clock_ms += dt as f64;
    state.frame += 1;

    // ── 2. Advance entities ──────────────────────────────────────────────────
    let speed_boost = state.player.upgrades.speed;
    let field = state.field;
    for star in &mut state.stars {
        star.scroll(dt, speed_boost, field, rng);
    }

    let mut spawned = Vec::new();
    {
        let GameState {
            player,
            bullets,
            enemies,
            shards,
            weapon_drops,
            particles,
            bosses,
            weapons,
            progress,
            events,
            clock_ms,
            ..
        } = &mut *state;
        let mut ctx = FrameContext {
            now_ms: *clock_ms,
            field,
            stage: progress.stage,
            level: progress.level,
            level_params: level_params(progress.stage, progress.level),
            target: None,
            input,
            weapons,
            rng: &mut *rng,
            spawned: &mut spawned,
            events,
        };
        player.update(dt, &mut ctx);
        ctx.target = (!player.is_dead()).then(|| player.center());

        update_all(bullets, dt, &mut ctx);
        update_all(enemies, dt, &mut ctx);
        update_all(shards, dt, &mut ctx);
        update_all(weapon_drops, dt, &mut ctx);
        update_all(particles, dt, &mut ctx);
        update_all(bosses, dt, &mut ctx);
    }
    state.bullets.extend(spawned);

    // ── 3. Spawn ─────────────────────────────────────────────────────────────
    spawn::run(state, dt, rng);

    // ── 4. Deferred effects ──────────────────────────────────────────────────
    for effect in state.delayed.drain_due(state.clock_ms) {
        match effect {
            DeferredEffect::SpawnShard { x, y } => spawn::spawn_shard(state, x, y, rng),
        }
    }

    // ── 5. Collisions ────────────────────────────────────────────────────────
    combat::resolve(state, rng);

    // ── 6. Drop corrupt entities ─────────────────────────────────────────────
    sweep_non_finite(state);

    // ── 7. Progression ───────────────────────────────────────────────────────
    progression::evaluate(state, rng);
}

fn update_all<E: Entity>(items: &mut Vec<E>, dt: f32, ctx: &mut FrameContext<'_>) {
    for item in items.iter_mut() {
        item.update(dt, ctx);
    }
    let field = ctx.field;
    items.retain(|item| item.is_alive(&field));
}

/// Particles keep fading while gameplay is frozen.
fn advance_particles(state: &mut GameState, dt: f32) {
    for particle in &mut state.particles {
        particle.advance(dt);
    }
    state.particles.retain(|p| p.life > 0.0);
}

/// Remove entities whose coordinates are no longer finite.
pub fn sweep_non_finite(state: &mut GameState) {
    use crate::entities::Collidable;

    fn sweep<T: Collidable>(items: &mut Vec<T>, what: &str) {
        items.retain(|item| {
            let ok = item.bounds().is_finite();
            if !ok {
                log::warn!("Dropping {what} with non-finite bounds {:?}", item.bounds());
            }
            ok
        });
    }

    sweep(&mut state.enemies, "enemy");
    sweep(&mut state.bosses, "boss");
    sweep(&mut state.bullets, "bullet");
    sweep(&mut state.shards, "shard");
    sweep(&mut state.weapon_drops, "weapon drop");
    state.particles.retain(|p| {
        let ok = p.x.is_finite() && p.y.is_finite();
        if !ok {
            log::warn!("Dropping particle at ({}, {})", p.x, p.y);
        }
        ok
    });

    let (x, y) = (state.player.x, state.player.y);
    if !x.is_finite() || !y.is_finite() {
        log::warn!("Player position ({x}, {y}) is not finite, recentring");
        state.player.x = state.field.width / 2.0;
        state.player.y = state.field.height - 100.0;
    }
}
