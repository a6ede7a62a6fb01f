//! Level / stage progression state machine.
//!
//! ```text
//! Playing ──quota──▶ LevelComplete ──hold──▶ Playing (next level)
//!    │                     └──level 5──▶ StageTransition ──▶ Playing (next stage)
//!    │                     └──stage 5──▶ Victory
//!    └──health 0──▶ GameOver
//! ```

use rand::{Rng, RngCore};

use crate::catalog::{level_params, stage_params, LevelKey, LEVELS_PER_STAGE, STAGE_COUNT};
use crate::config::{StatBoostRanges, Tuning};
use crate::entities::particle::emit_burst;
use crate::entities::{GameState, GameStatus, Player, Star};
use crate::events::{GameEvent, SoundEvent};
use crate::input::KeySequence;
use crate::render::Rgb;
use crate::spawn;

// ── Stat boosts ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoostKind {
    Damage,
    Speed,
    FireRate,
    Health,
    CollectionRange,
}

impl BoostKind {
    pub const ALL: [BoostKind; 5] = [
        BoostKind::Damage,
        BoostKind::Speed,
        BoostKind::FireRate,
        BoostKind::Health,
        BoostKind::CollectionRange,
    ];
}

/// One permanent reward granted on level completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatBoost {
    pub kind: BoostKind,
    pub value: u32,
}

impl StatBoost {
    /// Uniform kind, uniform integer magnitude within the kind's range.
    pub fn roll(ranges: &StatBoostRanges, rng: &mut dyn RngCore) -> Self {
        let kind = BoostKind::ALL[rng.gen_range(0..BoostKind::ALL.len())];
        let range = match kind {
            BoostKind::Damage => ranges.damage,
            BoostKind::Speed => ranges.speed,
            BoostKind::FireRate => ranges.fire_rate,
            BoostKind::Health => ranges.health,
            BoostKind::CollectionRange => ranges.collection_range,
        };
        let value = if range.max <= range.min {
            range.min
        } else {
            rng.gen_range(range.min..=range.max)
        };
        Self { kind, value }
    }

    pub fn apply(&self, player: &mut Player) {
        let pct = self.value as f32 / 100.0;
        match self.kind {
            BoostKind::Damage => player.upgrades.damage += pct,
            BoostKind::Speed => player.upgrades.speed += pct,
            BoostKind::FireRate => player.upgrades.fire_rate += pct,
            BoostKind::Health => {
                player.max_health += self.value;
                player.health = (player.health + self.value).min(player.max_health);
            }
            BoostKind::CollectionRange => player.collection_range += self.value as f32,
        }
    }

    pub fn message(&self) -> String {
        let v = self.value;
        match self.kind {
            BoostKind::Damage => format!("+{v}% Damage"),
            BoostKind::Speed => format!("+{v}% Speed"),
            BoostKind::FireRate => format!("+{v}% Fire Rate"),
            BoostKind::Health => format!("+{v} Max Health"),
            BoostKind::CollectionRange => format!("+{v}px Collection Range"),
        }
    }
}

// ── Progress state ────────────────────────────────────────────────────────────

/// Banner shown while moving to `stage`.
#[derive(Clone, Debug, PartialEq)]
pub struct StageTransition {
    pub stage: u32,
    pub elapsed_ms: f32,
    pub banner: String,
}

impl StageTransition {
    pub fn new(stage: u32) -> Self {
        let name = stage_params(stage).name.to_uppercase();
        Self { stage, elapsed_ms: 0.0, banner: format!("STAGE {stage} - {name}") }
    }

    /// Banner opacity: fade in, hold, fade out.
    pub fn alpha(&self, tuning: &Tuning) -> f32 {
        let t = self.elapsed_ms;
        let total = tuning.stage_transition_ms;
        let fade_in = tuning.stage_fade_in_ms.max(f32::EPSILON);
        let fade_out = tuning.stage_fade_out_ms.max(f32::EPSILON);
        if t < tuning.stage_fade_in_ms {
            (t / fade_in).min(1.0)
        } else if t < total - tuning.stage_fade_out_ms {
            1.0
        } else {
            (1.0 - (t - (total - tuning.stage_fade_out_ms)) / fade_out).max(0.0)
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Progression {
    /// 1 ..= 5.
    pub stage: u32,
    /// Level within the stage, 1 ..= 5.
    pub level: u32,
    pub shards_this_level: u32,
    pub shards_needed: u32,
    /// Lifetime shards this session.
    pub total_shards: u32,
    /// Time spent in the current level-complete freeze.
    pub level_complete_ms: f32,
    pub transition: Option<StageTransition>,
    /// Last stat boost and how long its banner remains.
    pub boost_banner: Option<(StatBoost, f32)>,
    pub easter_egg_triggered: bool,
    /// Remaining easter-egg overlay time.
    pub easter_egg_ms: f32,
    pub keys: KeySequence,
}

impl Progression {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            stage: 1,
            level: 1,
            shards_this_level: 0,
            shards_needed: tuning.shards_needed_per_level,
            total_shards: 0,
            level_complete_ms: 0.0,
            transition: None,
            boost_banner: None,
            easter_egg_triggered: false,
            easter_egg_ms: 0.0,
            keys: KeySequence::new(),
        }
    }

    pub fn level_key(&self) -> LevelKey {
        LevelKey::new(self.stage, self.level).unwrap_or(LevelKey::FIRST)
    }

    pub fn shard_fraction(&self) -> f32 {
        if self.shards_needed == 0 {
            return 1.0;
        }
        (self.shards_this_level as f32 / self.shards_needed as f32).min(1.0)
    }
}

// ── Transitions ───────────────────────────────────────────────────────────────

/// Check end-of-frame conditions while playing: death first, then quota.
pub fn evaluate(state: &mut GameState, rng: &mut dyn RngCore) {
    if state.status != GameStatus::Playing {
        return;
    }
    if state.player.is_dead() {
        enter_game_over(state);
    } else if state.progress.shards_this_level >= state.progress.shards_needed {
        complete_level(state, rng);
    }
}

pub fn enter_game_over(state: &mut GameState) {
    state.status = GameStatus::GameOver;
    state.delayed.clear();
    state.progress.transition = None;
    state.events.push(GameEvent::GameOver { score: state.score });
    log::info!("Game over at {} with score {}", state.progress.level_key(), state.score);
}

/// Quota met: freeze, grant a stat boost and upgrade the equipped weapon.
pub fn complete_level(state: &mut GameState, rng: &mut dyn RngCore) {
    let key = state.progress.level_key();
    state.status = GameStatus::LevelComplete;
    state.progress.level_complete_ms = 0.0;

    let boost = StatBoost::roll(&state.tuning.stat_boosts, rng);
    boost.apply(&mut state.player);
    state.progress.boost_banner = Some((boost, state.tuning.stat_boost_banner_ms));

    state.events.push(GameEvent::Sound(SoundEvent::LevelComplete));
    state.events.push(GameEvent::LevelComplete(key));
    state.events.push(GameEvent::StatBoost(boost));

    if state.player.upgrade_weapon() {
        state.events.push(GameEvent::Sound(SoundEvent::WeaponUpgrade));
        state.events.push(GameEvent::WeaponUpgraded {
            kind: state.player.weapon,
            level: state.player.weapon_level,
        });
    }

    let cap = state.tuning.max_particles;
    emit_burst(&mut state.particles, cap, state.player.center(), Rgb::CYAN, 50, rng);
    log::info!("Level {key} complete: {}", boost.message());
}

/// Count down the level-complete freeze and move on once it ends.
pub fn advance_level_complete(state: &mut GameState, dt: f32, rng: &mut dyn RngCore) {
    state.progress.level_complete_ms += dt;
    if state.progress.level_complete_ms <= state.tuning.level_complete_hold_ms {
        return;
    }

    if state.progress.level >= LEVELS_PER_STAGE {
        let stage = state.progress.stage;
        if stage < STAGE_COUNT {
            begin_stage_transition(state, stage + 1);
        } else {
            state.status = GameStatus::Victory;
            state.events.push(GameEvent::Victory { score: state.score });
            log::info!("Victory with score {}", state.score);
        }
        return;
    }

    state.progress.level += 1;
    state.progress.shards_this_level = 0;
    state.status = GameStatus::Playing;
    log::info!("Entering level {}", state.progress.level_key());

    if let Some(boss) = level_params(state.progress.stage, state.progress.level).boss {
        spawn::spawn_boss(state, boss);
    }
    spawn::on_level_advanced(state, rng);
}

pub fn begin_stage_transition(state: &mut GameState, stage: u32) {
    let transition = StageTransition::new(stage);
    log::info!("Stage transition: {}", transition.banner);
    state.progress.transition = Some(transition);
    state.status = GameStatus::StageTransition;
}

/// Run the stage banner; once it has played, set up the new stage.
pub fn advance_stage_transition(state: &mut GameState, dt: f32, rng: &mut dyn RngCore) {
    let Some(transition) = state.progress.transition.as_mut() else {
        log::warn!("Stage transition without a target stage, resuming play");
        state.status = GameStatus::Playing;
        return;
    };
    transition.elapsed_ms += dt;
    if transition.elapsed_ms < state.tuning.stage_transition_ms {
        return;
    }
    let stage = transition.stage;
    state.progress.transition = None;

    setup_stage(state, stage, rng);
    state.status = GameStatus::Playing;
    state.events.push(GameEvent::StageEntered { stage });
    if let Some(boss) = stage_params(stage).major_boss {
        spawn::spawn_boss(state, boss);
    }
}

/// Reset level, shard counter, spawn timers and starfield for `stage`.
pub fn setup_stage(state: &mut GameState, stage: u32, rng: &mut dyn RngCore) {
    state.progress.stage = stage.clamp(1, STAGE_COUNT);
    state.progress.level = 1;
    state.progress.shards_this_level = 0;
    state.spawner.reset_for_stage();
    state.stars = Star::field_for(stage_params(state.progress.stage), state.field, rng);
}

// ── Shards and the easter egg ─────────────────────────────────────────────────

/// Count a collected shard at `at` and fire the easter egg on the magic total.
pub fn collect_shard(state: &mut GameState, at: (f32, f32), rng: &mut dyn RngCore) {
    let p = &mut state.progress;
    p.shards_this_level += 1;
    p.total_shards += 1;
    state.events.push(GameEvent::Sound(SoundEvent::ShardCollect));
    state.events.push(GameEvent::ShardCollected { this_level: p.shards_this_level, total: p.total_shards });

    let cap = state.tuning.max_particles;
    emit_burst(&mut state.particles, cap, at, Rgb::CYAN, 20, rng);

    if state.progress.total_shards == state.tuning.easter_egg_shard_count {
        trigger_easter_egg(state, rng);
    }
}

/// Feed typed characters to the secret-sequence matcher.
pub fn feed_keys(state: &mut GameState, typed: &[char], rng: &mut dyn RngCore) {
    for &c in typed {
        if state.progress.keys.push(c) {
            trigger_easter_egg(state, rng);
        }
    }
}

/// Cosmetic overlay, at most once per session.
pub fn trigger_easter_egg(state: &mut GameState, rng: &mut dyn RngCore) {
    if state.progress.easter_egg_triggered {
        return;
    }
    state.progress.easter_egg_triggered = true;
    state.progress.easter_egg_ms = state.tuning.easter_egg_banner_ms;
    state.events.push(GameEvent::EasterEgg);

    let cap = state.tuning.max_particles;
    let centre = (state.field.width / 2.0, state.field.height / 2.0);
    emit_burst(&mut state.particles, cap, centre, Rgb::MAGENTA, 100, rng);
    log::info!("6-7 found");
}

/// Count down the stat-boost and easter-egg overlays.
pub fn tick_banners(state: &mut GameState, dt: f32) {
    if dt <= 0.0 {
        return;
    }
    if let Some((_, remaining)) = state.progress.boost_banner.as_mut() {
        *remaining -= dt;
    }
    if matches!(state.progress.boost_banner, Some((_, r)) if r <= 0.0) {
        state.progress.boost_banner = None;
    }
    state.progress.easter_egg_ms = (state.progress.easter_egg_ms - dt).max(0.0);
}
