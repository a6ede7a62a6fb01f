//! Balance constants, loaded from a RON tuning file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Inclusive integer range a stat boost is sampled from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoostRange {
    pub min: u32,
    pub max: u32,
}

impl BoostRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

/// Magnitude ranges for the five level-complete stat boosts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatBoostRanges {
    /// Percent added to the damage multiplier.
    pub damage: BoostRange,
    /// Percent added to the speed multiplier.
    pub speed: BoostRange,
    /// Percent added to the fire-rate multiplier.
    pub fire_rate: BoostRange,
    /// Flat max-health points.
    pub health: BoostRange,
    /// Flat collection-range pixels.
    pub collection_range: BoostRange,
}

impl Default for StatBoostRanges {
    fn default() -> Self {
        Self {
            damage: BoostRange::new(5, 15),
            speed: BoostRange::new(5, 15),
            fire_rate: BoostRange::new(5, 15),
            health: BoostRange::new(10, 30),
            collection_range: BoostRange::new(5, 15),
        }
    }
}

/// All tunable game parameters, loaded from tuning.ron.
///
/// Times are milliseconds, distances pixels, speeds pixels per second.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub canvas_width: f32,
    pub canvas_height: f32,

    pub player_base_speed: f32,
    pub player_base_health: u32,
    pub player_width: f32,
    pub player_height: f32,
    pub collection_range: f32,

    pub shards_needed_per_level: u32,
    pub shard_fall_speed_min: f32,
    pub shard_fall_speed_max: f32,
    pub shard_spawn_interval_min_ms: f32,
    pub shard_spawn_interval_max_ms: f32,
    pub shard_enemy_carry_chance: f64,
    /// Share of a level's shards that should arrive as ambient drops.
    pub ambient_shard_share: f32,

    pub weapon_drop_fall_speed: f32,
    pub weapon_drop_pickup_range: f32,
    pub weapon_drop_chance: f64,
    /// Levels without a drop before the chance roll starts.
    pub weapon_drop_roll_after_levels: u32,
    /// Levels without a drop after which one is guaranteed.
    pub weapon_drop_guaranteed_after_levels: u32,

    pub max_enemies: usize,
    pub max_particles: usize,

    pub enemy_contact_damage: u32,
    pub enemy_contact_self_damage: f32,
    pub boss_contact_damage: u32,

    pub level_complete_hold_ms: f32,
    pub level_complete_banner_ms: f32,
    pub stat_boost_banner_ms: f32,
    pub stage_transition_ms: f32,
    pub stage_fade_in_ms: f32,
    pub stage_fade_out_ms: f32,
    pub boss_shard_stagger_ms: f64,

    /// Frame deltas above this are clamped.
    pub max_frame_ms: f32,

    pub easter_egg_shard_count: u32,
    pub easter_egg_banner_ms: f32,

    pub stat_boosts: StatBoostRanges,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 600.0,
            player_base_speed: 300.0,
            player_base_health: 100,
            player_width: 40.0,
            player_height: 40.0,
            collection_range: 30.0,
            shards_needed_per_level: 10,
            shard_fall_speed_min: 150.0,
            shard_fall_speed_max: 200.0,
            shard_spawn_interval_min_ms: 2000.0,
            shard_spawn_interval_max_ms: 3000.0,
            shard_enemy_carry_chance: 0.3,
            ambient_shard_share: 0.7,
            weapon_drop_fall_speed: 200.0,
            weapon_drop_pickup_range: 40.0,
            weapon_drop_chance: 0.3,
            weapon_drop_roll_after_levels: 3,
            weapon_drop_guaranteed_after_levels: 4,
            max_enemies: 20,
            max_particles: 200,
            enemy_contact_damage: 20,
            enemy_contact_self_damage: 50.0,
            boss_contact_damage: 30,
            level_complete_hold_ms: 500.0,
            level_complete_banner_ms: 2000.0,
            stat_boost_banner_ms: 2000.0,
            stage_transition_ms: 2000.0,
            stage_fade_in_ms: 1000.0,
            stage_fade_out_ms: 500.0,
            boss_shard_stagger_ms: 200.0,
            max_frame_ms: 100.0,
            easter_egg_shard_count: 67,
            easter_egg_banner_ms: 3000.0,
            stat_boosts: StatBoostRanges::default(),
        }
    }
}

impl Tuning {
    /// Default location: `$HOME/.shard_shooter/tuning.ron`.
    pub fn default_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".shard_shooter").join("tuning.ron")
    }

    /// Parse a tuning file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(ron::from_str(&contents)?)
    }

    /// Load from file. A missing file is created with the defaults; a
    /// broken one is left alone and the defaults are used.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            return Self::load(path).unwrap_or_else(|e| {
                log::warn!("Failed to load {}: {e}, using defaults", path.display());
                Self::default()
            });
        }
        let tuning = Self::default();
        if let Err(e) = tuning.save(path) {
            log::warn!("Failed to write {}: {e}", path.display());
        }
        tuning
    }

    /// Save the tuning as pretty RON.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let pretty = ron::ser::PrettyConfig::default();
        let s = ron::ser::to_string_pretty(self, pretty)?;
        std::fs::write(path, s)?;
        Ok(())
    }
}
