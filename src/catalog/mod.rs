//! Static parameter tables: enemies, weapons, levels, stages and bosses.
//!
//! Every table is keyed by an enum; string keys parse through `FromStr`
//! and the `*_or_default` helpers fall back to a documented entry.

pub mod enemies;
pub mod levels;
pub mod stages;
pub mod weapons;

pub use enemies::{
    BossAttack, BossKind, BossMovement, BossParams, EnemyKind, EnemyParams, EnemyShot,
    MovementPattern, ShotParams, Volley,
};
pub use levels::{level_params, level_params_by_key, LevelKey, LevelParams, LEVELS_PER_STAGE, STAGE_COUNT};
pub use stages::{stage_params, StageParams};
pub use weapons::{Special, UpgradeStep, WeaponKind, WeaponParams, MAX_WEAPON_LEVEL};
