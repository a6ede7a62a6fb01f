//! Enemy, enemy-shot and boss parameter tables.

use std::str::FromStr;

use crate::error::GameError;
use crate::render::Rgb;

// ── Movement / attack tags ────────────────────────────────────────────────────

/// How a regular enemy moves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MovementPattern {
    /// Straight down with a slight horizontal drift.
    Straight,
    /// Sinusoidal weave (from level 2 of a stage; straight before that).
    Zigzag,
    /// Slow descent with a fast side-to-side shimmy.
    Sidewinder,
    /// Steers toward the player at `hunt` times its speed.
    Tracking { hunt: f32 },
    /// Circles an anchor column with a growing radius.
    Spiral,
    /// Rides the background scroll.
    Stationary,
}

/// What a regular enemy fires.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Volley {
    Single,
    /// Two basic shots side by side.
    Twin,
    /// `count` shots of one type in a horizontal row, `spacing` px apart.
    Row { shot: EnemyShot, count: u32, spacing: f32 },
    /// `count` homing shots.
    Homing { count: u32 },
    /// `count` spiral shots with evenly spaced phase angles.
    Spiral { count: u32 },
}

/// How a boss moves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BossMovement {
    /// Horizontal bounce between the side margins.
    Patrol,
    /// Patrol plus a vertical sine wave.
    PatrolWave,
    /// Holds position.
    Hover,
    /// Jumps to a random spot every `every_ms`.
    Teleport { every_ms: f32 },
    /// Sinusoidal track clamped to the upper half of the field.
    Orbit,
}

/// How a boss attacks once its attack timer elapses.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BossAttack {
    /// Row of `count` heavy shots plus a homing shot at `homing_chance`.
    Spread { count: u32, spacing: f32, homing_chance: f64 },
    /// Radial ring of `count` shots.
    Ring { shot: EnemyShot, count: u32 },
}

// ── Enemy shots ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyShot {
    Basic,
    Heavy,
    Bomb,
    Homing,
    Spiral,
}

#[derive(Clone, Copy, Debug)]
pub struct ShotParams {
    pub damage: f32,
    pub speed: f32,
    pub width: f32,
    pub height: f32,
    pub color: Rgb,
}

static SHOT_TABLE: [ShotParams; 5] = [
    ShotParams { damage: 20.0, speed: 300.0, width: 4.0, height: 8.0,  color: Rgb(0xff, 0x44, 0x44) }, // Basic
    ShotParams { damage: 30.0, speed: 250.0, width: 6.0, height: 12.0, color: Rgb(0x88, 0x44, 0xff) }, // Heavy
    ShotParams { damage: 40.0, speed: 200.0, width: 8.0, height: 8.0,  color: Rgb(0x8b, 0x45, 0x13) }, // Bomb
    ShotParams { damage: 25.0, speed: 180.0, width: 5.0, height: 8.0,  color: Rgb(0xff, 0x00, 0x80) }, // Homing
    ShotParams { damage: 20.0, speed: 150.0, width: 4.0, height: 6.0,  color: Rgb(0xff, 0xaa, 0x00) }, // Spiral
];

impl EnemyShot {
    pub fn params(self) -> &'static ShotParams {
        &SHOT_TABLE[self as usize]
    }
}

// ── Enemy types ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Basic,
    Scout,
    Zigzag,
    Fast,
    Fighter,
    Sidewinder,
    Hunter,
    Bomber,
    Heavy,
    Spiral,
    Turret,
    EliteHunter,
    EliteBomber,
    EliteSpiral,
}

#[derive(Clone, Copy, Debug)]
pub struct EnemyParams {
    pub key: &'static str,
    pub health: f32,
    pub base_speed: f32,
    pub width: f32,
    pub height: f32,
    pub points: u32,
    /// Minimum interval between volleys.
    pub fire_rate_ms: f32,
    pub can_shoot: bool,
    pub movement: MovementPattern,
    pub volley: Volley,
    /// Starting orbit radius for spiral movers.
    pub radius: f32,
    pub color: Rgb,
}

const fn row(shot: EnemyShot, count: u32, spacing: f32) -> Volley {
    Volley::Row { shot, count, spacing }
}

static ENEMY_TABLE: [EnemyParams; 14] = [
    EnemyParams { key: "basic",        health: 30.0,  base_speed: 100.0, width: 30.0, height: 30.0, points: 100, fire_rate_ms: 2000.0, can_shoot: false, movement: MovementPattern::Straight,                  volley: Volley::Single,                       radius: 0.0,  color: Rgb(0xff, 0x88, 0x00) },
    EnemyParams { key: "scout",        health: 10.0,  base_speed: 120.0, width: 20.0, height: 20.0, points: 50,  fire_rate_ms: 1500.0, can_shoot: false, movement: MovementPattern::Straight,                  volley: Volley::Single,                       radius: 0.0,  color: Rgb(0xff, 0x66, 0x66) },
    EnemyParams { key: "zigzag",       health: 25.0,  base_speed: 150.0, width: 30.0, height: 30.0, points: 180, fire_rate_ms: 1000.0, can_shoot: true,  movement: MovementPattern::Zigzag,                    volley: Volley::Twin,                         radius: 0.0,  color: Rgb(0x00, 0xff, 0x88) },
    EnemyParams { key: "fast",         health: 15.0,  base_speed: 250.0, width: 25.0, height: 25.0, points: 150, fire_rate_ms: 800.0,  can_shoot: true,  movement: MovementPattern::Straight,                  volley: Volley::Single,                       radius: 0.0,  color: Rgb(0xff, 0x44, 0x44) },
    EnemyParams { key: "fighter",      health: 20.0,  base_speed: 150.0, width: 25.0, height: 25.0, points: 100, fire_rate_ms: 1000.0, can_shoot: true,  movement: MovementPattern::Straight,                  volley: Volley::Single,                       radius: 0.0,  color: Rgb(0x66, 0xff, 0x66) },
    EnemyParams { key: "sidewinder",   health: 20.0,  base_speed: 200.0, width: 28.0, height: 28.0, points: 160, fire_rate_ms: 700.0,  can_shoot: true,  movement: MovementPattern::Sidewinder,                volley: Volley::Single,                       radius: 0.0,  color: Rgb(0x88, 0x00, 0xff) },
    EnemyParams { key: "hunter",       health: 40.0,  base_speed: 180.0, width: 35.0, height: 35.0, points: 250, fire_rate_ms: 1200.0, can_shoot: true,  movement: MovementPattern::Tracking { hunt: 0.5 },    volley: Volley::Homing { count: 1 },          radius: 0.0,  color: Rgb(0xff, 0x00, 0x80) },
    EnemyParams { key: "bomber",       health: 80.0,  base_speed: 80.0,  width: 45.0, height: 45.0, points: 350, fire_rate_ms: 2000.0, can_shoot: true,  movement: MovementPattern::Straight,                  volley: row(EnemyShot::Bomb, 3, 15.0),        radius: 0.0,  color: Rgb(0x8b, 0x45, 0x13) },
    EnemyParams { key: "heavy",        health: 120.0, base_speed: 60.0,  width: 50.0, height: 50.0, points: 400, fire_rate_ms: 600.0,  can_shoot: true,  movement: MovementPattern::Straight,                  volley: row(EnemyShot::Heavy, 3, 20.0),       radius: 0.0,  color: Rgb(0x88, 0x44, 0xff) },
    EnemyParams { key: "spiral",       health: 35.0,  base_speed: 120.0, width: 32.0, height: 32.0, points: 220, fire_rate_ms: 900.0,  can_shoot: true,  movement: MovementPattern::Spiral,                    volley: Volley::Spiral { count: 3 },          radius: 50.0, color: Rgb(0xff, 0xaa, 0x00) },
    EnemyParams { key: "turret",       health: 70.0,  base_speed: 0.0,   width: 34.0, height: 34.0, points: 300, fire_rate_ms: 1100.0, can_shoot: true,  movement: MovementPattern::Stationary,                volley: Volley::Single,                       radius: 0.0,  color: Rgb(0x44, 0x4a, 0x55) },
    EnemyParams { key: "elite_hunter", health: 80.0,  base_speed: 220.0, width: 40.0, height: 40.0, points: 500, fire_rate_ms: 800.0,  can_shoot: true,  movement: MovementPattern::Tracking { hunt: 0.7 },    volley: Volley::Homing { count: 2 },          radius: 0.0,  color: Rgb(0xff, 0x44, 0xaa) },
    EnemyParams { key: "elite_bomber", health: 150.0, base_speed: 100.0, width: 55.0, height: 55.0, points: 600, fire_rate_ms: 1500.0, can_shoot: true,  movement: MovementPattern::Straight,                  volley: row(EnemyShot::Bomb, 5, 15.0),        radius: 0.0,  color: Rgb(0xa0, 0x52, 0x2d) },
    EnemyParams { key: "elite_spiral", health: 60.0,  base_speed: 150.0, width: 38.0, height: 38.0, points: 450, fire_rate_ms: 600.0,  can_shoot: true,  movement: MovementPattern::Spiral,                    volley: Volley::Spiral { count: 5 },          radius: 60.0, color: Rgb(0xff, 0xcc, 0x44) },
];

impl EnemyKind {
    pub const ALL: [EnemyKind; 14] = [
        EnemyKind::Basic,
        EnemyKind::Scout,
        EnemyKind::Zigzag,
        EnemyKind::Fast,
        EnemyKind::Fighter,
        EnemyKind::Sidewinder,
        EnemyKind::Hunter,
        EnemyKind::Bomber,
        EnemyKind::Heavy,
        EnemyKind::Spiral,
        EnemyKind::Turret,
        EnemyKind::EliteHunter,
        EnemyKind::EliteBomber,
        EnemyKind::EliteSpiral,
    ];

    pub fn params(self) -> &'static EnemyParams {
        &ENEMY_TABLE[self as usize]
    }

    pub fn key(self) -> &'static str {
        self.params().key
    }

    /// Parse a catalog key, falling back to `basic`.
    pub fn parse_or_default(key: &str) -> Self {
        key.parse().unwrap_or_else(|e: GameError| {
            log::warn!("{e}, falling back to basic");
            EnemyKind::Basic
        })
    }
}

impl FromStr for EnemyKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EnemyKind::ALL
            .iter()
            .copied()
            .find(|k| k.key() == s)
            .ok_or_else(|| GameError::UnknownKey { table: "enemy", key: s.to_string() })
    }
}

// ── Bosses ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BossKind {
    Stage1,
    Stage2,
    Stage3,
    Stage4,
    Stage5Final,
    /// Major boss entering stage 3.
    AsteroidCrusher,
    /// Major boss entering stage 5.
    VoidReaper,
}

#[derive(Clone, Copy, Debug)]
pub struct BossParams {
    pub key: &'static str,
    pub name: &'static str,
    pub health: f32,
    pub width: f32,
    pub height: f32,
    pub points: u32,
    /// Shards released on death.
    pub shard_drops: u32,
    pub speed: f32,
    pub attack_rate_ms: f32,
    pub attack: BossAttack,
    pub movement: BossMovement,
    pub color: Rgb,
}

const fn spread(count: u32, spacing: f32, homing_chance: f64) -> BossAttack {
    BossAttack::Spread { count, spacing, homing_chance }
}

static BOSS_TABLE: [BossParams; 7] = [
    BossParams { key: "Stage1_Boss",      name: "Sentinel",         health: 500.0,  width: 80.0,  height: 80.0,  points: 1000, shard_drops: 3,  speed: 50.0,  attack_rate_ms: 2000.0, attack: spread(3, 20.0, 0.0),  movement: BossMovement::Patrol,                        color: Rgb(0xff, 0x00, 0x80) },
    BossParams { key: "Stage2_Boss",      name: "Rock Warden",      health: 750.0,  width: 90.0,  height: 90.0,  points: 1500, shard_drops: 4,  speed: 80.0,  attack_rate_ms: 1500.0, attack: spread(5, 15.0, 0.3),  movement: BossMovement::PatrolWave,                    color: Rgb(0x8b, 0x73, 0x55) },
    BossParams { key: "Stage3_Boss",      name: "Nebula Queen",     health: 1000.0, width: 100.0, height: 100.0, points: 2000, shard_drops: 5,  speed: 60.0,  attack_rate_ms: 1200.0, attack: spread(7, 12.0, 0.4),  movement: BossMovement::Hover,                         color: Rgb(0xff, 0x88, 0xff) },
    BossParams { key: "Stage4_Boss",      name: "Void Walker",      health: 1500.0, width: 110.0, height: 110.0, points: 3000, shard_drops: 6,  speed: 100.0, attack_rate_ms: 1000.0, attack: spread(9, 10.0, 0.5),  movement: BossMovement::Teleport { every_ms: 4000.0 }, color: Rgb(0x00, 0x00, 0xff) },
    BossParams { key: "Stage5_FinalBoss", name: "Overmind",         health: 2500.0, width: 120.0, height: 120.0, points: 5000, shard_drops: 10, speed: 70.0,  attack_rate_ms: 800.0,  attack: spread(11, 8.0, 0.6),  movement: BossMovement::Orbit,                         color: Rgb(0xff, 0x00, 0x00) },
    BossParams { key: "Asteroid_Crusher", name: "Asteroid Crusher", health: 2000.0, width: 130.0, height: 130.0, points: 4000, shard_drops: 8,  speed: 40.0,  attack_rate_ms: 2000.0, attack: BossAttack::Ring { shot: EnemyShot::Bomb, count: 8 },    movement: BossMovement::Hover,                         color: Rgb(0x65, 0x43, 0x21) },
    BossParams { key: "Void_Reaper",      name: "Void Reaper",      health: 3000.0, width: 140.0, height: 140.0, points: 6000, shard_drops: 10, speed: 120.0, attack_rate_ms: 1500.0, attack: BossAttack::Ring { shot: EnemyShot::Spiral, count: 10 }, movement: BossMovement::Teleport { every_ms: 4000.0 }, color: Rgb(0x44, 0x00, 0xaa) },
];

impl BossKind {
    pub const ALL: [BossKind; 7] = [
        BossKind::Stage1,
        BossKind::Stage2,
        BossKind::Stage3,
        BossKind::Stage4,
        BossKind::Stage5Final,
        BossKind::AsteroidCrusher,
        BossKind::VoidReaper,
    ];

    pub fn params(self) -> &'static BossParams {
        &BOSS_TABLE[self as usize]
    }

    pub fn key(self) -> &'static str {
        self.params().key
    }

    /// Parse a catalog key, falling back to the stage 1 boss.
    pub fn parse_or_default(key: &str) -> Self {
        key.parse().unwrap_or_else(|e: GameError| {
            log::warn!("{e}, falling back to Stage1_Boss");
            BossKind::Stage1
        })
    }
}

impl FromStr for BossKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BossKind::ALL
            .iter()
            .copied()
            .find(|k| k.key() == s)
            .ok_or_else(|| GameError::UnknownKey { table: "boss", key: s.to_string() })
    }
}
