//! The 25 level configurations (5 stages of 5 levels).

use std::fmt;
use std::str::FromStr;

use super::enemies::{BossKind, EnemyKind};
use crate::error::GameError;

use EnemyKind::*;

pub const STAGE_COUNT: u32 = 5;
pub const LEVELS_PER_STAGE: u32 = 5;

#[derive(Clone, Copy, Debug)]
pub struct LevelParams {
    /// Weighted spawn table; weights need not sum to 100.
    pub enemy_weights: &'static [(EnemyKind, u32)],
    /// Mean spawn interval in ms.
    pub spawn_rate_ms: f32,
    /// Percent of each enemy's base speed.
    pub speed_percent: f32,
    /// Percent scaling of the enemy fire chance.
    pub shoot_percent: f32,
    /// Types that split into two children on death. Empty when the level
    /// has no splitting.
    pub split_types: &'static [EnemyKind],
    pub boss: Option<BossKind>,
}

impl LevelParams {
    pub fn splits(&self, kind: EnemyKind) -> bool {
        self.split_types.contains(&kind)
    }
}

const fn lvl(
    enemy_weights: &'static [(EnemyKind, u32)],
    spawn_rate_ms: f32,
    speed_percent: f32,
    shoot_percent: f32,
    split_types: &'static [EnemyKind],
    boss: Option<BossKind>,
) -> LevelParams {
    LevelParams { enemy_weights, spawn_rate_ms, speed_percent, shoot_percent, split_types, boss }
}

static LEVEL_TABLE: [[LevelParams; 5]; 5] = [
    [
        lvl(&[(Basic, 100)], 3000.0, 80.0, 0.0, &[], None),
        lvl(&[(Basic, 80), (Scout, 20)], 2500.0, 90.0, 0.0, &[], None),
        lvl(&[(Basic, 60), (Scout, 30), (Zigzag, 10)], 2000.0, 100.0, 20.0, &[], None),
        lvl(&[(Basic, 40), (Scout, 30), (Zigzag, 20), (Fast, 10)], 1800.0, 110.0, 30.0, &[Scout, Basic], None),
        lvl(&[(Basic, 50), (Scout, 30), (Zigzag, 20)], 3000.0, 110.0, 30.0, &[], Some(BossKind::Stage1)),
    ],
    [
        lvl(&[(Basic, 50), (Zigzag, 30), (Fast, 20)], 2200.0, 120.0, 25.0, &[], None),
        lvl(&[(Zigzag, 40), (Fast, 30), (Fighter, 20), (Sidewinder, 10)], 2000.0, 130.0, 35.0, &[], None),
        lvl(&[(Zigzag, 30), (Fast, 25), (Fighter, 25), (Sidewinder, 20)], 1800.0, 140.0, 40.0, &[], None),
        lvl(&[(Fast, 30), (Fighter, 25), (Sidewinder, 25), (Hunter, 20)], 1600.0, 150.0, 45.0, &[Zigzag, Fast], None),
        lvl(&[(Zigzag, 40), (Fast, 30), (Fighter, 30)], 3500.0, 150.0, 45.0, &[], Some(BossKind::Stage2)),
    ],
    [
        lvl(&[(Fighter, 40), (Sidewinder, 30), (Hunter, 25), (Bomber, 5)], 1800.0, 160.0, 50.0, &[], None),
        lvl(&[(Sidewinder, 35), (Hunter, 30), (Bomber, 20), (Heavy, 15)], 1600.0, 170.0, 55.0, &[], None),
        lvl(&[(Hunter, 30), (Bomber, 25), (Heavy, 25), (Spiral, 20)], 1500.0, 180.0, 60.0, &[], None),
        lvl(&[(Bomber, 30), (Heavy, 25), (Spiral, 25), (Turret, 20)], 1400.0, 190.0, 65.0, &[Hunter, Bomber], None),
        lvl(&[(Hunter, 40), (Bomber, 30), (Heavy, 30)], 4000.0, 190.0, 65.0, &[], Some(BossKind::Stage3)),
    ],
    [
        lvl(&[(Heavy, 35), (Spiral, 30), (Turret, 25), (EliteHunter, 10)], 1500.0, 200.0, 70.0, &[], None),
        lvl(&[(Spiral, 30), (Turret, 30), (EliteHunter, 25), (EliteBomber, 15)], 1400.0, 210.0, 75.0, &[], None),
        lvl(&[(Turret, 30), (EliteHunter, 30), (EliteBomber, 25), (EliteSpiral, 15)], 1300.0, 220.0, 80.0, &[], None),
        lvl(&[(EliteHunter, 35), (EliteBomber, 30), (EliteSpiral, 25), (Heavy, 10)], 1200.0, 230.0, 85.0, &[EliteHunter, EliteBomber], None),
        lvl(&[(EliteHunter, 40), (EliteBomber, 30), (EliteSpiral, 30)], 4500.0, 230.0, 85.0, &[], Some(BossKind::Stage4)),
    ],
    [
        lvl(&[(EliteHunter, 40), (EliteBomber, 35), (EliteSpiral, 25)], 1200.0, 240.0, 90.0, &[], None),
        lvl(&[(EliteBomber, 40), (EliteSpiral, 35), (EliteHunter, 25)], 1100.0, 250.0, 95.0, &[], None),
        lvl(&[(EliteSpiral, 40), (EliteHunter, 35), (EliteBomber, 25)], 1000.0, 260.0, 100.0, &[], None),
        lvl(&[(EliteHunter, 34), (EliteBomber, 33), (EliteSpiral, 33)], 900.0, 270.0, 100.0, &[EliteHunter, EliteBomber, EliteSpiral], None),
        lvl(&[(EliteHunter, 40), (EliteBomber, 30), (EliteSpiral, 30)], 5000.0, 270.0, 100.0, &[], Some(BossKind::Stage5Final)),
    ],
];

/// A `"stage-level"` key such as `"3-4"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LevelKey {
    pub stage: u32,
    pub level: u32,
}

impl LevelKey {
    pub const FIRST: LevelKey = LevelKey { stage: 1, level: 1 };

    /// Returns `None` outside 1..=5 / 1..=5.
    pub fn new(stage: u32, level: u32) -> Option<Self> {
        let valid = (1..=STAGE_COUNT).contains(&stage) && (1..=LEVELS_PER_STAGE).contains(&level);
        valid.then_some(Self { stage, level })
    }

    pub fn params(self) -> &'static LevelParams {
        &LEVEL_TABLE[(self.stage - 1) as usize][(self.level - 1) as usize]
    }

    /// Absolute level number, 1 ..= 25.
    pub fn ordinal(self) -> u32 {
        (self.stage - 1) * LEVELS_PER_STAGE + self.level
    }
}

impl fmt::Display for LevelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.stage, self.level)
    }
}

impl FromStr for LevelKey {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || GameError::LevelKey(s.to_string());
        let (stage, level) = s.split_once('-').ok_or_else(malformed)?;
        let stage = stage.trim().parse().map_err(|_| malformed())?;
        let level = level.trim().parse().map_err(|_| malformed())?;
        LevelKey::new(stage, level).ok_or_else(|| GameError::UnknownKey { table: "level", key: s.to_string() })
    }
}

/// Look up a level; out-of-range coordinates fall back to 1-1 with a warning.
pub fn level_params(stage: u32, level: u32) -> &'static LevelParams {
    match LevelKey::new(stage, level) {
        Some(key) => key.params(),
        None => {
            log::warn!("No config for level {stage}-{level}, falling back to 1-1");
            LevelKey::FIRST.params()
        }
    }
}

/// Look up a level by its `"stage-level"` key, falling back to 1-1.
pub fn level_params_by_key(key: &str) -> &'static LevelParams {
    match key.parse::<LevelKey>() {
        Ok(key) => key.params(),
        Err(e) => {
            log::warn!("{e}, falling back to 1-1");
            LevelKey::FIRST.params()
        }
    }
}
