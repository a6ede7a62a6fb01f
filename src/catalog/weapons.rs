//! The eight player weapons and their upgrade ladders.

use std::str::FromStr;

use crate::error::GameError;
use crate::render::Rgb;

pub const MAX_WEAPON_LEVEL: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WeaponKind {
    Pistol,
    MachineGun,
    Bazooka,
    Sniper,
    Glock,
    Ak47,
    Shotgun,
    Laser,
}

/// Behaviour unlocked by a weapon's final upgrade.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Special {
    /// Bullets pass through `count` extra targets.
    Piercing { count: u32 },
    /// Fire interval multiplied by `interval_scale`.
    RapidFire { interval_scale: f32 },
    /// Hits splash `damage_scale` of the damage onto enemies within `radius`.
    ChainExplosion { radius: f32, damage_scale: f32 },
    /// Each bullet has `chance` to deal `multiplier` times damage.
    Critical { chance: f64, multiplier: f32 },
    /// Twin bullets `offset` px either side of the muzzle.
    DoubleTap { offset: f32 },
    /// `volleys` stacked volleys per trigger pull.
    Burst { volleys: u32 },
    /// Fan spread widened to `spread` radians.
    WideSpread { spread: f32 },
    /// Beam that pierces `count` extra targets.
    ExtendedBeam { count: u32 },
}

impl Special {
    pub fn name(&self) -> &'static str {
        match self {
            Special::Piercing { .. } => "piercing",
            Special::RapidFire { .. } => "rapidFire",
            Special::ChainExplosion { .. } => "chainExplosion",
            Special::Critical { .. } => "critical",
            Special::DoubleTap { .. } => "doubleTap",
            Special::Burst { .. } => "burst",
            Special::WideSpread { .. } => "wideSpread",
            Special::ExtendedBeam { .. } => "extendedBeam",
        }
    }
}

/// One step of the upgrade ladder (levels 2 through 5).
#[derive(Clone, Copy, Debug)]
pub struct UpgradeStep {
    /// Fire interval is divided by this.
    pub fire_rate_divisor: f32,
    pub damage_multiplier: f32,
    pub projectiles: u32,
    pub special: Option<Special>,
}

#[derive(Clone, Copy, Debug)]
pub struct WeaponParams {
    pub key: &'static str,
    pub name: &'static str,
    /// Minimum interval between shots in ms.
    pub fire_rate_ms: f32,
    pub damage: f32,
    pub bullet_speed: f32,
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub color: Rgb,
    pub projectiles: u32,
    pub upgrades: [UpgradeStep; 4],
}

const fn step(fire_rate_divisor: f32, damage_multiplier: f32, projectiles: u32) -> UpgradeStep {
    UpgradeStep { fire_rate_divisor, damage_multiplier, projectiles, special: None }
}

const fn ladder(projectiles: [u32; 4], special: Special) -> [UpgradeStep; 4] {
    [
        step(1.25, 1.2, projectiles[0]),
        step(1.5, 1.4, projectiles[1]),
        step(1.75, 1.6, projectiles[2]),
        UpgradeStep { fire_rate_divisor: 2.0, damage_multiplier: 1.8, projectiles: projectiles[3], special: Some(special) },
    ]
}

static WEAPON_TABLE: [WeaponParams; 8] = [
    WeaponParams {
        key: "pistol", name: "Pistol",
        fire_rate_ms: 300.0, damage: 20.0, bullet_speed: 500.0, bullet_width: 4.0, bullet_height: 8.0,
        color: Rgb(0xff, 0xff, 0xff), projectiles: 1,
        upgrades: ladder([1, 1, 1, 1], Special::Piercing { count: 2 }),
    },
    WeaponParams {
        key: "machinegun", name: "Machine Gun",
        fire_rate_ms: 150.0, damage: 15.0, bullet_speed: 600.0, bullet_width: 3.0, bullet_height: 6.0,
        color: Rgb(0xff, 0xff, 0x00), projectiles: 1,
        upgrades: ladder([1, 1, 1, 1], Special::RapidFire { interval_scale: 0.75 }),
    },
    WeaponParams {
        key: "bazooka", name: "Bazooka",
        fire_rate_ms: 800.0, damage: 80.0, bullet_speed: 400.0, bullet_width: 12.0, bullet_height: 12.0,
        color: Rgb(0xff, 0x44, 0x00), projectiles: 1,
        upgrades: ladder([1, 1, 1, 1], Special::ChainExplosion { radius: 40.0, damage_scale: 0.5 }),
    },
    WeaponParams {
        key: "sniper", name: "Sniper Rifle",
        fire_rate_ms: 1000.0, damage: 100.0, bullet_speed: 800.0, bullet_width: 2.0, bullet_height: 20.0,
        color: Rgb(0x00, 0xff, 0xff), projectiles: 1,
        upgrades: ladder([1, 1, 1, 1], Special::Critical { chance: 0.5, multiplier: 2.0 }),
    },
    WeaponParams {
        key: "glock", name: "Glock",
        fire_rate_ms: 250.0, damage: 25.0, bullet_speed: 550.0, bullet_width: 4.0, bullet_height: 7.0,
        color: Rgb(0xcc, 0xcc, 0xcc), projectiles: 1,
        upgrades: ladder([1, 1, 1, 1], Special::DoubleTap { offset: 4.0 }),
    },
    WeaponParams {
        key: "ak47", name: "AK-47",
        fire_rate_ms: 200.0, damage: 30.0, bullet_speed: 580.0, bullet_width: 4.0, bullet_height: 8.0,
        color: Rgb(0x8b, 0x45, 0x13), projectiles: 1,
        upgrades: ladder([1, 1, 1, 1], Special::Burst { volleys: 3 }),
    },
    WeaponParams {
        key: "shotgun", name: "Shotgun",
        fire_rate_ms: 600.0, damage: 40.0, bullet_speed: 450.0, bullet_width: 3.0, bullet_height: 5.0,
        color: Rgb(0x00, 0xff, 0x00), projectiles: 5,
        upgrades: ladder([5, 5, 6, 7], Special::WideSpread { spread: std::f32::consts::FRAC_PI_3 }),
    },
    WeaponParams {
        key: "laser", name: "Laser Rifle",
        fire_rate_ms: 400.0, damage: 50.0, bullet_speed: 1000.0, bullet_width: 3.0, bullet_height: 30.0,
        color: Rgb(0xff, 0x00, 0xff), projectiles: 1,
        upgrades: ladder([1, 1, 1, 1], Special::ExtendedBeam { count: 2 }),
    },
];

impl WeaponKind {
    pub const ALL: [WeaponKind; 8] = [
        WeaponKind::Pistol,
        WeaponKind::MachineGun,
        WeaponKind::Bazooka,
        WeaponKind::Sniper,
        WeaponKind::Glock,
        WeaponKind::Ak47,
        WeaponKind::Shotgun,
        WeaponKind::Laser,
    ];

    pub fn params(self) -> &'static WeaponParams {
        &WEAPON_TABLE[self as usize]
    }

    pub fn key(self) -> &'static str {
        self.params().key
    }

    pub fn name(self) -> &'static str {
        self.params().name
    }

    /// Parse a catalog key, falling back to the pistol.
    pub fn parse_or_default(key: &str) -> Self {
        key.parse().unwrap_or_else(|e: GameError| {
            log::warn!("{e}, falling back to pistol");
            WeaponKind::Pistol
        })
    }
}

impl FromStr for WeaponKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WeaponKind::ALL
            .iter()
            .copied()
            .find(|k| k.key() == s)
            .ok_or_else(|| GameError::UnknownKey { table: "weapon", key: s.to_string() })
    }
}
