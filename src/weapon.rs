//! Weapon resolver and volley construction.
//!
//! [`WeaponTable`] holds the session's base stats for every weapon. Power
//! scaling on pickup writes to it, so two sessions never share scaling.

use std::f32::consts::{FRAC_PI_6, TAU};

use rand::{Rng, RngCore};

use crate::catalog::{BossAttack, EnemyShot, Special, Volley, WeaponKind, MAX_WEAPON_LEVEL};
use crate::entities::{Bullet, Owner, Splash, Trajectory};
use crate::render::Rgb;

/// Fan width used when a volley has more than one projectile.
pub const DEFAULT_SPREAD: f32 = FRAC_PI_6;

/// Effective stats of a weapon at a given upgrade level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeaponStats {
    pub kind: WeaponKind,
    pub level: u32,
    /// Minimum ms between shots, before the player's fire-rate upgrade.
    pub fire_rate_ms: f32,
    pub damage: f32,
    pub bullet_speed: f32,
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub color: Rgb,
    pub projectiles: u32,
    pub special: Option<Special>,
    /// Extra targets each bullet passes through.
    pub piercing: Option<u32>,
    /// Fan width in radians.
    pub spread: f32,
}

/// Session-scoped base damage and fire interval.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaledBase {
    pub damage: f32,
    pub fire_rate_ms: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WeaponTable {
    bases: [ScaledBase; 8],
}

impl Default for WeaponTable {
    fn default() -> Self {
        Self::new()
    }
}

impl WeaponTable {
    /// Fresh table with catalog base stats.
    pub fn new() -> Self {
        let bases = WeaponKind::ALL.map(|k| {
            let p = k.params();
            ScaledBase { damage: p.damage, fire_rate_ms: p.fire_rate_ms }
        });
        Self { bases }
    }

    pub fn base(&self, kind: WeaponKind) -> ScaledBase {
        self.bases[kind as usize]
    }

    /// Permanently raise `kind`'s base damage by `1 + bonus` and shorten its
    /// base fire interval by `1 - bonus / 10`.
    pub fn apply_power_scaling(&mut self, kind: WeaponKind, bonus: f32) {
        let base = &mut self.bases[kind as usize];
        base.damage *= 1.0 + bonus;
        base.fire_rate_ms = (base.fire_rate_ms * (1.0 - bonus * 0.1)).max(1.0);
        log::debug!(
            "Power scaling {} by {bonus:.2}: damage {:.1}, interval {:.1} ms",
            kind.key(),
            base.damage,
            base.fire_rate_ms
        );
    }

    /// Stats for `kind` at `level`; levels outside 1..=5 are clamped.
    pub fn resolve(&self, kind: WeaponKind, level: u32) -> WeaponStats {
        let p = kind.params();
        let base = self.base(kind);
        let level = level.clamp(1, MAX_WEAPON_LEVEL);

        let mut stats = WeaponStats {
            kind,
            level,
            fire_rate_ms: base.fire_rate_ms,
            damage: base.damage,
            bullet_speed: p.bullet_speed,
            bullet_width: p.bullet_width,
            bullet_height: p.bullet_height,
            color: p.color,
            projectiles: p.projectiles,
            special: None,
            piercing: None,
            spread: DEFAULT_SPREAD,
        };
        if level == 1 {
            return stats;
        }

        let step = &p.upgrades[(level - 2) as usize];
        stats.fire_rate_ms /= step.fire_rate_divisor;
        stats.damage *= step.damage_multiplier;
        stats.projectiles = step.projectiles;
        stats.special = step.special;
        match step.special {
            Some(Special::Piercing { count }) | Some(Special::ExtendedBeam { count }) => {
                stats.piercing = Some(count);
            }
            Some(Special::RapidFire { interval_scale }) => stats.fire_rate_ms *= interval_scale,
            Some(Special::WideSpread { spread }) => stats.spread = spread,
            _ => {}
        }
        stats
    }
}

/// Stats straight from the catalog, with no session scaling.
pub fn resolve(kind: WeaponKind, level: u32) -> WeaponStats {
    WeaponTable::new().resolve(kind, level)
}

/// Catch-up bonus applied when a weapon is picked up at `stage`-`level`.
pub fn power_scaling_bonus(stage: u32, level: u32) -> f32 {
    let depth = (stage.saturating_sub(1) * 5 + level) as f32;
    stage as f32 * 0.1 + depth * 0.05
}

/// Angles of `count` projectiles fanned evenly across `spread`, centred on
/// straight up. A single projectile flies straight.
pub fn fan_angles(count: u32, spread: f32) -> Vec<f32> {
    if count <= 1 {
        return vec![0.0; count as usize];
    }
    let half = (count - 1) as f32 / 2.0;
    (0..count)
        .map(|i| (i as f32 - half) * spread / (count - 1) as f32)
        .collect()
}

/// Bullets for one trigger pull from `muzzle` (centre-top of the ship).
pub fn player_volley(
    stats: &WeaponStats,
    muzzle: (f32, f32),
    damage_multiplier: f32,
    rng: &mut dyn RngCore,
) -> Vec<Bullet> {
    let volleys = match stats.special {
        Some(Special::Burst { volleys }) => volleys.max(1),
        _ => 1,
    };
    let offsets = match stats.special {
        Some(Special::DoubleTap { offset }) => vec![-offset, offset],
        _ => vec![0.0],
    };
    let splash = match stats.special {
        Some(Special::ChainExplosion { radius, damage_scale }) => Some(Splash { radius, damage_scale }),
        _ => None,
    };

    let mut bullets = Vec::new();
    for v in 0..volleys {
        // later volleys trail behind the first
        let y = muzzle.1 + v as f32 * (stats.bullet_height + 4.0);
        for angle in fan_angles(stats.projectiles, stats.spread) {
            let (vx, vy) = if angle == 0.0 {
                (0.0, -stats.bullet_speed)
            } else {
                (angle.sin() * stats.bullet_speed * 0.2, -angle.cos() * stats.bullet_speed)
            };
            for &dx in &offsets {
                let mut damage = stats.damage * damage_multiplier;
                if let Some(Special::Critical { chance, multiplier }) = stats.special {
                    if rng.gen::<f64>() < chance {
                        damage *= multiplier;
                    }
                }
                bullets.push(Bullet {
                    x: muzzle.0 + dx,
                    y,
                    width: stats.bullet_width,
                    height: stats.bullet_height,
                    vx,
                    vy,
                    speed: stats.bullet_speed,
                    damage,
                    owner: Owner::Player,
                    trajectory: Trajectory::Linear,
                    pierce: stats.piercing,
                    splash,
                    color: stats.color,
                    spent: false,
                });
            }
        }
    }
    bullets
}

/// `count` shots in a horizontal row `spacing` px apart, centred on `x`.
fn row(shot: EnemyShot, count: u32, spacing: f32, (x, y): (f32, f32)) -> impl Iterator<Item = Bullet> {
    let half = (count.max(1) - 1) as f32 / 2.0;
    (0..count).map(move |i| Bullet::enemy(shot, x + (i as f32 - half) * spacing, y))
}

/// Bullets a regular enemy fires from `muzzle` (centre-bottom).
pub fn enemy_volley(volley: Volley, muzzle: (f32, f32)) -> Vec<Bullet> {
    let (x, y) = muzzle;
    match volley {
        Volley::Single => vec![Bullet::enemy(EnemyShot::Basic, x, y)],
        Volley::Twin => vec![
            Bullet::enemy(EnemyShot::Basic, x - 8.0, y),
            Bullet::enemy(EnemyShot::Basic, x + 8.0, y),
        ],
        Volley::Row { shot, count, spacing } => row(shot, count, spacing, muzzle).collect(),
        Volley::Homing { count } => (0..count)
            .map(|i| Bullet::homing(x + (i as f32 - 0.5) * 10.0, y))
            .collect(),
        Volley::Spiral { count } => spiral_ring(count, muzzle),
    }
}

fn spiral_ring(count: u32, (x, y): (f32, f32)) -> Vec<Bullet> {
    let count = count.max(1);
    (0..count)
        .map(|i| Bullet::spiral(x, y, i as f32 * TAU / count as f32))
        .collect()
}

/// Bullets a boss fires from `muzzle` (centre-bottom).
pub fn boss_volley(attack: BossAttack, muzzle: (f32, f32), rng: &mut dyn RngCore) -> Vec<Bullet> {
    let (x, y) = muzzle;
    match attack {
        BossAttack::Spread { count, spacing, homing_chance } => {
            let mut bullets: Vec<Bullet> = row(EnemyShot::Heavy, count, spacing, muzzle).collect();
            if rng.gen::<f64>() < homing_chance {
                bullets.push(Bullet::homing(x, y));
            }
            bullets
        }
        BossAttack::Ring { shot: EnemyShot::Spiral, count } => spiral_ring(count, muzzle),
        BossAttack::Ring { shot, count } => {
            let count = count.max(1);
            let speed = shot.params().speed;
            (0..count)
                .map(|i| {
                    let angle = i as f32 * TAU / count as f32;
                    Bullet { vx: angle.cos() * speed, vy: angle.sin() * speed, ..Bullet::enemy(shot, x, y) }
                })
                .collect()
        }
    }
}
