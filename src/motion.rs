//! Movement patterns as pure state transitions.
//!
//! Each pattern is a [`MovementPattern`] / [`BossMovement`] tag; the
//! functions here map `(tag, state, dt)` to the next state and never touch
//! the rest of the world.

use rand::{Rng, RngCore};

use crate::catalog::{BossMovement, MovementPattern};
use crate::entities::Field;

/// Zigzag parameters, sampled once when the enemy spawns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wobble {
    /// Pixels per second of sideways sway at the peak.
    pub amplitude: f32,
    /// Period scale in seconds.
    pub frequency: f32,
}

impl Wobble {
    pub fn sample(rng: &mut dyn RngCore) -> Self {
        Self {
            amplitude: 30.0 + rng.gen::<f32>() * 20.0,
            frequency: 1.0 + rng.gen::<f32>(),
        }
    }
}

/// Kinematic state of a regular enemy (top-left position).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Motion {
    pub x: f32,
    pub y: f32,
    pub elapsed_ms: f32,
    /// Spiral phase.
    pub angle: f32,
    /// Spiral radius, grows over time.
    pub radius: f32,
    /// Column a spiral mover circles around.
    pub anchor_x: f32,
    pub wobble: Wobble,
}

impl Motion {
    pub fn new(x: f32, y: f32, radius: f32, wobble: Wobble) -> Self {
        Self { x, y, elapsed_ms: 0.0, angle: 0.0, radius, anchor_x: x, wobble }
    }
}

/// Read-only inputs to an enemy movement step.
#[derive(Clone, Copy, Debug)]
pub struct Steering {
    /// Pixels per second.
    pub speed: f32,
    /// Level within the stage.
    pub level: u32,
    pub width: f32,
    pub height: f32,
    /// Player centre, if alive.
    pub target: Option<(f32, f32)>,
    pub field: Field,
}

/// Scroll speed the background and turrets share.
pub const SCROLL_SPEED: f32 = 50.0;

/// Advance a regular enemy by `dt` ms.
pub fn advance(pattern: MovementPattern, m: Motion, s: &Steering, dt: f32) -> Motion {
    if dt <= 0.0 {
        return m;
    }
    let secs = dt / 1000.0;
    let mut next = Motion { elapsed_ms: m.elapsed_ms + dt, ..m };
    let t = next.elapsed_ms;

    match pattern {
        MovementPattern::Zigzag if s.level >= 2 => {
            next.y += s.speed * secs;
            next.x += (t / (m.wobble.frequency * 1000.0)).sin() * m.wobble.amplitude * secs;
        }
        MovementPattern::Sidewinder => {
            next.y += s.speed * secs * 0.3;
            next.x += (t / 150.0).sin() * 300.0 * secs;
        }
        MovementPattern::Tracking { hunt } => match s.target {
            Some((tx, ty)) => {
                let dx = tx - (m.x + s.width / 2.0);
                let dy = ty - (m.y + s.height / 2.0);
                let dist = (dx * dx + dy * dy).sqrt();
                if dist > 0.0 {
                    next.x += dx / dist * s.speed * secs * hunt;
                    next.y += dy / dist * s.speed * secs * hunt;
                }
            }
            None => next.y += s.speed * secs,
        },
        MovementPattern::Spiral => {
            next.angle += dt / 100.0;
            next.radius += dt / 500.0;
            next.x = m.anchor_x + next.angle.cos() * next.radius;
            next.y += s.speed * secs * 0.5;
        }
        MovementPattern::Stationary => {
            next.y += SCROLL_SPEED * secs;
        }
        // Straight, and Zigzag before level 2
        _ => {
            next.y += s.speed * secs;
            next.x += (t / 500.0).sin() * 60.0 * secs;
        }
    }

    next.x = next.x.clamp(0.0, (s.field.width - s.width).max(0.0));
    next
}

// ── Bosses ────────────────────────────────────────────────────────────────────

/// Kinematic state of a boss (top-left position).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BossMotion {
    pub x: f32,
    pub y: f32,
    pub elapsed_ms: f32,
    /// +1 moving right, -1 moving left.
    pub direction: f32,
    pub teleport_ms: f32,
}

impl BossMotion {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, elapsed_ms: 0.0, direction: 1.0, teleport_ms: 0.0 }
    }
}

/// Side margin bosses keep from the field edges.
const BOSS_MARGIN: f32 = 50.0;

/// Advance a boss by `dt` ms. Only teleporting draws from `rng`.
pub fn advance_boss(
    movement: BossMovement,
    m: BossMotion,
    speed: f32,
    size: (f32, f32),
    field: Field,
    dt: f32,
    rng: &mut dyn RngCore,
) -> BossMotion {
    if dt <= 0.0 {
        return m;
    }
    let secs = dt / 1000.0;
    let mut next = BossMotion { elapsed_ms: m.elapsed_ms + dt, ..m };
    let t = next.elapsed_ms;
    let right_limit = field.width - size.0 - BOSS_MARGIN;

    match movement {
        BossMovement::Patrol | BossMovement::PatrolWave => {
            next.x += speed * next.direction * secs;
            if next.x < BOSS_MARGIN {
                next.direction = 1.0;
            } else if next.x > right_limit {
                next.direction = -1.0;
            }
            if movement == BossMovement::PatrolWave {
                next.y += (t / 500.0).sin() * 20.0 * secs;
            }
        }
        BossMovement::Hover => {}
        BossMovement::Teleport { every_ms } => {
            next.teleport_ms += dt;
            if next.teleport_ms > every_ms {
                let span = (field.width - size.0 - 2.0 * BOSS_MARGIN).max(0.0);
                next.x = BOSS_MARGIN + rng.gen::<f32>() * span;
                next.y = BOSS_MARGIN + rng.gen::<f32>() * 200.0;
                next.teleport_ms = 0.0;
            }
        }
        BossMovement::Orbit => {
            next.x += (t / 1000.0).cos() * speed * secs;
            next.y += (t / 800.0).sin() * 30.0 * secs;
            next.x = next.x.clamp(BOSS_MARGIN, right_limit.max(BOSS_MARGIN));
            next.y = next.y.clamp(BOSS_MARGIN, 300.0);
        }
    }
    next
}
