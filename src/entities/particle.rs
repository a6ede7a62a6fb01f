//! Visual-only entities: explosion particles and the scrolling starfield.

use rand::{Rng, RngCore};

use super::{BoundingBox, Entity, Field, FrameContext};
use crate::catalog::StageParams;
use crate::render::{Render, Rgb, Surface};

/// Nominal frame length the per-frame decay constants were tuned at.
const REFERENCE_FRAME_MS: f32 = 1000.0 / 60.0;

#[derive(Clone, Debug)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// 1.0 at birth, removed at 0.
    pub life: f32,
    /// Life lost per reference frame.
    pub decay: f32,
    pub size: f32,
    pub color: Rgb,
}

impl Particle {
    pub fn new(x: f32, y: f32, color: Rgb, rng: &mut dyn RngCore) -> Self {
        Self {
            x,
            y,
            vx: (rng.gen::<f32>() - 0.5) * 200.0,
            vy: (rng.gen::<f32>() - 0.5) * 200.0,
            life: 1.0,
            decay: rng.gen::<f32>() * 0.02 + 0.01,
            size: rng.gen::<f32>() * 4.0 + 2.0,
            color,
        }
    }
}

/// Push up to `count` particles at `(x, y)` without exceeding `cap`.
pub fn emit_burst(
    particles: &mut Vec<Particle>,
    cap: usize,
    (x, y): (f32, f32),
    color: Rgb,
    count: usize,
    rng: &mut dyn RngCore,
) {
    let room = cap.saturating_sub(particles.len());
    for _ in 0..count.min(room) {
        particles.push(Particle::new(x, y, color, rng));
    }
}

impl Particle {
    /// Advance without a frame context (used while gameplay is frozen).
    pub fn advance(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        let frames = dt / REFERENCE_FRAME_MS;
        self.x += self.vx * dt / 1000.0;
        self.y += self.vy * dt / 1000.0;
        self.life -= self.decay * frames;
        self.size *= 0.99f32.powf(frames);
    }
}

impl Entity for Particle {
    fn update(&mut self, dt: f32, _ctx: &mut FrameContext<'_>) {
        self.advance(dt);
    }

    fn is_alive(&self, _field: &Field) -> bool {
        self.life > 0.0
    }
}

impl Render for Particle {
    fn render(&self, surface: &mut dyn Surface) {
        let rect = BoundingBox::centered(self.x, self.y, self.size, self.size);
        surface.fill_rect(rect, self.color, self.life.clamp(0.0, 1.0));
    }
}

// ── Starfield ─────────────────────────────────────────────────────────────────

/// Stars per parallax layer, far to near.
const STARS_PER_LAYER: [usize; 3] = [60, 45, 30];

#[derive(Clone, Debug)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    /// Pixels per second before the player speed boost.
    pub speed: f32,
    pub brightness: f32,
    pub size: f32,
    pub layer: u32,
}

impl Star {
    /// Build the starfield for a stage theme.
    pub fn field_for(stage: &StageParams, field: Field, rng: &mut dyn RngCore) -> Vec<Star> {
        let mut stars = Vec::new();
        for layer in 0..stage.parallax_layers {
            let count = STARS_PER_LAYER.get(layer as usize).copied().unwrap_or(30);
            for _ in 0..count {
                stars.push(Star {
                    x: rng.gen::<f32>() * field.width,
                    y: rng.gen::<f32>() * field.height,
                    speed: 20.0 + layer as f32 * 20.0 + rng.gen::<f32>() * 20.0,
                    brightness: rng.gen::<f32>() * 0.5 + 0.2,
                    size: 1.0 + layer as f32,
                    layer,
                });
            }
        }
        stars
    }

    /// Scroll down; wrap to the top at a fresh column.
    pub fn scroll(&mut self, dt: f32, speed_boost: f32, field: Field, rng: &mut dyn RngCore) {
        if dt <= 0.0 {
            return;
        }
        self.y += self.speed * speed_boost * dt / 1000.0;
        if self.y > field.height {
            self.y = 0.0;
            self.x = rng.gen::<f32>() * field.width;
        }
    }
}
