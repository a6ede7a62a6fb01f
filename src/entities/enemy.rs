use rand::{Rng, RngCore};

use super::{BoundingBox, Collidable, Entity, Field, FrameContext};
use crate::catalog::{EnemyKind, LevelParams};
use crate::motion::{self, Motion, Steering, Wobble};
use crate::render::{Render, Rgb, Surface};
use crate::weapon;

/// Enemies only open fire from this level of a stage onward.
pub const FIRST_SHOOTING_LEVEL: u32 = 3;
/// And only once they are this far down the field.
const MIN_FIRING_Y: f32 = 50.0;

#[derive(Clone, Debug)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub motion: Motion,
    pub width: f32,
    pub height: f32,
    pub health: f32,
    pub max_health: f32,
    /// Pixels per second after level scaling.
    pub speed: f32,
    pub points: u32,
    pub fire_rate_ms: f32,
    pub can_shoot: bool,
    /// Per-frame chance of attempting a volley.
    pub shoot_chance: f64,
    pub carries_shard: bool,
    pub last_shot_ms: Option<f64>,
}

impl Enemy {
    /// Build an enemy of `kind` at top-left `(x, y)` scaled for the level.
    pub fn spawn(kind: EnemyKind, x: f32, y: f32, level: u32, params: &LevelParams, rng: &mut dyn RngCore) -> Self {
        let p = kind.params();
        let mut speed = p.base_speed * params.speed_percent / 100.0;
        if level == 1 {
            speed *= 0.8;
        }
        Self {
            kind,
            motion: Motion::new(x, y, p.radius, Wobble::sample(rng)),
            width: p.width,
            height: p.height,
            health: p.health,
            max_health: p.health,
            speed,
            points: p.points,
            fire_rate_ms: p.fire_rate_ms,
            can_shoot: p.can_shoot,
            shoot_chance: params.shoot_percent as f64 / 100.0 * 0.01,
            carries_shard: false,
            last_shot_ms: None,
        }
    }

    pub fn x(&self) -> f32 {
        self.motion.x
    }

    pub fn y(&self) -> f32 {
        self.motion.y
    }

    pub fn center(&self) -> (f32, f32) {
        (self.motion.x + self.width / 2.0, self.motion.y + self.height / 2.0)
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).max(0.0);
    }

    /// Two half-size, half-health, faster children, or `None` when the
    /// halved health would round down to nothing.
    pub fn split(&self, rng: &mut dyn RngCore) -> Option<[Enemy; 2]> {
        let health = (self.max_health / 2.0).floor();
        if health < 1.0 {
            return None;
        }
        let child = |i: f32, rng: &mut dyn RngCore| {
            let x = self.motion.x + (i - 0.5) * 20.0;
            let y = self.motion.y + self.height / 2.0;
            Enemy {
                motion: Motion::new(x, y, self.motion.radius, Wobble::sample(rng)),
                width: self.width / 2.0,
                height: self.height / 2.0,
                health,
                max_health: health,
                speed: self.speed * 1.2,
                carries_shard: false,
                last_shot_ms: None,
                ..self.clone()
            }
        };
        Some([child(0.0, rng), child(1.0, rng)])
    }

    fn try_fire(&mut self, ctx: &mut FrameContext<'_>) {
        if ctx.level < FIRST_SHOOTING_LEVEL || !self.can_shoot || self.motion.y <= MIN_FIRING_Y {
            return;
        }
        if ctx.rng.gen::<f64>() >= self.shoot_chance {
            return;
        }
        if let Some(last) = self.last_shot_ms {
            if ctx.now_ms - last <= self.fire_rate_ms as f64 {
                return;
            }
        }
        let muzzle = (self.motion.x + self.width / 2.0, self.motion.y + self.height);
        ctx.spawned.extend(weapon::enemy_volley(self.kind.params().volley, muzzle));
        self.last_shot_ms = Some(ctx.now_ms);
    }
}

impl Collidable for Enemy {
    fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.motion.x, self.motion.y, self.width, self.height)
    }
}

impl Entity for Enemy {
    fn update(&mut self, dt: f32, ctx: &mut FrameContext<'_>) {
        if dt <= 0.0 {
            return;
        }
        let steering = Steering {
            speed: self.speed,
            level: ctx.level,
            width: self.width,
            height: self.height,
            target: ctx.target,
            field: ctx.field,
        };
        self.motion = motion::advance(self.kind.params().movement, self.motion, &steering, dt);
        self.try_fire(ctx);
    }

    fn is_alive(&self, field: &Field) -> bool {
        !self.is_dead() && self.motion.y < field.height + Field::MARGIN
    }
}

impl Render for Enemy {
    fn render(&self, surface: &mut dyn Surface) {
        surface.fill_rect(self.bounds(), self.kind.params().color, 1.0);
        if self.carries_shard {
            let (cx, cy) = self.center();
            surface.fill_rect(BoundingBox::centered(cx, cy, 6.0, 6.0), Rgb::CYAN, 1.0);
        }
        if self.health < self.max_health && self.max_health > 0.0 {
            let frac = self.health / self.max_health;
            let bar = BoundingBox::new(self.motion.x, self.motion.y - 6.0, self.width * frac, 3.0);
            surface.fill_rect(bar, Rgb::GREEN, 0.8);
        }
    }
}
