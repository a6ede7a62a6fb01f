use super::{BoundingBox, Collidable, Entity, Field, FrameContext};
use crate::catalog::EnemyShot;
use crate::render::{Render, Rgb, Surface};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Owner {
    Player,
    Enemy,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Trajectory {
    /// Constant velocity.
    Linear,
    /// Steers toward the opposing side's target each frame.
    Homing,
    /// Sideways oscillation around a straight descent.
    Spiral { angle: f32 },
}

/// Area damage applied around each hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Splash {
    pub radius: f32,
    pub damage_scale: f32,
}

/// A projectile. `x`/`y` is the centre.
#[derive(Clone, Debug)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub vx: f32,
    pub vy: f32,
    /// Nominal speed; homing velocity is clamped to this.
    pub speed: f32,
    pub damage: f32,
    pub owner: Owner,
    pub trajectory: Trajectory,
    /// Extra hits left before the bullet is consumed.
    pub pierce: Option<u32>,
    pub splash: Option<Splash>,
    pub color: Rgb,
    /// Set when consumed by a hit; removed at the next cleanup.
    pub spent: bool,
}

impl Bullet {
    pub const PLAYER_HOMING_FORCE: f32 = 100.0;
    pub const ENEMY_HOMING_FORCE: f32 = 50.0;

    /// Straight-down enemy shot.
    pub fn enemy(shot: EnemyShot, x: f32, y: f32) -> Self {
        let p = shot.params();
        Self {
            x,
            y,
            width: p.width,
            height: p.height,
            vx: 0.0,
            vy: p.speed,
            speed: p.speed,
            damage: p.damage,
            owner: Owner::Enemy,
            trajectory: Trajectory::Linear,
            pierce: None,
            splash: None,
            color: p.color,
            spent: false,
        }
    }

    /// Enemy shot that steers toward the player.
    pub fn homing(x: f32, y: f32) -> Self {
        Self { trajectory: Trajectory::Homing, ..Self::enemy(EnemyShot::Homing, x, y) }
    }

    /// Enemy spiral shot with initial phase `angle`.
    pub fn spiral(x: f32, y: f32, angle: f32) -> Self {
        let mut bullet = Self::enemy(EnemyShot::Spiral, x, y);
        bullet.vx = angle.cos() * bullet.speed * 0.3;
        bullet.vy = angle.sin() * bullet.speed * 0.3 + bullet.speed;
        bullet.trajectory = Trajectory::Spiral { angle };
        bullet
    }

    /// Record a hit. Returns true when the bullet is used up.
    pub fn register_hit(&mut self) -> bool {
        match self.pierce.as_mut() {
            Some(left) if *left > 0 => {
                *left -= 1;
                false
            }
            _ => {
                self.spent = true;
                true
            }
        }
    }
}

impl Collidable for Bullet {
    fn bounds(&self) -> BoundingBox {
        BoundingBox::centered(self.x, self.y, self.width, self.height)
    }
}

impl Entity for Bullet {
    fn update(&mut self, dt: f32, ctx: &mut FrameContext<'_>) {
        if dt <= 0.0 {
            return;
        }
        let secs = dt / 1000.0;
        match self.trajectory {
            Trajectory::Linear => {}
            Trajectory::Homing => {
                // player bullets have no enemy target to lock onto
                let target = match self.owner {
                    Owner::Enemy => ctx.target,
                    Owner::Player => None,
                };
                if let Some((tx, ty)) = target {
                    let force = match self.owner {
                        Owner::Player => Self::PLAYER_HOMING_FORCE,
                        Owner::Enemy => Self::ENEMY_HOMING_FORCE,
                    };
                    steer(self, tx, ty, force, secs);
                }
            }
            Trajectory::Spiral { angle } => {
                let angle = angle + dt / 100.0;
                self.trajectory = Trajectory::Spiral { angle };
                self.x += self.vx * secs;
                self.y += self.vy * secs;
                self.vx = angle.cos() * self.speed * 0.3;
                return;
            }
        }
        self.x += self.vx * secs;
        self.y += self.vy * secs;
    }

    fn is_alive(&self, field: &Field) -> bool {
        !self.spent && field.contains_with_margin(self.x, self.y)
    }
}

/// Nudge velocity toward `(tx, ty)` and clamp to the bullet's speed.
fn steer(bullet: &mut Bullet, tx: f32, ty: f32, force: f32, secs: f32) {
    let dx = tx - bullet.x;
    let dy = ty - bullet.y;
    let dist = (dx * dx + dy * dy).sqrt();
    if dist == 0.0 {
        return;
    }
    bullet.vx += dx / dist * force * secs;
    bullet.vy += dy / dist * force * secs;
    let speed = (bullet.vx * bullet.vx + bullet.vy * bullet.vy).sqrt();
    let cap = bullet.speed.abs();
    if speed > cap && speed > 0.0 {
        bullet.vx = bullet.vx / speed * cap;
        bullet.vy = bullet.vy / speed * cap;
    }
}

impl Render for Bullet {
    fn render(&self, surface: &mut dyn Surface) {
        surface.fill_rect(self.bounds(), self.color, 1.0);
    }
}
