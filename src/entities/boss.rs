use super::{BoundingBox, Collidable, Entity, Field, FrameContext};
use crate::catalog::{BossAttack, BossKind, BossMovement};
use crate::motion::{self, BossMotion};
use crate::render::{Render, Rgb, Surface};
use crate::weapon;

/// Health fractions below which phases 2, 3 and 4 begin.
const PHASE_THRESHOLDS: [f32; 3] = [0.75, 0.5, 0.25];
/// Each new phase multiplies the attack interval by this.
const PHASE_RATE_SCALE: f32 = 0.8;
pub const MAX_PHASE: u8 = 4;

#[derive(Clone, Debug)]
pub struct Boss {
    pub kind: BossKind,
    pub motion: BossMotion,
    pub width: f32,
    pub height: f32,
    pub health: f32,
    pub max_health: f32,
    pub points: u32,
    pub shard_drops: u32,
    pub speed: f32,
    /// Current attack interval; shrinks with each phase.
    pub attack_rate_ms: f32,
    pub attack_timer_ms: f32,
    /// 1 ..= 4.
    pub phase: u8,
    pub attack: BossAttack,
    pub movement: BossMovement,
}

impl Boss {
    pub fn spawn(kind: BossKind, x: f32, y: f32) -> Self {
        let p = kind.params();
        Self {
            kind,
            motion: BossMotion::new(x, y),
            width: p.width,
            height: p.height,
            health: p.health,
            max_health: p.health,
            points: p.points,
            shard_drops: p.shard_drops,
            speed: p.speed,
            attack_rate_ms: p.attack_rate_ms,
            attack_timer_ms: 0.0,
            phase: 1,
            attack: p.attack,
            movement: p.movement,
        }
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

    /// Step through every phase whose health threshold has been crossed.
    pub fn advance_phase(&mut self) {
        let frac = if self.max_health > 0.0 { self.health / self.max_health } else { 0.0 };
        while self.phase < MAX_PHASE && frac < PHASE_THRESHOLDS[(self.phase - 1) as usize] {
            self.phase += 1;
            self.attack_rate_ms *= PHASE_RATE_SCALE;
            log::debug!("{} entered phase {}", self.kind.key(), self.phase);
        }
    }
}

impl Collidable for Boss {
    fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.motion.x, self.motion.y, self.width, self.height)
    }
}

impl Entity for Boss {
    fn update(&mut self, dt: f32, ctx: &mut FrameContext<'_>) {
        if dt <= 0.0 {
            return;
        }
        self.motion = motion::advance_boss(
            self.movement,
            self.motion,
            self.speed,
            (self.width, self.height),
            ctx.field,
            dt,
            ctx.rng,
        );

        self.attack_timer_ms += dt;
        if self.attack_timer_ms > self.attack_rate_ms {
            let muzzle = (self.motion.x + self.width / 2.0, self.motion.y + self.height);
            ctx.spawned.extend(weapon::boss_volley(self.attack, muzzle, ctx.rng));
            self.attack_timer_ms = 0.0;
        }

        self.advance_phase();
    }

    fn is_alive(&self, _field: &Field) -> bool {
        !self.is_dead()
    }
}

impl Render for Boss {
    fn render(&self, surface: &mut dyn Surface) {
        surface.fill_rect(self.bounds(), self.kind.params().color, 1.0);
        let frac = if self.max_health > 0.0 { self.health / self.max_health } else { 0.0 };
        let back = BoundingBox::new(self.motion.x, self.motion.y - 10.0, self.width, 5.0);
        surface.fill_rect(back, Rgb::RED, 0.6);
        surface.fill_rect(BoundingBox { width: self.width * frac, ..back }, Rgb::GREEN, 1.0);
        let (cx, _) = self.center();
        surface.text(cx, self.motion.y - 18.0, self.kind.params().name, Rgb::WHITE);
    }
}
