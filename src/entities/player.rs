use rand::RngCore;

use super::{BoundingBox, Bullet, Collidable, Entity, Field, FrameContext};
use crate::catalog::{WeaponKind, MAX_WEAPON_LEVEL};
use crate::config::Tuning;
use crate::events::{GameEvent, SoundEvent};
use crate::render::{Render, Rgb, Surface};
use crate::weapon::{self, WeaponTable};

/// Permanent multiplicative upgrades. Each starts at 1.0 and only grows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Upgrades {
    pub speed: f32,
    pub damage: f32,
    pub fire_rate: f32,
}

impl Default for Upgrades {
    fn default() -> Self {
        Self { speed: 1.0, damage: 1.0, fire_rate: 1.0 }
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Pixels per second before the speed upgrade.
    pub base_speed: f32,
    pub health: u32,
    pub max_health: u32,
    pub collection_range: f32,
    pub weapon: WeaponKind,
    /// 1 ..= 5.
    pub weapon_level: u32,
    pub upgrades: Upgrades,
    pub last_shot_ms: Option<f64>,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            x: tuning.canvas_width / 2.0,
            y: tuning.canvas_height - 100.0,
            width: tuning.player_width,
            height: tuning.player_height,
            base_speed: tuning.player_base_speed,
            health: tuning.player_base_health,
            max_health: tuning.player_base_health,
            collection_range: tuning.collection_range,
            weapon: WeaponKind::Pistol,
            weapon_level: 1,
            upgrades: Upgrades::default(),
            last_shot_ms: None,
        }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Health saturates at zero.
    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    pub fn health_fraction(&self) -> f32 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.health as f32 / self.max_health as f32
    }

    /// Swap to `kind` at level 1 and apply the depth-based power scaling
    /// to that weapon's session base stats.
    pub fn collect_weapon(&mut self, kind: WeaponKind, table: &mut WeaponTable, stage: u32, level: u32) {
        table.apply_power_scaling(kind, weapon::power_scaling_bonus(stage, level));
        self.weapon = kind;
        self.weapon_level = 1;
        log::debug!("Equipped {} at stage {stage}-{level}", kind.name());
    }

    /// Returns false when already at the top level.
    pub fn upgrade_weapon(&mut self) -> bool {
        if self.weapon_level >= MAX_WEAPON_LEVEL {
            return false;
        }
        self.weapon_level += 1;
        true
    }

    /// Minimum ms between shots with the current weapon and upgrades.
    pub fn fire_interval_ms(&self, table: &WeaponTable) -> f32 {
        let stats = table.resolve(self.weapon, self.weapon_level);
        stats.fire_rate_ms / self.upgrades.fire_rate.max(f32::EPSILON)
    }

    /// Fire a volley if the interval has passed. Returns true on a shot.
    pub fn try_fire(
        &mut self,
        now_ms: f64,
        table: &WeaponTable,
        rng: &mut dyn RngCore,
        out: &mut Vec<Bullet>,
    ) -> bool {
        let interval = self.fire_interval_ms(table) as f64;
        if let Some(last) = self.last_shot_ms {
            if now_ms - last <= interval {
                return false;
            }
        }
        let stats = table.resolve(self.weapon, self.weapon_level);
        let muzzle = (self.x + self.width / 2.0, self.y);
        out.extend(weapon::player_volley(&stats, muzzle, self.upgrades.damage, rng));
        self.last_shot_ms = Some(now_ms);
        true
    }
}

impl Collidable for Player {
    fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.x, self.y, self.width, self.height)
    }
}

impl Entity for Player {
    fn update(&mut self, dt: f32, ctx: &mut FrameContext<'_>) {
        if dt <= 0.0 {
            return;
        }
        let step = self.base_speed * self.upgrades.speed * dt / 1000.0;
        let input = ctx.input;
        if input.left {
            self.x -= step;
        }
        if input.right {
            self.x += step;
        }
        if input.up {
            self.y -= step;
        }
        if input.down {
            self.y += step;
        }
        self.x = self.x.clamp(0.0, (ctx.field.width - self.width).max(0.0));
        self.y = self.y.clamp(0.0, (ctx.field.height - self.height).max(0.0));

        if input.fire && self.try_fire(ctx.now_ms, ctx.weapons, ctx.rng, ctx.spawned) {
            ctx.events.push(GameEvent::Sound(SoundEvent::Shoot));
        }
    }

    fn is_alive(&self, _field: &Field) -> bool {
        !self.is_dead()
    }
}

impl Render for Player {
    fn render(&self, surface: &mut dyn Surface) {
        let (x, y) = (self.x, self.y);
        // hull, wings, cockpit
        surface.fill_rect(BoundingBox::new(x + 10.0, y + 10.0, 20.0, 30.0), Rgb(0x00, 0xcc, 0x44), 1.0);
        surface.fill_rect(BoundingBox::new(x, y + 20.0, 10.0, 15.0), Rgb(0x00, 0xaa, 0x22), 1.0);
        surface.fill_rect(BoundingBox::new(x + 30.0, y + 20.0, 10.0, 15.0), Rgb(0x00, 0xaa, 0x22), 1.0);
        surface.fill_rect(BoundingBox::new(x + 15.0, y + 5.0, 10.0, 10.0), Rgb(0x88, 0xff, 0x88), 1.0);
    }
}
