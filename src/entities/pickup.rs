//! Falling pickups: energy shards and weapon drops.

use super::{BoundingBox, Collidable, Entity, Field, FrameContext};
use crate::catalog::WeaponKind;
use crate::render::{Render, Rgb, Surface};

pub const SHARD_SIZE: f32 = 12.0;
pub const WEAPON_DROP_SIZE: f32 = 30.0;

/// Progression resource. `x`/`y` is the centre.
#[derive(Clone, Debug)]
pub struct EnergyShard {
    pub x: f32,
    pub y: f32,
    /// Pixels per second.
    pub fall_speed: f32,
    pub pulse_phase: f32,
}

impl EnergyShard {
    pub fn new(x: f32, y: f32, fall_speed: f32) -> Self {
        Self { x, y, fall_speed, pulse_phase: 0.0 }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

impl Collidable for EnergyShard {
    fn bounds(&self) -> BoundingBox {
        BoundingBox::centered(self.x, self.y, SHARD_SIZE, SHARD_SIZE)
    }
}

impl Entity for EnergyShard {
    fn update(&mut self, dt: f32, _ctx: &mut FrameContext<'_>) {
        if dt <= 0.0 {
            return;
        }
        self.y += self.fall_speed * dt / 1000.0;
        self.pulse_phase += dt / 1000.0 * 4.0;
    }

    fn is_alive(&self, field: &Field) -> bool {
        self.y < field.height + Field::MARGIN
    }
}

impl Render for EnergyShard {
    fn render(&self, surface: &mut dyn Surface) {
        let scale = 1.0 + 0.3 * self.pulse_phase.sin();
        surface.fill_rect(BoundingBox::centered(self.x, self.y, 16.0 * scale, 16.0 * scale), Rgb::CYAN, 0.4);
        surface.fill_rect(BoundingBox::centered(self.x, self.y, 6.0, 6.0), Rgb::WHITE, 1.0);
    }
}

/// Weapon pickup. `x`/`y` is the top-left corner.
#[derive(Clone, Debug)]
pub struct WeaponDrop {
    pub x: f32,
    pub y: f32,
    pub fall_speed: f32,
    pub kind: WeaponKind,
    pub rotation: f32,
}

impl WeaponDrop {
    pub fn new(x: f32, y: f32, kind: WeaponKind, fall_speed: f32) -> Self {
        Self { x, y, fall_speed, kind, rotation: 0.0 }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + WEAPON_DROP_SIZE / 2.0, self.y + WEAPON_DROP_SIZE / 2.0)
    }
}

impl Collidable for WeaponDrop {
    fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.x, self.y, WEAPON_DROP_SIZE, WEAPON_DROP_SIZE)
    }
}

impl Entity for WeaponDrop {
    fn update(&mut self, dt: f32, _ctx: &mut FrameContext<'_>) {
        if dt <= 0.0 {
            return;
        }
        self.y += self.fall_speed * dt / 1000.0;
        self.rotation += dt / 1000.0 * 2.0;
    }

    fn is_alive(&self, field: &Field) -> bool {
        self.y < field.height + Field::MARGIN
    }
}

impl Render for WeaponDrop {
    fn render(&self, surface: &mut dyn Surface) {
        surface.fill_rect(self.bounds(), self.kind.params().color, 0.8);
        let (cx, cy) = self.center();
        surface.text(cx, cy, &self.kind.name()[..1], Rgb::WHITE);
    }
}
