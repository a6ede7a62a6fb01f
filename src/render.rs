//! Render sink contract.
//!
//! The core never produces pixels. Every visible entity implements
//! [`Render`] and describes itself to a [`Surface`] supplied by the
//! front-end; the terminal binary is one such surface.

use crate::entities::{BoundingBox, GameState};

/// 24-bit colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);
    pub const CYAN: Rgb = Rgb(0x00, 0xff, 0xff);
    pub const RED: Rgb = Rgb(0xff, 0x00, 0x00);
    pub const GREEN: Rgb = Rgb(0x00, 0xff, 0x00);
    pub const YELLOW: Rgb = Rgb(0xff, 0xff, 0x00);
    pub const MAGENTA: Rgb = Rgb(0xff, 0x00, 0xff);
}

/// Drawing primitives the front-end provides, in playfield coordinates.
pub trait Surface {
    /// Fill `rect` with `color` at opacity `alpha` (0.0 ..= 1.0).
    fn fill_rect(&mut self, rect: BoundingBox, color: Rgb, alpha: f32);

    /// Draw a text label with its centre at `(x, y)`.
    fn text(&mut self, x: f32, y: f32, text: &str, color: Rgb);
}

pub trait Render {
    fn render(&self, surface: &mut dyn Surface);
}

/// Draw the world layers in back-to-front order.
pub fn render_scene(state: &GameState, surface: &mut dyn Surface) {
    let stage = crate::catalog::stage_params(state.progress.stage);
    for star in &state.stars {
        let rect = BoundingBox::new(star.x, star.y, star.size, star.size);
        surface.fill_rect(rect, stage.star_color, star.brightness);
    }

    state.player.render(surface);
    for bullet in &state.bullets {
        bullet.render(surface);
    }
    for enemy in &state.enemies {
        enemy.render(surface);
    }
    for shard in &state.shards {
        shard.render(surface);
    }
    for drop in &state.weapon_drops {
        drop.render(surface);
    }
    for particle in &state.particles {
        particle.render(surface);
    }
    for boss in &state.bosses {
        boss.render(surface);
    }
}
