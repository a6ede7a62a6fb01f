//! Read-only HUD view of the game state.

use crate::entities::{BoundingBox, GameState, GameStatus};
use crate::render::{Rgb, Surface};

/// Centre banner text with its opacity.
#[derive(Clone, Debug, PartialEq)]
pub struct Banner {
    pub text: String,
    pub alpha: f32,
    pub color: Rgb,
}

/// Everything a front-end needs to draw the overlay for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct HudSnapshot {
    pub score: u32,
    /// `"stage-level"`, e.g. `"2-4"`.
    pub level: String,
    pub stage_name: &'static str,
    /// `"Shotgun Lv.3"`.
    pub weapon: String,
    pub health: u32,
    pub max_health: u32,
    pub health_fraction: f32,
    pub shards: String,
    pub shard_fraction: f32,
    pub status: GameStatus,
    pub banner: Option<Banner>,
    /// Latest stat boost message and its fade.
    pub boost: Option<(String, f32)>,
    pub easter_egg: Option<f32>,
}

impl HudSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let p = &state.progress;
        let t = &state.tuning;
        let player = &state.player;

        let banner = match state.status {
            GameStatus::Playing => None,
            GameStatus::Paused => Some(Banner { text: "PAUSED".into(), alpha: 1.0, color: Rgb::WHITE }),
            GameStatus::LevelComplete => {
                Some(Banner { text: "LEVEL COMPLETE!".into(), alpha: 1.0, color: Rgb::CYAN })
            }
            GameStatus::StageTransition => p.transition.as_ref().map(|tr| Banner {
                text: tr.banner.clone(),
                alpha: tr.alpha(t),
                color: Rgb::YELLOW,
            }),
            GameStatus::GameOver => Some(Banner {
                text: format!("GAME OVER  -  score {}", state.score),
                alpha: 1.0,
                color: Rgb::RED,
            }),
            GameStatus::Victory => Some(Banner {
                text: format!("VICTORY!  -  score {}", state.score),
                alpha: 1.0,
                color: Rgb::GREEN,
            }),
        };

        let boost = p.boost_banner.map(|(boost, remaining)| {
            let alpha = (remaining / t.stat_boost_banner_ms.max(f32::EPSILON)).clamp(0.0, 1.0);
            (boost.message(), alpha)
        });
        let easter_egg = (p.easter_egg_ms > 0.0)
            .then(|| (p.easter_egg_ms / t.easter_egg_banner_ms.max(f32::EPSILON)).clamp(0.0, 1.0));

        Self {
            score: state.score,
            level: p.level_key().to_string(),
            stage_name: crate::catalog::stage_params(p.stage).name,
            weapon: format!("{} Lv.{}", player.weapon.name(), player.weapon_level),
            health: player.health,
            max_health: player.max_health,
            health_fraction: player.health_fraction(),
            shards: format!("{}/{}", p.shards_this_level, p.shards_needed),
            shard_fraction: p.shard_fraction(),
            status: state.status,
            banner,
            boost,
            easter_egg,
        }
    }

    /// Draw the overlay on top of an already rendered scene.
    pub fn draw(&self, surface: &mut dyn Surface, width: f32, height: f32) {
        surface.text(80.0, 16.0, &format!("Score {}", self.score), Rgb::WHITE);
        surface.text(width / 2.0, 16.0, &format!("{} {}", self.level, self.stage_name), Rgb::WHITE);
        surface.text(width - 100.0, 16.0, &self.weapon, Rgb::YELLOW);

        draw_bar(surface, BoundingBox::new(10.0, 30.0, 150.0, 8.0), self.health_fraction, Rgb::GREEN);
        draw_bar(surface, BoundingBox::new(width - 160.0, 30.0, 150.0, 8.0), self.shard_fraction, Rgb::CYAN);
        surface.text(width - 85.0, 46.0, &format!("Shards {}", self.shards), Rgb::CYAN);

        if let Some(banner) = &self.banner {
            if banner.alpha > 0.0 {
                surface.text(width / 2.0, height / 2.0, &banner.text, banner.color);
            }
        }
        if let Some((message, alpha)) = &self.boost {
            if *alpha > 0.0 {
                surface.text(width / 2.0, height / 2.0 + 40.0, message, Rgb::GREEN);
            }
        }
        if self.easter_egg.is_some() {
            surface.text(width / 2.0, height / 3.0, "6 7", Rgb::MAGENTA);
        }
    }
}

fn draw_bar(surface: &mut dyn Surface, frame: BoundingBox, fraction: f32, color: Rgb) {
    surface.fill_rect(frame, Rgb(0x33, 0x33, 0x33), 1.0);
    let filled = BoundingBox::new(frame.x, frame.y, frame.width * fraction.clamp(0.0, 1.0), frame.height);
    surface.fill_rect(filled, color, 1.0);
}
