//! Stage themes.

use super::enemies::BossKind;
use crate::render::Rgb;

#[derive(Clone, Copy, Debug)]
pub struct StageParams {
    pub name: &'static str,
    pub base_color: Rgb,
    pub star_color: Rgb,
    pub nebula_color: Rgb,
    pub nebula_alpha: f32,
    pub parallax_layers: u32,
    /// Boss that arrives as the stage begins.
    pub major_boss: Option<BossKind>,
}

static STAGE_TABLE: [StageParams; 5] = [
    StageParams {
        name: "Deep Space",
        base_color: Rgb(0x00, 0x04, 0x28),
        star_color: Rgb(0xff, 0xff, 0xff),
        nebula_color: Rgb(100, 50, 200),
        nebula_alpha: 0.3,
        parallax_layers: 3,
        major_boss: None,
    },
    StageParams {
        name: "Asteroid Field",
        base_color: Rgb(0x1a, 0x1a, 0x2e),
        star_color: Rgb(0xcc, 0xcc, 0xcc),
        nebula_color: Rgb(80, 60, 40),
        nebula_alpha: 0.4,
        parallax_layers: 2,
        major_boss: None,
    },
    StageParams {
        name: "Nebula Zone",
        base_color: Rgb(0x2d, 0x1b, 0x69),
        star_color: Rgb(0xff, 0x88, 0xff),
        nebula_color: Rgb(255, 100, 200),
        nebula_alpha: 0.5,
        parallax_layers: 3,
        major_boss: Some(BossKind::AsteroidCrusher),
    },
    StageParams {
        name: "Void Sector",
        base_color: Rgb(0x0a, 0x0a, 0x1a),
        star_color: Rgb(0x00, 0xff, 0xff),
        nebula_color: Rgb(0, 255, 255),
        nebula_alpha: 0.3,
        parallax_layers: 2,
        major_boss: None,
    },
    StageParams {
        name: "Final Confrontation",
        base_color: Rgb(0x2d, 0x0a, 0x1a),
        star_color: Rgb(0xff, 0x44, 0x44),
        nebula_color: Rgb(255, 100, 0),
        nebula_alpha: 0.5,
        parallax_layers: 3,
        major_boss: Some(BossKind::VoidReaper),
    },
];

/// Theme for `stage` (1-based); unknown stages fall back to stage 1.
pub fn stage_params(stage: u32) -> &'static StageParams {
    match stage.checked_sub(1).and_then(|i| STAGE_TABLE.get(i as usize)) {
        Some(params) => params,
        None => {
            log::warn!("No theme for stage {stage}, falling back to stage 1");
            &STAGE_TABLE[0]
        }
    }
}
