//! World entities and the master game state.
//!
//! Every entity owns its position and stats and advances itself through
//! [`Entity::update`]. Collision code only ever sees a [`BoundingBox`].

pub mod boss;
pub mod bullet;
pub mod enemy;
pub mod particle;
pub mod pickup;
pub mod player;

pub use boss::Boss;
pub use bullet::{Bullet, Owner, Splash, Trajectory};
pub use enemy::Enemy;
pub use particle::{Particle, Star};
pub use pickup::{EnergyShard, WeaponDrop};
pub use player::{Player, Upgrades};

use rand::RngCore;

use crate::catalog::LevelParams;
use crate::config::Tuning;
use crate::delay::DelayQueue;
use crate::events::GameEvent;
use crate::input::InputState;
use crate::progression::Progression;
use crate::spawn::SpawnDirector;
use crate::weapon::WeaponTable;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned box, top-left origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Box of the given size centred on `(cx, cy)`.
    pub fn centered(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self::new(cx - width / 2.0, cy - height / 2.0, width, height)
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Strict overlap: boxes that only touch along an edge do not collide.
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

/// Euclidean distance between two points.
pub fn distance(a: (f32, f32), b: (f32, f32)) -> f32 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

/// Anything that takes part in hit-testing.
pub trait Collidable {
    fn bounds(&self) -> BoundingBox;

    fn collides_with(&self, other: &dyn Collidable) -> bool {
        self.bounds().overlaps(&other.bounds())
    }
}

/// Playfield size in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Field {
    /// Entities are culled once they are this far outside the field.
    pub const MARGIN: f32 = 50.0;

    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self { width: tuning.canvas_width, height: tuning.canvas_height }
    }

    /// True while `(x, y)` lies inside the field grown by [`Field::MARGIN`].
    pub fn contains_with_margin(&self, x: f32, y: f32) -> bool {
        x > -Self::MARGIN
            && x < self.width + Self::MARGIN
            && y > -Self::MARGIN
            && y < self.height + Self::MARGIN
    }
}

// ── Per-frame update contract ─────────────────────────────────────────────────

/// Everything an entity may read or emit while it advances one frame.
pub struct FrameContext<'a> {
    /// Gameplay clock in ms; stops while paused or frozen.
    pub now_ms: f64,
    pub field: Field,
    pub stage: u32,
    /// Level within the stage, 1 ..= 5.
    pub level: u32,
    pub level_params: &'static LevelParams,
    /// Centre of the living player, if any.
    pub target: Option<(f32, f32)>,
    pub input: &'a InputState,
    pub weapons: &'a WeaponTable,
    pub rng: &'a mut dyn RngCore,
    /// Bullets fired this frame; merged into the world after all updates.
    pub spawned: &'a mut Vec<Bullet>,
    pub events: &'a mut Vec<GameEvent>,
}

pub trait Entity {
    /// Advance by `dt` milliseconds. `dt <= 0` is a no-op.
    fn update(&mut self, dt: f32, ctx: &mut FrameContext<'_>);

    /// False once the entity should be removed from its collection.
    fn is_alive(&self, field: &Field) -> bool;
}

// ── Master game state ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Paused,
    /// Short freeze after the shard quota is met.
    LevelComplete,
    /// Stage banner between stages.
    StageTransition,
    GameOver,
    Victory,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::GameOver | GameStatus::Victory)
    }
}

/// The entire game state. Cloneable so [`crate::compute::tick`] can return
/// a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub tuning: Tuning,
    pub field: Field,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    /// Stage bosses and major bosses; at most a couple at once.
    pub bosses: Vec<Boss>,
    /// Player and enemy bullets.
    pub bullets: Vec<Bullet>,
    pub shards: Vec<EnergyShard>,
    pub weapon_drops: Vec<WeaponDrop>,
    /// Visual only, never hit-tested.
    pub particles: Vec<Particle>,
    pub stars: Vec<Star>,
    /// Per-session weapon base stats (power scaling writes here).
    pub weapons: WeaponTable,
    pub spawner: SpawnDirector,
    pub progress: Progression,
    /// Deferred effects such as staggered boss shard drops.
    pub delayed: DelayQueue,
    /// Events emitted during the last tick.
    pub events: Vec<GameEvent>,
    pub score: u32,
    pub status: GameStatus,
    /// Gameplay clock in ms.
    pub clock_ms: f64,
    pub frame: u64,
    /// Pause key state last frame, for edge detection.
    pub pause_held: bool,
}
