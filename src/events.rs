//! Symbolic events the core emits each tick.
//!
//! The front-end drains [`crate::entities::GameState::events`] after every
//! tick: sounds go to an [`AudioSink`], the rest feed the HUD and logs.

use crate::catalog::{BossKind, EnemyKind, LevelKey, WeaponKind};
use crate::progression::StatBoost;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundEvent {
    Shoot,
    Hit,
    Explosion,
    ShardCollect,
    LevelComplete,
    WeaponUpgrade,
    WeaponDrop,
    BossSpawn,
    BossDefeated,
}

impl SoundEvent {
    pub fn name(self) -> &'static str {
        match self {
            SoundEvent::Shoot => "shoot",
            SoundEvent::Hit => "hit",
            SoundEvent::Explosion => "explosion",
            SoundEvent::ShardCollect => "shardCollect",
            SoundEvent::LevelComplete => "levelComplete",
            SoundEvent::WeaponUpgrade => "weaponUpgrade",
            SoundEvent::WeaponDrop => "weaponDrop",
            SoundEvent::BossSpawn => "bossSpawn",
            SoundEvent::BossDefeated => "bossDefeated",
        }
    }
}

/// Everything of note that happened during one tick.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    Sound(SoundEvent),
    EnemyDestroyed { kind: EnemyKind, points: u32 },
    BossSpawned(BossKind),
    BossDefeated { kind: BossKind, points: u32 },
    PlayerDamaged { amount: u32, health: u32 },
    ShardCollected { this_level: u32, total: u32 },
    WeaponEquipped(WeaponKind),
    WeaponUpgraded { kind: WeaponKind, level: u32 },
    LevelComplete(LevelKey),
    StatBoost(StatBoost),
    StageEntered { stage: u32 },
    EasterEgg,
    GameOver { score: u32 },
    Victory { score: u32 },
}

/// External audio collaborator.
pub trait AudioSink {
    fn play(&mut self, sound: SoundEvent);
}

/// No-op sink used when audio is unavailable or muted.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, _sound: SoundEvent) {}
}

/// Forward every sound in `events` to `sink`, in emission order.
pub fn dispatch_sounds(events: &[GameEvent], sink: &mut dyn AudioSink) {
    for event in events {
        if let GameEvent::Sound(sound) = event {
            sink.play(*sound);
        }
    }
}
