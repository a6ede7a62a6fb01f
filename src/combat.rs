//! Collision and combat resolution.
//!
//! Runs once per playing frame in a fixed order:
//!
//! 1. player bullets × enemies
//! 2. player bullets × bosses
//! 3. enemy bullets × player
//! 4. enemies × player (contact)
//! 5. bosses × player (contact)
//! 6. shards × player (collection range)
//! 7. weapon drops × player (pickup range)
//!
//! Every step finishes its pass before anything is removed; removal is a
//! filter over the finished collection.

use rand::{Rng, RngCore};

use crate::catalog::level_params;
use crate::delay::DeferredEffect;
use crate::entities::particle::emit_burst;
use crate::entities::{distance, Collidable, GameState, Owner};
use crate::events::{GameEvent, SoundEvent};
use crate::progression;
use crate::render::Rgb;
use crate::spawn;

const HIT_PARTICLES: usize = 10;
const BOSS_HIT_COLOR: Rgb = Rgb(0xff, 0x88, 0x44);
const ENEMY_HIT_COLOR: Rgb = Rgb(0xff, 0x44, 0x44);
const PLAYER_HIT_COLOR: Rgb = Rgb(0x44, 0xff, 0x44);
const CONTACT_COLOR: Rgb = Rgb(0xff, 0xff, 0x44);

pub fn resolve(state: &mut GameState, rng: &mut dyn RngCore) {
    player_bullets_vs_enemies(state, rng);
    player_bullets_vs_bosses(state, rng);
    enemy_bullets_vs_player(state, rng);
    enemies_vs_player(state, rng);
    bosses_vs_player(state, rng);
    collect_shards(state, rng);
    collect_weapon_drops(state);
}

/// Convert bullet damage to whole health points.
fn whole_damage(amount: f32) -> u32 {
    amount.max(0.0).round() as u32
}

// ── 1. Player bullets × enemies ───────────────────────────────────────────────

fn player_bullets_vs_enemies(state: &mut GameState, rng: &mut dyn RngCore) {
    let cap = state.tuning.max_particles;
    let GameState { bullets, enemies, particles, events, .. } = state;

    for bullet in bullets.iter_mut().filter(|b| b.owner == Owner::Player && !b.spent) {
        for i in 0..enemies.len() {
            if enemies[i].is_dead() || !bullet.collides_with(&enemies[i]) {
                continue;
            }
            enemies[i].take_damage(bullet.damage);
            emit_burst(particles, cap, enemies[i].center(), ENEMY_HIT_COLOR, HIT_PARTICLES, rng);
            events.push(GameEvent::Sound(SoundEvent::Hit));

            if let Some(splash) = bullet.splash {
                let origin = enemies[i].center();
                let splash_damage = bullet.damage * splash.damage_scale;
                for (j, other) in enemies.iter_mut().enumerate() {
                    if j != i && !other.is_dead() && distance(origin, other.center()) <= splash.radius {
                        other.take_damage(splash_damage);
                    }
                }
            }

            if bullet.register_hit() {
                break;
            }
        }
    }

    credit_destroyed_enemies(state, rng);
}

/// Score, drop carried shards and split every enemy destroyed by fire.
fn credit_destroyed_enemies(state: &mut GameState, rng: &mut dyn RngCore) {
    let (dead, alive): (Vec<_>, Vec<_>) = std::mem::take(&mut state.enemies)
        .into_iter()
        .partition(|e| e.is_dead());
    state.enemies = alive;
    if dead.is_empty() {
        return;
    }

    let params = level_params(state.progress.stage, state.progress.level);
    for enemy in dead {
        state.score += enemy.points;
        state.events.push(GameEvent::Sound(SoundEvent::Explosion));
        state.events.push(GameEvent::EnemyDestroyed { kind: enemy.kind, points: enemy.points });

        if enemy.carries_shard {
            let (cx, cy) = enemy.center();
            spawn::spawn_shard(state, cx, cy, rng);
        }
        if params.splits(enemy.kind) {
            if let Some(children) = enemy.split(rng) {
                log::debug!("{} split in two", enemy.kind.key());
                state.enemies.extend(children);
            }
        }
    }
}

// ── 2. Player bullets × bosses ────────────────────────────────────────────────

fn player_bullets_vs_bosses(state: &mut GameState, rng: &mut dyn RngCore) {
    let cap = state.tuning.max_particles;
    let GameState { bullets, bosses, particles, events, .. } = state;

    for bullet in bullets.iter_mut().filter(|b| b.owner == Owner::Player && !b.spent) {
        for boss in bosses.iter_mut() {
            if boss.is_dead() || !bullet.collides_with(&*boss) {
                continue;
            }
            boss.take_damage(bullet.damage);
            emit_burst(particles, cap, (bullet.x, bullet.y), BOSS_HIT_COLOR, HIT_PARTICLES, rng);
            events.push(GameEvent::Sound(SoundEvent::Hit));
            if bullet.register_hit() {
                break;
            }
        }
    }

    let (dead, alive): (Vec<_>, Vec<_>) = std::mem::take(&mut state.bosses)
        .into_iter()
        .partition(|b| b.is_dead());
    state.bosses = alive;

    for boss in dead {
        state.score += boss.points;
        state.events.push(GameEvent::Sound(SoundEvent::BossDefeated));
        state.events.push(GameEvent::BossDefeated { kind: boss.kind, points: boss.points });
        log::info!("Boss {} defeated, {} shards incoming", boss.kind.key(), boss.shard_drops);

        let (cx, cy) = boss.center();
        for i in 0..boss.shard_drops {
            let due = state.clock_ms + i as f64 * state.tuning.boss_shard_stagger_ms;
            let x = cx + (rng.gen::<f32>() - 0.5) * 40.0;
            state.delayed.schedule(due, DeferredEffect::SpawnShard { x, y: cy });
        }
    }
}

// ── 3. Enemy bullets × player ─────────────────────────────────────────────────

fn enemy_bullets_vs_player(state: &mut GameState, rng: &mut dyn RngCore) {
    let cap = state.tuning.max_particles;
    let GameState { bullets, player, particles, events, .. } = state;

    for bullet in bullets.iter_mut().filter(|b| b.owner == Owner::Enemy && !b.spent) {
        if !bullet.collides_with(&*player) {
            continue;
        }
        let amount = whole_damage(bullet.damage);
        player.take_damage(amount);
        bullet.spent = true;
        emit_burst(particles, cap, player.center(), PLAYER_HIT_COLOR, HIT_PARTICLES, rng);
        events.push(GameEvent::PlayerDamaged { amount, health: player.health });
    }

    bullets.retain(|b| !b.spent);
}

// ── 4. Enemies × player ───────────────────────────────────────────────────────

fn enemies_vs_player(state: &mut GameState, rng: &mut dyn RngCore) {
    let cap = state.tuning.max_particles;
    let to_player = state.tuning.enemy_contact_damage;
    let to_enemy = state.tuning.enemy_contact_self_damage;
    let GameState { enemies, player, particles, events, .. } = state;

    for enemy in enemies.iter_mut() {
        if !enemy.collides_with(&*player) {
            continue;
        }
        player.take_damage(to_player);
        enemy.take_damage(to_enemy);
        emit_burst(particles, cap, enemy.center(), CONTACT_COLOR, HIT_PARTICLES, rng);
        events.push(GameEvent::PlayerDamaged { amount: to_player, health: player.health });
    }

    // rammed enemies are removed without score
    enemies.retain(|e| !e.is_dead());
}

// ── 5. Bosses × player ────────────────────────────────────────────────────────

fn bosses_vs_player(state: &mut GameState, rng: &mut dyn RngCore) {
    let cap = state.tuning.max_particles;
    let to_player = state.tuning.boss_contact_damage;
    let GameState { bosses, player, particles, events, .. } = state;

    for boss in bosses.iter() {
        if !boss.collides_with(&*player) {
            continue;
        }
        player.take_damage(to_player);
        emit_burst(particles, cap, player.center(), ENEMY_HIT_COLOR, HIT_PARTICLES, rng);
        events.push(GameEvent::PlayerDamaged { amount: to_player, health: player.health });
    }
}

// ── 6. Shards × player ────────────────────────────────────────────────────────

fn collect_shards(state: &mut GameState, rng: &mut dyn RngCore) {
    let centre = state.player.center();
    let range = state.player.collection_range;
    let (taken, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut state.shards)
        .into_iter()
        .partition(|s| distance(s.center(), centre) < range);
    state.shards = kept;

    for shard in taken {
        progression::collect_shard(state, shard.center(), rng);
    }
}

// ── 7. Weapon drops × player ──────────────────────────────────────────────────

fn collect_weapon_drops(state: &mut GameState) {
    let centre = state.player.center();
    let range = state.tuning.weapon_drop_pickup_range;
    let (taken, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut state.weapon_drops)
        .into_iter()
        .partition(|d| distance(d.center(), centre) < range);
    state.weapon_drops = kept;

    let (stage, level) = (state.progress.stage, state.progress.level);
    for drop in taken {
        state.player.collect_weapon(drop.kind, &mut state.weapons, stage, level);
        state.events.push(GameEvent::Sound(SoundEvent::WeaponUpgrade));
        state.events.push(GameEvent::WeaponEquipped(drop.kind));
    }
}
