//! Fixed timestep simulation tick
//!
//! Core game loop that advances one run deterministically. Step order within
//! a tick is part of the observable contract: movement, bullet advance,
//! formation, collisions, player shot, enemy shots, terminal checks.

use glam::Vec2;

use crate::consts::*;
use crate::cooldown::ActionKey;

use super::collision::resolve_collisions;
use super::events::GameEvent;
use super::formation;
use super::state::{Bullet, BulletOwner, GameOverReason, GameState, spawn_burst};

// muzzle flash tint, packed 0xRRGGBB
const MUZZLE_FLASH: u32 = 0xffe066;

/// Input intents for a single tick, already resolved from raw devices.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Move the ship left this tick
    pub move_left: bool,
    /// Move the ship right this tick
    pub move_right: bool,
    /// Fire a shot (cooldown gated)
    pub shoot: bool,
    /// Pause toggle (a pulse, not a level)
    pub pause: bool,
}

/// Advance the game state by one fixed timestep.
///
/// Returns the observable events of this tick in the order they happened.
/// A finished run ignores all input and returns no events; a paused one
/// only honors the pause toggle.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if !state.running {
        return events;
    }

    if input.pause {
        state.paused = !state.paused;
    }
    if state.paused {
        return events;
    }

    state.ticks += 1;
    state.clock_ms += f64::from(dt) * 1000.0;

    move_ship(state, input, &mut events);
    advance_bullets(state);
    update_particles(state);
    formation::advance_formation(state);
    resolve_collisions(state, &mut events);
    player_shoot(state, input, &mut events);
    formation::enemy_fire(state, &mut events);
    check_terminal(state, &mut events);

    events
}

/// Apply movement intents, clamping the hull to the playfield. Opposite
/// intents cancel.
fn move_ship(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    let mut dx = 0.0;
    if input.move_left {
        dx -= state.ship.speed;
    }
    if input.move_right {
        dx += state.ship.speed;
    }
    if dx == 0.0 {
        return;
    }

    let half = SHIP_WIDTH / 2.0;
    let x = (state.ship.pos.x + dx).clamp(half, SCREEN_WIDTH - half);
    if x != state.ship.pos.x {
        state.ship.pos.x = x;
        events.push(GameEvent::ShipMoved { x });
    }
}

/// Advance bullets by their velocity and cull any that leave the screen.
fn advance_bullets(state: &mut GameState) {
    fn on_screen(b: &Bullet) -> bool {
        b.pos.x >= 0.0 && b.pos.x <= SCREEN_WIDTH && b.pos.y >= 0.0 && b.pos.y <= SCREEN_HEIGHT
    }

    for bullet in state
        .player_bullets
        .iter_mut()
        .chain(state.enemy_bullets.iter_mut())
    {
        bullet.pos += bullet.vel;
    }
    state.player_bullets.retain(on_screen);
    state.enemy_bullets.retain(on_screen);
}

/// Advance cosmetic particles and cull the dead.
fn update_particles(state: &mut GameState) {
    for p in &mut state.particles {
        p.pos += p.vel;
        p.life = p.life.saturating_sub(1);
    }
    state.particles.retain(|p| p.life > 0);
}

/// Fire intent: spawn a bullet at the nose when the cooldown allows.
fn player_shoot(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    if !input.shoot || !state.ship.alive {
        return;
    }
    if !state.cooldowns.can_fire(ActionKey::PlayerFire, state.clock_ms) {
        return;
    }

    let nose = state.ship.nose();
    state.player_bullets.push(Bullet {
        owner: BulletOwner::Player,
        pos: nose,
        vel: Vec2::new(0.0, -state.config.player_bullet_speed),
    });
    state.cooldowns.start_cooldown(
        ActionKey::PlayerFire,
        state.clock_ms,
        state.config.player_fire_cooldown_ms,
    );
    spawn_burst(&mut state.particles, &mut state.rng, nose, MUZZLE_FLASH, 4, 3);
    events.push(GameEvent::BulletFired {
        owner: BulletOwner::Player,
        x: nose.x,
        y: nose.y,
    });
}

/// End-of-tick terminal checks: shields gone, invasion, cleared wave.
fn check_terminal(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.running && state.ship.shields == 0 {
        state.running = false;
        state.outcome = Some(GameOverReason::Shields);
        events.push(GameEvent::GameOver {
            reason: GameOverReason::Shields,
        });
        log::info!(
            "game over at level {}: shields depleted, score {}",
            state.level,
            state.score
        );
    }

    let invaded = state
        .formation
        .enemies
        .iter()
        .any(|e| e.pos.y >= SHIP_Y - INVASION_DISTANCE);
    if state.running && invaded {
        state.running = false;
        state.outcome = Some(GameOverReason::Invasion);
        events.push(GameEvent::GameOver {
            reason: GameOverReason::Invasion,
        });
        log::info!(
            "game over at level {}: formation reached the ship, score {}",
            state.level,
            state.score
        );
    }

    if state.running && state.formation.enemies.is_empty() && state.level_break_ticks == 0 {
        state.level_break_ticks = LEVEL_BREAK_TICKS;
        events.push(GameEvent::LevelComplete {
            level: state.level + 1,
        });
        log::info!("level {} cleared, score {}", state.level, state.score);
    }
}
