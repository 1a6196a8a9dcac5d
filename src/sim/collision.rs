//! Collision resolution between bullets, barriers, enemies and the ship
//!
//! Passes run in a fixed order each tick: player bullets against barriers,
//! then enemies; enemy bullets against barriers, then the ship. A bullet
//! resolves at most one hit per tick (first match wins), so a shot stopped
//! by a barrier never also kills what is behind it.

use rand_pcg::Pcg32;

use super::events::GameEvent;
use super::state::{BarrierBlock, Bullet, Enemy, GameState, Particle, Ship, spawn_burst};

// burst tints, packed 0xRRGGBB
const ENEMY_EXPLOSION: u32 = 0xff8c00;
const BLOCK_DEBRIS: u32 = 0x9acd32;
const SHIELD_FLARE: u32 = 0x00bfff;

/// Resolve every collision pass for this tick.
pub fn resolve_collisions(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let GameState {
        rng,
        score,
        ship,
        formation,
        player_bullets,
        enemy_bullets,
        blocks,
        particles,
        ..
    } = state;

    bullets_vs_blocks(player_bullets, blocks, particles, rng, events);
    bullets_vs_enemies(
        player_bullets,
        &mut formation.enemies,
        score,
        particles,
        rng,
        events,
    );
    bullets_vs_blocks(enemy_bullets, blocks, particles, rng, events);
    bullets_vs_ship(enemy_bullets, ship, particles, rng, events);
}

/// Bullets stop on barrier blocks, chipping them down.
fn bullets_vs_blocks(
    bullets: &mut Vec<Bullet>,
    blocks: &mut Vec<BarrierBlock>,
    particles: &mut Vec<Particle>,
    rng: &mut Pcg32,
    events: &mut Vec<GameEvent>,
) {
    let mut bi = 0;
    while bi < bullets.len() {
        let pos = bullets[bi].pos;
        match blocks.iter().position(|b| b.bounds().contains_point(pos)) {
            Some(i) => {
                bullets.remove(bi);
                blocks[i].health = blocks[i].health.saturating_sub(1);
                let block_pos = blocks[i].pos;
                let health = blocks[i].health;
                if health == 0 {
                    blocks.remove(i);
                    spawn_burst(particles, rng, block_pos, BLOCK_DEBRIS, 8, 20);
                    events.push(GameEvent::BlockDestroyed {
                        x: block_pos.x,
                        y: block_pos.y,
                    });
                } else {
                    events.push(GameEvent::BlockDamaged {
                        x: block_pos.x,
                        y: block_pos.y,
                        health,
                    });
                }
            }
            None => bi += 1,
        }
    }
}

/// Player bullets kill enemies and award their points.
fn bullets_vs_enemies(
    bullets: &mut Vec<Bullet>,
    enemies: &mut Vec<Enemy>,
    score: &mut u32,
    particles: &mut Vec<Particle>,
    rng: &mut Pcg32,
    events: &mut Vec<GameEvent>,
) {
    let mut bi = 0;
    while bi < bullets.len() {
        let pos = bullets[bi].pos;
        match enemies.iter().position(|e| e.bounds().contains_point(pos)) {
            Some(i) => {
                bullets.remove(bi);
                let enemy = enemies.remove(i);
                let points = enemy.kind.points();
                *score += points;
                spawn_burst(particles, rng, enemy.pos, ENEMY_EXPLOSION, 12, 25);
                events.push(GameEvent::EnemyKilled {
                    points,
                    x: enemy.pos.x,
                    y: enemy.pos.y,
                });
            }
            None => bi += 1,
        }
    }
}

/// Enemy bullets strip ship shields; the last shield takes the ship with it.
fn bullets_vs_ship(
    bullets: &mut Vec<Bullet>,
    ship: &mut Ship,
    particles: &mut Vec<Particle>,
    rng: &mut Pcg32,
    events: &mut Vec<GameEvent>,
) {
    let mut bi = 0;
    while bi < bullets.len() {
        if !ship.alive {
            return;
        }
        if ship.bounds().contains_point(bullets[bi].pos) {
            bullets.remove(bi);
            ship.shields = ship.shields.saturating_sub(1);
            if ship.shields == 0 {
                ship.alive = false;
            }
            spawn_burst(particles, rng, ship.pos, SHIELD_FLARE, 10, 20);
            events.push(GameEvent::ShipHit {
                shields: ship.shields,
            });
        } else {
            bi += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::state::BulletOwner;
    use glam::Vec2;

    fn state() -> GameState {
        GameState::new(9, GameConfig::default())
    }

    fn player_bullet_at(pos: Vec2) -> Bullet {
        Bullet {
            owner: BulletOwner::Player,
            pos,
            vel: Vec2::new(0.0, -10.0),
        }
    }

    fn enemy_bullet_at(pos: Vec2) -> Bullet {
        Bullet {
            owner: BulletOwner::Enemy,
            pos,
            vel: Vec2::new(0.0, 4.0),
        }
    }

    #[test]
    fn test_player_bullet_kills_enemy_and_scores() {
        let mut state = state();
        let target = state.formation.enemies[5].pos;
        let points = state.formation.enemies[5].kind.points();
        state.player_bullets.push(player_bullet_at(target));

        let mut events = Vec::new();
        resolve_collisions(&mut state, &mut events);
        assert_eq!(state.score, points);
        assert_eq!(state.formation.enemies.len(), 39);
        assert!(state.player_bullets.is_empty());
        assert!(
            events
                .iter()
                .any(|e| matches!(e, GameEvent::EnemyKilled { .. }))
        );
    }

    #[test]
    fn test_bullet_resolves_one_hit_only() {
        // two enemies stacked on the same point: one bullet, one kill
        let mut state = state();
        let target = state.formation.enemies[0].pos;
        state.formation.enemies[1].pos = target;
        state.player_bullets.push(player_bullet_at(target));

        let mut events = Vec::new();
        resolve_collisions(&mut state, &mut events);
        assert_eq!(state.formation.enemies.len(), 39);
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::EnemyKilled { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn test_barrier_shields_enemies_from_player_fire() {
        // the barrier pass runs before the enemy pass
        let mut state = state();
        let block_pos = state.blocks[0].pos;
        state.formation.enemies[0].pos = block_pos;
        state.player_bullets.push(player_bullet_at(block_pos));

        let mut events = Vec::new();
        resolve_collisions(&mut state, &mut events);
        assert_eq!(state.formation.enemies.len(), 40);
        assert_eq!(state.score, 0);
        assert!(
            events
                .iter()
                .any(|e| matches!(e, GameEvent::BlockDamaged { .. }))
        );
    }

    #[test]
    fn test_block_health_steps_down_then_removes() {
        let mut state = state();
        let block_pos = state.blocks[0].pos;
        let total = state.blocks.len();
        let mut events = Vec::new();
        for _ in 0..3 {
            state.enemy_bullets.push(enemy_bullet_at(block_pos));
            resolve_collisions(&mut state, &mut events);
        }

        let damaged: Vec<u8> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::BlockDamaged { health, .. } => Some(*health),
                _ => None,
            })
            .collect();
        assert_eq!(damaged, vec![2, 1]);
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::BlockDestroyed { .. }))
                .count(),
            1
        );
        assert_eq!(state.blocks.len(), total - 1);

        // a fourth bullet sails through the gap
        state.enemy_bullets.push(enemy_bullet_at(block_pos));
        resolve_collisions(&mut state, &mut events);
        assert_eq!(state.enemy_bullets.len(), 1);
    }

    #[test]
    fn test_enemy_bullet_strips_shield() {
        let mut state = state();
        state.enemy_bullets.push(enemy_bullet_at(state.ship.pos));

        let mut events = Vec::new();
        resolve_collisions(&mut state, &mut events);
        assert_eq!(state.ship.shields, 2);
        assert!(state.ship.alive);
        assert!(events.contains(&GameEvent::ShipHit { shields: 2 }));
    }

    #[test]
    fn test_simultaneous_fatal_hits_strike_once() {
        let mut state = state();
        state.ship.shields = 1;
        state.enemy_bullets.push(enemy_bullet_at(state.ship.pos));
        state.enemy_bullets.push(enemy_bullet_at(state.ship.pos));

        let mut events = Vec::new();
        resolve_collisions(&mut state, &mut events);
        assert_eq!(state.ship.shields, 0);
        assert!(!state.ship.alive);
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::ShipHit { .. }))
                .count(),
            1
        );
        // the second bullet was skipped, not consumed
        assert_eq!(state.enemy_bullets.len(), 1);
    }
}
