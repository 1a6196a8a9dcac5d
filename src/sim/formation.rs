//! Wave control: difficulty scaling, formation spawn and movement, enemy fire
//!
//! The formation sweeps horizontally in lock-step and descends a fixed step
//! each time it reaches a screen edge. Sweeps quicken with every reversal
//! and every level.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::cooldown::ActionKey;
use crate::descending_velocity;

use super::events::GameEvent;
use super::state::{BarrierBlock, Bullet, BulletOwner, Enemy, EnemyKind, GameState};

/// Per-level scaling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Horizontal formation step in pixels
    pub enemy_speed: f32,
    /// Ticks between formation movements
    pub move_delay: u32,
    /// Concurrent enemy bullets allowed
    pub enemy_bullet_cap: usize,
    /// Global gate between enemy volleys
    pub enemy_fire_cooldown_ms: f64,
    /// Formation row count (columns are fixed)
    pub rows: u32,
}

impl Difficulty {
    /// Scaling formulas, monotone in `level` and clamped at their extremes.
    pub fn for_level(level: u32) -> Self {
        Self {
            enemy_speed: (2.0 + 0.6 * level as f32).min(10.0),
            move_delay: 30u32.saturating_sub(3 * level).max(3),
            enemy_bullet_cap: ((5 + level).min(20)) as usize,
            enemy_fire_cooldown_ms: (1000.0 - 60.0 * level as f64).max(200.0),
            rows: (4 + level.saturating_sub(1) / 2).min(7),
        }
    }
}

/// Barrier fortress footprint; `#` is a block, top row first.
const BARRIER_PATTERN: [&str; 4] = [".######.", "########", "########", "##....##"];

/// Replace the formation with a fresh grid for the current level.
pub fn spawn_formation(state: &mut GameState) {
    let difficulty = state.difficulty;
    state.formation.enemies.clear();
    for row in 0..difficulty.rows {
        for col in 0..FORMATION_COLS {
            state.formation.enemies.push(Enemy {
                row,
                col,
                kind: EnemyKind::for_row(row),
                pos: Vec2::new(
                    FORMATION_ORIGIN_X + col as f32 * ENEMY_COL_SPACING,
                    FORMATION_ORIGIN_Y + row as f32 * ENEMY_ROW_SPACING,
                ),
            });
        }
    }
    state.formation.direction = 1.0;
    state.formation.speed = difficulty.enemy_speed;
    state.formation.move_delay = difficulty.move_delay;
    state.formation.move_counter = 0;

    log::info!(
        "spawned level {} formation: {} enemies, step {}px every {} ticks",
        state.level,
        state.formation.enemies.len(),
        state.formation.speed,
        state.formation.move_delay
    );
}

/// Rebuild the four barrier fortresses from the pattern grid.
pub fn spawn_barriers(state: &mut GameState) {
    state.blocks.clear();
    for barrier in 0..BARRIER_COUNT {
        let center_x = SCREEN_WIDTH * (barrier as f32 + 1.0) / (BARRIER_COUNT as f32 + 1.0);
        let left = center_x - BARRIER_PATTERN[0].len() as f32 * BARRIER_BLOCK_SIZE / 2.0;
        for (row, line) in BARRIER_PATTERN.iter().enumerate() {
            for (col, cell) in line.bytes().enumerate() {
                if cell != b'#' {
                    continue;
                }
                state.blocks.push(BarrierBlock {
                    pos: Vec2::new(
                        left + (col as f32 + 0.5) * BARRIER_BLOCK_SIZE,
                        BARRIER_Y + (row as f32 + 0.5) * BARRIER_BLOCK_SIZE,
                    ),
                    health: BLOCK_START_HEALTH,
                });
            }
        }
    }
}

/// One tick of formation behavior: the level-break countdown while the field
/// is clear, otherwise the sweep/descend movement.
pub fn advance_formation(state: &mut GameState) {
    if state.formation.enemies.is_empty() {
        if state.level_break_ticks > 0 {
            state.level_break_ticks -= 1;
            if state.level_break_ticks == 0 {
                advance_level(state);
            }
        }
        return;
    }

    state.formation.move_counter += 1;
    if state.formation.move_counter < state.formation.move_delay {
        return;
    }
    state.formation.move_counter = 0;

    let dir = state.formation.direction;
    let at_edge = state.formation.enemies.iter().any(|e| {
        if dir > 0.0 {
            e.pos.x + FORMATION_EDGE_MARGIN >= SCREEN_WIDTH
        } else {
            e.pos.x - FORMATION_EDGE_MARGIN <= 0.0
        }
    });

    if at_edge {
        // reverse and descend instead of moving sideways this step
        state.formation.direction = -dir;
        for enemy in &mut state.formation.enemies {
            enemy.pos.y += FORMATION_DESCENT;
        }
        if state.formation.move_delay > MOVE_DELAY_FLOOR {
            state.formation.move_delay -= 1;
        }
    } else {
        let step = state.formation.speed * dir;
        for enemy in &mut state.formation.enemies {
            enemy.pos.x += step;
        }
    }
}

/// Scale difficulty and respawn the field after a level break.
///
/// The formulas are evaluated at the level being completed, then the counter
/// increments.
pub fn advance_level(state: &mut GameState) {
    state.difficulty = Difficulty::for_level(state.level);
    state.level += 1;
    if state.level.is_multiple_of(3) {
        state.enemy_bullet_speed += 1.0;
    }
    if state.level.is_multiple_of(10) {
        state.ship.shields += 1;
    }
    spawn_formation(state);
    spawn_barriers(state);
    log::info!("level {} begins", state.level);
}

/// Index of the frontmost (largest y) survivor in each occupied column, in
/// ascending column order.
pub fn front_line(enemies: &[Enemy]) -> Vec<usize> {
    let mut cols: Vec<u32> = enemies.iter().map(|e| e.col).collect();
    cols.sort_unstable();
    cols.dedup();

    let mut front = Vec::with_capacity(cols.len());
    for col in cols {
        let lowest = enemies
            .iter()
            .enumerate()
            .filter(|(_, e)| e.col == col)
            .max_by(|(_, a), (_, b)| {
                a.pos
                    .y
                    .partial_cmp(&b.pos.y)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(i, _)| i);
        if let Some(i) = lowest {
            front.push(i);
        }
    }
    front
}

/// Roll the frontmost enemy of each column for a shot, respecting the global
/// volley cooldown and the concurrent bullet cap.
pub fn enemy_fire(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.formation.enemies.is_empty() {
        return;
    }
    if !state.cooldowns.can_fire(ActionKey::EnemyFire, state.clock_ms) {
        return;
    }
    if state.enemy_bullets.len() >= state.difficulty.enemy_bullet_cap {
        return;
    }

    // random_bool panics outside [0, 1]
    let chance = state.config.enemy_fire_chance.clamp(0.0, 1.0);
    let mut fired = false;
    for i in front_line(&state.formation.enemies) {
        if state.enemy_bullets.len() >= state.difficulty.enemy_bullet_cap {
            break;
        }
        if !state.rng.random_bool(chance) {
            continue;
        }
        let enemy = &state.formation.enemies[i];
        let muzzle = Vec2::new(enemy.pos.x, enemy.pos.y + ENEMY_HEIGHT / 2.0);
        let jitter = state
            .rng
            .random_range(-ENEMY_BULLET_JITTER..=ENEMY_BULLET_JITTER);
        state.enemy_bullets.push(Bullet {
            owner: BulletOwner::Enemy,
            pos: muzzle,
            vel: descending_velocity(state.enemy_bullet_speed, jitter),
        });
        events.push(GameEvent::BulletFired {
            owner: BulletOwner::Enemy,
            x: muzzle.x,
            y: muzzle.y,
        });
        fired = true;
    }

    if fired {
        state.cooldowns.start_cooldown(
            ActionKey::EnemyFire,
            state.clock_ms,
            state.difficulty.enemy_fire_cooldown_ms,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn state() -> GameState {
        GameState::new(3, GameConfig::default())
    }

    fn rightmost_x(state: &GameState) -> f32 {
        state
            .formation
            .enemies
            .iter()
            .map(|e| e.pos.x)
            .fold(f32::MIN, f32::max)
    }

    /// Run ticks until the formation has performed exactly one movement.
    fn run_one_movement(state: &mut GameState) {
        for _ in 0..state.formation.move_delay {
            advance_formation(state);
        }
    }

    #[test]
    fn test_difficulty_level_1() {
        let d = Difficulty::for_level(1);
        assert!((d.enemy_speed - 2.6).abs() < 1e-5);
        assert_eq!(d.move_delay, 27);
        assert_eq!(d.enemy_bullet_cap, 6);
        assert_eq!(d.enemy_fire_cooldown_ms, 940.0);
        assert_eq!(d.rows, 4);
    }

    #[test]
    fn test_difficulty_clamps_at_high_levels() {
        let d = Difficulty::for_level(20);
        assert_eq!(d.enemy_speed, 10.0);
        assert_eq!(d.move_delay, 3);
        assert_eq!(d.enemy_bullet_cap, 20);
        assert_eq!(d.enemy_fire_cooldown_ms, 200.0);
        assert_eq!(d.rows, 7);
    }

    #[test]
    fn test_spawn_counts() {
        let state = state();
        assert_eq!(state.formation.enemies.len(), 40);
        assert_eq!(state.blocks.len(), 104);
        assert!(
            state
                .formation
                .enemies
                .iter()
                .filter(|e| e.row == 0)
                .all(|e| e.kind == EnemyKind::Commander)
        );
    }

    #[test]
    fn test_sweep_moves_only_on_delay_boundary() {
        let mut state = state();
        let x0 = state.formation.enemies[0].pos.x;
        for _ in 0..(state.formation.move_delay - 1) {
            advance_formation(&mut state);
        }
        assert_eq!(state.formation.enemies[0].pos.x, x0);
        advance_formation(&mut state);
        assert_eq!(state.formation.enemies[0].pos.x, x0 + state.formation.speed);
    }

    #[test]
    fn test_edge_reversal_descends_once_and_quickens() {
        let mut state = state();
        // park the rightmost column on the edge trigger
        let push = SCREEN_WIDTH - FORMATION_EDGE_MARGIN - rightmost_x(&state);
        for e in &mut state.formation.enemies {
            e.pos.x += push;
        }
        let y0 = state.formation.enemies[0].pos.y;
        let delay0 = state.formation.move_delay;

        run_one_movement(&mut state);
        assert_eq!(state.formation.direction, -1.0);
        assert_eq!(state.formation.enemies[0].pos.y, y0 + FORMATION_DESCENT);
        assert_eq!(state.formation.move_delay, delay0 - 1);

        // descent applied exactly once; the next movement is horizontal
        let x1 = state.formation.enemies[0].pos.x;
        run_one_movement(&mut state);
        assert_eq!(state.formation.enemies[0].pos.y, y0 + FORMATION_DESCENT);
        assert_eq!(state.formation.enemies[0].pos.x, x1 - state.formation.speed);
    }

    #[test]
    fn test_front_line_picks_lowest_per_column() {
        let state = state();
        let front = front_line(&state.formation.enemies);
        assert_eq!(front.len(), FORMATION_COLS as usize);
        for i in front {
            assert_eq!(state.formation.enemies[i].row, 3);
        }
    }

    #[test]
    fn test_enemy_fire_respects_cap_and_cooldown() {
        let mut state = state();
        state.config.enemy_fire_chance = 1.0; // every candidate fires
        let mut events = Vec::new();
        enemy_fire(&mut state, &mut events);
        assert_eq!(state.enemy_bullets.len(), state.difficulty.enemy_bullet_cap);
        assert_eq!(events.len(), state.difficulty.enemy_bullet_cap);

        // the volley started the global cooldown
        let before = state.enemy_bullets.len();
        state.enemy_bullets.clear();
        enemy_fire(&mut state, &mut events);
        assert!(state.enemy_bullets.len() < before);
        assert!(state.enemy_bullets.is_empty());
    }

    #[test]
    fn test_enemy_bullets_descend() {
        let mut state = state();
        state.config.enemy_fire_chance = 1.0;
        let mut events = Vec::new();
        enemy_fire(&mut state, &mut events);
        for bullet in &state.enemy_bullets {
            assert!(bullet.vel.y > 0.0);
            assert!(bullet.vel.x.abs() < bullet.vel.y);
        }
    }

    #[test]
    fn test_advance_level_scales_then_increments() {
        let mut state = state();
        state.formation.enemies.clear();
        advance_level(&mut state);
        assert_eq!(state.level, 2);
        // formulas evaluated at the completed level
        assert_eq!(state.difficulty.rows, 4);
        assert_eq!(state.difficulty.enemy_bullet_cap, 6);
        assert_eq!(state.difficulty.enemy_fire_cooldown_ms, 940.0);
        assert_eq!(state.formation.enemies.len(), 40);
        assert_eq!(state.blocks.len(), 104);
    }

    #[test]
    fn test_every_third_level_speeds_enemy_bullets() {
        let mut state = state();
        let base = state.enemy_bullet_speed;
        advance_level(&mut state); // to level 2
        assert_eq!(state.enemy_bullet_speed, base);
        advance_level(&mut state); // to level 3
        assert_eq!(state.enemy_bullet_speed, base + 1.0);
        advance_level(&mut state); // to level 4
        assert_eq!(state.enemy_bullet_speed, base + 1.0);
    }

    #[test]
    fn test_every_tenth_level_awards_shield() {
        let mut state = state();
        let shields = state.ship.shields;
        for _ in 0..9 {
            advance_level(&mut state);
        }
        assert_eq!(state.level, 10);
        assert_eq!(state.ship.shields, shields + 1);
    }

    #[test]
    fn test_level_break_counts_down_to_respawn() {
        let mut state = state();
        state.formation.enemies.clear();
        state.level_break_ticks = 3;
        advance_formation(&mut state);
        advance_formation(&mut state);
        assert_eq!(state.level, 1);
        advance_formation(&mut state);
        assert_eq!(state.level, 2);
        assert_eq!(state.formation.enemies.len(), 40);
    }
}
