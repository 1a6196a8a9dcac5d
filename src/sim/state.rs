//! Game state: entities and the per-run aggregate
//!
//! Everything the simulation mutates lives in [`GameState`]. Entities are
//! plain data; death is removal from the owning collection, so there are no
//! liveness flags to sweep (the ship is the one exception, see [`Ship`]).

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::consts::*;
use crate::cooldown::CooldownTracker;

use super::formation::{self, Difficulty};
use super::rect::Rect;

/// Who fired a bullet. Decides which collision passes it joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletOwner {
    Player,
    Enemy,
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// Ship shields depleted to zero
    Shields,
    /// An enemy descended to the ship's row
    Invasion,
}

/// The player's ship. Moves only horizontally along a fixed row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    /// Horizontal movement per tick
    pub speed: f32,
    /// Remaining shields; the run ends when this reaches 0
    pub shields: u8,
    /// Cleared when shields reach 0. An invasion game-over leaves the ship
    /// standing, so this is not the same as "running".
    pub alive: bool,
}

impl Ship {
    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, SHIP_WIDTH, SHIP_HEIGHT)
    }

    /// Where player bullets spawn (tip of the hull).
    pub fn nose(&self) -> Vec2 {
        Vec2::new(self.pos.x, self.pos.y - SHIP_HEIGHT / 2.0)
    }
}

/// A projectile in flight. Removed on hit or once off screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub owner: BulletOwner,
    pub pos: Vec2,
    /// Displacement applied each tick
    pub vel: Vec2,
}

/// Enemy archetypes, tiered by points. Higher formation rows carry the more
/// valuable kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Scout,
    Raider,
    Cruiser,
    Destroyer,
    Commander,
}

impl EnemyKind {
    /// Points awarded for a kill.
    pub fn points(&self) -> u32 {
        match self {
            EnemyKind::Scout => 10,
            EnemyKind::Raider => 20,
            EnemyKind::Cruiser => 30,
            EnemyKind::Destroyer => 40,
            EnemyKind::Commander => 50,
        }
    }

    /// Archetype for a formation row, row 0 at the top.
    pub fn for_row(row: u32) -> Self {
        match row {
            0 => EnemyKind::Commander,
            1 => EnemyKind::Destroyer,
            2 => EnemyKind::Cruiser,
            3 => EnemyKind::Raider,
            _ => EnemyKind::Scout,
        }
    }
}

/// One formation member. Death is removal from the formation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub row: u32,
    pub col: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
}

impl Enemy {
    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, ENEMY_WIDTH, ENEMY_HEIGHT)
    }
}

/// One cell of a barrier fortress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarrierBlock {
    pub pos: Vec2,
    /// 3 fresh, 2 chipped, 1 crumbling; removed at 0
    pub health: u8,
}

impl BarrierBlock {
    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, BARRIER_BLOCK_SIZE, BARRIER_BLOCK_SIZE)
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks left to live
    pub life: u32,
    pub size: f32,
    pub color: u32, // packed 0xRRGGBB for host color lookup
}

/// Spawn a burst of `count` particles at `pos`, evicting the oldest once the
/// cap is reached.
pub fn spawn_burst(
    particles: &mut Vec<Particle>,
    rng: &mut Pcg32,
    pos: Vec2,
    color: u32,
    count: usize,
    life: u32,
) {
    for _ in 0..count {
        if particles.len() >= MAX_PARTICLES {
            particles.remove(0);
        }
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = rng.random_range(0.5..3.0);
        particles.push(Particle {
            pos,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            life,
            size: rng.random_range(1.0..3.0),
            color,
        });
    }
}

/// The rigid-moving enemy grid for the current level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formation {
    pub enemies: Vec<Enemy>,
    /// +1.0 sweeping right, -1.0 sweeping left
    pub direction: f32,
    /// Horizontal step applied per movement
    pub speed: f32,
    /// Ticks between movements; shrinks on each reversal
    pub move_delay: u32,
    /// Ticks accumulated toward the next movement
    pub move_counter: u32,
}

/// The single source of truth for one run.
///
/// Exclusively owned by the caller and mutated only by the tick function on
/// one logical thread. Cloneable and comparable so hosts and tests can take
/// scratch copies and assert bit-identity.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// All gameplay randomness flows through this
    pub rng: Pcg32,
    /// Simulation tick counter
    pub ticks: u64,
    /// Simulation clock in milliseconds; drives cooldowns
    pub clock_ms: f64,
    pub score: u32,
    /// Current level, 1-based
    pub level: u32,
    /// False once the run has ended
    pub running: bool,
    pub paused: bool,
    /// Set exactly once, when the run ends
    pub outcome: Option<GameOverReason>,
    pub ship: Ship,
    pub formation: Formation,
    pub player_bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub blocks: Vec<BarrierBlock>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub cooldowns: CooldownTracker,
    /// Scaling parameters for the current level
    pub difficulty: Difficulty,
    /// Grows by 1 every third level, never resets
    pub enemy_bullet_speed: f32,
    /// Ticks left of the break between a cleared wave and the next spawn
    pub level_break_ticks: u32,
    pub config: GameConfig,
}

impl GameState {
    /// Create a fresh level-1 run with formation and barriers in place.
    pub fn new(seed: u64, config: GameConfig) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            ticks: 0,
            clock_ms: 0.0,
            score: 0,
            level: 1,
            running: true,
            paused: false,
            outcome: None,
            ship: Ship {
                pos: Vec2::new(SCREEN_WIDTH / 2.0, SHIP_Y),
                speed: config.ship_speed,
                shields: config.start_shields,
                alive: true,
            },
            formation: Formation {
                enemies: Vec::new(),
                direction: 1.0,
                speed: 0.0,
                move_delay: 0,
                move_counter: 0,
            },
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            blocks: Vec::new(),
            particles: Vec::new(),
            cooldowns: CooldownTracker::default(),
            difficulty: Difficulty::for_level(1),
            enemy_bullet_speed: config.enemy_bullet_speed,
            level_break_ticks: 0,
            config,
        };

        formation::spawn_formation(&mut state);
        formation::spawn_barriers(&mut state);

        state
    }
}
