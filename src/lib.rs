//! Galactic Defenders - deterministic core for a wave-based arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, waves, game state)
//! - `cooldown`: Absolute-expiry action cooldowns on the simulation clock
//! - `leaderboard`: Score storage, ranking and flavor facts used at game-over
//! - `session`: One run wired to a leaderboard, with the tick panic guard
//! - `config`: Host-tunable gameplay parameters

pub mod config;
pub mod cooldown;
pub mod leaderboard;
pub mod session;
pub mod sim;

pub use config::GameConfig;
pub use leaderboard::{JsonFileLeaderboard, Leaderboard, MemoryLeaderboard};
pub use session::{GameOverReport, GameSession};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz logic tick)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Ship geometry - y is fixed, only x moves
    pub const SHIP_Y: f32 = 550.0;
    pub const SHIP_WIDTH: f32 = 50.0;
    pub const SHIP_HEIGHT: f32 = 30.0;

    /// Enemy formation grid
    pub const FORMATION_COLS: u32 = 10;
    pub const ENEMY_WIDTH: f32 = 36.0;
    pub const ENEMY_HEIGHT: f32 = 24.0;
    pub const ENEMY_COL_SPACING: f32 = 55.0;
    pub const ENEMY_ROW_SPACING: f32 = 45.0;
    pub const FORMATION_ORIGIN_X: f32 = 80.0;
    pub const FORMATION_ORIGIN_Y: f32 = 90.0;
    /// Horizontal slack before the formation reverses at a screen edge
    pub const FORMATION_EDGE_MARGIN: f32 = 20.0;
    /// Vertical drop applied on each reversal
    pub const FORMATION_DESCENT: f32 = 25.0;
    /// An enemy within this distance of the ship's row ends the run
    pub const INVASION_DISTANCE: f32 = 50.0;
    /// Reversals stop shortening the sweep delay below this
    pub const MOVE_DELAY_FLOOR: u32 = 5;

    /// Barrier fortresses between the ship and the formation
    pub const BARRIER_COUNT: usize = 4;
    pub const BARRIER_BLOCK_SIZE: f32 = 12.0;
    pub const BARRIER_Y: f32 = 460.0;
    pub const BLOCK_START_HEALTH: u8 = 3;

    /// Ticks between clearing a wave and the next one spawning
    pub const LEVEL_BREAK_TICKS: u32 = 200;

    /// Enemy shots deviate from vertical by up to this angle (radians)
    pub const ENEMY_BULLET_JITTER: f32 = 0.12;

    /// Cosmetic particle cap (oldest evicted first)
    pub const MAX_PARTICLES: usize = 256;
}

/// Velocity of a downward shot deflected `angle` radians off vertical
#[inline]
pub fn descending_velocity(speed: f32, angle: f32) -> Vec2 {
    Vec2::new(speed * angle.sin(), speed * angle.cos())
}
