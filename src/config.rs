//! Host-tunable gameplay parameters
//!
//! Fixed playfield geometry lives in [`crate::consts`]; everything a host
//! may want to vary between runs lives here.

use serde::{Deserialize, Serialize};

/// Tunable gameplay parameters, fixed for the duration of a run.
///
/// Times are simulation-clock milliseconds, speeds are pixels per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Ship horizontal movement per tick
    pub ship_speed: f32,
    /// Shields the ship starts with
    pub start_shields: u8,
    /// Minimum time between player shots
    pub player_fire_cooldown_ms: f64,
    /// Upward speed of player bullets
    pub player_bullet_speed: f32,
    /// Downward speed of enemy bullets at level 1 (grows every 3rd level)
    pub enemy_bullet_speed: f32,
    /// Per-tick fire probability for each frontmost enemy
    pub enemy_fire_chance: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            ship_speed: 8.0,
            start_shields: 3,
            player_fire_cooldown_ms: 250.0,
            player_bullet_speed: 10.0,
            enemy_bullet_speed: 4.0,
            enemy_fire_chance: 0.02,
        }
    }
}
