//! Observable simulation events
//!
//! `tick` returns these in the order they occurred so a host can drive
//! rendering and sound without reaching into simulation internals.

use serde::{Deserialize, Serialize};

use super::state::{BulletOwner, GameOverReason};

/// One observable state change from a single tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ship x changed (emitted only on actual movement)
    ShipMoved { x: f32 },
    /// A bullet entered play at (x, y)
    BulletFired { owner: BulletOwner, x: f32, y: f32 },
    /// An enemy was destroyed and its points awarded
    EnemyKilled { points: u32, x: f32, y: f32 },
    /// A barrier block absorbed a hit and survived with `health` left
    BlockDamaged { x: f32, y: f32, health: u8 },
    /// A barrier block absorbed its final hit
    BlockDestroyed { x: f32, y: f32 },
    /// The ship lost a shield; `shields` is the count after the hit
    ShipHit { shields: u8 },
    /// The formation was cleared; `level` is the upcoming level
    LevelComplete { level: u32 },
    /// The run ended
    GameOver { reason: GameOverReason },
}
