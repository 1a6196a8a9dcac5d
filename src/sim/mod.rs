//! Deterministic game simulation
//!
//! Pure simulation logic with no rendering or platform dependencies. All
//! randomness flows through the seeded RNG inside [`GameState`] and state
//! advances only through [`tick`] at a fixed timestep, so identical seeds
//! and input scripts replay identical runs.

pub mod collision;
pub mod events;
pub mod formation;
pub mod rect;
pub mod state;
pub mod tick;

pub use events::GameEvent;
pub use formation::Difficulty;
pub use rect::Rect;
pub use state::{
    BarrierBlock, Bullet, BulletOwner, Enemy, EnemyKind, Formation, GameOverReason, GameState,
    Particle, Ship,
};
pub use tick::{TickInput, tick};
