//! Absolute-expiry action cooldowns
//!
//! Keyed by action and driven by the simulation clock in milliseconds, so
//! pausing the clock freezes every cooldown with it.

use std::collections::HashMap;

/// Actions that can be rate-limited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKey {
    PlayerFire,
    EnemyFire,
}

/// Maps each action to the clock value at which it becomes ready again.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CooldownTracker {
    expiries: HashMap<ActionKey, f64>,
}

impl CooldownTracker {
    /// Start (or restart) a cooldown expiring `duration_ms` from `now_ms`.
    pub fn start_cooldown(&mut self, action: ActionKey, now_ms: f64, duration_ms: f64) {
        self.expiries.insert(action, now_ms + duration_ms);
    }

    /// True when no cooldown is recorded for `action` or it has expired.
    pub fn can_fire(&self, action: ActionKey, now_ms: f64) -> bool {
        match self.expiries.get(&action) {
            Some(&expiry) => now_ms >= expiry,
            None => true,
        }
    }

    /// Milliseconds until `action` is ready again; 0 when already ready.
    pub fn remaining(&self, action: ActionKey, now_ms: f64) -> f64 {
        match self.expiries.get(&action) {
            Some(&expiry) => (expiry - now_ms).max(0.0),
            None => 0.0,
        }
    }
}
