//! One run of the game wired to its leaderboard
//!
//! [`GameSession`] owns the state, the collaborator, and the player name.
//! It forwards ticks to the simulation behind a panic guard and performs the
//! single score submission when the run ends. Collaborator failures degrade
//! to `None` fields in the report; they never disturb the finished run.

use std::panic::{self, AssertUnwindSafe};

use crate::config::GameConfig;
use crate::leaderboard::{Leaderboard, ScoreRecord};
use crate::sim::{self, GameEvent, GameOverReason, GameState, TickInput};

/// Rows shown on the game-over screen.
const REPORT_TOP_SCORES: usize = 5;

/// Everything the game-over screen needs. `None` fields mean the
/// leaderboard was unavailable.
#[derive(Debug, Clone, PartialEq)]
pub struct GameOverReport {
    pub player: String,
    pub reason: GameOverReason,
    pub score: u32,
    pub level: u32,
    pub rank: Option<usize>,
    pub top_scores: Option<Vec<ScoreRecord>>,
    pub fact: Option<String>,
}

/// A single run bound to a player and a leaderboard.
pub struct GameSession<L: Leaderboard> {
    state: GameState,
    leaderboard: L,
    player: String,
    report: Option<GameOverReport>,
}

impl<L: Leaderboard> GameSession<L> {
    pub fn new(seed: u64, config: GameConfig, player: impl Into<String>, leaderboard: L) -> Self {
        Self {
            state: GameState::new(seed, config),
            leaderboard,
            player: player.into(),
            report: None,
        }
    }

    /// Advance one tick. A tick that panics is discarded wholesale: the
    /// state is unchanged and no events are returned.
    pub fn tick(&mut self, input: &TickInput, dt: f32) -> Vec<GameEvent> {
        let mut scratch = self.state.clone();
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let events = sim::tick(&mut scratch, input, dt);
            (scratch, events)
        }));

        let events = match result {
            Ok((next, events)) => {
                self.state = next;
                events
            }
            Err(_) => {
                log::error!("simulation tick panicked; tick discarded");
                return Vec::new();
            }
        };

        if self.report.is_none() {
            if let Some(GameEvent::GameOver { reason }) = events
                .iter()
                .find(|e| matches!(e, GameEvent::GameOver { .. }))
            {
                self.finish_run(*reason);
            }
        }

        events
    }

    /// Submit the score once and collect what the game-over screen shows.
    fn finish_run(&mut self, reason: GameOverReason) {
        let score = self.state.score;
        let level = self.state.level;

        if let Err(e) = self.leaderboard.submit_score(&self.player, score, level) {
            log::warn!("score submission failed: {e}");
        }
        let rank = match self.leaderboard.rank(score) {
            Ok(rank) => Some(rank),
            Err(e) => {
                log::warn!("rank lookup failed: {e}");
                None
            }
        };
        let top_scores = match self.leaderboard.top_scores(REPORT_TOP_SCORES) {
            Ok(top) => Some(top),
            Err(e) => {
                log::warn!("top scores lookup failed: {e}");
                None
            }
        };
        let fact = match self.leaderboard.random_fact() {
            Ok(fact) => Some(fact),
            Err(e) => {
                log::warn!("fact lookup failed: {e}");
                None
            }
        };

        self.report = Some(GameOverReport {
            player: self.player.clone(),
            reason,
            score,
            level,
            rank,
            top_scores,
            fact,
        });
    }

    /// Start a fresh run for the same player and config.
    pub fn reset(&mut self, seed: u64) {
        self.state = GameState::new(seed, self.state.config.clone());
        self.report = None;
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The game-over report, once the run has ended.
    pub fn report(&self) -> Option<&GameOverReport> {
        self.report.as_ref()
    }

    pub fn leaderboard(&self) -> &L {
        &self.leaderboard
    }
}
