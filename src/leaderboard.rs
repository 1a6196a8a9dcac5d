//! Score leaderboard, consumed once per run at game-over
//!
//! The simulation never touches this directly; [`crate::session`] calls it
//! after the run ends. Two implementations ship with the crate: an in-memory
//! board for tests and ephemeral hosts, and a JSON-file board matching the
//! original store layout.

use std::fs;
use std::path::{Path, PathBuf};

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How the collaborator can fail. All variants are non-fatal to a finished
/// run; the session logs and degrades.
#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("leaderboard storage error: {0}")]
    Io(#[from] std::io::Error),
    #[error("leaderboard data error: {0}")]
    Data(#[from] serde_json::Error),
    #[error("leaderboard unavailable")]
    Unavailable,
}

/// One persisted score. The core treats records as opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub name: String,
    pub score: u32,
    pub level: u32,
    /// Local time of submission, `%Y-%m-%d %H:%M:%S`
    pub timestamp: String,
}

/// The narrow interface the game consumes at game-over.
pub trait Leaderboard {
    /// Record a finished run.
    fn submit_score(&mut self, name: &str, score: u32, level: u32) -> Result<(), LeaderboardError>;

    /// The best `limit` records, score descending, ties in insertion order.
    fn top_scores(&self, limit: usize) -> Result<Vec<ScoreRecord>, LeaderboardError>;

    /// 1-based rank a score would hold: stored scores strictly greater, plus
    /// one.
    fn rank(&self, score: u32) -> Result<usize, LeaderboardError>;

    /// A flavor-text fact for the game-over screen.
    fn random_fact(&self) -> Result<String, LeaderboardError>;
}

/// Entry-screen rule for player names: 3 to 15 alphanumeric characters.
///
/// A host-surface helper; `submit_score` itself accepts any name.
pub fn valid_player_name(name: &str) -> bool {
    (3..=15).contains(&name.chars().count()) && name.chars().all(|c| c.is_alphanumeric())
}

fn timestamp_now() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Curated flavor facts served when no live source is wired up.
const FACTS: [&str; 16] = [
    "Space is completely silent because there is no air to carry sound waves.",
    "A day on Venus is longer than a year on Venus.",
    "The Great Red Spot on Jupiter is a storm that has been raging for over 300 years.",
    "Saturn's rings are made mostly of ice and rock.",
    "A year on Mercury is just 88 Earth days.",
    "The Milky Way galaxy is on a collision course with the Andromeda galaxy.",
    "There are more stars in the universe than grains of sand on all the beaches on Earth.",
    "Mercury is the smallest planet in our solar system.",
    "Venus is the hottest planet in our solar system.",
    "Earth is the only known planet with active plate tectonics.",
    "Mars has the largest dust storms in our solar system.",
    "Jupiter is the largest planet in our solar system.",
    "Saturn has the most extensive ring system of any planet.",
    "Uranus rotates on its side, unlike other planets.",
    "Neptune has the strongest winds in our solar system.",
    "Pluto is now classified as a dwarf planet.",
];

fn pick_fact() -> String {
    let i = rand::rng().random_range(0..FACTS.len());
    FACTS[i].to_string()
}

fn sorted_top(records: &[ScoreRecord], limit: usize) -> Vec<ScoreRecord> {
    let mut top = records.to_vec();
    // stable sort keeps ties in insertion order
    top.sort_by(|a, b| b.score.cmp(&a.score));
    top.truncate(limit);
    top
}

fn rank_of(records: &[ScoreRecord], score: u32) -> usize {
    records.iter().filter(|r| r.score > score).count() + 1
}

/// Vec-backed board with no persistence.
#[derive(Debug, Clone, Default)]
pub struct MemoryLeaderboard {
    records: Vec<ScoreRecord>,
}

impl MemoryLeaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Leaderboard for MemoryLeaderboard {
    fn submit_score(&mut self, name: &str, score: u32, level: u32) -> Result<(), LeaderboardError> {
        self.records.push(ScoreRecord {
            name: name.to_string(),
            score,
            level,
            timestamp: timestamp_now(),
        });
        Ok(())
    }

    fn top_scores(&self, limit: usize) -> Result<Vec<ScoreRecord>, LeaderboardError> {
        Ok(sorted_top(&self.records, limit))
    }

    fn rank(&self, score: u32) -> Result<usize, LeaderboardError> {
        Ok(rank_of(&self.records, score))
    }

    fn random_fact(&self) -> Result<String, LeaderboardError> {
        Ok(pick_fact())
    }
}

/// On-disk layout: `{"scores": [...]}`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ScoreFile {
    scores: Vec<ScoreRecord>,
}

/// Board persisted as a JSON file, rewritten on every submit.
#[derive(Debug)]
pub struct JsonFileLeaderboard {
    path: PathBuf,
    records: Vec<ScoreRecord>,
}

impl JsonFileLeaderboard {
    /// Open the board at `path`; a missing file opens as an empty board.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LeaderboardError> {
        let path = path.as_ref().to_path_buf();
        let records = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str::<ScoreFile>(&json)?.scores,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        log::info!(
            "opened leaderboard {} with {} records",
            path.display(),
            records.len()
        );
        Ok(Self { path, records })
    }

    fn persist(&self) -> Result<(), LeaderboardError> {
        let file = ScoreFile {
            scores: self.records.clone(),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&file)?)?;
        Ok(())
    }
}

impl Leaderboard for JsonFileLeaderboard {
    fn submit_score(&mut self, name: &str, score: u32, level: u32) -> Result<(), LeaderboardError> {
        self.records.push(ScoreRecord {
            name: name.to_string(),
            score,
            level,
            timestamp: timestamp_now(),
        });
        self.persist()
    }

    fn top_scores(&self, limit: usize) -> Result<Vec<ScoreRecord>, LeaderboardError> {
        Ok(sorted_top(&self.records, limit))
    }

    fn rank(&self, score: u32) -> Result<usize, LeaderboardError> {
        Ok(rank_of(&self.records, score))
    }

    fn random_fact(&self) -> Result<String, LeaderboardError> {
        Ok(pick_fact())
    }
}
