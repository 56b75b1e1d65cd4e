//! High-score persistence.
//!
//! The game only ever stores one number.  A missing or unreadable record
//! reads as `None` and the caller treats that as zero; write failures are
//! logged and otherwise ignored so storage trouble never ends a session.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub trait HighScoreStore {
    fn get_high_score(&self) -> Option<u32>;
    fn set_high_score(&mut self, score: u32);
}

impl<S: HighScoreStore + ?Sized> HighScoreStore for &mut S {
    fn get_high_score(&self) -> Option<u32> {
        (**self).get_high_score()
    }

    fn set_high_score(&mut self, score: u32) {
        (**self).set_high_score(score)
    }
}

// ── In-memory ─────────────────────────────────────────────────────────────────

/// Keeps the score for the lifetime of the process only.
#[derive(Clone, Debug, Default)]
pub struct MemoryHighScoreStore {
    score: Option<u32>,
    writes: usize,
}

impl MemoryHighScoreStore {
    pub fn with_score(score: u32) -> Self {
        Self {
            score: Some(score),
            writes: 0,
        }
    }

    /// How many times `set_high_score` has been called.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn get_high_score(&self) -> Option<u32> {
        self.score
    }

    fn set_high_score(&mut self, score: u32) {
        self.score = Some(score);
        self.writes += 1;
    }
}

// ── File-backed ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u32,
}

/// Stores the score as a small JSON document.
#[derive(Clone, Debug)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn get_high_score(&self) -> Option<u32> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No high score at {}, starting fresh", self.path.display());
                return None;
            }
            Err(e) => {
                log::warn!("Failed to read high score {}: {}", self.path.display(), e);
                return None;
            }
        };
        match serde_json::from_str::<HighScoreRecord>(&json) {
            Ok(record) => Some(record.high_score),
            Err(e) => {
                log::warn!("Ignoring corrupt high score {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn set_high_score(&mut self, score: u32) {
        if let Some(dir) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(dir) {
                log::warn!("Failed to create {}: {}", dir.display(), e);
                return;
            }
        }
        let record = HighScoreRecord { high_score: score };
        match serde_json::to_string(&record) {
            Ok(json) => match fs::write(&self.path, json) {
                Ok(()) => log::debug!("High score {} saved", score),
                Err(e) => log::warn!("Failed to save high score: {}", e),
            },
            Err(e) => log::warn!("Failed to encode high score: {}", e),
        }
    }
}
