use alloc::string::String;
use serde::{Deserialize, Serialize};

use crate::*;

/// Where a player stands, handed to the profile store when a session ends and read back to resume.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub level: Level,
    pub score: Score,
}

impl Progress {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self { level: 1, score: 0 }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestRecord {
    pub best_score: Score,
    pub best_level: Level,
}

impl BestRecord {
    /// Keeps the higher score and the higher level independently.
    pub fn merge(self, progress: Progress) -> Self {
        Self {
            best_score: self.best_score.max(progress.score),
            best_level: self.best_level.max(progress.level),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
