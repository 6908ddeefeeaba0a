use serde::{Deserialize, Serialize};

use crate::*;

/// Points credited when a level is cleared.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelReward {
    pub earned: Score,
    pub bonus_percent: u32,
}

/// Applies the level bonus `1 + level / 10` to `level_score`, rounding down.
///
/// Computed on integers: `level_score * (10 + level) / 10`.
pub fn compute_level_clear_reward(level: Level, level_score: Score) -> LevelReward {
    let tenths = 10 + Score::from(level);
    LevelReward {
        earned: level_score.saturating_mul(tenths) / 10,
        bonus_percent: level.saturating_mul(10),
    }
}
