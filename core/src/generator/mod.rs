use crate::*;
pub use random::*;

mod random;

pub trait GridGenerator {
    fn generate(self, config: GameConfig, level: Level) -> Grid;
}

/// Probability that a cell holds a bomb at `level`.
pub fn bomb_rate(level: Level) -> f64 {
    (0.1 + f64::from(level) * 0.08).min(0.7)
}

/// Upper bound of the uniform point draw at `level`, before the per-cell cap.
pub const fn value_span(level: Level) -> u32 {
    // floor(level * 0.6)
    3 + level.saturating_mul(3) / 5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bomb_rate_grows_then_caps() {
        assert!(bomb_rate(1) > 0.179 && bomb_rate(1) < 0.181);
        assert!(bomb_rate(5) > 0.499 && bomb_rate(5) < 0.501);
        assert_eq!(bomb_rate(8), 0.7);
        assert_eq!(bomb_rate(100), 0.7);
    }

    #[test]
    fn value_span_follows_level() {
        assert_eq!(value_span(1), 3);
        assert_eq!(value_span(2), 4);
        assert_eq!(value_span(5), 6);
        assert_eq!(value_span(10), 9);
    }
}
