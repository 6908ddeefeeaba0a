use alloc::vec;
use ndarray::Array2;

use super::*;

/// Per-row and per-column point budget the clamps aim for.
pub const LINE_BUDGET: u8 = 9;

/// Difficulty-scaled generation: independent bomb draws, point values clamped against the partial row and column
/// sums accumulated so far in row-major order.
///
/// The column clamp only sees rows generated before the current one, so a column total can still end up above
/// [`LINE_BUDGET`]. The same holds for rows once the budget is spent, since a safe cell is always worth at least one
/// point.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomGridGenerator {
    seed: u64,
}

impl RandomGridGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl GridGenerator for RandomGridGenerator {
    fn generate(self, config: GameConfig, level: Level) -> Grid {
        use rand::prelude::*;

        let level = if level == 0 {
            log::warn!("Level 0 requested, generating level 1 instead");
            1
        } else {
            level
        };

        let bomb_rate = bomb_rate(level);
        let span = value_span(level);
        let (rows, cols) = config.size;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut cells: Array2<Cell> = Array2::default((usize::from(rows), usize::from(cols)));
        let mut col_sums = vec![0u32; usize::from(cols)];
        let budget = u32::from(LINE_BUDGET);

        for row in 0..rows {
            let mut row_sum = 0u32;
            for col in 0..cols {
                let coords = (row, col);
                if rng.random_bool(bomb_rate) {
                    cells[coords.to_nd_index()] = Cell::bomb();
                    continue;
                }

                let mut value = rng.random_range(1..=span).min(u32::from(MAX_CELL_VALUE));

                if row_sum + value > budget {
                    value = budget.saturating_sub(row_sum).max(1);
                }

                let col_sum = &mut col_sums[usize::from(col)];
                if *col_sum + value > budget {
                    value = budget.saturating_sub(*col_sum).max(1);
                }

                row_sum += value;
                *col_sum += value;
                cells[coords.to_nd_index()] = Cell::points(value as u8);
            }
        }

        // dimensions come from `Coord` and are at least 1
        let grid = Grid::from_cells(cells).expect("generated board fits in Coord");
        log::debug!(
            "Generated level {} grid, {}x{}, {} bombs, seed {}",
            level,
            rows,
            cols,
            grid.bomb_count(),
            self.seed
        );
        grid
    }
}
