use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Bomb and point totals over one row or column.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintAggregate {
    pub bomb_count: u8,
    pub point_total: u16,
}

impl HintAggregate {
    fn add(&mut self, cell: Cell) {
        if cell.is_bomb() {
            self.bomb_count += 1;
        } else {
            self.point_total += u16::from(cell.value());
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hints {
    pub rows: Vec<HintAggregate>,
    pub cols: Vec<HintAggregate>,
}

/// Sums every row and column of `grid`. Reveal state is ignored, hints always describe the whole board.
pub fn compute_hints(grid: &Grid) -> Hints {
    let rows = grid
        .cells()
        .rows()
        .into_iter()
        .map(|row| {
            row.iter().fold(HintAggregate::default(), |mut acc, &cell| {
                acc.add(cell);
                acc
            })
        })
        .collect();

    let cols = grid
        .cells()
        .columns()
        .into_iter()
        .map(|col| {
            col.iter().fold(HintAggregate::default(), |mut acc, &cell| {
                acc.add(cell);
                acc
            })
        })
        .collect();

    Hints { rows, cols }
}
