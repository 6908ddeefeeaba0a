#![no_std]

extern crate alloc;

use core::time::Duration;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use hints::*;
pub use joker::*;
pub use progress::*;
pub use scoring::*;
pub use session::*;
pub use types::*;

mod cell;
mod error;
mod generator;
mod grid;
mod hints;
mod joker;
mod progress;
mod scoring;
mod session;
mod types;

/// Rows of the standard board.
pub const ROWS: Coord = 5;

/// Columns of the standard board.
pub const COLS: Coord = 4;

/// How long a joker preview keeps its cell visible.
pub const JOKER_PREVIEW: Duration = Duration::from_millis(3000);

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board size as `(rows, cols)`.
    pub size: Coord2,
    pub preview: Duration,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, preview: Duration) -> Self {
        Self { size, preview }
    }

    pub fn new((rows, cols): Coord2, preview: Duration) -> Self {
        let rows = rows.clamp(1, Coord::MAX);
        let cols = cols.clamp(1, Coord::MAX);
        Self::new_unchecked((rows, cols), preview)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked((ROWS, COLS), JOKER_PREVIEW)
    }
}
