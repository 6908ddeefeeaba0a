use serde::{Deserialize, Serialize};

/// Largest point value a single cell can carry.
pub const MAX_CELL_VALUE: u8 = 9;

/// What a cell hides. Fixed when the grid is generated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellContent {
    Bomb,
    Points(u8),
}

/// Player-visible state, the only part of a cell that changes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Hidden,
    Revealed,
    /// Temporarily shown by the joker, reverts to `Hidden`.
    Preview,
}

impl Default for CellState {
    fn default() -> Self {
        Self::Hidden
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    content: CellContent,
    state: CellState,
}

impl Cell {
    pub const fn bomb() -> Self {
        Self {
            content: CellContent::Bomb,
            state: CellState::Hidden,
        }
    }

    /// Safe cell worth `value` points, capped at [`MAX_CELL_VALUE`].
    pub fn points(value: u8) -> Self {
        Self {
            content: CellContent::Points(value.min(MAX_CELL_VALUE)),
            state: CellState::Hidden,
        }
    }

    pub const fn content(self) -> CellContent {
        self.content
    }

    pub const fn state(self) -> CellState {
        self.state
    }

    pub const fn is_bomb(self) -> bool {
        matches!(self.content, CellContent::Bomb)
    }

    /// Points awarded on reveal, zero for bombs.
    pub const fn value(self) -> u8 {
        match self.content {
            CellContent::Bomb => 0,
            CellContent::Points(value) => value,
        }
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self.state, CellState::Revealed | CellState::Preview)
    }

    pub const fn is_preview(self) -> bool {
        matches!(self.state, CellState::Preview)
    }

    pub(crate) fn set_state(&mut self, state: CellState) {
        self.state = state;
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::points(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bomb_is_worth_nothing() {
        let cell = Cell::bomb();

        assert!(cell.is_bomb());
        assert_eq!(cell.value(), 0);
        assert!(!cell.is_revealed());
    }

    #[test]
    fn points_are_capped() {
        assert_eq!(Cell::points(12).value(), MAX_CELL_VALUE);
        assert_eq!(Cell::points(4).content(), CellContent::Points(4));
    }

    #[test]
    fn preview_counts_as_revealed() {
        let mut cell = Cell::points(3);
        cell.set_state(CellState::Preview);

        assert!(cell.is_revealed());
        assert!(cell.is_preview());
    }
}
