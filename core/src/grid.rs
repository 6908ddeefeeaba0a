use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    Unchanged,
    PreviewReveal,
    BombHit,
    SafeReveal { points: u8 },
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            Unchanged => false,
            PreviewReveal => true,
            BombHit => true,
            SafeReveal { .. } => true,
        }
    }

    /// Points to add to the level score.
    pub const fn points(self) -> u8 {
        match self {
            Self::SafeReveal { points } => points,
            _ => 0,
        }
    }
}

/// The cells of one level attempt.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Array2<Cell>", into = "Array2<Cell>")]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    /// Wraps `cells`, each dimension must be between 1 and [`Coord::MAX`].
    pub fn from_cells(cells: Array2<Cell>) -> Result<Self> {
        let (rows, cols) = cells.dim();
        let fits = |len: usize| len > 0 && Coord::try_from(len).is_ok();
        if !fits(rows) || !fits(cols) {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(Self { cells })
    }

    /// Builds a grid from row slices, all rows must have the same length.
    pub fn from_rows(rows: &[&[Cell]]) -> Result<Self> {
        let cols = rows.first().map_or(0, |row| row.len());
        if rows.is_empty() || cols == 0 || rows.iter().any(|row| row.len() != cols) {
            return Err(GameError::InvalidBoardShape);
        }

        let cells = Array2::from_shape_fn((rows.len(), cols), |(row, col)| rows[row][col]);
        Self::from_cells(cells)
    }

    /// Board size as `(rows, cols)`.
    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn bomb_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_bomb()).count() as CellCount
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| !cell.is_bomb()).count() as CellCount
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    pub fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }

    /// Applies a tap at `coords`.
    ///
    /// With the joker active the cell is only previewed: no points, and a bomb does not end the attempt. The
    /// caller is responsible for reverting the preview with [`Grid::end_preview`].
    pub fn reveal(&mut self, coords: Coord2, joker_active: bool) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        let cell = &mut self.cells[coords.to_nd_index()];

        if cell.is_revealed() {
            return Ok(RevealOutcome::Unchanged);
        }

        Ok(if joker_active {
            cell.set_state(CellState::Preview);
            RevealOutcome::PreviewReveal
        } else if cell.is_bomb() {
            cell.set_state(CellState::Revealed);
            RevealOutcome::BombHit
        } else {
            cell.set_state(CellState::Revealed);
            RevealOutcome::SafeReveal {
                points: cell.value(),
            }
        })
    }

    /// Hides a previewed cell again, returns whether anything changed.
    pub fn end_preview(&mut self, coords: Coord2) -> Result<bool> {
        let coords = self.validate_coords(coords)?;
        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.is_preview() {
            cell.set_state(CellState::Hidden);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// True once every safe cell has been revealed for good, bombs never need revealing.
    pub fn is_level_cleared(&self) -> bool {
        self.cells
            .iter()
            .all(|cell| cell.is_bomb() || cell.state() == CellState::Revealed)
    }

    pub fn hints(&self) -> Hints {
        compute_hints(self)
    }
}

impl TryFrom<Array2<Cell>> for Grid {
    type Error = GameError;

    fn try_from(cells: Array2<Cell>) -> Result<Self> {
        Self::from_cells(cells)
    }
}

impl From<Grid> for Array2<Cell> {
    fn from(grid: Grid) -> Self {
        grid.cells
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
