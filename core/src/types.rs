/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for bomb counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Difficulty level, starting at 1.
pub type Level = u32;

/// Score accumulated within a level attempt or across a session.
pub type Score = u64;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Iterates every position of a `rows × cols` board in row-major order.
pub fn iter_coords((rows, cols): Coord2) -> impl Iterator<Item = Coord2> {
    (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
}
