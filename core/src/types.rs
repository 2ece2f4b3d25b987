use core::fmt;
use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board size, rows, and columns.
pub type Coord = u8;

/// Logical time in milliseconds.
pub type Millis = u64;

/// A cell on the board, addressed as `(row, column)`.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Position {
    pub row: Coord,
    pub column: Coord,
}

impl Position {
    pub const ORIGIN: Self = Self::new(0, 0);

    pub const fn new(row: Coord, column: Coord) -> Self {
        Self { row, column }
    }

    /// Applies `delta` to this position, returning a value only when it stays inside a `size`×`size` board.
    pub fn offset(self, (row_delta, column_delta): (isize, isize), size: Coord) -> Option<Self> {
        let row = self.row.checked_add_signed(row_delta.try_into().ok()?)?;
        if row >= size {
            return None;
        }

        let column = self.column.checked_add_signed(column_delta.try_into().ok()?)?;
        if column >= size {
            return None;
        }

        Some(Self { row, column })
    }

    pub const fn is_within(self, size: Coord) -> bool {
        self.row < size && self.column < size
    }
}

impl From<(Coord, Coord)> for Position {
    fn from((row, column): (Coord, Coord)) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Position {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.row.into(), self.column.into()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// `(row, column)` step for a single move.
    pub const fn delta(self) -> (isize, isize) {
        use Direction::*;
        match self {
            Up => (-1, 0),
            Down => (1, 0),
            Left => (0, -1),
            Right => (0, 1),
        }
    }
}

/// Origin first, then the four orthogonal neighbors.
const BLAST_CROSS: [(isize, isize); 5] = [(0, 0), (-1, 0), (1, 0), (0, -1), (0, 1)];

/// Cells covered by a blast centered on `center`, clipped to the board.
#[derive(Debug)]
pub struct BlastIter {
    center: Position,
    size: Coord,
    index: u8,
}

impl BlastIter {
    pub fn new(center: Position, size: Coord) -> Self {
        Self {
            center,
            size,
            index: 0,
        }
    }
}

impl Iterator for BlastIter {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= BLAST_CROSS.len() {
                return None;
            }

            let next_item = self
                .center
                .offset(BLAST_CROSS[self.index as usize], self.size);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}
