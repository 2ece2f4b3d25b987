use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Square grid of cell flags.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<CellFlags>,
    size: Coord,
}

impl Board {
    /// Allocates a `size`×`size` board with every flag cleared.
    pub fn new(size: Coord) -> Self {
        let dim = usize::from(size);
        Self {
            cells: Array2::default([dim, dim]),
            size,
        }
    }

    pub fn size(&self) -> Coord {
        self.size
    }

    pub fn contains(&self, position: Position) -> bool {
        position.is_within(self.size)
    }

    pub fn validate(&self, position: Position) -> Result<Position> {
        if self.contains(position) {
            Ok(position)
        } else {
            Err(GameError::OutOfBounds(position))
        }
    }

    pub fn cell_at(&self, position: Position) -> Result<CellFlags> {
        let position = self.validate(position)?;
        Ok(self[position])
    }

    pub fn blast_cells(&self, center: Position) -> BlastIter {
        BlastIter::new(center, self.size)
    }

    pub(crate) fn mark_blast(&mut self, center: Position) {
        self[center].remove(CellFlags::BOMB);
        for position in self.blast_cells(center) {
            self[position].insert(CellFlags::EXPLOSION);
        }
    }

    pub(crate) fn clear_blast(&mut self, center: Position) {
        for position in self.blast_cells(center) {
            self[position].remove(CellFlags::EXPLOSION);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, CellFlags)> + '_ {
        self.cells.indexed_iter().map(|((row, column), &flags)| {
            // indices are bounded by `size`, which is a `Coord`
            (Position::new(row as Coord, column as Coord), flags)
        })
    }

    pub(crate) fn mask(&self, flag: CellFlags) -> Array2<bool> {
        self.cells.map(|cell| cell.contains(flag))
    }
}

impl Index<Position> for Board {
    type Output = CellFlags;

    fn index(&self, position: Position) -> &Self::Output {
        &self.cells[position.to_nd_index()]
    }
}

impl IndexMut<Position> for Board {
    fn index_mut(&mut self, position: Position) -> &mut Self::Output {
        &mut self.cells[position.to_nd_index()]
    }
}
