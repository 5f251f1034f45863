use std::ops;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::CellState;
use crate::core::{Dims, Error, Result};

/// How coordinates outside of `0..rows` x `0..cols` are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Addressing {
    /// Out of range coordinates are rejected.
    #[default]
    Strict,
    /// Coordinates wrap around on both axes, the grid is a torus.
    Wrap,
}

/// Rectangular grid of [`CellState`]s, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<CellState>,
    rows: usize,
    cols: usize,
    addressing: Addressing,
}

impl Grid {
    /// Creates a grid with every cell [`CellState::Empty`] and strict addressing.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 || rows > i32::MAX as usize || cols > i32::MAX as usize {
            return Err(Error::InvalidSize(Dims(rows as i32, cols as i32)));
        }

        Ok(Grid {
            cells: vec![CellState::Empty; rows * cols],
            rows,
            cols,
            addressing: Addressing::Strict,
        })
    }

    pub fn with_addressing(mut self, addressing: Addressing) -> Self {
        self.addressing = addressing;
        self
    }

    pub fn addressing(&self) -> Addressing {
        self.addressing
    }

    /// Size as `Dims(rows, cols)`.
    pub fn size(&self) -> Dims {
        Dims(self.rows as i32, self.cols as i32)
    }

    pub fn is_in_bounds(&self, pos: Dims) -> bool {
        0 <= pos.0 && pos.0 < self.rows as i32 && 0 <= pos.1 && pos.1 < self.cols as i32
    }

    /// Maps `pos` to its storage address under the grid's [`Addressing`].
    pub fn resolve(&self, pos: Dims) -> Option<Dims> {
        match self.addressing {
            Addressing::Strict => self.is_in_bounds(pos).then_some(pos),
            Addressing::Wrap => Some(Dims(
                pos.0.rem_euclid(self.rows as i32),
                pos.1.rem_euclid(self.cols as i32),
            )),
        }
    }

    fn resolve_or_panic(&self, pos: Dims) -> Dims {
        self.resolve(pos)
            .unwrap_or_else(|| panic!("{}", self.out_of_bounds(pos)))
    }

    fn out_of_bounds(&self, pos: Dims) -> Error {
        Error::OutOfBounds {
            pos,
            size: self.size(),
        }
    }

    fn dim_to_idx(&self, pos: Dims) -> Option<usize> {
        self.resolve(pos)
            .map(|Dims(row, col)| row as usize * self.cols + col as usize)
    }

    pub fn get(&self, pos: Dims) -> Result<CellState> {
        self.dim_to_idx(pos)
            .map(|i| self.cells[i])
            .ok_or_else(|| self.out_of_bounds(pos))
    }

    pub fn try_set(&mut self, pos: Dims, state: CellState) -> Result<()> {
        let i = self.dim_to_idx(pos).ok_or_else(|| self.out_of_bounds(pos))?;
        self.cells[i] = state;
        Ok(())
    }

    /// Reads a cell, panics if the address is invalid.
    pub fn cell(&self, row: i32, col: i32) -> CellState {
        self[Dims(row, col)]
    }

    /// Writes a cell, panics if the address is invalid.
    pub fn set_cell(&mut self, row: i32, col: i32, state: CellState) {
        self[Dims(row, col)] = state;
    }

    /// Whether `pos` is a valid address that is not an outline cell.
    pub fn contains(&self, pos: Dims) -> bool {
        self.dim_to_idx(pos)
            .is_some_and(|i| !self.cells[i].is_outline())
    }

    /// Orthogonal neighbors of `pos` that the grid [contains](Self::contains).
    ///
    /// Coordinates are returned resolved, without duplicates and never including `pos`
    /// itself, which matters for wrapping grids thinner than 3 cells.
    pub fn neighbors(&self, pos: Dims) -> SmallVec<[Dims; 4]> {
        let pos = self.resolve_or_panic(pos);

        let mut neighbors = SmallVec::new();
        for off in Dims::ORTHOGONAL {
            let Some(neighbor) = self.resolve(pos + off) else {
                continue;
            };

            if neighbor != pos && self.contains(neighbor) && !neighbors.contains(&neighbor) {
                neighbors.push(neighbor);
            }
        }

        neighbors
    }

    /// Looks across `mirror` as seen from `reference` and returns the cell twice as far
    /// in the same direction, `reference + 2 * (mirror - reference)`.
    ///
    /// Returns `None` if that cell is not [contained](Self::contains) in the grid.
    pub fn reflect(&self, reference: Dims, mirror: Dims) -> Option<Dims> {
        let reference = self.resolve_or_panic(reference);
        let mirror = self.resolve_or_panic(mirror);

        let offset = self.displacement(reference, mirror);
        self.resolve(reference + offset * 2)
            .filter(|&pos| self.contains(pos))
    }

    /// Offset leading from `from` to `to`. On wrapping grids the shortest one per axis.
    fn displacement(&self, from: Dims, to: Dims) -> Dims {
        fn shortest(delta: i32, len: i32) -> i32 {
            let delta = delta.rem_euclid(len);
            if delta * 2 > len {
                delta - len
            } else {
                delta
            }
        }

        let delta = to - from;
        match self.addressing {
            Addressing::Strict => delta,
            Addressing::Wrap => Dims(
                shortest(delta.0, self.rows as i32),
                shortest(delta.1, self.cols as i32),
            ),
        }
    }

    pub fn is_border(&self, pos: Dims) -> bool {
        self.is_in_bounds(pos)
            && (pos.0 == 0
                || pos.1 == 0
                || pos.0 == self.rows as i32 - 1
                || pos.1 == self.cols as i32 - 1)
    }

    /// Sets the whole perimeter (first and last row and column) to `border`.
    pub fn apply_outline(&mut self, border: CellState) {
        for pos in Dims::iter_fill(Dims::ZERO, self.size()) {
            if self.is_border(pos) {
                self[pos] = border;
            }
        }
    }

    /// Walls every interior cell lying on an even row or an even column.
    ///
    /// Cells with both coordinates odd stay as they are, these are the rooms the
    /// generator carves between. [`CellState::Outline`] cells are never overwritten.
    pub fn apply_wall_lattice(&mut self) {
        let end = self.size() - Dims(1, 1);
        for pos in Dims::iter_fill(Dims(1, 1), end) {
            if self[pos].is_outline() {
                continue;
            }

            if pos.0 % 2 == 0 || pos.1 % 2 == 0 {
                self[pos] = CellState::Wall;
            }
        }
    }

    /// Whether `pos` is a lattice room, an interior cell with both coordinates odd.
    pub fn is_room(&self, pos: Dims) -> bool {
        self.is_in_bounds(pos) && !self.is_border(pos) && pos.0 % 2 == 1 && pos.1 % 2 == 1
    }

    /// All lattice rooms in row-major order.
    pub fn rooms(&self) -> impl Iterator<Item = Dims> + '_ {
        Dims::iter_fill(Dims::ZERO, self.size()).filter(|&pos| self.is_room(pos))
    }

    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&cell| cell == state).count()
    }

    /// Snapshots of every row, top to bottom.
    ///
    /// Every call starts over from the first row.
    pub fn rows(&self) -> impl Iterator<Item = Vec<CellState>> + '_ {
        self.cells.chunks(self.cols).map(|row| row.to_vec())
    }
}

impl ops::Index<Dims> for Grid {
    type Output = CellState;

    fn index(&self, index: Dims) -> &Self::Output {
        let i = self
            .dim_to_idx(index)
            .unwrap_or_else(|| panic!("{}", self.out_of_bounds(index)));
        &self.cells[i]
    }
}

impl ops::IndexMut<Dims> for Grid {
    fn index_mut(&mut self, index: Dims) -> &mut Self::Output {
        let i = self
            .dim_to_idx(index)
            .unwrap_or_else(|| panic!("{}", self.out_of_bounds(index)));
        &mut self.cells[i]
    }
}
