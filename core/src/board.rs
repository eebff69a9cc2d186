use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub size: Coord2,
}

impl BoardConfig {
    pub fn new((cols, rows): Coord2) -> Self {
        Self {
            size: (cols.max(1), rows.max(1)),
        }
    }

    pub const fn total_squares(&self) -> usize {
        mult(self.size.0, self.size.1)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self { size: (5, 5) }
    }
}

/// Grid of square states.
///
/// Squares are stored column by column, which is the order they appear in the
/// document: a position `pos` is `col * rows + row`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    squares: Array2<SquareState>,
}

impl Board {
    pub fn new(size: Coord2) -> Self {
        Self {
            squares: Array2::default(size.to_nd_index()),
        }
    }

    pub fn from_config(config: BoardConfig) -> Self {
        Self::new(config.size)
    }

    /// Builds a board from states in document order.
    pub fn from_squares(size: Coord2, squares: &[SquareState]) -> Result<Self> {
        let mut board = Self::new(size);
        if squares.len() != board.len() {
            return Err(BingoError::InvalidPosition(squares.len()));
        }
        for (pos, &state) in squares.iter().enumerate() {
            board.set(pos, state)?;
        }
        Ok(board)
    }

    pub fn size(&self) -> Coord2 {
        let (cols, rows) = self.squares.dim();
        // dimensions always come from a Coord2
        (cols as Coord, rows as Coord)
    }

    pub fn len(&self) -> usize {
        self.squares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    pub fn get(&self, pos: usize) -> Result<SquareState> {
        self.coords_of(pos).map(|coords| self[coords])
    }

    pub fn set(&mut self, pos: usize, state: SquareState) -> Result<()> {
        let coords = self.coords_of(pos)?;
        self[coords] = state;
        Ok(())
    }

    /// Advances the square to its next state and returns it.
    pub fn toggle(&mut self, pos: usize) -> Result<SquareState> {
        let coords = self.coords_of(pos)?;
        let next = self[coords].next();
        self[coords] = next;
        log::trace!("square {} -> {:?}", pos, next);
        Ok(next)
    }

    pub fn reset(&mut self) {
        self.squares.fill(SquareState::Inactive);
    }

    /// Iterates square states in document order.
    pub fn iter(&self) -> impl Iterator<Item = SquareState> + '_ {
        self.squares.iter().copied()
    }

    pub fn coords_of(&self, pos: usize) -> Result<Coord2> {
        let (_, rows) = self.size();
        if pos >= self.len() {
            return Err(BingoError::InvalidPosition(pos));
        }
        let rows = usize::from(rows);
        Ok(((pos / rows) as Coord, (pos % rows) as Coord))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::from_config(BoardConfig::default())
    }
}

impl Index<Coord2> for Board {
    type Output = SquareState;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.squares[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.squares[coords.to_nd_index()]
    }
}
