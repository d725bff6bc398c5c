//! The puzzle box: an N x N grid of letters with precomputed adjacency.
//!
//! The grid is built once per puzzle attempt and is only ever mutated by
//! [`Grid::remove_word`], which consumes an accepted answer's cells and lets
//! the letters above them fall one row at a time (the "collapse"). Everything
//! else treats the grid as read-only geometry.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ConfigError;
use crate::search::FoundWord;

/// Glyph stored in a cell once its letter has been consumed by an accepted
/// answer. Rendered as-is in snapshots.
pub const VACANT: char = '\u{2588}';

/// Longest answer the search will attempt.
pub const MAX_WORD_LENGTH: usize = 15;

/// A cell position in the box (0-based, row 0 at the top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Usability of a cell, or of one of its neighbor slots.
///
/// `Edge` only ever appears in the precomputed neighbor slots of a [`Cell`],
/// marking directions that fall outside the box. A cell's own status is
/// always `Available` or `Used`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStatus {
    Available,
    Used,
    Edge,
}

/// The eight compass neighbors of a cell, in the fixed order the search
/// probes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    UpLeft,
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
}

impl Direction {
    /// Probe order used by the path enumerator. Tests may depend on the
    /// emission order this implies, so it never changes.
    pub const ALL: [Direction; 8] = [
        Direction::UpLeft,
        Direction::Up,
        Direction::UpRight,
        Direction::Right,
        Direction::DownRight,
        Direction::Down,
        Direction::DownLeft,
        Direction::Left,
    ];

    /// Row/column offset of this direction.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::UpLeft => (-1, -1),
            Direction::Up => (-1, 0),
            Direction::UpRight => (-1, 1),
            Direction::Right => (0, 1),
            Direction::DownRight => (1, 1),
            Direction::Down => (1, 0),
            Direction::DownLeft => (1, -1),
            Direction::Left => (0, -1),
        }
    }

    /// The neighboring position in this direction. Only meaningful when the
    /// corresponding neighbor slot is not `Edge`.
    pub fn step(self, pos: Position) -> Position {
        let (dr, dc) = self.offset();
        Position::new(
            (pos.row as isize + dr) as usize,
            (pos.col as isize + dc) as usize,
        )
    }
}

/// One cell of the box.
#[derive(Debug, Clone)]
pub struct Cell {
    pub pos: Position,
    pub letter: char,
    pub status: CellStatus,
    neighbors: [CellStatus; 8],
}

impl Cell {
    /// Availability of the neighbor slot in `dir`, computed once from the
    /// box geometry at construction.
    pub fn neighbor_status(&self, dir: Direction) -> CellStatus {
        self.neighbors[dir as usize]
    }

    /// True once this cell's letter has been consumed by an accepted answer.
    pub fn is_vacant(&self) -> bool {
        self.letter == VACANT
    }
}

/// A `side` x `side` box of letter cells.
#[derive(Debug, Clone)]
pub struct Grid {
    side: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Build a box from its side length and a flattened letter string
    /// (row by row, top-left to bottom-right). Whitespace is dropped and
    /// letters are upper-cased before validation.
    pub fn new(side: usize, letters: &str) -> Result<Self, ConfigError> {
        let letters: Vec<char> = letters
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_uppercase())
            .collect();

        if side * side != letters.len() {
            return Err(ConfigError::LetterCountMismatch {
                side,
                letters: letters.len(),
            });
        }

        let mut cells = Vec::with_capacity(letters.len());
        for (index, letter) in letters.into_iter().enumerate() {
            let pos = Position::new(index / side, index % side);
            cells.push(Cell {
                pos,
                letter,
                status: CellStatus::Available,
                neighbors: neighbor_slots(pos, side),
            });
        }

        Ok(Self { side, cells })
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn cell(&self, pos: Position) -> &Cell {
        &self.cells[pos.row * self.side + pos.col]
    }

    fn cell_mut(&mut self, pos: Position) -> &mut Cell {
        &mut self.cells[pos.row * self.side + pos.col]
    }

    /// Number of cells still holding a letter.
    pub fn available_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| c.status == CellStatus::Available)
            .count()
    }

    /// Every cell currently eligible to start a word, in the fixed legacy
    /// enumeration order: reverse row, then reverse column (bottom-right
    /// to top-left). Restartable; callers may iterate it repeatedly.
    pub fn starting_points(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells
            .iter()
            .rev()
            .filter(|c| c.status == CellStatus::Available)
    }

    /// Snapshot of the current letters, row by row. Vacant cells carry the
    /// [`VACANT`] glyph.
    pub fn letters(&self) -> Vec<Vec<char>> {
        (0..self.side)
            .map(|row| {
                (0..self.side)
                    .map(|col| self.cell(Position::new(row, col)).letter)
                    .collect()
            })
            .collect()
    }

    /// Consume an accepted answer's cells and collapse each affected column.
    ///
    /// Every recorded position must still hold the letter the answer recorded
    /// for it (or already be vacant, which makes that position a no-op).
    /// Validation runs over the whole word before any cell is touched, so a
    /// rejected removal leaves the grid unchanged.
    pub fn remove_word(&mut self, word: &FoundWord) -> Result<(), ConfigError> {
        for placed in &word.letters {
            let pos = placed.pos;
            if pos.row >= self.side || pos.col >= self.side {
                return Err(ConfigError::InvalidPosition {
                    row: pos.row,
                    col: pos.col,
                    side: self.side,
                });
            }
            let cell = self.cell(pos);
            if !cell.is_vacant() && cell.letter != placed.letter {
                return Err(ConfigError::LetterMismatch {
                    row: pos.row,
                    col: pos.col,
                    expected: placed.letter,
                    found: cell.letter,
                });
            }
        }

        // Column-major, top to bottom, so that several letters of the same
        // answer sharing a column collapse correctly one at a time.
        let mut positions: Vec<Position> = word.letters.iter().map(|p| p.pos).collect();
        positions.sort_by_key(|p| (p.col, p.row));

        for pos in positions {
            self.remove_letter(pos);
        }
        Ok(())
    }

    /// Remove the letter at `pos` and let the letters above it fall one row.
    fn remove_letter(&mut self, pos: Position) {
        let col = pos.col;
        for row in (0..=pos.row).rev() {
            let here = Position::new(row, col);
            if self.cell(here).is_vacant() {
                // Already consumed by an earlier answer; the column above is
                // settled.
                break;
            }
            if self.cell(here).neighbor_status(Direction::Up) == CellStatus::Edge {
                self.vacate(here);
                break;
            }
            let above = Position::new(row - 1, col);
            if self.cell(above).is_vacant() {
                self.vacate(here);
                break;
            }
            let falling = self.cell(above).letter;
            self.cell_mut(here).letter = falling;
        }
    }

    fn vacate(&mut self, pos: Position) {
        let cell = self.cell_mut(pos);
        cell.letter = VACANT;
        cell.status = CellStatus::Used;
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.letters() {
            for (col, letter) in row.iter().enumerate() {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", letter)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Availability of the eight neighbor slots for a cell at `pos`, `Edge`
/// wherever the neighbor would fall outside the box.
fn neighbor_slots(pos: Position, side: usize) -> [CellStatus; 8] {
    let mut slots = [CellStatus::Available; 8];
    for (slot, dir) in slots.iter_mut().zip(Direction::ALL) {
        let (dr, dc) = dir.offset();
        let row = pos.row as isize + dr;
        let col = pos.col as isize + dc;
        if row < 0 || row >= side as isize || col < 0 || col >= side as isize {
            *slot = CellStatus::Edge;
        }
    }
    slots
}
