//! 3×3 tic-tac-toe board, the concrete [`GameState`] domain shipped with
//! the adversarial engine. Game-loop, rendering and input concerns live
//! with the caller, not here.

use crate::adversarial::{GameState, Outcome};

pub const SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    /// Mark of the maximizing player.
    Max,
    /// Mark of the minimizing player.
    Min,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
/// A move: the coordinate of an empty cell.
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

/// The eight winning lines, as cell coordinates.
const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// An immutable board value; every move produces a new one.
pub struct Board {
    cells: [[Cell; SIZE]; SIZE],
    max_to_move: bool,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Empty board, maximizer to move.
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; SIZE]; SIZE],
            max_to_move: true,
        }
    }

    /// Board from explicit cells and side to move (test/mid-game setup).
    pub fn from_cells(cells: [[Cell; SIZE]; SIZE], max_to_move: bool) -> Self {
        Self { cells, max_to_move }
    }

    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    pub fn maximizer_to_move(&self) -> bool {
        self.max_to_move
    }

    pub fn is_full(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|c| *c != Cell::Empty))
    }

    /// The mark owning a completed line, if any.
    pub fn winner(&self) -> Option<Cell> {
        for line in &LINES {
            let first = self.cells[line[0].0][line[0].1];
            if first != Cell::Empty && line.iter().all(|&(r, c)| self.cells[r][c] == first) {
                return Some(first);
            }
        }
        None
    }
}

impl GameState for Board {
    type Move = Coord;

    /// Empty cells in row-major order (the documented tie-break order).
    fn legal_moves(&self) -> Vec<Coord> {
        if self.winner().is_some() {
            return Vec::new();
        }
        let mut moves = Vec::new();
        for row in 0..SIZE {
            for col in 0..SIZE {
                if self.cells[row][col] == Cell::Empty {
                    moves.push(Coord { row, col });
                }
            }
        }
        moves
    }

    fn apply(&self, mv: Coord) -> Self {
        debug_assert_eq!(self.cells[mv.row][mv.col], Cell::Empty);
        let mut next = *self;
        next.cells[mv.row][mv.col] = if self.max_to_move { Cell::Max } else { Cell::Min };
        next.max_to_move = !self.max_to_move;
        next
    }

    fn outcome(&self) -> Option<Outcome> {
        match self.winner() {
            Some(Cell::Max) => Some(Outcome::MaxWins),
            Some(Cell::Min) => Some(Outcome::MinWins),
            _ if self.is_full() => Some(Outcome::Draw),
            _ => None,
        }
    }
}
