//! The Seega board.
//!
//! Positions are `(x, y)` pairs where `x` is the column and `y` is the row,
//! both in range `0..SIZE`. The centre cell is the refuge: pieces can't be
//! placed on it, and pieces standing on it can't be captured.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Length of a side of the board.
pub const SIZE: i32 = 5;

/// The central cell.
pub const REFUGE: Position = Position { x: 2, y: 2 };

/// Orthogonal steps, in the order in which neighbours are visited.
pub(crate) const STEPS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// One of the two players.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Player {
    One = 1,
    Two = 2,
}

impl Player {
    /// Both players, in seat order.
    pub const ALL: [Player; 2] = [Player::One, Player::Two];

    /// Number of this player as seen by clients (1 or 2).
    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Index of this player's seat.
    pub(crate) fn index(self) -> usize {
        self as usize - 1
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl Serialize for Player {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.number())
    }
}

/// A cell on the board.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Position {
        Position { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Position {
        Position::new(self.x + dx, self.y + dy)
    }

    /// Is `other` exactly one orthogonal step away from this position?
    pub fn is_step_to(self, other: Position) -> bool {
        let dx = (other.x - self.x).abs();
        let dy = (other.y - self.y).abs();
        dx + dy == 1
    }

    /// Coordinates as a pair, the form in which clients expect chain pieces.
    pub fn pair(self) -> (i32, i32) {
        (self.x, self.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// State of all cells. `None` marks an empty cell.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Board {
    cells: [[Option<Player>; SIZE as usize]; SIZE as usize],
}

impl Board {
    pub fn new() -> Board {
        Board::default()
    }

    /// Is `pos` within the board?
    pub fn contains(&self, pos: Position) -> bool {
        0 <= pos.x && pos.x < SIZE && 0 <= pos.y && pos.y < SIZE
    }

    /// Owner of the piece at `pos`, if any. Positions outside the board are
    /// reported as empty.
    pub fn get(&self, pos: Position) -> Option<Player> {
        if self.contains(pos) {
            self.cells[pos.y as usize][pos.x as usize]
        } else {
            None
        }
    }

    /// Put or remove a piece.
    ///
    /// ## Panics
    ///
    /// This method will panic if `pos` is outside the board.
    pub fn set(&mut self, pos: Position, piece: Option<Player>) {
        assert!(self.contains(pos), "position {} is outside the board", pos);
        self.cells[pos.y as usize][pos.x as usize] = piece;
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        self.contains(pos) && self.get(pos).is_none()
    }

    pub fn is_refuge(&self, pos: Position) -> bool {
        pos == REFUGE
    }

    /// In-bounds orthogonal neighbours of `pos`.
    pub fn neighbours(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        STEPS.iter()
            .map(move |&(dx, dy)| pos.offset(dx, dy))
            .filter(move |&p| self.contains(p))
    }

    /// All positions of the board, row by row.
    pub fn positions() -> impl Iterator<Item = Position> {
        (0..SIZE).flat_map(|y| (0..SIZE).map(move |x| Position::new(x, y)))
    }

    /// Number of pieces `player` has on the board.
    pub fn count(&self, player: Player) -> usize {
        Board::positions()
            .filter(|&pos| self.get(pos) == Some(player))
            .count()
    }

    /// Rows of cell values: `0` for an empty cell, otherwise the owner's
    /// number.
    pub fn rows(&self) -> Vec<Vec<u8>> {
        self.cells.iter()
            .map(|row| row.iter()
                .map(|cell| cell.map_or(0, Player::number))
                .collect())
            .collect()
    }
}

impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.rows().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds() {
        let board = Board::new();
        assert!(board.contains(Position::new(0, 0)));
        assert!(board.contains(Position::new(4, 4)));
        assert!(!board.contains(Position::new(5, 0)));
        assert!(!board.contains(Position::new(0, -1)));
        assert!(!board.is_empty(Position::new(-1, 2)));
    }

    #[test]
    fn neighbours_stay_on_board() {
        let board = Board::new();
        let corner = board.neighbours(Position::new(0, 0)).collect::<Vec<_>>();
        assert_eq!(corner, vec![Position::new(0, 1), Position::new(1, 0)]);
        assert_eq!(board.neighbours(REFUGE).count(), 4);
    }

    #[test]
    fn rows_are_indexed_by_y() {
        let mut board = Board::new();
        board.set(Position::new(3, 1), Some(Player::Two));
        board.set(Position::new(0, 4), Some(Player::One));

        let rows = board.rows();
        assert_eq!(rows[1][3], 2);
        assert_eq!(rows[4][0], 1);
        assert_eq!(board.count(Player::Two), 1);
        assert_eq!(serde_json::to_value(&board).unwrap()[1][3], 2);
    }

    #[test]
    fn steps() {
        let origin = Position::new(2, 3);
        assert!(origin.is_step_to(Position::new(2, 4)));
        assert!(origin.is_step_to(Position::new(1, 3)));
        assert!(!origin.is_step_to(Position::new(3, 4)));
        assert!(!origin.is_step_to(Position::new(2, 1)));
        assert!(!origin.is_step_to(origin));
    }
}
