use serde::Serialize;
use std::fmt;

use crate::board::{Board, Player, Position};

/// Pieces a player places during one turn of the placement phase.
pub const PIECES_PER_TURN: u8 = 2;

/// Pieces placed in total before the movement phase begins.
pub const TOTAL_PIECES: u8 = 24;

/// A player left with fewer pieces than this loses.
pub const MIN_PIECES: u8 = 2;

/// Phase of a game.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Players take turns placing two pieces each.
    Placement,
    /// Players take turns moving pieces and capturing.
    Movement,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Placement => "placement",
            Phase::Movement => "movement",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a game session.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Waiting for the second player.
    Waiting,
    /// Both players are seated.
    Ready,
    /// Game is in progress.
    Playing,
    /// Game has ended.
    Finished,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Waiting => "waiting",
            Status::Ready => "ready",
            Status::Playing => "playing",
            Status::Finished => "finished",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A seated player.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Seat {
    /// Secret token authenticating this player.
    pub token: String,
}

/// Complete state of a single game.
#[derive(Clone, Debug)]
pub struct GameState {
    pub id: String,
    pub board: Board,
    pub phase: Phase,
    pub status: Status,
    /// Player whose turn it is.
    pub current: Player,
    /// Seats of player one and player two, `None` when vacant.
    pub seats: [Option<Seat>; 2],
    /// Pieces each player has on the board.
    pub pieces: [u8; 2],
    /// Pieces the current player has yet to place this turn.
    pub placement_remaining: u8,
    /// Piece which must be moved next to continue a capture chain.
    pub chain_piece: Option<Position>,
    pub winner: Option<Player>,
    pub game_over: bool,
    /// Pieces placed so far by both players.
    pub placed: u8,
    /// Which players asked for a rematch.
    pub rematch: [bool; 2],
}

impl GameState {
    /// Create a new game with only player one seated.
    pub fn new(id: String, token: String) -> GameState {
        GameState {
            id,
            board: Board::new(),
            phase: Phase::Placement,
            status: Status::Waiting,
            current: Player::One,
            seats: [Some(Seat { token }), None],
            pieces: [0, 0],
            placement_remaining: PIECES_PER_TURN,
            chain_piece: None,
            winner: None,
            game_over: false,
            placed: 0,
            rematch: [false, false],
        }
    }

    pub fn seat(&self, player: Player) -> Option<&Seat> {
        self.seats[player.index()].as_ref()
    }

    /// Token of a seated player.
    pub fn token(&self, player: Player) -> Option<&str> {
        self.seat(player).map(|seat| seat.token.as_str())
    }

    /// Find which player holds `token`.
    pub fn player_by_token(&self, token: &str) -> Option<Player> {
        Player::ALL.iter()
            .cloned()
            .find(|&player| self.token(player) == Some(token))
    }

    pub fn pieces(&self, player: Player) -> u8 {
        self.pieces[player.index()]
    }

    /// Pass the turn to the other player.
    pub fn switch_turn(&mut self) {
        self.current = self.current.opponent();

        if self.phase == Phase::Placement {
            self.placement_remaining = PIECES_PER_TURN;
        }
    }

    /// End this game in favour of `winner`.
    pub fn finish(&mut self, winner: Player) {
        self.winner = Some(winner);
        self.game_over = true;
        self.status = Status::Finished;
    }

    /// Start this game over, keeping both players seated.
    pub fn reset(&mut self, first: Player) {
        self.board = Board::new();
        self.phase = Phase::Placement;
        self.status = Status::Playing;
        self.current = first;
        self.pieces = [0, 0];
        self.placement_remaining = PIECES_PER_TURN;
        self.chain_piece = None;
        self.winner = None;
        self.game_over = false;
        self.placed = 0;
        self.rematch = [false, false];
    }
}
