//! End of game conditions.

use std::fmt;

use crate::{
    board::Player,
    state::{GameState, MIN_PIECES, Phase},
};
use super::movement;

/// Why a game ended.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Reason {
    /// `loser` was left with fewer than [`MIN_PIECES`] pieces.
    TooFewPieces { loser: Player },
    /// `blocked` could not move on their turn. When both players have
    /// the same number of pieces `tie` is set and the other player wins.
    Blocked { blocked: Player, winner: Player, tie: bool },
    /// The other player left the game.
    Abandoned,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Reason::TooFewPieces { loser } =>
                write!(f, "Player {} has fewer than {} pieces", loser, MIN_PIECES),
            Reason::Blocked { blocked, tie: true, .. } =>
                write!(f, "Player {} is blocked, tie in pieces", blocked),
            Reason::Blocked { blocked, winner, tie: false } =>
                write!(f, "Player {} is blocked, player {} has more pieces",
                    blocked, winner),
            Reason::Abandoned => f.write_str("Your opponent left the game"),
        }
    }
}

/// Outcome of a finished game.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Victory {
    pub winner: Player,
    pub reason: Reason,
}

/// Check whether the game has been won.
///
/// Victory is only possible during the movement phase. A player with fewer
/// than two pieces loses. If the player to move has no legal moves the player
/// with more pieces wins, or the other player on a tie.
pub fn check(state: &GameState) -> Option<Victory> {
    if state.phase != Phase::Movement {
        return None;
    }

    for &player in &Player::ALL {
        if state.pieces(player) < MIN_PIECES {
            return Some(Victory {
                winner: player.opponent(),
                reason: Reason::TooFewPieces { loser: player },
            });
        }
    }

    if !is_stalemate(state, state.current) {
        return None;
    }

    let blocked = state.current;
    let ours = state.pieces(Player::One);
    let theirs = state.pieces(Player::Two);

    let (winner, tie) = if ours > theirs {
        (Player::One, false)
    } else if theirs > ours {
        (Player::Two, false)
    } else {
        (blocked.opponent(), true)
    };

    Some(Victory {
        winner,
        reason: Reason::Blocked { blocked, winner, tie },
    })
}

/// Does `player` have no legal moves?
pub fn is_stalemate(state: &GameState, player: Player) -> bool {
    state.phase == Phase::Movement && movement::all_moves(state, player).is_empty()
}

#[cfg(test)]
mod tests {
    use crate::board::{Board, Position};
    use super::*;

    fn game(pieces: &[((i32, i32), Player)]) -> GameState {
        let mut state = GameState::new("GAME0001".into(), "one".into());
        state.phase = Phase::Movement;
        for &((x, y), player) in pieces {
            state.board.set(Position::new(x, y), Some(player));
        }
        state.pieces = [
            state.board.count(Player::One) as u8,
            state.board.count(Player::Two) as u8,
        ];
        state
    }

    #[test]
    fn no_victory_during_placement() {
        let mut state = game(&[((0, 0), Player::One)]);
        state.phase = Phase::Placement;
        assert_eq!(check(&state), None);
    }

    #[test]
    fn too_few_pieces_loses() {
        let state = game(&[
            ((0, 0), Player::One),
            ((4, 4), Player::Two),
            ((3, 4), Player::Two),
        ]);

        let victory = check(&state).unwrap();
        assert_eq!(victory.winner, Player::Two);
        assert_eq!(victory.reason, Reason::TooFewPieces { loser: Player::One });
    }

    #[test]
    fn blocked_player_with_fewer_pieces_loses() {
        // Player one's pieces in the corner are walled in by player two.
        let state = game(&[
            ((0, 0), Player::One),
            ((1, 0), Player::One),
            ((0, 1), Player::Two),
            ((1, 1), Player::Two),
            ((2, 0), Player::Two),
        ]);

        assert!(is_stalemate(&state, Player::One));
        let victory = check(&state).unwrap();
        assert_eq!(victory.winner, Player::Two);
        assert_eq!(victory.reason, Reason::Blocked {
            blocked: Player::One,
            winner: Player::Two,
            tie: false,
        });
    }

    #[test]
    fn tie_favours_the_player_who_can_move() {
        // A full board leaves nobody any moves; piece counts are equal.
        let mut state = game(&[((0, 0), Player::One)]);
        for pos in Board::positions() {
            if state.board.get(pos).is_none() {
                state.board.set(pos, Some(Player::Two));
            }
        }
        state.pieces = [12, 12];

        let victory = check(&state).unwrap();
        assert_eq!(victory.winner, Player::Two);
        assert_eq!(victory.reason, Reason::Blocked {
            blocked: Player::One,
            winner: Player::Two,
            tie: true,
        });
    }

    #[test]
    fn free_player_keeps_playing() {
        let state = game(&[
            ((0, 0), Player::One),
            ((4, 0), Player::One),
            ((0, 4), Player::Two),
            ((4, 4), Player::Two),
        ]);

        assert_eq!(check(&state), None);
    }
}
