//! Movement phase: players take turns moving a piece one cell orthogonally.

use crate::{
    board::{Board, Player, Position},
    errors::RuleViolation,
    state::{GameState, Phase},
};

/// Check whether `player` may move a piece from `from` to `to`.
pub fn can_move(state: &GameState, from: Position, to: Position, player: Player)
-> Result<(), RuleViolation> {
    if state.phase != Phase::Movement {
        return Err(RuleViolation::NotMovementPhase);
    }

    if state.current != player {
        return Err(RuleViolation::NotYourTurn);
    }

    if !state.board.contains(from) {
        return Err(RuleViolation::InvalidOrigin);
    }

    if !state.board.contains(to) {
        return Err(RuleViolation::InvalidDestination);
    }

    if state.board.get(from) != Some(player) {
        return Err(RuleViolation::NotYourPiece);
    }

    if !state.board.is_empty(to) {
        return Err(RuleViolation::DestinationOccupied);
    }

    if !from.is_step_to(to) {
        return Err(RuleViolation::NotOrthogonalStep);
    }

    // While a capture chain is pending only the capturing piece may move.
    if let Some(chain) = state.chain_piece {
        if chain != from {
            return Err(RuleViolation::ChainPending(chain));
        }
    }

    Ok(())
}

/// Move the piece at `from` to `to`.
///
/// This function doesn't validate the action, use [`can_move`] first.
pub fn move_piece(state: &mut GameState, from: Position, to: Position) {
    let piece = state.board.get(from);
    state.board.set(from, None);
    state.board.set(to, piece);
}

/// Cells to which the piece at `pos` can move.
pub fn moves_for(state: &GameState, pos: Position) -> Vec<Position> {
    if state.phase != Phase::Movement || state.board.get(pos).is_none() {
        return Vec::new();
    }

    state.board.neighbours(pos)
        .filter(|&to| state.board.is_empty(to))
        .collect()
}

/// All moves available to `player`, grouped by the piece being moved.
///
/// Pieces without any moves are omitted. While a capture chain is pending
/// only the chain piece is considered.
pub fn all_moves(state: &GameState, player: Player) -> Vec<(Position, Vec<Position>)> {
    if state.phase != Phase::Movement {
        return Vec::new();
    }

    if let Some(chain) = state.chain_piece {
        let moves = moves_for(state, chain);
        return if moves.is_empty() { Vec::new() } else { vec![(chain, moves)] };
    }

    Board::positions()
        .filter(|&pos| state.board.get(pos) == Some(player))
        .map(|pos| (pos, moves_for(state, pos)))
        .filter(|(_, moves)| !moves.is_empty())
        .collect()
}
