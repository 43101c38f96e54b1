//! Placement phase: players take turns putting two pieces each on the board.

use crate::{
    board::{Board, Player, Position},
    errors::RuleViolation,
    state::{GameState, Phase, TOTAL_PIECES},
};

/// Check whether `player` may put a piece at `pos`.
pub fn can_place(state: &GameState, pos: Position, player: Player)
-> Result<(), RuleViolation> {
    if state.phase != Phase::Placement {
        return Err(RuleViolation::NotPlacementPhase);
    }

    if state.current != player {
        return Err(RuleViolation::NotYourTurn);
    }

    if state.placement_remaining == 0 {
        return Err(RuleViolation::NoPlacementsLeft);
    }

    if !state.board.contains(pos) {
        return Err(RuleViolation::OutsideBoard);
    }

    if !state.board.is_empty(pos) {
        return Err(RuleViolation::Occupied);
    }

    if state.board.is_refuge(pos) {
        return Err(RuleViolation::Refuge);
    }

    Ok(())
}

/// Put a piece of `player` at `pos`.
///
/// The turn passes once the player has placed all pieces for this turn. When
/// the last piece is placed the game enters the movement phase, in which
/// case this function returns `true`.
///
/// This function doesn't validate the action, use [`can_place`] first.
pub fn place(state: &mut GameState, pos: Position, player: Player) -> bool {
    state.board.set(pos, Some(player));
    state.pieces[player.index()] += 1;
    state.placed += 1;
    state.placement_remaining -= 1;

    if state.placement_remaining == 0 {
        state.switch_turn();
    }

    if state.placed >= TOTAL_PIECES {
        state.phase = Phase::Movement;
        state.chain_piece = None;
        return true;
    }

    false
}

/// All cells on which a piece can currently be placed.
pub fn valid_placements(state: &GameState) -> Vec<Position> {
    if state.phase != Phase::Placement {
        return Vec::new();
    }

    Board::positions()
        .filter(|&pos| state.board.is_empty(pos) && !state.board.is_refuge(pos))
        .collect()
}
