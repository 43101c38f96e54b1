//! Custodian captures.
//!
//! A piece is captured when, after a move, it is sandwiched orthogonally
//! between the moved piece and another piece of the mover. Pieces standing
//! on the refuge can't be captured.

use crate::{
    board::{Board, Player, Position},
    state::GameState,
};

/// Directions in which captures are looked for.
const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Pieces captured by `player`'s piece which has just arrived at `pos`.
pub fn captures(board: &Board, pos: Position, player: Player) -> Vec<Position> {
    let opponent = player.opponent();

    DIRECTIONS.iter()
        .filter_map(|&(dx, dy)| {
            let enemy = pos.offset(dx, dy);
            let support = pos.offset(2 * dx, 2 * dy);

            if board.get(enemy) == Some(opponent)
            && !board.is_refuge(enemy)
            && board.get(support) == Some(player) {
                Some(enemy)
            } else {
                None
            }
        })
        .collect()
}

/// Remove captured pieces from the board.
pub fn apply(state: &mut GameState, captured: &[Position]) {
    for &pos in captured {
        if let Some(owner) = state.board.get(pos) {
            state.board.set(pos, None);
            state.pieces[owner.index()] -= 1;
        }
    }
}

/// Can the piece of `player` at `pos` capture again with its next move?
pub fn has_chain(board: &Board, pos: Position, player: Player) -> bool {
    board.neighbours(pos)
        .filter(|&to| board.is_empty(to))
        .any(|to| {
            let mut after = *board;
            after.set(pos, None);
            after.set(to, Some(player));
            !captures(&after, to, player).is_empty()
        })
}
