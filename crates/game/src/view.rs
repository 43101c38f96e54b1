//! Public representations of game data, as sent to clients.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::{
    board::{Board, Player, Position},
    state::{GameState, Phase, Status},
};

/// State of a game as seen by one of its players.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    pub game_id: String,
    pub board: Board,
    pub phase: Phase,
    pub status: Status,
    pub current_player: Player,
    pub your_player_number: Player,
    pub is_your_turn: bool,
    /// Pieces on board, keyed by player number.
    pub pieces_count: BTreeMap<u8, u8>,
    pub placement_remaining: u8,
    pub chain_capture_piece: Option<(i32, i32)>,
    pub winner: Option<Player>,
    pub game_over: bool,
}

impl GameState {
    /// Get public view of this game for `player`.
    pub fn view(&self, player: Player) -> GameView {
        GameView {
            game_id: self.id.clone(),
            board: self.board,
            phase: self.phase,
            status: self.status,
            current_player: self.current,
            your_player_number: player,
            is_your_turn: self.current == player,
            pieces_count: Player::ALL.iter()
                .map(|&p| (p.number(), self.pieces(p)))
                .collect(),
            placement_remaining: self.placement_remaining,
            chain_capture_piece: self.chain_piece.map(Position::pair),
            winner: self.winner,
            game_over: self.game_over,
        }
    }
}

/// Credentials of a seated player.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatInfo {
    pub game_id: String,
    pub player_token: String,
    pub player_number: Player,
    pub status: Status,
}

impl SeatInfo {
    pub(crate) fn new(state: &GameState, player: Player) -> SeatInfo {
        SeatInfo {
            game_id: state.id.clone(),
            player_token: state.token(player).unwrap_or_default().to_string(),
            player_number: player,
            status: state.status,
        }
    }
}

/// Result of placing or moving a piece.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResult {
    pub success: bool,
    pub captures: Vec<Position>,
    pub extra_turn: bool,
    pub phase_changed: bool,
    pub game_over: bool,
    pub winner: Option<Player>,
    pub message: String,
}

impl ActionResult {
    pub(crate) fn success(message: &str) -> ActionResult {
        ActionResult {
            success: true,
            message: message.to_string(),
            ..ActionResult::default()
        }
    }
}

/// Response to an action: the new state and what happened.
#[derive(Clone, Debug, Serialize)]
pub struct ActionResponse {
    pub state: GameView,
    pub result: ActionResult,
}

/// Result of leaving a game.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveReport {
    pub message: String,
    pub game_deleted: bool,
}

/// Result of asking for a rematch.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RematchReport {
    pub message: String,
    pub rematch_started: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_player: Option<Player>,
}

/// Actions a player can take right now.
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum ValidActions {
    Unavailable(Unavailable),
    Placement(PlacementActions),
    Movement(MovementActions),
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Unavailable {
    pub can_act: bool,
    pub reason: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementActions {
    pub can_act: bool,
    pub phase: Phase,
    pub valid_placements: Vec<Position>,
    pub remaining: u8,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementActions {
    pub can_act: bool,
    pub phase: Phase,
    /// Destinations keyed by origin formatted as `"x,y"`.
    pub valid_moves: BTreeMap<String, Vec<Position>>,
    pub chain_capture: Option<(i32, i32)>,
}

impl ValidActions {
    pub(crate) fn unavailable(reason: &str) -> ValidActions {
        ValidActions::Unavailable(Unavailable {
            can_act: false,
            reason: reason.to_string(),
        })
    }

    /// Can the player act at all?
    pub fn can_act(&self) -> bool {
        match self {
            ValidActions::Unavailable(_) => false,
            ValidActions::Placement(_) | ValidActions::Movement(_) => true,
        }
    }
}
