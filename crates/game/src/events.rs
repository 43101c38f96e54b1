//! Real-time notifications sent to players.

use serde::Serialize;

use crate::{
    board::{Player, Position},
    state::Phase,
};

/// An event pushed to players over their live connection.
///
/// Events serialize into JSON objects whose `type` field names the event.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// Live connection was established.
    Connected { message: String },
    /// Second player has joined the game.
    OpponentJoined { message: String },
    /// Both players are present and the game has begun.
    #[serde(rename_all = "camelCase")]
    GameStarted { phase: Phase, current_player: Player },
    /// Opponent put a piece on the board.
    OpponentPlaced { x: i32, y: i32, player: Player },
    /// Opponent moved a piece.
    #[serde(rename_all = "camelCase")]
    OpponentMoved {
        from: Position,
        to: Position,
        captures: Vec<Position>,
        extra_turn: bool,
    },
    /// It is now the recipient's turn.
    YourTurn,
    /// Game entered a new phase.
    PhaseChanged { phase: Phase },
    /// Game has ended.
    GameOver { winner: Option<Player>, reason: String },
    /// Opponent left the game.
    OpponentLeft { message: String },
    /// Opponent wants to play again.
    RematchRequested { message: String },
    /// Both players agreed to play again and a new game has begun.
    #[serde(rename_all = "camelCase")]
    RematchStarted { phase: Phase, current_player: Player },
    /// Keep-alive probe.
    Ping,
    /// Response to a keep-alive probe.
    Pong,
}

/// Players to whom a notice is addressed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Target {
    /// All players connected to the game.
    Everyone,
    /// All players except the one holding this token.
    Except(String),
    /// Only the player holding this token.
    Only(String),
}

impl Target {
    /// Should a listener identified by `token` receive this notice?
    pub fn admits(&self, token: &str) -> bool {
        match self {
            Target::Everyone => true,
            Target::Except(excluded) => excluded != token,
            Target::Only(recipient) => recipient == token,
        }
    }
}

/// An event together with its recipients.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Notice {
    pub target: Target,
    pub event: GameEvent,
}

impl Notice {
    pub fn everyone(event: GameEvent) -> Notice {
        Notice { target: Target::Everyone, event }
    }

    pub fn except<T: Into<String>>(token: T, event: GameEvent) -> Notice {
        Notice { target: Target::Except(token.into()), event }
    }

    pub fn only<T: Into<String>>(token: T, event: GameEvent) -> Notice {
        Notice { target: Target::Only(token.into()), event }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn events_are_tagged_with_type() {
        assert_eq!(serde_json::to_value(&GameEvent::YourTurn).unwrap(),
            json!({ "type": "your_turn" }));

        assert_eq!(
            serde_json::to_value(&GameEvent::GameStarted {
                phase: Phase::Placement,
                current_player: Player::Two,
            }).unwrap(),
            json!({ "type": "game_started", "phase": "placement", "currentPlayer": 2 }),
        );

        assert_eq!(
            serde_json::to_value(&GameEvent::OpponentMoved {
                from: Position::new(1, 1),
                to: Position::new(1, 2),
                captures: vec![Position::new(2, 2)],
                extra_turn: false,
            }).unwrap(),
            json!({
                "type": "opponent_moved",
                "from": { "x": 1, "y": 1 },
                "to": { "x": 1, "y": 2 },
                "captures": [{ "x": 2, "y": 2 }],
                "extraTurn": false,
            }),
        );
    }

    #[test]
    fn targets() {
        assert!(Target::Everyone.admits("a"));
        assert!(!Target::Except("a".into()).admits("a"));
        assert!(Target::Except("a".into()).admits("b"));
        assert!(Target::Only("a".into()).admits("a"));
        assert!(!Target::Only("a".into()).admits("b"));
    }
}
