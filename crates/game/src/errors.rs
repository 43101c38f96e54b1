use actix_web::http::StatusCode;
use failure::Fail;
use seega_error::ApiError;
use std::borrow::Cow;

use crate::board::Position;

/// An action which the rules of Seega don't allow.
#[derive(Debug, Fail)]
pub enum RuleViolation {
    #[fail(display = "The game is not in progress")]
    NotPlaying,
    #[fail(display = "Not in the placement phase")]
    NotPlacementPhase,
    #[fail(display = "Not in the movement phase")]
    NotMovementPhase,
    #[fail(display = "It is not your turn")]
    NotYourTurn,
    #[fail(display = "You have already placed all your pieces this turn")]
    NoPlacementsLeft,
    #[fail(display = "Position is outside the board")]
    OutsideBoard,
    #[fail(display = "The cell is already occupied")]
    Occupied,
    #[fail(display = "Pieces can't be placed on the central refuge")]
    Refuge,
    #[fail(display = "Invalid origin position")]
    InvalidOrigin,
    #[fail(display = "Invalid destination position")]
    InvalidDestination,
    #[fail(display = "That is not your piece")]
    NotYourPiece,
    #[fail(display = "The destination is not empty")]
    DestinationOccupied,
    #[fail(display = "You can only move one cell in an orthogonal direction")]
    NotOrthogonalStep,
    #[fail(display = "You must keep moving the piece at {}", _0)]
    ChainPending(Position),
}

impl ApiError for RuleViolation {
    fn status(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn code(&self) -> Option<Cow<str>> {
        let code = match self {
            RuleViolation::NotPlaying => "rule:not-playing",
            RuleViolation::NotPlacementPhase => "rule:not-placement-phase",
            RuleViolation::NotMovementPhase => "rule:not-movement-phase",
            RuleViolation::NotYourTurn => "rule:not-your-turn",
            RuleViolation::NoPlacementsLeft => "rule:no-placements-left",
            RuleViolation::OutsideBoard => "rule:outside-board",
            RuleViolation::Occupied => "rule:occupied",
            RuleViolation::Refuge => "rule:refuge",
            RuleViolation::InvalidOrigin => "rule:invalid-origin",
            RuleViolation::InvalidDestination => "rule:invalid-destination",
            RuleViolation::NotYourPiece => "rule:not-your-piece",
            RuleViolation::DestinationOccupied => "rule:destination-occupied",
            RuleViolation::NotOrthogonalStep => "rule:not-orthogonal-step",
            RuleViolation::ChainPending(_) => "rule:chain-pending",
        };
        Some(Cow::Borrowed(code))
    }
}

/// Errors reported by [`crate::GameService`].
#[derive(Debug, Fail)]
pub enum GameError {
    #[fail(display = "Game not found")]
    NotFound,
    #[fail(display = "Invalid token for this game")]
    InvalidToken,
    #[fail(display = "The game is already full or finished")]
    Full,
    #[fail(display = "The game has not finished yet")]
    NotFinished,
    #[fail(display = "Your opponent has left the game")]
    OpponentGone,
    #[fail(display = "{}", _0)]
    Rule(#[cause] RuleViolation),
}

impl From<RuleViolation> for GameError {
    fn from(violation: RuleViolation) -> Self {
        GameError::Rule(violation)
    }
}

impl ApiError for GameError {
    fn status(&self) -> StatusCode {
        match self {
            GameError::NotFound => StatusCode::NOT_FOUND,
            GameError::InvalidToken => StatusCode::FORBIDDEN,
            GameError::Full
            | GameError::NotFinished
            | GameError::OpponentGone => StatusCode::BAD_REQUEST,
            GameError::Rule(err) => err.status(),
        }
    }

    fn code(&self) -> Option<Cow<str>> {
        match self {
            GameError::NotFound => Some("game:not-found".into()),
            GameError::InvalidToken => Some("game:invalid-token".into()),
            GameError::Full => Some("game:full".into()),
            GameError::NotFinished => Some("game:not-finished".into()),
            GameError::OpponentGone => Some("game:opponent-gone".into()),
            GameError::Rule(err) => err.code(),
        }
    }
}
