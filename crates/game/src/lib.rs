//! Seega: a two-player strategy game played on a 5×5 board.
//!
//! Players first take turns placing pieces, then moving them one cell at
//! a time, capturing opponent's pieces by sandwiching them.

pub mod board;
pub mod events;
pub mod repository;
pub mod rules;
pub mod service;
pub mod state;
pub mod view;

mod config;
mod errors;

pub use self::{
    board::{Board, Player, Position},
    config::Config,
    errors::{GameError, RuleViolation},
    events::{GameEvent, Notice, Target},
    repository::{GameRepository, InMemoryRepository},
    service::{GameService, Outcome},
    state::{GameState, Phase, Status},
    view::{
        ActionResponse,
        ActionResult,
        GameView,
        LeaveReport,
        RematchReport,
        SeatInfo,
        ValidActions,
    },
};
