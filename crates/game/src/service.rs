//! Game sessions: seating players, enforcing rules, and deciding who should
//! be notified of what.

use log::{debug, info};
use std::{sync::{Arc, Mutex, MutexGuard, PoisonError}, time::Duration};
use uuid::Uuid;

use crate::{
    Config,
    board::{Player, Position},
    errors::{GameError, RuleViolation},
    events::{GameEvent, Notice},
    repository::{GameRepository, InMemoryRepository},
    rules::{capture, movement, placement, victory::{self, Victory, Reason}},
    state::{GameState, Phase, Seat, Status},
    view::{
        ActionResponse,
        ActionResult,
        GameView,
        LeaveReport,
        MovementActions,
        PlacementActions,
        RematchReport,
        SeatInfo,
        ValidActions,
    },
};

/// Result of an operation together with notifications it produced.
///
/// Notices are not delivered by the service itself; the caller is expected
/// to forward them to connected players.
#[derive(Debug)]
pub struct Outcome<T> {
    pub value: T,
    pub notices: Vec<Notice>,
    /// When set, the start of the game should be announced (see
    /// [`GameService::start_announcement`]) after this delay.
    pub announce_after: Option<Duration>,
}

impl<T> Outcome<T> {
    fn new(value: T, notices: Vec<Notice>) -> Outcome<T> {
        Outcome { value, notices, announce_after: None }
    }

    fn quiet(value: T) -> Outcome<T> {
        Outcome::new(value, Vec::new())
    }
}

/// Orchestrates game sessions.
///
/// This type is cheap to clone; clones share the same games.
#[derive(Clone)]
pub struct GameService {
    repo: Arc<dyn GameRepository>,
    /// Serialises operations which modify games.
    lock: Arc<Mutex<()>>,
    config: Config,
}

impl GameService {
    pub fn new(repo: Arc<dyn GameRepository>, config: Config) -> GameService {
        GameService {
            repo,
            lock: Arc::new(Mutex::new(())),
            config,
        }
    }

    /// Create a service storing games in memory.
    pub fn in_memory(config: Config) -> GameService {
        GameService::new(Arc::new(InMemoryRepository::new()), config)
    }

    pub fn repository(&self) -> &dyn GameRepository {
        &*self.repo
    }

    /// Create a new game and seat its first player.
    pub fn create_game(&self) -> SeatInfo {
        let _guard = self.guard();

        let id = loop {
            let id = new_game_id();
            if !self.repo.contains(&id) {
                break id;
            }
        };

        let state = GameState::new(id, new_token());
        let seat = SeatInfo::new(&state, Player::One);
        self.repo.save(state);

        info!("Created game {} ({} active)", seat.game_id, self.repo.count());

        seat
    }

    /// Join a game as its second player.
    ///
    /// If `token` belongs to a player already seated in this game their seat
    /// is returned instead, letting clients recover a lost session.
    pub fn join_game(&self, id: &str, token: Option<&str>)
    -> Result<Outcome<SeatInfo>, GameError> {
        let _guard = self.guard();
        let mut state = self.find(id)?;

        if let Some(player) = token.and_then(|token| state.player_by_token(token)) {
            debug!("Player {} rejoined game {}", player, id);
            return Ok(Outcome::quiet(SeatInfo::new(&state, player)));
        }

        if state.status != Status::Waiting {
            return Err(GameError::Full);
        }

        let token = new_token();
        state.seats[Player::Two.index()] = Some(Seat { token: token.clone() });
        state.status = Status::Playing;
        state.current = random_player();

        let seat = SeatInfo::new(&state, Player::Two);
        self.repo.save(state);

        info!("Player 2 joined game {}", id);

        let mut outcome = Outcome::new(seat, vec![
            Notice::except(token, GameEvent::OpponentJoined {
                message: "Your opponent has joined".to_string(),
            }),
        ]);
        outcome.announce_after = Some(self.config.start_announce_delay());

        Ok(outcome)
    }

    /// Recover the seat of a player.
    pub fn reconnect_game(&self, id: &str, token: &str) -> Result<SeatInfo, GameError> {
        let state = self.find(id)?;
        let player = seated(&state, token)?;
        Ok(SeatInfo::new(&state, player))
    }

    /// Find which player in game `id` holds `token`.
    pub fn seat_of(&self, id: &str, token: &str) -> Result<Player, GameError> {
        let state = self.find(id)?;
        seated(&state, token)
    }

    /// Get the state of a game as seen by the player holding `token`.
    pub fn game_state(&self, id: &str, token: &str) -> Result<GameView, GameError> {
        let state = self.find(id)?;
        let player = seated(&state, token)?;
        Ok(state.view(player))
    }

    /// Place a piece during the placement phase.
    pub fn place_piece(&self, id: &str, token: &str, pos: Position)
    -> Result<Outcome<ActionResponse>, GameError> {
        let _guard = self.guard();
        let mut state = self.find(id)?;
        let player = seated(&state, token)?;

        ensure_playing(&state)?;
        placement::can_place(&state, pos, player)?;

        let phase_changed = placement::place(&mut state, pos, player);

        let mut result = ActionResult::success("Piece placed");
        result.phase_changed = phase_changed;

        let mut notices = vec![Notice::except(token, GameEvent::OpponentPlaced {
            x: pos.x,
            y: pos.y,
            player,
        })];

        if phase_changed {
            info!("Game {} entered the movement phase", id);
            notices.push(Notice::everyone(GameEvent::PhaseChanged {
                phase: Phase::Movement,
            }));

            // The player to move first may already be walled in.
            if let Some(victory) = victory::check(&state) {
                conclude(&mut state, &mut result, &mut notices, victory);
            }
        } else if state.current != player {
            notify_turn(&state, &mut notices);
        }

        self.repo.save(state.clone());

        Ok(Outcome::new(ActionResponse {
            state: state.view(player),
            result,
        }, notices))
    }

    /// Move a piece during the movement phase, capturing opponent's pieces.
    pub fn move_piece(&self, id: &str, token: &str, from: Position, to: Position)
    -> Result<Outcome<ActionResponse>, GameError> {
        let _guard = self.guard();
        let mut state = self.find(id)?;
        let player = seated(&state, token)?;

        ensure_playing(&state)?;
        movement::can_move(&state, from, to, player)?;
        movement::move_piece(&mut state, from, to);

        let captured = capture::captures(&state.board, to, player);
        let mut result = ActionResult::success("Piece moved");

        if !captured.is_empty() {
            capture::apply(&mut state, &captured);
            debug!("Player {} captured {} piece(s) in game {}",
                player, captured.len(), id);
        }

        if !captured.is_empty() && capture::has_chain(&state.board, to, player) {
            // The same piece moves again.
            result.extra_turn = true;
            state.chain_piece = Some(to);
        } else {
            state.chain_piece = None;
            state.switch_turn();
        }

        result.captures = captured.clone();

        let mut notices = vec![Notice::except(token, GameEvent::OpponentMoved {
            from,
            to,
            captures: captured,
            extra_turn: result.extra_turn,
        })];

        if let Some(victory) = victory::check(&state) {
            conclude(&mut state, &mut result, &mut notices, victory);
        } else if !result.extra_turn {
            notify_turn(&state, &mut notices);
        }

        self.repo.save(state.clone());

        Ok(Outcome::new(ActionResponse {
            state: state.view(player),
            result,
        }, notices))
    }

    /// List actions available to the player holding `token`.
    pub fn valid_actions(&self, id: &str, token: &str) -> Result<ValidActions, GameError> {
        let state = self.find(id)?;
        let player = seated(&state, token)?;

        if state.status != Status::Playing {
            return Ok(ValidActions::unavailable("The game is not in progress"));
        }

        if state.current != player {
            return Ok(ValidActions::unavailable("It is not your turn"));
        }

        Ok(match state.phase {
            Phase::Placement => ValidActions::Placement(PlacementActions {
                can_act: true,
                phase: Phase::Placement,
                valid_placements: placement::valid_placements(&state),
                remaining: state.placement_remaining,
            }),
            Phase::Movement => ValidActions::Movement(MovementActions {
                can_act: true,
                phase: Phase::Movement,
                valid_moves: movement::all_moves(&state, player)
                    .into_iter()
                    .map(|(from, to)| (format!("{},{}", from.x, from.y), to))
                    .collect(),
                chain_capture: state.chain_piece.map(Position::pair),
            }),
        })
    }

    /// Leave a game.
    ///
    /// The remaining player wins. Once both players have left the game
    /// is deleted.
    pub fn leave_game(&self, id: &str, token: &str)
    -> Result<Outcome<LeaveReport>, GameError> {
        let _guard = self.guard();
        let mut state = self.find(id)?;
        let player = seated(&state, token)?;
        let opponent = state.token(player.opponent()).map(str::to_string);

        state.seats[player.index()] = None;

        let mut notices = Vec::new();

        if let Some(ref opponent) = opponent {
            notices.push(Notice::only(opponent.as_str(), GameEvent::OpponentLeft {
                message: "Your opponent left the game".to_string(),
            }));
        }

        let opponent = match opponent {
            Some(opponent) => opponent,
            None => {
                self.repo.delete(id);
                info!("Game {} deleted, all players left", id);

                return Ok(Outcome::new(LeaveReport {
                    message: "Game deleted (both players left)".to_string(),
                    game_deleted: true,
                }, notices));
            }
        };

        if state.game_over {
            // The result stands; only the seat is released.
            state.status = Status::Finished;
        } else {
            state.finish(player.opponent());
            notices.push(Notice::only(opponent, GameEvent::GameOver {
                winner: state.winner,
                reason: Reason::Abandoned.to_string(),
            }));
        }

        self.repo.save(state);
        info!("Player {} left game {}", player, id);

        Ok(Outcome::new(LeaveReport {
            message: "You have left the game".to_string(),
            game_deleted: false,
        }, notices))
    }

    /// Ask for a rematch. The game restarts once both players asked.
    pub fn rematch_game(&self, id: &str, token: &str)
    -> Result<Outcome<RematchReport>, GameError> {
        let _guard = self.guard();
        let mut state = self.find(id)?;

        if !state.game_over {
            return Err(GameError::NotFinished);
        }

        let player = seated(&state, token)?;
        let opponent = state.token(player.opponent())
            .map(str::to_string)
            .ok_or(GameError::OpponentGone)?;

        state.rematch[player.index()] = true;

        if state.rematch.iter().all(|&asked| asked) {
            let first = random_player();
            state.reset(first);
            self.repo.save(state);

            info!("Rematch started in game {}", id);

            return Ok(Outcome::new(RematchReport {
                message: "Rematch started".to_string(),
                rematch_started: true,
                current_player: Some(first),
            }, vec![Notice::everyone(GameEvent::RematchStarted {
                phase: Phase::Placement,
                current_player: first,
            })]));
        }

        self.repo.save(state);

        Ok(Outcome::new(RematchReport {
            message: "Waiting for your opponent to accept".to_string(),
            rematch_started: false,
            current_player: None,
        }, vec![Notice::only(opponent, GameEvent::RematchRequested {
            message: "Your opponent wants to play again".to_string(),
        })]))
    }

    /// Announcement of the start of game `id`, if it is in progress.
    pub fn start_announcement(&self, id: &str) -> Option<Notice> {
        let state = self.repo.get(id)?;

        if state.status != Status::Playing {
            return None;
        }

        Some(Notice::everyone(GameEvent::GameStarted {
            phase: state.phase,
            current_player: state.current,
        }))
    }

    fn find(&self, id: &str) -> Result<GameState, GameError> {
        self.repo.get(id).ok_or(GameError::NotFound)
    }

    fn guard(&self) -> MutexGuard<()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Find which player holds `token`.
fn seated(state: &GameState, token: &str) -> Result<Player, GameError> {
    state.player_by_token(token).ok_or(GameError::InvalidToken)
}

fn ensure_playing(state: &GameState) -> Result<(), RuleViolation> {
    if state.status == Status::Playing {
        Ok(())
    } else {
        Err(RuleViolation::NotPlaying)
    }
}

/// Tell the player whose turn it is now.
fn notify_turn(state: &GameState, notices: &mut Vec<Notice>) {
    if let Some(token) = state.token(state.current) {
        notices.push(Notice::only(token, GameEvent::YourTurn));
    }
}

/// Finish a game and announce the winner.
fn conclude(
    state: &mut GameState,
    result: &mut ActionResult,
    notices: &mut Vec<Notice>,
    victory: Victory,
) {
    let Victory { winner, reason } = victory;
    let reason = reason.to_string();

    info!("Game {} won by player {}: {}", state.id, winner, reason);

    state.finish(winner);

    result.game_over = true;
    result.winner = Some(winner);
    result.message = reason.clone();

    notices.push(Notice::everyone(GameEvent::GameOver {
        winner: Some(winner),
        reason,
    }));
}

/// Short, human-friendly game code.
fn new_game_id() -> String {
    Uuid::new_v4().to_simple().to_string()[..8].to_uppercase()
}

fn new_token() -> String {
    Uuid::new_v4().to_simple().to_string()
}

fn random_player() -> Player {
    if rand::random() {
        Player::One
    } else {
        Player::Two
    }
}

#[cfg(test)]
mod tests {
    use crate::{board::REFUGE, events::Target};
    use super::*;

    struct Match {
        service: GameService,
        id: String,
        tokens: [String; 2],
    }

    impl Match {
        fn start() -> Match {
            let service = GameService::in_memory(Config::default());
            let first = service.create_game();
            let second = service.join_game(&first.game_id, None).unwrap().value;

            Match {
                service,
                id: first.game_id,
                tokens: [first.player_token, second.player_token],
            }
        }

        fn token(&self, player: Player) -> &str {
            &self.tokens[player.index()]
        }

        fn state(&self) -> GameState {
            self.service.repository().get(&self.id).unwrap()
        }

        fn current(&self) -> Player {
            self.state().current
        }

        fn place(&self, x: i32, y: i32) -> Result<Outcome<ActionResponse>, GameError> {
            let player = self.current();
            self.service.place_piece(&self.id, self.token(player), Position::new(x, y))
        }

        /// Replace the game's state, e.g. to set up a board.
        fn arrange<F: FnOnce(&mut GameState)>(&self, f: F) {
            let mut state = self.state();
            f(&mut state);
            self.service.repository().save(state);
        }
    }

    #[test]
    fn create_and_join() {
        let service = GameService::in_memory(Config::default());
        let seat = service.create_game();

        assert_eq!(seat.game_id.len(), 8);
        assert_eq!(seat.game_id, seat.game_id.to_uppercase());
        assert_eq!(seat.player_token.len(), 32);
        assert_eq!(seat.player_number, Player::One);
        assert_eq!(seat.status, Status::Waiting);

        let joined = service.join_game(&seat.game_id, None).unwrap();
        assert_eq!(joined.value.player_number, Player::Two);
        assert_eq!(joined.value.status, Status::Playing);
        assert_eq!(joined.announce_after, Some(Duration::from_millis(800)));
        assert_eq!(joined.notices, vec![Notice::except(
            joined.value.player_token.as_str(),
            GameEvent::OpponentJoined { message: "Your opponent has joined".into() },
        )]);

        match service.join_game(&seat.game_id, None) {
            Err(GameError::Full) => (),
            other => panic!("unexpected result: {:?}", other.map(|o| o.value)),
        }
    }

    #[test]
    fn rejoining_with_a_token_recovers_the_seat() {
        let game = Match::start();
        let rejoined = game.service.join_game(&game.id, Some(game.token(Player::One)))
            .unwrap();

        assert_eq!(rejoined.value.player_number, Player::One);
        assert_eq!(rejoined.value.player_token, game.token(Player::One));
        assert!(rejoined.notices.is_empty());

        let reconnected = game.service.reconnect_game(&game.id, game.token(Player::Two))
            .unwrap();
        assert_eq!(reconnected.player_number, Player::Two);

        match game.service.reconnect_game(&game.id, "nope") {
            Err(GameError::InvalidToken) => (),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn unknown_game() {
        let service = GameService::in_memory(Config::default());

        match service.game_state("ZZZZZZZZ", "token") {
            Err(GameError::NotFound) => (),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn cannot_play_before_opponent_joins() {
        let service = GameService::in_memory(Config::default());
        let seat = service.create_game();

        match service.place_piece(&seat.game_id, &seat.player_token, Position::new(0, 0)) {
            Err(GameError::Rule(RuleViolation::NotPlaying)) => (),
            other => panic!("unexpected result: {:?}", other.map(|o| o.value)),
        }
    }

    #[test]
    fn placing_notifies_opponent_and_passes_turn() {
        let game = Match::start();
        let player = game.current();
        let opponent = game.token(player.opponent()).to_string();

        let first = game.place(0, 0).unwrap();
        assert!(first.value.state.is_your_turn);
        assert_eq!(first.value.state.placement_remaining, 1);
        assert_eq!(first.notices, vec![Notice::except(game.token(player),
            GameEvent::OpponentPlaced { x: 0, y: 0, player })]);

        let second = game.place(1, 0).unwrap();
        assert!(!second.value.state.is_your_turn);
        assert_eq!(second.notices.len(), 2);
        assert_eq!(second.notices[1], Notice::only(opponent, GameEvent::YourTurn));
    }

    #[test]
    fn full_placement_enters_movement() {
        let game = Match::start();
        let mut last = None;

        for pos in placement::valid_placements(&game.state()) {
            last = Some(game.place(pos.x, pos.y).unwrap());
        }

        let last = last.unwrap();
        assert!(last.value.result.phase_changed);
        assert_eq!(last.value.state.phase, Phase::Movement);
        assert!(last.notices.iter().any(|notice|
            notice.event == GameEvent::PhaseChanged { phase: Phase::Movement }));

        // Only the refuge is empty, so the first move must enter it.
        let actions = game.service.valid_actions(&game.id, game.token(game.current()))
            .unwrap();
        match actions {
            ValidActions::Movement(ref moves) => {
                assert!(!moves.valid_moves.is_empty());
                assert!(moves.valid_moves.values().all(|to| to == &vec![REFUGE]));
            }
            ValidActions::Unavailable(_) => {
                // Player to move was walled in; the game is over.
                assert!(game.state().game_over);
            }
            other => panic!("unexpected actions: {:?}", other),
        }
    }

    #[test]
    fn capture_passes_the_turn() {
        let game = Match::start();
        let mover = game.current();
        let other = mover.opponent();

        game.arrange(|state| {
            state.phase = Phase::Movement;
            for &(x, y, owner) in &[
                (0, 1, mover),
                (1, 0, other),
                (2, 0, mover),
                (1, 3, other),
                (2, 3, mover),
                (4, 4, other),
            ] {
                state.board.set(Position::new(x, y), Some(owner));
            }
            state.pieces = [3, 3];
        });

        let outcome = game.service.move_piece(
            &game.id, game.token(mover), Position::new(0, 1), Position::new(0, 0))
            .unwrap();
        assert_eq!(outcome.value.result.captures, vec![Position::new(1, 0)]);
        assert!(!outcome.value.result.extra_turn);
        assert_eq!(game.state().pieces(other), 2);
        assert_eq!(game.current(), other);
        assert_eq!(outcome.notices.last(), Some(&Notice::only(
            game.token(other), GameEvent::YourTurn)));
    }

    #[test]
    fn chain_capture_grants_extra_turn() {
        let game = Match::start();
        let mover = game.current();
        let other = mover.opponent();

        game.arrange(|state| {
            state.phase = Phase::Movement;
            for &(x, y, owner) in &[
                (0, 1, mover),
                (0, 4, mover),
                (2, 1, mover),
                (0, 3, other),
                (1, 1, other),
                (4, 3, other),
                (4, 4, other),
            ] {
                state.board.set(Position::new(x, y), Some(owner));
            }
            state.pieces[mover.index()] = 3;
            state.pieces[other.index()] = 4;
        });

        // Landing on (0, 2) captures (0, 3); stepping back to (0, 1) would
        // then capture (1, 1).
        let first = game.service.move_piece(
            &game.id, game.token(mover), Position::new(0, 1), Position::new(0, 2))
            .unwrap();
        assert_eq!(first.value.result.captures, vec![Position::new(0, 3)]);
        assert!(first.value.result.extra_turn);
        assert_eq!(first.value.state.chain_capture_piece, Some((0, 2)));
        assert_eq!(first.notices.len(), 1);
        assert_eq!(game.current(), mover);

        match game.service.valid_actions(&game.id, game.token(mover)).unwrap() {
            ValidActions::Movement(moves) => {
                assert_eq!(moves.chain_capture, Some((0, 2)));
                assert_eq!(moves.valid_moves.keys().collect::<Vec<_>>(), vec!["0,2"]);
            }
            other => panic!("unexpected actions: {:?}", other),
        }

        match game.service.move_piece(
            &game.id, game.token(mover), Position::new(0, 4), Position::new(1, 4))
        {
            Err(GameError::Rule(RuleViolation::ChainPending(pos))) =>
                assert_eq!(pos, Position::new(0, 2)),
            other => panic!("unexpected result: {:?}", other.map(|o| o.value)),
        }

        let second = game.service.move_piece(
            &game.id, game.token(mover), Position::new(0, 2), Position::new(0, 1))
            .unwrap();
        assert_eq!(second.value.result.captures, vec![Position::new(1, 1)]);
        assert!(!second.value.result.extra_turn);
        assert_eq!(game.state().chain_piece, None);
        assert_eq!(game.current(), other);
    }

    #[test]
    fn reducing_opponent_below_two_pieces_wins() {
        let game = Match::start();
        let mover = game.current();
        let other = mover.opponent();

        game.arrange(|state| {
            state.phase = Phase::Movement;
            for &(x, y, owner) in &[
                (0, 1, mover),
                (2, 0, mover),
                (1, 0, other),
                (4, 4, other),
            ] {
                state.board.set(Position::new(x, y), Some(owner));
            }
            state.pieces = [2, 2];
        });

        let outcome = game.service.move_piece(
            &game.id, game.token(mover), Position::new(0, 1), Position::new(0, 0))
            .unwrap();
        let result = &outcome.value.result;
        assert!(result.game_over);
        assert_eq!(result.winner, Some(mover));
        assert_eq!(outcome.value.state.status, Status::Finished);
        assert!(outcome.notices.iter().any(|notice| match notice.event {
            GameEvent::GameOver { winner, .. } =>
                notice.target == Target::Everyone && winner == Some(mover),
            _ => false,
        }));

        assert!(!game.service.valid_actions(&game.id, game.token(other)).unwrap().can_act());
    }

    #[test]
    fn leaving_forfeits_then_deletes() {
        let game = Match::start();

        let first = game.service.leave_game(&game.id, game.token(Player::One)).unwrap();
        assert!(!first.value.game_deleted);
        assert_eq!(first.notices.len(), 2);
        assert!(first.notices.iter()
            .all(|notice| notice.target == Target::Only(game.token(Player::Two).into())));

        let state = game.state();
        assert_eq!(state.winner, Some(Player::Two));
        assert_eq!(state.status, Status::Finished);
        assert_eq!(state.seat(Player::One), None);

        match game.service.rematch_game(&game.id, game.token(Player::Two)) {
            Err(GameError::OpponentGone) => (),
            other => panic!("unexpected result: {:?}", other.map(|o| o.value)),
        }

        let second = game.service.leave_game(&game.id, game.token(Player::Two)).unwrap();
        assert!(second.value.game_deleted);
        assert!(second.notices.is_empty());
        assert!(!game.service.repository().contains(&game.id));
    }

    #[test]
    fn leaving_a_finished_game_keeps_the_result() {
        let game = Match::start();

        game.arrange(|state| {
            state.phase = Phase::Movement;
            state.board.set(Position::new(0, 0), Some(Player::One));
            state.finish(Player::One);
        });

        let left = game.service.leave_game(&game.id, game.token(Player::One)).unwrap();
        assert!(!left.value.game_deleted);
        assert_eq!(left.notices, vec![Notice::only(
            game.token(Player::Two),
            GameEvent::OpponentLeft {
                message: "Your opponent left the game".into(),
            },
        )]);

        let state = game.state();
        assert_eq!(state.winner, Some(Player::One));
        assert_eq!(state.status, Status::Finished);
    }

    #[test]
    fn rematch_needs_both_players() {
        let game = Match::start();

        match game.service.rematch_game(&game.id, game.token(Player::One)) {
            Err(GameError::NotFinished) => (),
            other => panic!("unexpected result: {:?}", other.map(|o| o.value)),
        }

        game.arrange(|state| {
            state.phase = Phase::Movement;
            state.board.set(Position::new(0, 0), Some(Player::One));
            state.finish(Player::One);
        });

        let asked = game.service.rematch_game(&game.id, game.token(Player::One)).unwrap();
        assert!(!asked.value.rematch_started);
        assert_eq!(asked.value.current_player, None);
        assert_eq!(asked.notices, vec![Notice::only(
            game.token(Player::Two),
            GameEvent::RematchRequested {
                message: "Your opponent wants to play again".into(),
            },
        )]);

        let started = game.service.rematch_game(&game.id, game.token(Player::Two)).unwrap();
        assert!(started.value.rematch_started);
        let first = started.value.current_player.unwrap();
        assert_eq!(started.notices, vec![Notice::everyone(GameEvent::RematchStarted {
            phase: Phase::Placement,
            current_player: first,
        })]);

        let state = game.state();
        assert_eq!(state.status, Status::Playing);
        assert_eq!(state.board, crate::board::Board::new());
        assert_eq!(state.current, first);
        assert!(!state.game_over);
    }

    #[test]
    fn start_is_announced_only_while_playing() {
        let service = GameService::in_memory(Config::default());
        let seat = service.create_game();
        assert_eq!(service.start_announcement(&seat.game_id), None);

        service.join_game(&seat.game_id, None).unwrap();
        let current = service.repository().get(&seat.game_id).unwrap().current;
        assert_eq!(service.start_announcement(&seat.game_id), Some(Notice::everyone(
            GameEvent::GameStarted { phase: Phase::Placement, current_player: current })));
    }
}
