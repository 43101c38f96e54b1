use actix_web::{
    HttpRequest,
    HttpResponse,
    http::StatusCode,
    web::{self, Data, Json, JsonConfig, Path, Payload, Query, ServiceConfig},
};
use actix_web_actors::ws;
use failure::Fail;
use seega_error::{ApiError, Error};
use seega_game::{
    ActionResponse,
    GameService,
    GameView,
    LeaveReport,
    Outcome,
    Position,
    RematchReport,
    SeatInfo,
    ValidActions,
    board::SIZE,
};
use seega_notify::Broker;
use serde::Deserialize;
use std::borrow::Cow;

use crate::{Config, Result, extractors::{AuthError, Bearer}, socket::Session};

/// Configure routes.
pub fn configure(app: &mut ServiceConfig) {
    app
        .route("/games", web::post().to(create_game))
        .route("/games/{id}", web::get().to(game_state))
        .route("/games/{id}/join", web::post().to(join_game))
        .route("/games/{id}/reconnect", web::post().to(reconnect_game))
        .service(web::resource("/games/{id}/place")
            .data(json_config())
            .route(web::post().to(place_piece))
        )
        .service(web::resource("/games/{id}/move")
            .data(json_config())
            .route(web::post().to(move_piece))
        )
        .route("/games/{id}/valid-actions", web::get().to(valid_actions))
        .route("/games/{id}/leave", web::delete().to(leave_game))
        .route("/games/{id}/rematch", web::post().to(rematch_game))
        .route("/games/{id}/connect", web::get().to(connect))
    ;
}

/// Report malformed action bodies as unprocessable.
fn json_config() -> JsonConfig {
    JsonConfig::default()
        .limit(4096)
        .error_handler(|err, _| Error::from(RequestError::Body(err.to_string())).into())
}

/// Forward notices produced by an operation to connected players.
fn dispatch<T>(games: &GameService, game: &str, outcome: Outcome<T>) -> T {
    let Outcome { value, notices, announce_after } = outcome;

    Broker::notify(game, notices);

    if let Some(delay) = announce_after {
        let games = games.clone();
        let id = game.to_string();
        Broker::announce(game, delay, move || games.start_announcement(&id));
    }

    value
}

/// Create a new game.
///
/// ## Method
///
/// ```text
/// POST /games
/// ```
fn create_game(games: Data<GameService>) -> Json<SeatInfo> {
    Json(games.create_game())
}

/// Join a game as its second player.
///
/// A player who is already seated can pass their token to recover their
/// seat. An unusable `Authorization` header is ignored.
///
/// ## Method
///
/// ```text
/// POST /games/:id/join
/// ```
fn join_game(games: Data<GameService>, id: Path<String>, token: Option<Bearer>)
-> Result<Json<SeatInfo>> {
    let outcome = games.join_game(&id, token.as_ref().map(Bearer::token))?;
    Ok(Json(dispatch(&games, &id, outcome)))
}

/// Recover a seat in a game.
///
/// ## Method
///
/// ```text
/// POST /games/:id/reconnect
/// ```
fn reconnect_game(games: Data<GameService>, id: Path<String>, token: Bearer)
-> Result<Json<SeatInfo>> {
    Ok(Json(games.reconnect_game(&id, &token)?))
}

/// Get state of a game.
///
/// ## Method
///
/// ```text
/// GET /games/:id
/// ```
fn game_state(games: Data<GameService>, id: Path<String>, token: Bearer)
-> Result<Json<GameView>> {
    Ok(Json(games.game_state(&id, &token)?))
}

#[derive(Deserialize)]
struct PlaceAction {
    x: i32,
    y: i32,
}

/// Place a piece.
///
/// ## Method
///
/// ```text
/// POST /games/:id/place
/// ```
fn place_piece(
    games: Data<GameService>,
    id: Path<String>,
    token: Bearer,
    data: Json<PlaceAction>,
) -> Result<Json<ActionResponse>> {
    let pos = coordinates(data.x, data.y)?;
    let outcome = games.place_piece(&id, &token, pos)?;
    Ok(Json(dispatch(&games, &id, outcome)))
}

#[derive(Deserialize)]
struct MoveAction {
    from_x: i32,
    from_y: i32,
    to_x: i32,
    to_y: i32,
}

/// Move a piece.
///
/// ## Method
///
/// ```text
/// POST /games/:id/move
/// ```
fn move_piece(
    games: Data<GameService>,
    id: Path<String>,
    token: Bearer,
    data: Json<MoveAction>,
) -> Result<Json<ActionResponse>> {
    let from = coordinates(data.from_x, data.from_y)?;
    let to = coordinates(data.to_x, data.to_y)?;
    let outcome = games.move_piece(&id, &token, from, to)?;
    Ok(Json(dispatch(&games, &id, outcome)))
}

/// Get actions available to the current player.
///
/// ## Method
///
/// ```text
/// GET /games/:id/valid-actions
/// ```
fn valid_actions(games: Data<GameService>, id: Path<String>, token: Bearer)
-> Result<Json<ValidActions>> {
    Ok(Json(games.valid_actions(&id, &token)?))
}

/// Leave a game.
///
/// ## Method
///
/// ```text
/// DELETE /games/:id/leave
/// ```
fn leave_game(games: Data<GameService>, id: Path<String>, token: Bearer)
-> Result<Json<LeaveReport>> {
    let outcome = games.leave_game(&id, &token)?;
    Ok(Json(dispatch(&games, &id, outcome)))
}

/// Ask for a rematch of a finished game.
///
/// ## Method
///
/// ```text
/// POST /games/:id/rematch
/// ```
fn rematch_game(games: Data<GameService>, id: Path<String>, token: Bearer)
-> Result<Json<RematchReport>> {
    let outcome = games.rematch_game(&id, &token)?;
    Ok(Json(dispatch(&games, &id, outcome)))
}

#[derive(Deserialize)]
struct ConnectQuery {
    token: Option<String>,
}

/// Open a WebSocket receiving events of a game.
///
/// ## Method
///
/// ```text
/// GET /games/:id/connect?token=:token
/// ```
fn connect(
    req: HttpRequest,
    games: Data<GameService>,
    config: Data<Config>,
    id: Path<String>,
    query: Query<ConnectQuery>,
    stream: Payload,
) -> Result<HttpResponse, actix_web::Error> {
    let token = query.into_inner().token.ok_or(AuthError::Missing).map_err(Error::from)?;
    let player = games.seat_of(&id, &token).map_err(Error::from)?;

    let session = Session::new(
        games.get_ref().clone(),
        id.into_inner(),
        token,
        player,
        config.heartbeat(),
    );

    ws::start(session, &req, stream)
}

/// Validate coordinates of a cell.
fn coordinates(x: i32, y: i32) -> Result<Position, RequestError> {
    if (0..SIZE).contains(&x) && (0..SIZE).contains(&y) {
        Ok(Position::new(x, y))
    } else {
        Err(RequestError::OutOfRange)
    }
}

#[derive(Debug, Fail)]
enum RequestError {
    #[fail(display = "Coordinates must be between 0 and 4")]
    OutOfRange,
    #[fail(display = "Invalid request body: {}", _0)]
    Body(String),
}

impl ApiError for RequestError {
    fn status(&self) -> StatusCode {
        StatusCode::UNPROCESSABLE_ENTITY
    }

    fn code(&self) -> Option<Cow<str>> {
        Some(match self {
            RequestError::OutOfRange => "request:out-of-range",
            RequestError::Body(_) => "request:invalid-body",
        }.into())
    }
}
