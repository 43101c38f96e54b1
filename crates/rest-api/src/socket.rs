use actix::{
    Actor,
    ActorContext,
    ActorFuture,
    AsyncContext,
    ContextFutureSpawner,
    Handler,
    Running,
    StreamHandler,
    SystemService,
    WrapFuture,
};
use actix_web_actors::ws::{self, WebsocketContext};
use log::{debug, error};
use seega_error::Error;
use seega_game::{GameEvent, GameService, Player};
use seega_notify::{Broker, Connect, Disconnect, Event};
use serde::Deserialize;
use std::time::{Duration, Instant};

/// How often a session checks whether its client has gone quiet.
const IDLE_CHECK_INTERVAL: Duration = Duration::from_secs(1);

/// A player's live connection to a game.
///
/// Events concerning the game are pushed to the client as JSON text
/// messages. Clients may send `{"type": "ping"}` and receive
/// `{"type": "pong"}`; when a client stays silent for a while the server
/// sends `{"type": "ping"}` itself.
pub struct Session {
    games: GameService,
    game: String,
    token: String,
    player: Player,
    heartbeat: Duration,
    /// Time of the last message received from the client, or of the last
    /// ping sent to it, whichever is later.
    quiet_since: Instant,
}

impl Session {
    pub fn new(
        games: GameService,
        game: String,
        token: String,
        player: Player,
        heartbeat: Duration,
    ) -> Session {
        Session {
            games,
            game,
            token,
            player,
            heartbeat,
            quiet_since: Instant::now(),
        }
    }

    fn send(&self, ctx: &mut WebsocketContext<Self>, event: &GameEvent) {
        match serde_json::to_string(event) {
            Ok(text) => ctx.text(text),
            Err(err) => error!("Could not serialize event {:?}: {}", event, err),
        }
    }
}

impl Actor for Session {
    type Context = WebsocketContext<Self>;

    /// Register this session with the broker.
    fn started(&mut self, ctx: &mut Self::Context) {
        debug!("Player {} connected to game {}", self.player, self.game);

        self.send(ctx, &GameEvent::Connected {
            message: "Connected to the game".to_string(),
        });

        Broker::from_registry()
            .send(Connect {
                game: self.game.clone(),
                token: self.token.clone(),
                addr: ctx.address().recipient(),
            })
            .into_actor(self)
            .then(|result, session, ctx| {
                match result {
                    // Both players are here; make sure they know the game is
                    // on, even if they missed the announcement.
                    Ok(connected) if connected >= 2 => {
                        let notice = session.games.start_announcement(&session.game);
                        Broker::notify(&session.game, notice);
                    }
                    Ok(_) => (),
                    Err(err) => {
                        let err = Error::from(err);
                        error!("Could not register player in game {}: {}",
                            session.game, err);
                        ctx.stop();
                    }
                }
                actix::fut::ok(())
            })
            .wait(ctx);

        let interval = std::cmp::min(self.heartbeat, IDLE_CHECK_INTERVAL);

        ctx.run_interval(interval, |session, ctx| {
            if session.quiet_since.elapsed() >= session.heartbeat {
                session.quiet_since = Instant::now();
                session.send(ctx, &GameEvent::Ping);
            }
        });
    }

    /// Unregister from the broker.
    ///
    /// The opponent is not notified, as the player may simply be reloading.
    fn stopping(&mut self, ctx: &mut Self::Context) -> Running {
        debug!("Player {} disconnected from game {}", self.player, self.game);

        Broker::from_registry()
            .do_send(Disconnect {
                game: self.game.clone(),
                addr: ctx.address().recipient(),
            });

        Running::Stop
    }
}

#[derive(Deserialize)]
struct ClientMessage {
    #[serde(rename = "type")]
    kind: Option<String>,
}

impl StreamHandler<ws::Message, ws::ProtocolError> for Session {
    fn handle(&mut self, msg: ws::Message, ctx: &mut Self::Context) {
        self.quiet_since = Instant::now();

        match msg {
            ws::Message::Ping(msg) => ctx.pong(&msg),
            ws::Message::Text(text) => {
                // Messages which are not JSON are ignored.
                if let Ok(msg) = serde_json::from_str::<ClientMessage>(&text) {
                    if msg.kind.as_ref().map(String::as_str) == Some("ping") {
                        self.send(ctx, &GameEvent::Pong);
                    }
                }
            }
            ws::Message::Close(_) => ctx.stop(),
            _ => (),
        }
    }
}

impl Handler<Event> for Session {
    type Result = ();

    fn handle(&mut self, msg: Event, ctx: &mut Self::Context) {
        self.send(ctx, &msg.0);
    }
}
