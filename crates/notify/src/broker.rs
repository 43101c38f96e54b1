use actix::prelude::*;
use log::{debug, error};
use seega_game::{GameEvent, Notice};
use std::{
    collections::hash_map::{Entry, HashMap},
    sync::Arc,
    time::Duration,
};

/// Broker game events to connected players.
#[derive(Default)]
pub struct Broker {
    /// Mapping from game ID to listeners connected to that game.
    games: HashMap<String, Vec<Listener>>,
}

struct Listener {
    /// Token of the player for whom this listener is registered.
    token: String,
    /// Connection to the listener.
    addr: Recipient<Event>,
}

impl Broker {
    /// Deliver notices about a game to its connected players.
    ///
    /// Must be called from within a running actix system. Notices are queued
    /// regardless of how busy the broker is.
    pub fn notify<I>(game: &str, notices: I)
    where
        I: IntoIterator<Item = Notice>,
    {
        let broker = Broker::from_registry();

        for notice in notices {
            broker.do_send(Deliver { game: game.to_string(), notice });
        }
    }

    /// Schedule a notice to be delivered after a delay.
    ///
    /// `check` is called once the delay elapses and decides what, if
    /// anything, should be delivered at that point.
    pub fn announce<F>(game: &str, after: Duration, check: F)
    where
        F: FnOnce() -> Option<Notice> + Send + 'static,
    {
        Broker::from_registry().do_send(Announce {
            game: game.to_string(),
            after,
            check: Box::new(check),
        });
    }
}

impl Actor for Broker {
    type Context = Context<Self>;
}

impl Supervised for Broker {
}

impl SystemService for Broker {
}

/// A player connects to a game.
///
/// A player has at most one connection to a game; connecting again replaces
/// the previous connection.
pub struct Connect {
    pub game: String,
    /// Token of the connecting player.
    pub token: String,
    /// Connection to the new listener.
    pub addr: Recipient<Event>,
}

impl Message for Connect {
    /// Number of players connected to the game, including the new one.
    type Result = usize;
}

impl Handler<Connect> for Broker {
    type Result = usize;

    fn handle(&mut self, msg: Connect, _: &mut Self::Context) -> usize {
        let Connect { game, token, addr } = msg;
        let listeners = self.games.entry(game).or_insert_with(Vec::new);

        listeners.retain(|l| l.token != token);
        listeners.push(Listener { token, addr });
        listeners.len()
    }
}

/// A player disconnects from a game.
pub struct Disconnect {
    pub game: String,
    /// Connection to the listener.
    pub addr: Recipient<Event>,
}

impl Message for Disconnect {
    type Result = ();
}

impl Handler<Disconnect> for Broker {
    type Result = ();

    fn handle(&mut self, msg: Disconnect, _: &mut Self::Context) {
        let Disconnect { game, addr } = msg;

        if let Entry::Occupied(mut entry) = self.games.entry(game) {
            entry.get_mut().retain(|l| l.addr != addr);

            if entry.get().is_empty() {
                entry.remove();
            }
        }
    }
}

/// Deliver a notice to listeners of a game.
pub struct Deliver {
    pub game: String,
    pub notice: Notice,
}

impl Message for Deliver {
    type Result = ();
}

impl Handler<Deliver> for Broker {
    type Result = ();

    fn handle(&mut self, msg: Deliver, ctx: &mut Self::Context) {
        let Deliver { game, notice: Notice { target, event } } = msg;

        let listeners = match self.games.get(&game) {
            Some(listeners) => listeners,
            None => {
                debug!("No players connected to game {}, dropping {:?}", game, event);
                return;
            }
        };

        let event = Event(Arc::new(event));

        for listener in listeners.iter().filter(|l| target.admits(&l.token)) {
            if let Err(err) = listener.addr.do_send(event.clone()) {
                error!("Can't send event to a player in game {}: {}", game, err);
                ctx.notify(Disconnect {
                    game: game.clone(),
                    addr: listener.addr.clone(),
                });
            }
        }
    }
}

/// Deliver a notice after a delay, if it is still relevant then.
pub struct Announce {
    pub game: String,
    pub after: Duration,
    pub check: Box<dyn FnOnce() -> Option<Notice> + Send>,
}

impl Message for Announce {
    type Result = ();
}

impl Handler<Announce> for Broker {
    type Result = ();

    fn handle(&mut self, msg: Announce, ctx: &mut Self::Context) {
        let Announce { game, after, check } = msg;

        ctx.run_later(after, move |_, ctx| {
            if let Some(notice) = check() {
                ctx.notify(Deliver { game, notice });
            }
        });
    }
}

/// Get number of players connected to a game.
pub struct CountListeners {
    pub game: String,
}

impl Message for CountListeners {
    type Result = usize;
}

impl Handler<CountListeners> for Broker {
    type Result = usize;

    fn handle(&mut self, msg: CountListeners, _: &mut Self::Context) -> usize {
        self.games.get(&msg.game).map_or(0, Vec::len)
    }
}

/// An event delivered to a listener.
#[derive(Clone, Debug)]
pub struct Event(pub Arc<GameEvent>);

impl Message for Event {
    type Result = ();
}
