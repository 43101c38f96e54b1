//! Delivery of game events to players connected over WebSockets.

mod broker;

pub use self::broker::{
    Announce,
    Broker,
    Connect,
    CountListeners,
    Deliver,
    Disconnect,
    Event,
};
