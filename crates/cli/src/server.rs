//! Server administration.

use actix::System;
use actix_web::{App, HttpServer, middleware::{Compress, Logger}};
use failure::Error;
use log::info;
use seega_game::GameService;
use structopt::StructOpt;

use crate::Config;

#[derive(StructOpt)]
pub struct Opts {
    #[structopt(subcommand)]
    command: Command,
}

#[derive(StructOpt)]
pub enum Command {
    /// Start the server
    #[structopt(name = "start")]
    Start,
}

pub fn main(cfg: Config, opts: Opts) -> Result<(), Error> {
    match opts.command {
        Command::Start => start(cfg),
    }
}

pub fn start(config: Config) -> Result<(), Error> {
    let system = System::new("seega");

    let games = GameService::in_memory(config.game.clone());
    let server_config = config.server.clone();

    let server = HttpServer::new(move ||
        App::new()
            .data(games.clone())
            .data(server_config.clone())
            .wrap(seega_rest_api::cors())
            .wrap(Logger::default())
            .wrap(Compress::default())
            .configure(seega_rest_api::configure)
    );

    let server = if let Some(fd) = listenfd::ListenFd::from_env().take_tcp_listener(0)? {
        info!("Listening on inherited socket {:?}", fd.local_addr()?);
        server.listen(fd)?
    } else {
        info!("Listening on {}", config.server.address);
        server.bind(config.server.address)?
    };

    server.start();

    system.run()?;

    Ok(())
}
