use failure::Fail;
use log::LevelFilter;
use serde::Deserialize;
use std::{collections::HashMap, env, fs, io};

use crate::Result;

/// Path of the configuration file.
const CONFIG_FILE: &str = "config.toml";

/// Load configuration.
///
/// A missing configuration file is not an error; defaults are used instead.
/// Port set in the `PORT` environment variable takes precedence over the
/// configured one.
pub fn load() -> Result<Config> {
    let mut config = match fs::read(CONFIG_FILE) {
        Ok(data) => toml::from_slice(&data).map_err(ConfigurationError)?,
        Err(ref err) if err.kind() == io::ErrorKind::NotFound => Config::default(),
        Err(err) => return Err(ReadConfigurationError(err).into()),
    };

    if let Ok(port) = env::var("PORT") {
        config.override_port(&port)?;
    }

    Ok(config)
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: seega_rest_api::Config,
    #[serde(default)]
    pub game: seega_game::Config,
    #[serde(default)]
    pub logging: Logging,
}

impl Config {
    /// Listen on `port` instead of the configured port.
    pub fn override_port(&mut self, port: &str) -> Result<(), InvalidPortError> {
        let port = port.trim().parse()
            .map_err(|_| InvalidPortError(port.to_string()))?;
        self.server.address.set_port(port);
        Ok(())
    }
}

/// Logging configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct Logging {
    /// Default logging level.
    #[serde(default = "default_level_filter")]
    pub level: LevelFilter,
    /// Actix-web logging level.
    pub network: Option<LevelFilter>,
    /// Custom filters.
    #[serde(default)]
    pub filters: HashMap<String, LevelFilter>,
}

#[derive(Debug, Fail)]
#[fail(display = "Cannot read configuration file")]
pub struct ReadConfigurationError(#[fail(cause)] io::Error);

#[derive(Debug, Fail)]
#[fail(display = "Invalid configuration: {}", _0)]
pub struct ConfigurationError(#[fail(cause)] toml::de::Error);

#[derive(Debug, Fail)]
#[fail(display = "Invalid port: {:?}", _0)]
pub struct InvalidPortError(String);

fn default_level_filter() -> LevelFilter {
    LevelFilter::Info
}

impl Default for Logging {
    fn default() -> Self {
        Logging {
            level: default_level_filter(),
            network: None,
            filters: HashMap::new(),
        }
    }
}
