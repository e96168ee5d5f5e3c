use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::messaging::broadcast_publisher::DEFAULT_CHANNEL_CAPACITY;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    pub database_url: String,
    #[serde(default = "default_broadcast_capacity")]
    pub broadcast_capacity: usize,
}

fn default_port() -> u16 {
    3000
}

fn default_broadcast_capacity() -> usize {
    DEFAULT_CHANNEL_CAPACITY
}

impl ServerConfig {
    /// Load settings from `<config_dir>/default.*` (optional) and the process
    /// environment (`PORT`, `DATABASE_URL`, `BROADCAST_CAPACITY`).
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        Self::load_with(config_dir, Environment::default().try_parsing(true))
    }

    pub fn load_with(config_dir: &str, environment: Environment) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("port", i64::from(default_port()))?
            .set_default("broadcast_capacity", default_broadcast_capacity() as i64)?
            .add_source(File::with_name(&format!("{}/default", config_dir)).required(false))
            // Environment variables win over the file (e.g. PORT=8080)
            .add_source(environment)
            .build()?;

        s.try_deserialize()
    }
}
